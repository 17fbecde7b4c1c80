//! Tree data structures for Monte Carlo Tree Search
//!
//! Nodes live in an arena owned by [`SearchTree`] and refer to each other by
//! [`NodeId`]. A node owns its board snapshot outright; parents are plain
//! indices, so the tree has no shared ownership and no reference cycles.

use std::collections::{HashMap, VecDeque};
use std::fmt;

use crate::board::{Board, Color};
use crate::enumerator;
use crate::move_key::MoveKey;
use crate::policy::BackpropagationPolicy;

/// Index of a node inside a [`SearchTree`] arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// Position of the node in the arena
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Represents one reachable game state in the search tree
pub struct TreeNode<B: Board> {
    /// Board snapshot owned by this node
    pub state: B,

    /// Player to move in `state`
    pub mover: Color,

    /// Parent node (None for the root)
    pub parent: Option<NodeId>,

    /// The move that produced this node from its parent (None for the root)
    pub originating_move: Option<MoveKey<B::Position>>,

    /// Children in enumeration order
    children: Vec<NodeId>,

    /// Children indexed by the move leading to them
    child_index: HashMap<MoveKey<B::Position>, NodeId>,

    /// True once every legal child has been created
    pub expanded: bool,

    /// Number of iterations that passed through this node
    pub visits: u64,

    /// Number of those iterations won by the player who moved into this node
    pub wins: u64,
}

impl<B: Board> TreeNode<B> {
    /// Creates an unexpanded node for `state`
    pub fn new(
        state: B,
        parent: Option<NodeId>,
        originating_move: Option<MoveKey<B::Position>>,
    ) -> Self {
        let mover = state.turn();
        TreeNode {
            state,
            mover,
            parent,
            originating_move,
            children: Vec::new(),
            child_index: HashMap::new(),
            expanded: false,
            visits: 0,
            wins: 0,
        }
    }

    /// Child ids in the order the moves were enumerated
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Looks up the child reached by `key`
    pub fn child(&self, key: &MoveKey<B::Position>) -> Option<NodeId> {
        self.child_index.get(key).copied()
    }

    /// True if the game is over in this node's state
    pub fn is_terminal(&self) -> bool {
        self.state.is_game_over()
    }

    /// Win ratio of this node, 0 when unvisited
    pub fn win_ratio(&self) -> f64 {
        crate::utils::win_rate(self.wins, self.visits)
    }
}

/// Arena holding every node of the current search tree
pub struct SearchTree<B: Board> {
    nodes: Vec<TreeNode<B>>,
    root: NodeId,
}

impl<B: Board> SearchTree<B> {
    /// Creates a tree holding a single, unexpanded root built from a copy of `board`
    pub fn new(board: &B) -> Self {
        SearchTree {
            nodes: vec![TreeNode::new(board.clone(), None, None)],
            root: NodeId(0),
        }
    }

    /// The current root
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the node with the given id
    pub fn get(&self, id: NodeId) -> &TreeNode<B> {
        &self.nodes[id.index()]
    }

    /// Returns the node with the given id mutably
    pub fn get_mut(&mut self, id: NodeId) -> &mut TreeNode<B> {
        &mut self.nodes[id.index()]
    }

    /// Number of nodes held by the arena
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the arena holds no nodes (never the case for a constructed tree)
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Distance from the root to `id`
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.get(id).parent;
        while let Some(parent) = current {
            depth += 1;
            current = self.get(parent).parent;
        }
        depth
    }

    /// Creates a child of `parent` for the move `key` and returns its id.
    ///
    /// If a child for `key` already exists it is returned unchanged.
    pub fn add_child(&mut self, parent: NodeId, key: MoveKey<B::Position>, state: B) -> NodeId {
        if let Some(existing) = self.get(parent).child(&key) {
            return existing;
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(TreeNode::new(state, Some(parent), Some(key)));

        let parent_node = self.get_mut(parent);
        parent_node.children.push(id);
        parent_node.child_index.insert(key, id);
        id
    }

    /// Creates a child for every legal move of `id` and marks it expanded.
    ///
    /// Each child gets its own copy of the parent board with the move played.
    /// Terminal nodes are marked expanded without children. Returns the number
    /// of children created.
    pub fn expand(&mut self, id: NodeId) -> usize {
        if self.get(id).expanded {
            return 0;
        }
        if self.get(id).is_terminal() {
            self.get_mut(id).expanded = true;
            return 0;
        }

        let state = &self.get(id).state;
        let moves = enumerator::legal_moves(state);
        let mut children = Vec::with_capacity(moves.len());
        for key in moves {
            let mut next = state.clone();
            match next.apply_move(key.origin, key.destination) {
                Ok(()) => children.push((key, next)),
                Err(err) => log::warn!("Rules engine rejected enumerated move {}: {}", key, err),
            }
        }

        let created = children.len();
        for (key, state) in children {
            self.add_child(id, key, state);
        }
        self.get_mut(id).expanded = true;
        created
    }

    /// Applies `policy` to every node from `leaf` up to and including the root.
    ///
    /// Returns the number of nodes updated.
    pub fn backpropagate<P>(&mut self, leaf: NodeId, winner: Option<Color>, policy: &P) -> usize
    where
        P: BackpropagationPolicy<B> + ?Sized,
    {
        let mut touched = 0;
        let mut current = Some(leaf);
        while let Some(id) = current {
            let node = self.get_mut(id);
            policy.update_stats(node, winner);
            current = node.parent;
            touched += 1;
        }
        touched
    }

    /// Makes `new_root` the root and drops every node outside its subtree.
    ///
    /// Statistics of the retained nodes are kept as they are. Node ids are
    /// reassigned, so ids taken before the call are invalid afterwards.
    pub fn reroot(&mut self, new_root: NodeId) {
        let mut old: Vec<Option<TreeNode<B>>> =
            std::mem::take(&mut self.nodes).into_iter().map(Some).collect();

        let mut remap: HashMap<NodeId, NodeId> = HashMap::new();
        let mut queue = VecDeque::from([new_root]);
        while let Some(old_id) = queue.pop_front() {
            let Some(node) = old.get_mut(old_id.index()).and_then(Option::take) else {
                continue;
            };
            remap.insert(old_id, NodeId(self.nodes.len()));
            queue.extend(node.children.iter().copied());
            self.nodes.push(node);
        }

        for node in &mut self.nodes {
            node.parent = node.parent.and_then(|p| remap.get(&p).copied());
            for child in &mut node.children {
                *child = remap[&*child];
            }
            for child in node.child_index.values_mut() {
                *child = remap[&*child];
            }
        }

        self.root = NodeId(0);
        let root = self.get_mut(self.root);
        root.parent = None;
        root.originating_move = None;
    }
}
