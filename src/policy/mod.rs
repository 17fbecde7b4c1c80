//! Policies for the phases of the MCTS algorithm
//!
//! - Selection policies: how to choose which child to descend into
//! - Simulation policies: how to play out games from a node
//! - Backpropagation policies: how to update node statistics

pub mod backpropagation;
pub mod selection;
pub mod simulation;

pub use backpropagation::{BackpropagationPolicy, StandardPolicy};
pub use selection::{SelectionPolicy, UCB1Policy};
pub use simulation::{RandomPolicy, Rollout, SimulationPolicy};
