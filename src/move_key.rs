//! Canonical move identity.

use std::fmt;

/// An (origin, destination) pair used to index and deduplicate moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveKey<P> {
    /// Square the piece leaves
    pub origin: P,
    /// Square the piece lands on
    pub destination: P,
}

impl<P> MoveKey<P> {
    /// Creates a key for the move `origin -> destination`
    pub fn new(origin: P, destination: P) -> Self {
        MoveKey {
            origin,
            destination,
        }
    }

    /// Returns the move as an (origin, destination) tuple
    pub fn into_pair(self) -> (P, P) {
        (self.origin, self.destination)
    }
}

impl<P> From<(P, P)> for MoveKey<P> {
    fn from((origin, destination): (P, P)) -> Self {
        MoveKey::new(origin, destination)
    }
}

impl<P: fmt::Debug> fmt::Display for MoveKey<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}->{:?}", self.origin, self.destination)
    }
}
