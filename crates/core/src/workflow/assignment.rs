//! Depositor assignment at the operator-approval step.
//!
//! Selection is a pluggable strategy so policies other than uniform random
//! (round-robin, least-loaded) can be substituted without touching the
//! transition engine.

use rand::seq::IndexedRandom;

use setora_shared::types::UserId;

/// Picks one user from a candidate set, or none if the set is empty.
pub trait AssignmentStrategy {
    /// Selects a candidate. An empty slice yields `None`, never an error.
    fn select(&self, candidates: &[UserId]) -> Option<UserId>;
}

/// Uniform random selection among the candidates.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomAssignment;

impl AssignmentStrategy for RandomAssignment {
    fn select(&self, candidates: &[UserId]) -> Option<UserId> {
        candidates.choose(&mut rand::rng()).copied()
    }
}
