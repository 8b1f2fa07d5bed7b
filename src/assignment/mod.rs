//! The square assignment problem.
//!
//! Given an n×n [`CostMatrix`] indexed `[task][worker]`, find a one-to-one
//! [`Permutation`] of workers to tasks with minimal total cost.
//!
//! Two solvers share the `CostMatrix -> assignment` contract:
//!
//! - [`solve_annealing`]: simulated annealing with reheating (see
//!   [`crate::sa`]), stochastic, seedable.
//! - [`solve_greedy`]: greedy forward checking, deterministic, O(n²).
//!
//! Neither is exact.

mod annealing;
mod cost;
mod greedy;
mod matrix;
mod permutation;
mod report;

#[cfg(feature = "parallel")]
pub use annealing::solve_annealing_restarts;
pub use annealing::{anneal_with_rng, solve_annealing, AssignmentProblem};
pub use cost::evaluate;
pub use greedy::{greedy_assignment, solve_greedy};
pub use matrix::CostMatrix;
pub use permutation::Permutation;
pub use report::{AssignmentReport, ReportRow};

/// A solver's answer: the permutation and its total cost.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    pub permutation: Permutation,
    pub cost: f64,
}

impl Assignment {
    /// Per-task breakdown against the matrix this assignment was solved on.
    pub fn report(&self, matrix: &CostMatrix) -> AssignmentReport {
        AssignmentReport::new(&self.permutation, matrix)
    }
}
