//! Square assignment problem solvers.
//!
//! Assigns n tasks to n workers one-to-one, minimizing the summed cost
//! from an n×n cost matrix.
//!
//! - **Simulated Annealing (SA)**: generic single-solution engine with
//!   geometric cooling, Metropolis acceptance and periodic reheating
//!   ([`sa`]), bound to permutations by [`assignment::AssignmentProblem`].
//! - **Greedy forward checking**: deterministic baseline that gives each
//!   task, in order, its cheapest free worker.
//!
//! All randomness is injected through a `rand::Rng`, so seeded runs are
//! reproducible.
//!
//! # Examples
//!
//! ```
//! use u_assign::assignment::{solve_annealing, solve_greedy, CostMatrix};
//! use u_assign::sa::SaConfig;
//!
//! let m = CostMatrix::new(vec![
//!     vec![4.0, 5.0, 6.0],
//!     vec![2.0, 4.0, 6.0],
//!     vec![3.0, 5.0, 7.0],
//! ]).unwrap();
//!
//! let greedy = solve_greedy(&m);
//! let annealed = solve_annealing(&m, &SaConfig::default().with_seed(1)).unwrap();
//! assert!(annealed.cost <= greedy.cost);
//! println!("{}", annealed.report(&m));
//! ```

pub mod assignment;
pub mod error;
pub mod sa;

pub use error::{AssignError, Result};
