//! Core trait for Simulated Annealing.

use rand::Rng;

/// Defines a Simulated Annealing problem.
///
/// The implementor supplies the initial solution, neighbor generation and
/// cost evaluation. The engine handles temperature management, the
/// Metropolis acceptance rule, best-so-far tracking and reheating.
///
/// SA minimizes the cost function. For maximization, negate the cost.
///
/// # Examples
///
/// ```
/// use rand::Rng;
/// use u_assign::sa::SaProblem;
///
/// struct Line;
///
/// impl SaProblem for Line {
///     type Solution = i64;
///
///     fn initial_solution<R: Rng>(&self, rng: &mut R) -> i64 {
///         rng.random_range(-100..100)
///     }
///
///     fn cost(&self, x: &i64) -> f64 {
///         (*x as f64).abs()
///     }
///
///     fn neighbor<R: Rng>(&self, x: &i64, rng: &mut R) -> i64 {
///         if rng.random_bool(0.5) { x + 1 } else { x - 1 }
///     }
/// }
/// ```
pub trait SaProblem: Send + Sync {
    /// The solution representation type.
    type Solution: Clone + Send;

    /// Creates a random initial solution.
    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Self::Solution;

    /// Computes the cost of a solution. Lower is better.
    fn cost(&self, solution: &Self::Solution) -> f64;

    /// Generates a neighbor of `solution` without mutating it.
    ///
    /// The neighborhood must be connected: any solution reachable from
    /// any other via a sequence of moves.
    fn neighbor<R: Rng>(&self, solution: &Self::Solution, rng: &mut R) -> Self::Solution;
}
