//! Greedy forward-checking assignment.
//!
//! Tasks are processed in index order; each takes the cheapest worker not
//! yet claimed by an earlier task. Deterministic, O(n²), no optimality
//! guarantee. Useful as a fast baseline to cross-check the annealer.

use super::cost::evaluate;
use super::matrix::CostMatrix;
use super::permutation::Permutation;
use super::Assignment;

/// Builds the greedy assignment for `matrix`.
///
/// Ties between equally cheap free workers go to the lowest worker index.
///
/// # Examples
///
/// ```
/// use u_assign::assignment::{greedy_assignment, CostMatrix};
///
/// let m = CostMatrix::new(vec![
///     vec![4.0, 5.0, 6.0],
///     vec![2.0, 4.0, 6.0],
///     vec![3.0, 5.0, 7.0],
/// ]).unwrap();
/// assert_eq!(greedy_assignment(&m).as_slice(), &[0, 1, 2]);
/// ```
pub fn greedy_assignment(matrix: &CostMatrix) -> Permutation {
    let n = matrix.size();
    let mut assigned = vec![false; n];
    let mut workers = Vec::with_capacity(n);

    for row in matrix.rows() {
        let mut pick: Option<(usize, f64)> = None;
        for (worker, &cost) in row.iter().enumerate() {
            if assigned[worker] {
                continue;
            }
            // strict: first index wins ties
            if pick.is_none_or(|(_, best)| cost < best) {
                pick = Some((worker, cost));
            }
        }
        // n tasks, n workers: a free worker always remains
        let Some((worker, _)) = pick else {
            unreachable!("no free worker left for task {}", workers.len());
        };
        assigned[worker] = true;
        workers.push(worker);
    }

    Permutation::from_vec_unchecked(workers)
}

/// Runs the greedy heuristic and scores the result.
pub fn solve_greedy(matrix: &CostMatrix) -> Assignment {
    let permutation = greedy_assignment(matrix);
    let cost = evaluate(&permutation, matrix);
    log::debug!("greedy assignment: cost={cost:.4}");
    Assignment { permutation, cost }
}
