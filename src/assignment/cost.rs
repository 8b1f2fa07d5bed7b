//! Assignment cost evaluation.

use super::matrix::CostMatrix;

/// Total cost of `assignment` against `matrix`: the sum over tasks `t` of
/// `matrix[(t, assignment[t])]`. O(n), no side effects.
///
/// Accepts a [`Permutation`](super::Permutation) or any worker slice.
///
/// # Panics
/// Panics if the length differs from the matrix size or a worker index is
/// out of range. Both indicate a caller bug.
///
/// # Examples
///
/// ```
/// use u_assign::assignment::{evaluate, CostMatrix, Permutation};
///
/// let m = CostMatrix::new(vec![vec![4.0, 5.0], vec![2.0, 4.0]]).unwrap();
/// assert_eq!(evaluate(&Permutation::identity(2), &m), 8.0);
/// assert_eq!(evaluate(&[1usize, 0], &m), 7.0);
/// ```
pub fn evaluate<A: AsRef<[usize]> + ?Sized>(assignment: &A, matrix: &CostMatrix) -> f64 {
    let workers = assignment.as_ref();
    let n = matrix.size();
    assert_eq!(
        workers.len(),
        n,
        "assignment has {} tasks, matrix has {n}",
        workers.len()
    );
    workers
        .iter()
        .enumerate()
        .map(|(task, &worker)| {
            assert!(worker < n, "task {task} maps to worker {worker}, outside 0..{n}");
            matrix.row(task)[worker]
        })
        .sum()
}
