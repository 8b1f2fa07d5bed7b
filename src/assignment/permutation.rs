//! Task → worker permutations and the swap move.

use crate::error::{AssignError, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use std::ops::Index;

/// A one-to-one assignment: position = task, value = assigned worker.
///
/// Every value in `0..len` appears exactly once. Constructors check this
/// and [`swap_neighbor`](Self::swap_neighbor) preserves it, so a
/// `Permutation` is never partially valid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<usize>", into = "Vec<usize>"))]
pub struct Permutation(Vec<usize>);

impl Permutation {
    /// The identity assignment `[0, 1, ..., n-1]`.
    pub fn identity(n: usize) -> Self {
        Self((0..n).collect())
    }

    /// Draws a permutation of `0..n` uniformly at random (Fisher-Yates).
    ///
    /// # Panics
    /// Panics if `n < 2`: no swap neighbor exists below two tasks.
    pub fn random<R: Rng>(n: usize, rng: &mut R) -> Self {
        assert!(n >= 2, "permutation size must be at least 2, got {n}");
        let mut workers: Vec<usize> = (0..n).collect();
        workers.shuffle(rng);
        Self(workers)
    }

    /// Validates `workers` as a permutation of `0..workers.len()`.
    pub fn try_from_vec(workers: Vec<usize>) -> Result<Self> {
        let n = workers.len();
        let mut seen = vec![false; n];
        for (task, &worker) in workers.iter().enumerate() {
            if worker >= n {
                return Err(AssignError::InvalidPermutation(format!(
                    "task {task} maps to worker {worker}, outside 0..{n}"
                )));
            }
            if std::mem::replace(&mut seen[worker], true) {
                return Err(AssignError::InvalidPermutation(format!(
                    "worker {worker} assigned more than once"
                )));
            }
        }
        Ok(Self(workers))
    }

    /// Wraps `workers` known to be a permutation by construction.
    pub(crate) fn from_vec_unchecked(workers: Vec<usize>) -> Self {
        debug_assert!(Self::try_from_vec(workers.clone()).is_ok());
        Self(workers)
    }

    /// Returns a copy with the workers of two distinct, uniformly chosen
    /// tasks exchanged. `self` is left untouched.
    ///
    /// # Panics
    /// Panics if the permutation has fewer than two entries.
    pub fn swap_neighbor<R: Rng>(&self, rng: &mut R) -> Self {
        let n = self.0.len();
        assert!(n >= 2, "swap needs at least 2 tasks, got {n}");
        let (i, j) = distinct_pair(n, rng);
        let mut next = self.clone();
        next.0.swap(i, j);
        next
    }

    /// Number of tasks.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Worker assigned to `task`.
    pub fn worker(&self, task: usize) -> usize {
        self.0[task]
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }
}

/// Two distinct indices in `0..n`, uniform over all unordered pairs.
fn distinct_pair<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let i = rng.random_range(0..n);
    let mut j = rng.random_range(0..n - 1);
    if j >= i {
        j += 1;
    }
    (i, j)
}

impl Index<usize> for Permutation {
    type Output = usize;

    fn index(&self, task: usize) -> &usize {
        &self.0[task]
    }
}

impl AsRef<[usize]> for Permutation {
    fn as_ref(&self) -> &[usize] {
        &self.0
    }
}

impl TryFrom<Vec<usize>> for Permutation {
    type Error = AssignError;

    fn try_from(workers: Vec<usize>) -> Result<Self> {
        Self::try_from_vec(workers)
    }
}

impl From<Permutation> for Vec<usize> {
    fn from(p: Permutation) -> Self {
        p.0
    }
}
