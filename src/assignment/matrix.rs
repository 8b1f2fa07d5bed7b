//! Square cost matrix.

use crate::error::{AssignError, Result};
use rand::Rng;
use std::ops::{Index, RangeInclusive};

/// An immutable n×n cost matrix, indexed **`[task][worker]`**.
///
/// Row `t` holds the cost of giving task `t` to each worker, so
/// `matrix[(t, w)]` is the cost of assigning task `t` to worker `w`.
/// Every solver and evaluator in this crate reads the matrix this way.
///
/// Invariants: `n >= 2` and every entry is finite. Costs are expected to be
/// non-negative but this is not enforced.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawCostMatrix"))]
pub struct CostMatrix {
    size: usize,
    costs: Vec<f64>,
}

impl CostMatrix {
    /// Builds a matrix from task rows.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_assign::assignment::CostMatrix;
    ///
    /// let m = CostMatrix::new(vec![vec![4.0, 5.0], vec![2.0, 4.0]]).unwrap();
    /// assert_eq!(m.size(), 2);
    /// assert_eq!(m[(1, 0)], 2.0);
    /// ```
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self> {
        let size = rows.len();
        if size == 0 {
            return Err(AssignError::EmptyMatrix);
        }
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != size) {
            return Err(AssignError::NotSquare {
                row,
                expected: size,
                found: r.len(),
            });
        }
        Self::from_flat(size, rows.into_iter().flatten().collect())
    }

    /// Builds a matrix from `size * size` row-major costs.
    pub fn from_flat(size: usize, costs: Vec<f64>) -> Result<Self> {
        let expected = cell_count(size)?;
        if costs.len() != expected {
            return Err(AssignError::WrongLength {
                size,
                expected,
                found: costs.len(),
            });
        }
        if let Some(i) = costs.iter().position(|c| !c.is_finite()) {
            return Err(AssignError::NonFiniteCost {
                task: i / size,
                worker: i % size,
            });
        }
        Ok(Self { size, costs })
    }

    /// Generates a matrix of uniform random integer costs in `range`.
    pub fn random<R: Rng>(size: usize, range: RangeInclusive<u32>, rng: &mut R) -> Result<Self> {
        if range.is_empty() {
            return Err(AssignError::InvalidConfig(format!(
                "empty cost range {}..={}",
                range.start(),
                range.end()
            )));
        }
        let costs = (0..cell_count(size)?)
            .map(|_| f64::from(rng.random_range(range.clone())))
            .collect();
        Self::from_flat(size, costs)
    }

    /// Number of tasks (and workers).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Costs of assigning `task` to each worker.
    ///
    /// # Panics
    /// Panics if `task >= size`.
    pub fn row(&self, task: usize) -> &[f64] {
        assert!(task < self.size, "task {task} out of range 0..{}", self.size);
        &self.costs[task * self.size..(task + 1) * self.size]
    }

    /// Iterates over task rows in index order.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.costs.chunks_exact(self.size)
    }
}

/// Number of cells of a `size`×`size` matrix, rejecting sizes below 2.
fn cell_count(size: usize) -> Result<usize> {
    if size == 0 {
        return Err(AssignError::EmptyMatrix);
    }
    if size < 2 {
        return Err(AssignError::TooSmall { size });
    }
    size.checked_mul(size).ok_or_else(|| {
        AssignError::InvalidConfig(format!("matrix size {size} overflows the cell count"))
    })
}

/// Unchecked wire shape, validated through [`CostMatrix::from_flat`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawCostMatrix {
    size: usize,
    costs: Vec<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawCostMatrix> for CostMatrix {
    type Error = AssignError;

    fn try_from(raw: RawCostMatrix) -> Result<Self> {
        Self::from_flat(raw.size, raw.costs)
    }
}

impl Index<(usize, usize)> for CostMatrix {
    type Output = f64;

    fn index(&self, (task, worker): (usize, usize)) -> &f64 {
        assert!(
            task < self.size && worker < self.size,
            "index ({task}, {worker}) out of range for {0}x{0} matrix",
            self.size
        );
        &self.costs[task * self.size + worker]
    }
}
