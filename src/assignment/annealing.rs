//! Simulated annealing over assignment permutations.

use super::cost::evaluate;
use super::matrix::CostMatrix;
use super::permutation::Permutation;
use super::Assignment;
use crate::error::Result;
use crate::sa::{SaConfig, SaProblem, SaResult, SaRunner};
use rand::Rng;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// The assignment problem as an [`SaProblem`].
///
/// Seeds with a uniform random permutation, moves by swapping the workers
/// of two tasks, and scores with [`evaluate`].
#[derive(Debug, Clone, Copy)]
pub struct AssignmentProblem<'a> {
    matrix: &'a CostMatrix,
}

impl<'a> AssignmentProblem<'a> {
    pub fn new(matrix: &'a CostMatrix) -> Self {
        Self { matrix }
    }
}

impl SaProblem for AssignmentProblem<'_> {
    type Solution = Permutation;

    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Permutation {
        Permutation::random(self.matrix.size(), rng)
    }

    fn cost(&self, solution: &Permutation) -> f64 {
        evaluate(solution, self.matrix)
    }

    fn neighbor<R: Rng>(&self, solution: &Permutation, rng: &mut R) -> Permutation {
        solution.swap_neighbor(rng)
    }
}

/// Anneals `matrix` with `config`, returning the best assignment found.
///
/// # Examples
///
/// ```
/// use u_assign::assignment::{solve_annealing, CostMatrix};
/// use u_assign::sa::SaConfig;
///
/// let m = CostMatrix::new(vec![
///     vec![40.0, 10.0, 12.0],
///     vec![25.0, 30.0, 7.0],
///     vec![22.0, 6.0, 40.0],
/// ]).unwrap();
/// let config = SaConfig::default().with_seed(42);
/// let best = solve_annealing(&m, &config).unwrap();
/// assert_eq!(best.cost, 39.0);
/// ```
pub fn solve_annealing(matrix: &CostMatrix, config: &SaConfig) -> Result<Assignment> {
    let result = SaRunner::run(&AssignmentProblem::new(matrix), config)?;
    Ok(result.into())
}

/// Like [`solve_annealing`], drawing randomness from `rng` and honoring an
/// optional cancellation flag. Returns the full run statistics.
pub fn anneal_with_rng<R: Rng>(
    matrix: &CostMatrix,
    config: &SaConfig,
    rng: &mut R,
    cancel: Option<Arc<AtomicBool>>,
) -> Result<SaResult<Permutation>> {
    SaRunner::run_with_rng(&AssignmentProblem::new(matrix), config, rng, cancel)
}

/// Runs `restarts` independent annealing searches in parallel and keeps
/// the cheapest result. Restart `k` seeds its own generator with
/// `config.seed + k` (or fresh entropy when unseeded). Ties go to the
/// lowest restart index. `restarts` must be at least 1.
#[cfg(feature = "parallel")]
pub fn solve_annealing_restarts(
    matrix: &CostMatrix,
    config: &SaConfig,
    restarts: usize,
) -> Result<Assignment> {
    use crate::error::AssignError;
    use rayon::prelude::*;

    config.validate()?;
    if restarts == 0 {
        return Err(AssignError::InvalidConfig("restarts must be at least 1".into()));
    }
    let base = config.seed.unwrap_or_else(rand::random);

    let results: Vec<Assignment> = (0..restarts)
        .into_par_iter()
        .map(|k| {
            let restart = config.clone().with_seed(base.wrapping_add(k as u64));
            solve_annealing(matrix, &restart)
        })
        .collect::<Result<_>>()?;

    let mut best: Option<Assignment> = None;
    for candidate in results {
        if best.as_ref().is_none_or(|b| candidate.cost < b.cost) {
            best = Some(candidate);
        }
    }
    log::debug!("{restarts} annealing restarts done");
    best.ok_or_else(|| AssignError::InvalidConfig("restarts must be at least 1".into()))
}

impl From<SaResult<Permutation>> for Assignment {
    fn from(result: SaResult<Permutation>) -> Self {
        Assignment {
            permutation: result.best,
            cost: result.best_cost,
        }
    }
}
