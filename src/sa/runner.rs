//! SA execution loop.
//!
//! # Algorithm
//!
//! 1. Seed: draw an initial solution, evaluate it, set it as both current
//!    and best, set `T = T_0`
//! 2. Cool: while `T > T_min` and the cycle budget is not spent
//!    a. Draw a neighbor of the current solution and evaluate it
//!    b. Accept it on strict improvement, or with probability
//!       `exp((current - candidate) / T)`
//!    c. Update best if the accepted state improves on it
//!    d. `T *= cooling_rate`, advance the cycle counter
//! 3. Reheat: reset `T = T_0` and the cycle counter, keep current and best,
//!    and cool again until the configured number of cycles is reached

use super::config::SaConfig;
use super::types::SaProblem;
use crate::error::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
pub struct SaResult<S: Clone> {
    /// The best solution found across all cycles.
    pub best: S,

    /// Cost of the best solution.
    pub best_cost: f64,

    /// Total number of neighbor evaluations over all cycles.
    pub iterations: usize,

    /// Number of cooling cycles started (reheats included).
    pub cycles: usize,

    /// Temperature at the end of the last cooling cycle.
    pub final_temperature: f64,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of strictly improving moves.
    pub improving_moves: usize,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Best cost after seeding, then after every completed cooling cycle.
    pub cycle_history: Vec<f64>,
}

/// Mutable state of one run. Never shared between runs.
struct AnnealingState<S> {
    current: S,
    current_cost: f64,
    best: S,
    best_cost: f64,
    temperature: f64,
    iteration: usize,
    reheats: usize,
}

impl<S: Clone> AnnealingState<S> {
    fn seed<P, R>(problem: &P, config: &SaConfig, rng: &mut R) -> Self
    where
        P: SaProblem<Solution = S>,
        R: Rng,
    {
        let current = problem.initial_solution(rng);
        let current_cost = problem.cost(&current);
        Self {
            best: current.clone(),
            best_cost: current_cost,
            current,
            current_cost,
            temperature: config.initial_temperature,
            iteration: 0,
            reheats: 0,
        }
    }

    fn is_cooling(&self, config: &SaConfig) -> bool {
        self.temperature > config.min_temperature && self.iteration < config.max_iterations
    }

    fn reheat(&mut self, config: &SaConfig) {
        self.temperature = config.initial_temperature;
        self.iteration = 0;
        self.reheats += 1;
    }
}

/// Executes the Simulated Annealing engine.
pub struct SaRunner;

impl SaRunner {
    /// Runs SA optimization.
    ///
    /// The random source is a [`StdRng`] seeded from `config.seed`, or from
    /// entropy when no seed is set.
    pub fn run<P: SaProblem>(problem: &P, config: &SaConfig) -> Result<SaResult<P::Solution>> {
        Self::run_with_cancel(problem, config, None)
    }

    /// Runs SA with an optional cancellation token.
    ///
    /// The flag is checked before every inner iteration; once set, the run
    /// stops and returns the best solution found so far.
    pub fn run_with_cancel<P: SaProblem>(
        problem: &P,
        config: &SaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SaResult<P::Solution>> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        Self::run_with_rng(problem, config, &mut rng, cancel)
    }

    /// Runs SA drawing all randomness from `rng`. `config.seed` is ignored.
    pub fn run_with_rng<P: SaProblem, R: Rng>(
        problem: &P,
        config: &SaConfig,
        rng: &mut R,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SaResult<P::Solution>> {
        config.validate()?;

        let mut state = AnnealingState::seed(problem, config, rng);
        log::debug!(
            "SA seeded: cost={:.4}, T0={}, cycles={}",
            state.best_cost,
            config.initial_temperature,
            config.cycles()
        );

        let mut total_iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut cancelled = false;
        let mut final_temperature;
        let mut cycle_history = vec![state.best_cost];

        loop {
            while state.is_cooling(config) {
                if let Some(ref flag) = cancel {
                    if flag.load(Ordering::Relaxed) {
                        cancelled = true;
                        break;
                    }
                }

                let candidate = problem.neighbor(&state.current, rng);
                let candidate_cost = problem.cost(&candidate);

                // Metropolis acceptance criterion
                let improving = candidate_cost < state.current_cost;
                let accept = improving || {
                    let probability =
                        ((state.current_cost - candidate_cost) / state.temperature).exp();
                    rng.random::<f64>() < probability
                };

                if accept {
                    state.current = candidate;
                    state.current_cost = candidate_cost;
                    accepted_moves += 1;
                    if improving {
                        improving_moves += 1;
                    }

                    if state.current_cost < state.best_cost {
                        state.best = state.current.clone();
                        state.best_cost = state.current_cost;
                    }
                }
                debug_assert!(state.best_cost <= state.current_cost);

                state.temperature *= config.cooling_rate;
                state.iteration += 1;
                total_iterations += 1;
            }

            final_temperature = state.temperature;
            let cycle_iterations = state.iteration;
            state.reheat(config);
            cycle_history.push(state.best_cost);

            if cancelled {
                log::debug!(
                    "SA cancelled in cycle {}: best={:.4}",
                    state.reheats,
                    state.best_cost
                );
                break;
            }

            log::debug!(
                "SA cycle {}/{} done: iterations={}, T={:.4}, best={:.4}",
                state.reheats,
                config.cycles(),
                cycle_iterations,
                final_temperature,
                state.best_cost
            );

            if state.reheats >= config.reheats {
                break;
            }
        }

        log::debug!(
            "SA finished: best={:.4}, iterations={}, accepted={}",
            state.best_cost,
            total_iterations,
            accepted_moves
        );

        Ok(SaResult {
            best: state.best,
            best_cost: state.best_cost,
            iterations: total_iterations,
            cycles: state.reheats,
            final_temperature,
            accepted_moves,
            improving_moves,
            cancelled,
            cycle_history,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;

    // ---- Quadratic minimization: f(x) = x^2, minimum at 0 ----

    struct QuadraticProblem;

    impl SaProblem for QuadraticProblem {
        type Solution = f64;

        fn initial_solution<R: Rng>(&self, rng: &mut R) -> f64 {
            rng.random_range(-10.0..10.0)
        }

        fn cost(&self, x: &f64) -> f64 {
            x * x
        }

        fn neighbor<R: Rng>(&self, x: &f64, rng: &mut R) -> f64 {
            x + rng.random_range(-1.0..1.0)
        }
    }

    fn quick_config() -> SaConfig {
        SaConfig::default()
            .with_initial_temperature(100.0)
            .with_min_temperature(0.001)
            .with_cooling_rate(0.99)
            .with_max_iterations(5_000)
            .with_seed(42)
    }

    #[test]
    fn test_sa_quadratic() {
        let result = SaRunner::run(&QuadraticProblem, &quick_config()).unwrap();

        assert!(
            result.best_cost < 1.0,
            "expected near-zero cost, got {}",
            result.best_cost
        );
        assert!(result.improving_moves > 0);
        assert!(result.accepted_moves > result.improving_moves);
        assert!(!result.cancelled);
    }

    #[test]
    fn test_sa_best_cost_matches_best() {
        let result = SaRunner::run(&QuadraticProblem, &quick_config().with_reheats(3)).unwrap();
        assert_eq!(result.best_cost, QuadraticProblem.cost(&result.best));
    }

    #[test]
    fn test_sa_iteration_budget_per_cycle() {
        // Temperature never reaches the floor: the budget ends every cycle.
        let config = SaConfig::default()
            .with_initial_temperature(1e10)
            .with_min_temperature(1e-15)
            .with_cooling_rate(0.999)
            .with_max_iterations(100)
            .with_reheats(3)
            .with_seed(42);

        let result = SaRunner::run(&QuadraticProblem, &config).unwrap();

        assert_eq!(result.iterations, 300);
        assert_eq!(result.cycles, 3);
    }

    #[test]
    fn test_sa_temperature_ends_cycle() {
        // 100 * 0.5^k <= 1 first at k = 7
        let config = SaConfig::default()
            .with_initial_temperature(100.0)
            .with_min_temperature(1.0)
            .with_cooling_rate(0.5)
            .with_max_iterations(1_000)
            .with_reheats(2)
            .with_seed(1);

        let result = SaRunner::run(&QuadraticProblem, &config).unwrap();

        assert_eq!(result.iterations, 14);
        assert!(result.final_temperature <= 1.0);
    }

    #[test]
    fn test_sa_zero_reheats_runs_one_cycle() {
        let config = quick_config().with_max_iterations(50).with_reheats(0);
        let result = SaRunner::run(&QuadraticProblem, &config).unwrap();
        assert_eq!(result.cycles, 1);
        assert_eq!(result.iterations, 50);
    }

    #[test]
    fn test_sa_zero_iterations_returns_seed() {
        let config = quick_config().with_max_iterations(0).with_reheats(5);
        let result = SaRunner::run(&QuadraticProblem, &config).unwrap();

        let mut rng = StdRng::seed_from_u64(42);
        let seed = QuadraticProblem.initial_solution(&mut rng);

        assert_eq!(result.best, seed);
        assert_eq!(result.best_cost, seed * seed);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.cycles, 5);
    }

    #[test]
    fn test_sa_initial_below_min_returns_seed() {
        let config = quick_config()
            .with_initial_temperature(0.5)
            .with_min_temperature(1.0);
        let result = SaRunner::run(&QuadraticProblem, &config).unwrap();

        let mut rng = StdRng::seed_from_u64(42);
        let seed = QuadraticProblem.initial_solution(&mut rng);

        assert_eq!(result.best, seed);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_sa_invalid_config_is_error() {
        let config = quick_config().with_cooling_rate(1.0);
        assert!(SaRunner::run(&QuadraticProblem, &config).is_err());
    }

    #[test]
    fn test_sa_cancellation() {
        let config = SaConfig::default()
            .with_initial_temperature(1e10)
            .with_min_temperature(1e-15)
            .with_max_iterations(usize::MAX)
            .with_reheats(usize::MAX)
            .with_seed(42);

        // Set cancel flag before running so cancellation is deterministic.
        let cancel = Arc::new(AtomicBool::new(true));

        let result = SaRunner::run_with_cancel(&QuadraticProblem, &config, Some(cancel)).unwrap();
        assert!(result.cancelled);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.best_cost, QuadraticProblem.cost(&result.best));
    }

    #[test]
    fn test_sa_cycle_history_non_increasing() {
        let config = quick_config().with_max_iterations(300).with_reheats(6);
        let result = SaRunner::run(&QuadraticProblem, &config).unwrap();

        assert_eq!(result.cycle_history.len(), 7);
        assert_eq!(*result.cycle_history.last().unwrap(), result.best_cost);
        for window in result.cycle_history.windows(2) {
            assert!(
                window[1] <= window[0],
                "best cost history should be non-increasing: {} > {}",
                window[1],
                window[0]
            );
        }
    }

    /// Wraps a problem and records every evaluated cost and the cost of
    /// the current solution at the start of every inner pass.
    struct Recording<P> {
        inner: P,
        evaluated: Mutex<Vec<f64>>,
        visited: Mutex<Vec<f64>>,
    }

    impl<P> Recording<P> {
        fn new(inner: P) -> Self {
            Self {
                inner,
                evaluated: Mutex::new(Vec::new()),
                visited: Mutex::new(Vec::new()),
            }
        }
    }

    impl<P: SaProblem> SaProblem for Recording<P> {
        type Solution = P::Solution;

        fn initial_solution<R: Rng>(&self, rng: &mut R) -> P::Solution {
            self.inner.initial_solution(rng)
        }

        fn cost(&self, solution: &P::Solution) -> f64 {
            let cost = self.inner.cost(solution);
            self.evaluated.lock().unwrap().push(cost);
            cost
        }

        fn neighbor<R: Rng>(&self, solution: &P::Solution, rng: &mut R) -> P::Solution {
            self.visited.lock().unwrap().push(self.inner.cost(solution));
            self.inner.neighbor(solution, rng)
        }
    }

    #[test]
    fn test_sa_best_cost_never_rises_within_cycles() {
        let problem = Recording::new(QuadraticProblem);
        let config = quick_config().with_max_iterations(400).with_reheats(4);
        let result = SaRunner::run(&problem, &config).unwrap();

        let evaluated = problem.evaluated.into_inner().unwrap();
        let visited = problem.visited.into_inner().unwrap();
        assert_eq!(evaluated.len(), result.iterations + 1);
        assert_eq!(visited.len(), result.iterations);

        // Any candidate below the best is also below the current state, so
        // it is always accepted: best-so-far is the running minimum.
        let best_so_far: Vec<f64> = evaluated
            .iter()
            .scan(f64::INFINITY, |best, &c| {
                *best = best.min(c);
                Some(*best)
            })
            .collect();

        for window in best_so_far.windows(2) {
            assert!(window[1] <= window[0]);
        }
        assert!(best_so_far.last().unwrap() < &best_so_far[0]);
        assert_eq!(*best_so_far.last().unwrap(), result.best_cost);

        // Pass k starts after the seed and k candidates were scored.
        for (k, &current) in visited.iter().enumerate() {
            assert!(
                best_so_far[k] <= current,
                "pass {k}: best {} above current {current}",
                best_so_far[k]
            );
        }
    }

    /// Raises the cancel flag while scoring the `limit`-th cost (the seed
    /// counts as the first).
    struct CancelAfter {
        calls: AtomicUsize,
        limit: usize,
        flag: Arc<AtomicBool>,
    }

    impl SaProblem for CancelAfter {
        type Solution = f64;

        fn initial_solution<R: Rng>(&self, rng: &mut R) -> f64 {
            QuadraticProblem.initial_solution(rng)
        }

        fn cost(&self, x: &f64) -> f64 {
            if self.calls.fetch_add(1, Ordering::Relaxed) + 1 == self.limit {
                self.flag.store(true, Ordering::Relaxed);
            }
            QuadraticProblem.cost(x)
        }

        fn neighbor<R: Rng>(&self, x: &f64, rng: &mut R) -> f64 {
            QuadraticProblem.neighbor(x, rng)
        }
    }

    #[test]
    fn test_sa_cancellation_mid_run() {
        let config = SaConfig::default()
            .with_initial_temperature(1e10)
            .with_min_temperature(1e-15)
            .with_max_iterations(100)
            .with_reheats(3)
            .with_seed(42);

        // (cost call that raises the flag, iterations run, cycles started)
        for (limit, iterations, cycles) in [(50, 49, 1), (131, 130, 2)] {
            let flag = Arc::new(AtomicBool::new(false));
            let problem = CancelAfter {
                calls: AtomicUsize::new(0),
                limit,
                flag: Arc::clone(&flag),
            };

            let result = SaRunner::run_with_cancel(&problem, &config, Some(flag)).unwrap();

            assert!(result.cancelled);
            assert_eq!(result.iterations, iterations);
            assert_eq!(result.cycles, cycles);
            assert_eq!(result.best_cost, QuadraticProblem.cost(&result.best));
            assert_eq!(result.cycle_history.len(), cycles + 1);
        }
    }

    #[test]
    fn test_sa_same_seed_same_result() {
        let config = quick_config().with_reheats(2);
        let a = SaRunner::run(&QuadraticProblem, &config).unwrap();
        let b = SaRunner::run(&QuadraticProblem, &config).unwrap();
        assert_eq!(a.best, b.best);
        assert_eq!(a.best_cost, b.best_cost);
        assert_eq!(a.accepted_moves, b.accepted_moves);
    }

    #[test]
    fn test_sa_metropolis_accepts_uphill() {
        // At very high temperature, almost all moves should be accepted
        let config = SaConfig::default()
            .with_initial_temperature(1e8)
            .with_min_temperature(1e7)
            .with_cooling_rate(0.9999)
            .with_max_iterations(1_000)
            .with_seed(42);

        let result = SaRunner::run(&QuadraticProblem, &config).unwrap();

        let acceptance_ratio = result.accepted_moves as f64 / result.iterations as f64;
        assert!(
            acceptance_ratio > 0.8,
            "expected high acceptance at high temp, got {acceptance_ratio}"
        );
    }
}
