//! SA configuration.

use crate::error::{AssignError, Result};

/// Configuration for the Simulated Annealing engine.
///
/// Temperature decays geometrically (`T_{k+1} = cooling_rate * T_k`) once
/// per inner iteration. A cooling cycle ends when the temperature reaches
/// `min_temperature` or `max_iterations` passes have run, after which the
/// engine reheats to `initial_temperature` until `reheats` is exhausted.
///
/// # Examples
///
/// ```
/// use u_assign::sa::SaConfig;
///
/// let config = SaConfig::default()
///     .with_initial_temperature(100.0)
///     .with_min_temperature(0.01)
///     .with_cooling_rate(0.98)
///     .with_max_iterations(500)
///     .with_reheats(3)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaConfig {
    /// Temperature at the start of every cooling cycle.
    pub initial_temperature: f64,

    /// Geometric cooling factor in (0, 1). Higher = slower cooling.
    pub cooling_rate: f64,

    /// A cooling cycle stops once the temperature is no longer above this.
    pub min_temperature: f64,

    /// Iteration budget of a single cooling cycle. 0 = degenerate run.
    pub max_iterations: usize,

    /// Number of cooling cycles (the first one included). Values below 1
    /// still run one cycle.
    pub reheats: usize,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 1000.0,
            cooling_rate: 0.95,
            min_temperature: 1.0,
            max_iterations: 10_000,
            reheats: 1,
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_reheats(mut self, n: usize) -> Self {
        self.reheats = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of cooling cycles a full run performs.
    pub fn cycles(&self) -> usize {
        self.reheats.max(1)
    }

    /// Validates the configuration.
    ///
    /// An `initial_temperature` at or below `min_temperature` is accepted:
    /// the run then degenerates to returning its seed solution.
    pub fn validate(&self) -> Result<()> {
        if !self.initial_temperature.is_finite() || self.initial_temperature <= 0.0 {
            return Err(AssignError::InvalidConfig(format!(
                "initial_temperature must be positive and finite, got {}",
                self.initial_temperature
            )));
        }
        if !self.min_temperature.is_finite() || self.min_temperature <= 0.0 {
            return Err(AssignError::InvalidConfig(format!(
                "min_temperature must be positive and finite, got {}",
                self.min_temperature
            )));
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(AssignError::InvalidConfig(format!(
                "cooling_rate must be in (0, 1), got {}",
                self.cooling_rate
            )));
        }
        Ok(())
    }
}
