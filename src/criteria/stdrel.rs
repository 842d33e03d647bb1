//! Relative-standard-deviation stopping criterion
//!
//! Declares convergence once the accumulated sample time passes `min-time`
//! and the relative standard deviation of the samples drops to `max-noise`.

use crate::criteria::criterion::StoppingCriterion;
use crate::criteria::types::{CriterionParams, ParamSpec, ParamType, ParamsDescription};
use crate::errors::{CriterionError, Result};
use std::sync::Mutex;

/// Default relative standard deviation cutoff (0.5%)
pub const DEFAULT_MAX_NOISE: f64 = 0.005;

/// Default minimum accumulated sample time in seconds
pub const DEFAULT_MIN_TIME: f64 = 0.5;

#[derive(Debug, Clone)]
struct StdrelState {
    max_noise: f64,
    min_time: f64,

    // Welford accumulators
    count: u64,
    mean: f64,
    m2: f64,

    total_time: f64,
}

impl Default for StdrelState {
    fn default() -> Self {
        Self {
            max_noise: DEFAULT_MAX_NOISE,
            min_time: DEFAULT_MIN_TIME,
            count: 0,
            mean: 0.0,
            m2: 0.0,
            total_time: 0.0,
        }
    }
}

/// Stable relative-error convergence
#[derive(Debug, Default)]
pub struct StdrelCriterion {
    state: Mutex<StdrelState>,
}

impl StdrelCriterion {
    /// Create a criterion with default thresholds
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of samples observed since the last initialization
    pub fn sample_count(&self) -> u64 {
        self.state.lock().unwrap().count
    }

    /// Relative standard deviation of the samples seen so far
    ///
    /// `None` until two samples with a positive mean have been observed.
    pub fn relative_noise(&self) -> Option<f64> {
        let state = self.state.lock().unwrap();
        if state.count < 2 || state.mean <= 0.0 {
            return None;
        }
        let variance = state.m2 / (state.count - 1) as f64;
        Some(variance.sqrt() / state.mean)
    }
}

impl StoppingCriterion for StdrelCriterion {
    fn name(&self) -> &str {
        "stdrel"
    }

    fn params_description(&self) -> ParamsDescription {
        vec![
            ParamSpec::new("max-noise", ParamType::Float64),
            ParamSpec::new("min-time", ParamType::Float64),
        ]
    }

    fn initialize(&self, params: &CriterionParams) -> Result<()> {
        let mut next = StdrelState::default();
        for (name, value) in params.iter() {
            match name.as_str() {
                "max-noise" => next.max_noise = value.require_f64(self.name(), name)?,
                "min-time" => next.min_time = value.require_f64(self.name(), name)?,
                _ => {
                    return Err(CriterionError::UnexpectedParameter {
                        criterion: self.name().to_string(),
                        param: name.clone(),
                    })
                }
            }
        }
        *self.state.lock().unwrap() = next;
        Ok(())
    }

    fn add_measurement(&self, measurement: f64) {
        let mut state = self.state.lock().unwrap();
        state.count += 1;
        state.total_time += measurement;

        let delta = measurement - state.mean;
        state.mean += delta / state.count as f64;
        state.m2 += delta * (measurement - state.mean);
    }

    fn is_finished(&self) -> bool {
        let state = self.state.lock().unwrap();
        if state.count < 2 || state.total_time < state.min_time {
            return false;
        }
        // A non-positive mean has no meaningful relative error.
        if state.mean <= 0.0 {
            return false;
        }
        let variance = state.m2 / (state.count - 1) as f64;
        variance.sqrt() / state.mean <= state.max_noise
    }
}
