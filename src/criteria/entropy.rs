//! Entropy-stability stopping criterion
//!
//! Tracks the Shannon entropy of the observed sample distribution and fits a
//! line to the entropy history. Convergence means the entropy trend has gone
//! flat: the fitted slope angle is within `max-angle` and the fit explains
//! the history well enough (`min-r2`).

use crate::criteria::criterion::StoppingCriterion;
use crate::criteria::types::{CriterionParams, ParamSpec, ParamType, ParamsDescription};
use crate::errors::{CriterionError, Result};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Default maximum slope angle (radians) of the entropy trend
pub const DEFAULT_MAX_ANGLE: f64 = 0.048;

/// Default minimum R² of the linear entropy fit
pub const DEFAULT_MIN_R2: f64 = 0.36;

// The trend fit is meaningless over a handful of points.
const MIN_SAMPLES: usize = 10;

#[derive(Debug, Clone, Default)]
struct EntropyState {
    max_angle: f64,
    min_r2: f64,

    // Sample frequency table keyed by the measurement's bit pattern.
    freq: BTreeMap<u64, u64>,
    total: u64,
    entropy_history: Vec<f64>,
}

impl EntropyState {
    fn with_defaults() -> Self {
        Self {
            max_angle: DEFAULT_MAX_ANGLE,
            min_r2: DEFAULT_MIN_R2,
            ..Self::default()
        }
    }

    fn entropy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let total = self.total as f64;
        self.freq
            .values()
            .map(|&count| {
                let p = count as f64 / total;
                -p * p.log2()
            })
            .sum()
    }
}

/// Entropy-trend convergence
#[derive(Debug)]
pub struct EntropyCriterion {
    state: Mutex<EntropyState>,
}

impl EntropyCriterion {
    /// Create a criterion with default thresholds
    pub fn new() -> Self {
        Self {
            state: Mutex::new(EntropyState::with_defaults()),
        }
    }

    /// Number of samples observed since the last initialization
    pub fn sample_count(&self) -> u64 {
        self.state.lock().unwrap().total
    }

    /// Entropy of the sample distribution after the latest measurement
    pub fn current_entropy(&self) -> Option<f64> {
        let state = self.state.lock().unwrap();
        state.entropy_history.last().copied()
    }
}

impl Default for EntropyCriterion {
    fn default() -> Self {
        Self::new()
    }
}

impl StoppingCriterion for EntropyCriterion {
    fn name(&self) -> &str {
        "entropy"
    }

    fn params_description(&self) -> ParamsDescription {
        vec![
            ParamSpec::new("max-angle", ParamType::Float64),
            ParamSpec::new("min-r2", ParamType::Float64),
        ]
    }

    fn initialize(&self, params: &CriterionParams) -> Result<()> {
        let mut next = EntropyState::with_defaults();
        for (name, value) in params.iter() {
            match name.as_str() {
                "max-angle" => next.max_angle = value.require_f64(self.name(), name)?,
                "min-r2" => next.min_r2 = value.require_f64(self.name(), name)?,
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
        *state.freq.entry(measurement.to_bits()).or_insert(0) += 1;
        state.total += 1;

        let entropy = state.entropy();
        state.entropy_history.push(entropy);
    }

    fn is_finished(&self) -> bool {
        let state = self.state.lock().unwrap();
        if state.entropy_history.len() < MIN_SAMPLES {
            return false;
        }
        let (slope, r2) = linear_fit(&state.entropy_history);
        slope.atan().abs() <= state.max_angle && r2 >= state.min_r2
    }
}

/// Least-squares line through `ys` against sample index, as (slope, R²)
///
/// A flat history has nothing left to explain and counts as a perfect fit.
fn linear_fit(ys: &[f64]) -> (f64, f64) {
    let n = ys.len() as f64;
    let mean_x = (n - 1.0) / 2.0;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    let mut syy = 0.0;
    for (i, &y) in ys.iter().enumerate() {
        let dx = i as f64 - mean_x;
        let dy = y - mean_y;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }

    if syy <= f64::EPSILON * n {
        return (0.0, 1.0);
    }
    let slope = sxy / sxx;
    let r2 = (sxy * sxy) / (sxx * syy);
    (slope, r2)
}
