//! Stopping-criterion capability contract
//!
//! Every convergence policy implements this trait. The registry owns
//! implementations as trait objects and hands out shared handles, so the
//! measurement-state methods take `&self` and implementations keep their
//! mutable state behind a lock.

use crate::criteria::types::{CriterionParams, ParamsDescription};
use crate::errors::Result;

/// A policy deciding when a benchmark's sampling loop should stop
pub trait StoppingCriterion: Send + Sync + std::fmt::Debug {
    /// Stable identifier used as the registry key
    ///
    /// Must return the same value for the lifetime of the object.
    fn name(&self) -> &str;

    /// Declared tunable parameters
    ///
    /// May be empty. Must be stable across calls for a given instance.
    fn params_description(&self) -> ParamsDescription;

    /// Reset measurement state for a fresh run and apply parameter overrides
    ///
    /// Rejects names the criterion does not declare and values of the wrong
    /// type; on error the previous state is left untouched.
    fn initialize(&self, params: &CriterionParams) -> Result<()>;

    /// Feed one timing sample, in seconds
    fn add_measurement(&self, measurement: f64);

    /// Whether enough samples have been observed to stop the loop
    fn is_finished(&self) -> bool;
}
