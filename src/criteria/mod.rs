//! Stopping-criterion contract, parameter model, and built-in policies

pub mod criterion;
pub mod entropy;
pub mod stdrel;
pub mod types;

pub use criterion::StoppingCriterion;
pub use entropy::EntropyCriterion;
pub use stdrel::StdrelCriterion;
pub use types::{CriterionParams, ParamSpec, ParamType, ParamValue, ParamsDescription};
