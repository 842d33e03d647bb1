//! stopgate - stopping criteria for benchmark sampling loops
//!
//! Decides when an iterative benchmark measurement loop has taken enough
//! samples. Convergence policies implement [`StoppingCriterion`], live in a
//! process-wide [`CriterionRegistry`] keyed by name, and expose their
//! tunables through an aggregated parameter schema a configuration layer can
//! validate against before a run starts.
//!
//! The crate performs no timing and owns no benchmark loop; the surrounding
//! harness feeds samples in and consults [`StoppingCriterion::is_finished`]
//! each iteration.

pub mod criteria;
pub mod errors;
pub mod registry;

// Re-export commonly used types
pub use criteria::criterion::StoppingCriterion;
pub use criteria::types::{CriterionParams, ParamSpec, ParamType, ParamValue, ParamsDescription};
pub use criteria::{EntropyCriterion, StdrelCriterion};
pub use errors::{CriterionError, Result};
pub use registry::CriterionRegistry;
