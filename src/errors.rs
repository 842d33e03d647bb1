//! Error types for the criterion registry
//!
//! Every failure carries the offending criterion and parameter names so
//! callers can tell conditions apart without parsing message text.

use crate::criteria::types::ParamType;
use thiserror::Error;

/// Failures surfaced by the registry and the criteria it owns
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CriterionError {
    /// Lookup by a name with no registered criterion
    #[error("no stopping criterion named \"{name}\"")]
    NotFound { name: String },

    /// Registration attempted with a name already in use
    #[error("stopping criterion \"{name}\" is already registered")]
    DuplicateName { name: String },

    /// Two criteria declare the same parameter name with different types
    #[error(
        "stopping criterion \"{criterion}\" parameter \"{param}\" is already used by \
         another criterion with a different type ({existing}, not {requested})"
    )]
    ParameterTypeConflict {
        criterion: String,
        param: String,
        existing: ParamType,
        requested: ParamType,
    },

    /// A criterion was initialized with a parameter it does not declare
    #[error("stopping criterion \"{criterion}\" does not accept parameter \"{param}\"")]
    UnexpectedParameter { criterion: String, param: String },

    /// A declared parameter was supplied with a value of the wrong type
    #[error("stopping criterion \"{criterion}\" parameter \"{param}\" expects {expected}, got {actual}")]
    ParamTypeMismatch {
        criterion: String,
        param: String,
        expected: ParamType,
        actual: ParamType,
    },
}

/// Result type alias for registry and criterion operations
pub type Result<T> = std::result::Result<T, CriterionError>;
