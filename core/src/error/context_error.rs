// core/src/error/context_error.rs
use thiserror::Error;

use crate::policy::Tier;

/// Failures raised while assembling the parts of a scan context.
///
/// A lookup miss (for example [`PolicyTierRegistry::tier_of`]) is not an
/// error and is reported as `None` instead.
///
/// [`PolicyTierRegistry::tier_of`]: crate::policy::PolicyTierRegistry::tier_of
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("invalid pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("check `{check}` is already registered as {existing}, cannot register it as {requested}")]
    DuplicateCheck {
        check: String,
        existing: Tier,
        requested: Tier,
    },
}

impl ContextError {
    pub(crate) fn invalid_pattern(pattern: &str, reason: impl Into<String>) -> Self {
        ContextError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn missing(field: &str) -> Self {
        ContextError::MissingField(field.to_string())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ContextError::InvalidPattern { .. } => "invalid_pattern",
            ContextError::MissingField(_) => "missing_field",
            ContextError::InvalidArgument(_) => "invalid_argument",
            ContextError::DuplicateCheck { .. } => "duplicate_check",
        }
    }
}
