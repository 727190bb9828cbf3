use std::fmt;

use serde::{Serialize, Serializer};

use crate::descriptor::ScanContextDescriptor;
use crate::error::ContextError;
use crate::report::ContextSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildStage {
    Scope,
    Auth,
    Session,
    PolicyTiers,
    TopologyChecks,
}

impl fmt::Display for BuildStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BuildStage::Scope => "scope",
            BuildStage::Auth => "auth",
            BuildStage::Session => "session",
            BuildStage::PolicyTiers => "policy_tiers",
            BuildStage::TopologyChecks => "topology_checks",
        };
        f.write_str(s)
    }
}

/// A non-fatal failure collected while building; the stage degraded instead
/// of aborting the build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildIssue {
    pub stage: BuildStage,
    /// The entry that failed: tier name, check name, or the stage itself.
    pub subject: String,
    #[serde(serialize_with = "error_message")]
    pub error: ContextError,
}

impl BuildIssue {
    pub fn new(stage: BuildStage, subject: impl Into<String>, error: ContextError) -> Self {
        Self {
            stage,
            subject: subject.into(),
            error,
        }
    }
}

impl fmt::Display for BuildIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.stage, self.subject, self.error)
    }
}

fn error_message<S: Serializer>(err: &ContextError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&err.to_string())
}

#[derive(Debug, Clone)]
pub struct BuiltContext {
    pub descriptor: ScanContextDescriptor,
    pub summary: ContextSummary,
    pub issues: Vec<BuildIssue>,
}

impl BuiltContext {
    pub fn is_degraded(&self) -> bool {
        !self.issues.is_empty()
    }
}
