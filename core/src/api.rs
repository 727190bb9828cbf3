//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `scanctx_core::api` instead of reaching into internal modules.

pub use crate::auth::{AuthDescriptor, TokenPattern};
pub use crate::config::{
    load, load_default, AuthConfig, ContextConfig, FileHandoffConfig, HandoffConfig, PolicyConfig,
    ScopeConfig, SessionConfig, TierEntryConfig, TopologyCheckConfig, TopologyConfig,
};
pub use crate::descriptor::{ContextId, ScanContextDescriptor};
pub use crate::engine::{BuildIssue, BuildStage, BuiltContext, ContextBuilder};
pub use crate::error::{ConfigError, ContextError};
pub use crate::handoff::EngineHandoff;
pub use crate::policy::{PolicyTierRegistry, Tier};
pub use crate::report::{ContextReport, ContextSummary};
pub use crate::scope::{Direction, ScopeMatcher, ScopePattern, ScopeVerdict};
pub use crate::session::SessionTrackingPolicy;
pub use crate::topology::{CheckSubjects, TopologyCheck, TopologyCheckRegistry};
