use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::AuthDescriptor;
use crate::policy::PolicyTierRegistry;
use crate::scope::ScopeMatcher;
use crate::session::SessionTrackingPolicy;
use crate::topology::TopologyCheckRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ContextId(Uuid);

impl ContextId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ContextId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The parts of a descriptor before it has an identity.
pub(crate) struct DescriptorDraft {
    pub name: String,
    pub scope: ScopeMatcher,
    pub auth: Option<AuthDescriptor>,
    pub session: SessionTrackingPolicy,
    pub policy: PolicyTierRegistry,
    pub topology: TopologyCheckRegistry,
}

impl DescriptorDraft {
    pub fn finalize(self) -> ScanContextDescriptor {
        self.finalize_with(ContextId::new(), Utc::now())
    }

    pub fn finalize_with(self, id: ContextId, created_at: DateTime<Utc>) -> ScanContextDescriptor {
        ScanContextDescriptor {
            id,
            name: self.name,
            created_at,
            scope: self.scope,
            auth: self.auth,
            session: self.session,
            policy: self.policy,
            topology: self.topology,
        }
    }
}

/// Finalised scan context handed to the scan engine. Read-only once built.
///
/// Serialises to the JSON document the engine consumes; credential values
/// are included there because the engine has to log in with them.
#[derive(Debug, Clone, Serialize)]
pub struct ScanContextDescriptor {
    id: ContextId,
    name: String,
    created_at: DateTime<Utc>,
    scope: ScopeMatcher,
    auth: Option<AuthDescriptor>,
    session: SessionTrackingPolicy,
    policy: PolicyTierRegistry,
    topology: TopologyCheckRegistry,
}

impl ScanContextDescriptor {
    pub fn id(&self) -> ContextId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn scope(&self) -> &ScopeMatcher {
        &self.scope
    }

    /// `None` when authentication has to be set up by hand in the engine.
    pub fn auth(&self) -> Option<&AuthDescriptor> {
        self.auth.as_ref()
    }

    pub fn session(&self) -> &SessionTrackingPolicy {
        &self.session
    }

    pub fn policy(&self) -> &PolicyTierRegistry {
        &self.policy
    }

    pub fn topology(&self) -> &TopologyCheckRegistry {
        &self.topology
    }

    pub fn is_in_scope(&self, url: &str) -> bool {
        self.scope.is_in_scope(url)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
