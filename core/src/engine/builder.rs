use crate::auth::AuthDescriptor;
use crate::config::{AuthConfig, ContextConfig, PolicyConfig, SessionConfig, TopologyConfig};
use crate::descriptor::DescriptorDraft;
use crate::error::ContextError;
use crate::policy::{PolicyTierRegistry, Tier};
use crate::report::ContextSummary;
use crate::scope::ScopeMatcher;
use crate::session::SessionTrackingPolicy;
use crate::topology::TopologyCheckRegistry;

use super::types::{BuildIssue, BuildStage, BuiltContext};

/// Assembles a [`ScanContextDescriptor`](crate::descriptor::ScanContextDescriptor)
/// from config.
///
/// Scope is the only hard requirement: a scope failure aborts the build.
/// Auth, session, tier and topology failures are collected as
/// [`BuildIssue`]s and the build continues with whatever was valid.
pub struct ContextBuilder<'a> {
    cfg: &'a ContextConfig,
}

impl<'a> ContextBuilder<'a> {
    pub fn new(cfg: &'a ContextConfig) -> Self {
        Self { cfg }
    }

    pub fn build(&self) -> Result<BuiltContext, ContextError> {
        let name = self.cfg.context_name.as_str();
        tracing::info!(target: "scanctx.builder", context = %name, "building scan context");

        let scope = match ScopeMatcher::from_config(&self.cfg.scope) {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(target: "scanctx.builder", error = %e, "scope construction failed");
                return Err(e);
            }
        };

        let mut issues = Vec::new();
        let auth = attach_auth(&self.cfg.auth, &mut issues);
        let session = attach_session(&self.cfg.session, &mut issues);
        let policy = populate_tiers(&self.cfg.policy, &mut issues);
        let topology = populate_topology(&self.cfg.topology, &mut issues);

        let descriptor = DescriptorDraft {
            name: name.to_string(),
            scope,
            auth,
            session,
            policy,
            topology,
        }
        .finalize();

        let summary = ContextSummary::new(&descriptor, issues.len());
        tracing::info!(
            target: "scanctx.builder",
            context_id = %descriptor.id(),
            include = summary.include_patterns,
            exclude = summary.exclude_patterns,
            topology_checks = summary.topology_check_count,
            issues = issues.len(),
            "scan context ready"
        );

        Ok(BuiltContext {
            descriptor,
            summary,
            issues,
        })
    }
}

fn attach_auth(cfg: &AuthConfig, issues: &mut Vec<BuildIssue>) -> Option<AuthDescriptor> {
    if !cfg.enabled {
        tracing::info!(target: "scanctx.builder", "auth disabled, engine login must be configured by hand");
        return None;
    }
    match AuthDescriptor::build(cfg) {
        Ok(auth) => {
            tracing::info!(
                target: "scanctx.builder",
                login_url = %auth.login_url(),
                username_field = %auth.username_field(),
                password_field = %auth.password_field(),
                "auth descriptor attached"
            );
            Some(auth)
        }
        Err(e) => {
            tracing::warn!(
                target: "scanctx.builder",
                error = %e,
                "auth descriptor unusable, continuing without it (manual setup required)"
            );
            issues.push(BuildIssue::new(BuildStage::Auth, cfg.display_name.as_str(), e));
            None
        }
    }
}

fn attach_session(cfg: &SessionConfig, issues: &mut Vec<BuildIssue>) -> SessionTrackingPolicy {
    match SessionTrackingPolicy::from_config(cfg) {
        Ok(policy) => {
            tracing::info!(
                target: "scanctx.builder",
                headers = policy.header_names().len(),
                cookies = policy.cookie_names().len(),
                timeout_seconds = policy.timeout_seconds(),
                "session tracking attached"
            );
            policy
        }
        Err(e) => {
            tracing::warn!(target: "scanctx.builder", error = %e, "session policy unusable, tracking nothing");
            issues.push(BuildIssue::new(BuildStage::Session, "session", e));
            SessionTrackingPolicy::empty()
        }
    }
}

fn populate_tiers(cfg: &PolicyConfig, issues: &mut Vec<BuildIssue>) -> PolicyTierRegistry {
    let mut registry = PolicyTierRegistry::new();
    for entry in &cfg.tiers {
        let result = entry
            .tier
            .parse::<Tier>()
            .and_then(|tier| registry.register(tier, &entry.checks));
        match result {
            Ok(added) => {
                tracing::debug!(target: "scanctx.builder", tier = %entry.tier, added, "tier registered");
            }
            Err(e) => {
                tracing::warn!(target: "scanctx.builder", tier = %entry.tier, error = %e, "tier entry skipped");
                issues.push(BuildIssue::new(BuildStage::PolicyTiers, entry.tier.as_str(), e));
            }
        }
    }
    registry
}

fn populate_topology(cfg: &TopologyConfig, issues: &mut Vec<BuildIssue>) -> TopologyCheckRegistry {
    let mut registry = TopologyCheckRegistry::new();
    for check in &cfg.checks {
        match registry.register(check) {
            Ok(()) => {
                tracing::debug!(target: "scanctx.builder", check = %check.name, "topology check registered");
            }
            Err(e) => {
                tracing::warn!(target: "scanctx.builder", check = %check.name, error = %e, "topology check skipped");
                issues.push(BuildIssue::new(BuildStage::TopologyChecks, check.name.as_str(), e));
            }
        }
    }
    registry
}
