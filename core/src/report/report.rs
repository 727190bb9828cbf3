use serde::Serialize;

use super::ContextSummary;
use crate::descriptor::ContextId;
use crate::engine::{BuildIssue, BuiltContext};
use crate::error::ContextError;
use crate::topology::TopologyCheck;

/// Machine-readable outcome of a build. On failure only `success` and
/// `error` are present.
#[derive(Debug, Clone, Serialize)]
pub struct ContextReport {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_id: Option<ContextId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<ContextSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topology_checks: Option<Vec<TopologyCheck>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub non_fatal_errors: Option<Vec<BuildIssue>>,
}

impl ContextReport {
    pub fn from_result(result: &Result<BuiltContext, ContextError>) -> Self {
        match result {
            Ok(built) => Self::success(built),
            Err(e) => Self::failure(e),
        }
    }

    pub fn success(built: &BuiltContext) -> Self {
        let d = &built.descriptor;
        Self {
            success: true,
            context_id: Some(d.id()),
            message: Some(format!("{} scan context configured successfully", d.name())),
            error: None,
            summary: Some(built.summary.clone()),
            topology_checks: Some(d.topology().all().to_vec()),
            non_fatal_errors: Some(built.issues.clone()),
        }
    }

    pub fn failure(err: &ContextError) -> Self {
        Self {
            success: false,
            context_id: None,
            message: None,
            error: Some(err.to_string()),
            summary: None,
            topology_checks: None,
            non_fatal_errors: None,
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ContextConfig, TierEntryConfig};
    use crate::engine::ContextBuilder;

    #[test]
    fn test_success_report() {
        let mut cfg = ContextConfig::default();
        cfg.policy.tiers.push(TierEntryConfig::new("severe", &["X"]));
        let result = ContextBuilder::new(&cfg).build();
        let report = ContextReport::from_result(&result);
        let v = serde_json::to_value(&report).unwrap();

        assert_eq!(v["success"], true);
        assert!(v["context_id"].is_string());
        assert_eq!(v["summary"]["tier_counts"]["high"], 9);
        assert_eq!(v["summary"]["tier_counts"]["medium"], 6);
        assert_eq!(v["summary"]["tier_counts"]["low"], 4);
        assert_eq!(v["topology_checks"].as_array().map(Vec::len), Some(4));
        assert_eq!(v["non_fatal_errors"][0]["stage"], "policy_tiers");
        assert_eq!(v["non_fatal_errors"][0]["subject"], "severe");
        assert!(v.get("error").is_none());
    }

    #[test]
    fn test_failure_report_has_only_error() {
        let mut cfg = ContextConfig::default();
        cfg.scope.include = vec!["(".into()];
        let report = ContextReport::from_result(&ContextBuilder::new(&cfg).build());
        let v = serde_json::to_value(&report).unwrap();

        let obj = v.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(v["success"], false);
        assert!(v["error"].as_str().unwrap().contains("invalid pattern"));
    }

    #[test]
    fn test_summary_text_never_shows_credentials() {
        let cfg = ContextConfig::default();
        let built = ContextBuilder::new(&cfg).build().unwrap();
        let text = built.summary.format_text();

        assert!(text.contains("high_priority_checks: 9"));
        assert!(text.contains("fields username/password"));
        assert!(text.contains("- Container Metadata Access"));
        assert!(!text.contains("testpass123"));
        assert_eq!(built.summary.total_checks(), 19);
    }
}
