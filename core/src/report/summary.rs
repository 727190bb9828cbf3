use std::collections::BTreeMap;

use serde::Serialize;

use crate::descriptor::{ContextId, ScanContextDescriptor};
use crate::policy::Tier;

/// Counts and names describing a built context. Carries no credential values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextSummary {
    pub context_id: ContextId,
    pub context_name: String,
    pub include_patterns: usize,
    pub exclude_patterns: usize,
    pub tier_counts: BTreeMap<Tier, usize>,
    pub topology_check_count: usize,
    pub topology_checks: Vec<String>,
    pub auth_configured: bool,
    pub login_url: Option<String>,
    pub credential_fields: Option<(String, String)>,
    pub session_headers: Vec<String>,
    pub session_cookies: Vec<String>,
    pub session_timeout_seconds: u64,
    pub issue_count: usize,
}

impl ContextSummary {
    pub fn new(d: &ScanContextDescriptor, issue_count: usize) -> Self {
        let auth = d.auth();
        Self {
            context_id: d.id(),
            context_name: d.name().to_string(),
            include_patterns: d.scope().include_count(),
            exclude_patterns: d.scope().exclude_count(),
            tier_counts: d.policy().tier_counts(),
            topology_check_count: d.topology().len(),
            topology_checks: d.topology().all().iter().map(|c| c.name.clone()).collect(),
            auth_configured: auth.is_some(),
            login_url: auth.map(|a| a.login_url().to_string()),
            credential_fields: auth
                .map(|a| (a.username_field().to_string(), a.password_field().to_string())),
            session_headers: d.session().header_names().iter().cloned().collect(),
            session_cookies: d.session().cookie_names().iter().cloned().collect(),
            session_timeout_seconds: d.session().timeout_seconds(),
            issue_count,
        }
    }

    pub fn total_checks(&self) -> usize {
        self.tier_counts.values().sum()
    }

    pub fn format_text(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!("Scan context: {}\n", self.context_name));
        out.push_str(&format!("context_id: {}\n", self.context_id));
        out.push_str(&format!("include_patterns: {}\n", self.include_patterns));
        out.push_str(&format!("exclude_patterns: {}\n", self.exclude_patterns));

        for (tier, count) in &self.tier_counts {
            out.push_str(&format!("{tier}_priority_checks: {count}\n"));
        }

        match (&self.login_url, &self.credential_fields) {
            (Some(url), Some((user, pass))) => {
                out.push_str(&format!("auth: {url} (fields {user}/{pass})\n"));
            }
            _ => out.push_str("auth: manual setup required\n"),
        }

        out.push_str(&format!(
            "session_tokens: {}\n",
            join_or_none(&self.session_headers)
        ));
        out.push_str(&format!(
            "session_cookies: {}\n",
            join_or_none(&self.session_cookies)
        ));
        out.push_str(&format!(
            "session_timeout_seconds: {}\n",
            self.session_timeout_seconds
        ));

        out.push_str(&format!("topology_checks: {}\n", self.topology_check_count));
        for name in &self.topology_checks {
            out.push_str(&format!("- {name}\n"));
        }

        if self.issue_count > 0 {
            out.push_str(&format!("non_fatal_errors: {}\n", self.issue_count));
        }

        out
    }
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "(none)".to_string()
    } else {
        items.join(", ")
    }
}
