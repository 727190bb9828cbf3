//! End-to-end tests for scan-context construction.
//!
//! Each test builds real components (or a whole context from config) and
//! checks the observable decisions: scope verdicts, tier lookups, and the
//! fatal / non-fatal split of the builder.

use pretty_assertions::assert_eq;
use std::collections::BTreeMap;

use scanctx_core::api::{
    AuthConfig, AuthDescriptor, BuildStage, ContextBuilder, ContextConfig, ContextError,
    ContextReport, PolicyConfig, PolicyTierRegistry, ScopeConfig, ScopeMatcher, TierEntryConfig,
    Tier, TopologyCheckConfig, TopologyCheckRegistry,
};

fn scope_config(include: &[&str], exclude: &[&str]) -> ScopeConfig {
    ScopeConfig {
        include: include.iter().map(|s| s.to_string()).collect(),
        exclude: exclude.iter().map(|s| s.to_string()).collect(),
    }
}

/// Scenario A: include only.
#[test]
fn test_scope_include_only() {
    let mut cfg = ContextConfig::default();
    cfg.scope = scope_config(&["http://x/api/.*"], &[]);

    let built = ContextBuilder::new(&cfg).build().expect("scope is valid");
    let d = &built.descriptor;
    assert!(d.is_in_scope("http://x/api/foo"));
    assert!(!d.is_in_scope("http://x/static/a"));
}

/// Scenario B: exclude beats include.
#[test]
fn test_scope_exclude_precedence() {
    let mut cfg = ContextConfig::default();
    cfg.scope = scope_config(&["http://x/api/.*"], &[".*/actuator/.*"]);

    let built = ContextBuilder::new(&cfg).build().expect("scope is valid");
    assert!(!built.descriptor.is_in_scope("http://x/api/actuator/health"));
    assert!(built.descriptor.is_in_scope("http://x/api/customers/1"));
}

#[test]
fn test_empty_include_set_matches_nothing() {
    let mut m = ScopeMatcher::new();
    m.add_exclude(".*/static/.*").unwrap();
    for url in ["http://x/api/foo", "http://localhost:8080/api/a", "", "not a url"] {
        assert!(!m.is_in_scope(url), "{url}");
    }
}

/// Scenario C: cross-tier duplicate.
#[test]
fn test_duplicate_check_keeps_first_tier() {
    let mut r = PolicyTierRegistry::new();
    r.register(Tier::High, ["SQL Injection"]).unwrap();

    let err = r.register(Tier::Medium, ["SQL Injection"]).unwrap_err();
    assert!(matches!(err, ContextError::DuplicateCheck { existing: Tier::High, requested: Tier::Medium, .. }));
    assert_eq!(r.tier_of("SQL Injection"), Some(Tier::High));
}

/// Scenario D: auth descriptor validation.
#[test]
fn test_auth_descriptor_validation() {
    let mut no_group = AuthConfig::default();
    no_group.token_pattern = Some("Bearer .+".into());
    assert!(matches!(
        AuthDescriptor::build(&no_group),
        Err(ContextError::InvalidPattern { .. })
    ));

    let mut no_url = AuthConfig::default();
    no_url.login_url = None;
    assert!(matches!(
        AuthDescriptor::build(&no_url),
        Err(ContextError::MissingField(_))
    ));
}

/// Scenario E: a malformed tier entry does not fail the build.
#[test]
fn test_malformed_tier_entry_is_non_fatal() {
    let mut cfg = ContextConfig::default();
    cfg.scope = scope_config(&["http://x/api/.*"], &[]);
    cfg.policy = PolicyConfig {
        tiers: vec![
            TierEntryConfig::new("high", &["SQL Injection", "Command Injection"]),
            TierEntryConfig::new("catastrophic", &["Remote Code Execution"]),
            TierEntryConfig::new("low", &["Cache Control"]),
        ],
    };

    let result = ContextBuilder::new(&cfg).build();
    let report = ContextReport::from_result(&result);
    assert!(report.success);

    let built = result.expect("build succeeds");
    assert_eq!(built.issues.len(), 1);
    assert_eq!(built.issues[0].stage, BuildStage::PolicyTiers);
    assert_eq!(built.issues[0].subject, "catastrophic");

    let counts = built.descriptor.policy().tier_counts();
    assert_eq!(
        counts,
        BTreeMap::from([(Tier::High, 2), (Tier::Medium, 0), (Tier::Low, 1)])
    );
    assert_eq!(built.descriptor.policy().tier_of("Remote Code Execution"), None);
}

#[test]
fn test_tier_counts_round_trip() {
    let mut cfg = ContextConfig::default();
    cfg.policy = PolicyConfig {
        tiers: vec![
            TierEntryConfig::new("medium", &["Directory Browsing", "Backup File Disclosure"]),
            TierEntryConfig::new("high", &["SQL Injection"]),
            TierEntryConfig::new("medium", &["Information Disclosure", "Directory Browsing"]),
            TierEntryConfig::new("low", &["Cookie Security", "Cache Control", "Technology Detection"]),
        ],
    };

    let built = ContextBuilder::new(&cfg).build().unwrap();
    assert!(built.issues.is_empty());

    let expected = BTreeMap::from([(Tier::High, 1), (Tier::Medium, 3), (Tier::Low, 3)]);
    assert_eq!(built.descriptor.policy().tier_counts(), expected);
    assert_eq!(built.summary.tier_counts, expected);
    assert_eq!(
        built.descriptor.policy().checks(Tier::Medium),
        ["Directory Browsing", "Backup File Disclosure", "Information Disclosure"]
    );
}

#[test]
fn test_topology_check_shape_enforced() {
    let mut r = TopologyCheckRegistry::new();

    let both = TopologyCheckConfig {
        name: "Mixed".into(),
        description: String::new(),
        targets: Some(vec!["http://169.254.169.254/latest/meta-data/".into()]),
        scenarios: Some(vec!["gateway bypass".into()]),
    };
    let neither = TopologyCheckConfig {
        name: "Empty".into(),
        description: String::new(),
        targets: None,
        scenarios: None,
    };

    assert!(matches!(r.register(&both), Err(ContextError::InvalidArgument(_))));
    assert!(matches!(r.register(&neither), Err(ContextError::InvalidArgument(_))));
    assert!(r.all().is_empty());
}

#[test]
fn test_fatal_scope_failure_report() {
    let mut cfg = ContextConfig::default();
    cfg.scope = scope_config(&["http://x/api/.*"], &["*.bak"]);

    let result = ContextBuilder::new(&cfg).build();
    assert!(matches!(result, Err(ContextError::InvalidPattern { .. })));

    let report = ContextReport::from_result(&result);
    assert!(!report.success);
    assert!(report.summary.is_none());
    assert!(report.error.is_some());
}

#[test]
fn test_everything_degraded_still_succeeds() {
    let mut cfg = ContextConfig::default();
    cfg.auth.credentials = None;
    cfg.session.timeout_seconds = -5;
    cfg.policy.tiers = vec![TierEntryConfig::new("", &["X"])];
    cfg.topology.checks = vec![TopologyCheckConfig::with_scenarios("S", "", &[])];

    let built = ContextBuilder::new(&cfg).build().unwrap();
    let stages: Vec<BuildStage> = built.issues.iter().map(|i| i.stage).collect();
    assert_eq!(
        stages,
        vec![
            BuildStage::Auth,
            BuildStage::Session,
            BuildStage::PolicyTiers,
            BuildStage::TopologyChecks
        ]
    );
    assert!(built.is_degraded());
    assert!(built.descriptor.auth().is_none());
    assert!(built.descriptor.policy().is_empty());
    assert!(built.descriptor.topology().is_empty());
    assert!(built.summary.format_text().contains("auth: manual setup required"));
}

#[test]
fn test_descriptor_ids_are_unique_per_build() {
    let cfg = ContextConfig::default();
    let a = ContextBuilder::new(&cfg).build().unwrap();
    let b = ContextBuilder::new(&cfg).build().unwrap();
    assert_ne!(a.descriptor.id(), b.descriptor.id());
    assert_eq!(a.summary.context_id, a.descriptor.id());
}
