use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Static input for one scan-context build.
///
/// Every table is optional in the file; a missing table falls back to the
/// microservices setup the scanner ships with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextConfig {
    #[serde(default = "default_context_name")]
    pub context_name: String,

    #[serde(default)]
    pub scope: ScopeConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub policy: PolicyConfig,

    #[serde(default)]
    pub topology: TopologyConfig,

    #[serde(default)]
    pub handoff: HandoffConfig,
}

fn default_context_name() -> String {
    "NNGC-MicroServices".to_string()
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            context_name: default_context_name(),
            scope: ScopeConfig::default(),
            auth: AuthConfig::default(),
            session: SessionConfig::default(),
            policy: PolicyConfig::default(),
            topology: TopologyConfig::default(),
            handoff: HandoffConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopeConfig {
    #[serde(default)]
    pub include: Vec<String>,

    #[serde(default)]
    pub exclude: Vec<String>,
}

fn default_include() -> Vec<String> {
    // gateway, customer, registration, token, email, stripe, google
    [8080, 8081, 8082, 8083, 8084, 8085, 8087]
        .iter()
        .map(|port| format!("http://localhost:{port}/api/.*"))
        .collect()
}

fn default_exclude() -> Vec<String> {
    vec![
        ".*/actuator/.*".into(),
        ".*/swagger-ui/.*".into(),
        ".*/webjars/.*".into(),
        ".*/static/.*".into(),
        ".*/favicon.ico".into(),
    ]
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            include: default_include(),
            exclude: default_exclude(),
        }
    }
}

/// Login flow description. Required fields are optional here so that a
/// partially written table is reported as a missing field instead of a parse
/// failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_auth_enabled")]
    pub enabled: bool,

    #[serde(default = "default_auth_display_name")]
    pub display_name: String,

    #[serde(default)]
    pub login_url: Option<String>,

    #[serde(default)]
    pub credentials: Option<BTreeMap<String, String>>,

    #[serde(default)]
    pub username_field: Option<String>,

    #[serde(default)]
    pub password_field: Option<String>,

    #[serde(default)]
    pub auth_headers: Vec<String>,

    #[serde(default)]
    pub token_pattern: Option<String>,
}

fn default_auth_enabled() -> bool {
    true
}

fn default_auth_display_name() -> String {
    "JWT Token Authentication".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enabled: default_auth_enabled(),
            display_name: default_auth_display_name(),
            login_url: Some("http://localhost:8083/api/tokens/generate".into()),
            credentials: Some(
                [
                    ("username".to_string(), "testuser".to_string()),
                    ("password".to_string(), "testpass123".to_string()),
                ]
                .into_iter()
                .collect(),
            ),
            username_field: Some("username".into()),
            password_field: Some("password".into()),
            auth_headers: vec!["Authorization".into()],
            token_pattern: Some("Bearer (.+)".into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_headers")]
    pub header_names: Vec<String>,

    #[serde(default = "default_session_cookies")]
    pub cookie_names: Vec<String>,

    #[serde(default = "default_session_timeout_seconds")]
    pub timeout_seconds: i64,
}

fn default_session_headers() -> Vec<String> {
    vec!["Authorization".into(), "X-Auth-Token".into(), "JWT".into()]
}

fn default_session_cookies() -> Vec<String> {
    vec!["JSESSIONID".into(), "SESSION".into()]
}

fn default_session_timeout_seconds() -> i64 {
    3_600
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            header_names: default_session_headers(),
            cookie_names: default_session_cookies(),
            timeout_seconds: default_session_timeout_seconds(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    #[serde(default)]
    pub tiers: Vec<TierEntryConfig>,
}

/// `tier` stays a string here; it is parsed when the entry is registered so
/// one bad entry does not reject the whole file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierEntryConfig {
    pub tier: String,

    #[serde(default)]
    pub checks: Vec<String>,
}

impl TierEntryConfig {
    pub fn new(tier: &str, checks: &[&str]) -> Self {
        Self {
            tier: tier.to_string(),
            checks: checks.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            tiers: vec![
                // injection, auth and session flaws on the APIs
                TierEntryConfig::new(
                    "high",
                    &[
                        "SQL Injection",
                        "Cross Site Scripting (Reflected)",
                        "Cross Site Scripting (Persistent)",
                        "Command Injection",
                        "LDAP Injection",
                        "XPath Injection",
                        "Authentication Bypass",
                        "Session Fixation",
                        "Insecure Direct Object References",
                    ],
                ),
                // configuration issues
                TierEntryConfig::new(
                    "medium",
                    &[
                        "Directory Browsing",
                        "Backup File Disclosure",
                        "Information Disclosure",
                        "Missing Security Headers",
                        "Weak Authentication",
                        "Insecure HTTP Methods",
                    ],
                ),
                // informational
                TierEntryConfig::new(
                    "low",
                    &[
                        "Server Information Disclosure",
                        "Technology Detection",
                        "Cookie Security",
                        "Cache Control",
                    ],
                ),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopologyConfig {
    #[serde(default)]
    pub checks: Vec<TopologyCheckConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopologyCheckConfig {
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub targets: Option<Vec<String>>,

    #[serde(default)]
    pub scenarios: Option<Vec<String>>,
}

impl TopologyCheckConfig {
    pub fn with_targets(name: &str, description: &str, targets: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            targets: Some(targets.iter().map(|t| t.to_string()).collect()),
            scenarios: None,
        }
    }

    pub fn with_scenarios(name: &str, description: &str, scenarios: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            targets: None,
            scenarios: Some(scenarios.iter().map(|s| s.to_string()).collect()),
        }
    }
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            checks: vec![
                TopologyCheckConfig::with_targets(
                    "Service Discovery Exposure",
                    "Check if service registry exposes internal service information",
                    &["http://localhost:8761/eureka/apps"],
                ),
                TopologyCheckConfig::with_targets(
                    "Direct Service Access",
                    "Test if services can be accessed directly bypassing API Gateway",
                    &[
                        "http://localhost:8081/api/customers",
                        "http://localhost:8082/api/register",
                        "http://localhost:8083/api/tokens",
                    ],
                ),
                TopologyCheckConfig::with_targets(
                    "Container Metadata Access",
                    "Check for access to container/cloud metadata endpoints",
                    &[
                        "http://169.254.169.254/latest/meta-data/",
                        "http://metadata.google.internal/computeMetadata/v1/",
                    ],
                ),
                TopologyCheckConfig::with_scenarios(
                    "Inter-Service Authorization",
                    "Test authorization between microservices",
                    &[
                        "Customer service accessing token service",
                        "Registration service accessing email service",
                    ],
                ),
            ],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "provider")]
pub enum HandoffConfig {
    #[default]
    #[serde(rename = "none")]
    None,
    #[serde(rename = "stdout")]
    Stdout,
    #[serde(rename = "file")]
    File(FileHandoffConfig),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHandoffConfig {
    pub path: String,
}
