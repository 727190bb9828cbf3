use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use regex::Regex;
use serde::{Serialize, Serializer};
use url::Url;

use crate::config::AuthConfig;
use crate::error::ContextError;

/// Regex applied to the login response; capture group 1 is the bearer token.
#[derive(Debug, Clone)]
pub struct TokenPattern {
    source: String,
    regex: Regex,
}

impl Serialize for TokenPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

impl TokenPattern {
    pub fn new(pattern: &str) -> Result<Self, ContextError> {
        let regex =
            Regex::new(pattern).map_err(|e| ContextError::invalid_pattern(pattern, e.to_string()))?;
        // captures_len counts the implicit whole-match group
        if regex.captures_len() < 2 {
            return Err(ContextError::invalid_pattern(
                pattern,
                "token pattern needs a capture group for the token",
            ));
        }
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn extract<'a>(&self, haystack: &'a str) -> Option<&'a str> {
        self.regex
            .captures(haystack)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
    }
}

/// Declarative login description handed to the scan engine. Nothing here
/// performs a login.
#[derive(Clone, Serialize)]
pub struct AuthDescriptor {
    display_name: String,
    login_url: String,
    credentials: BTreeMap<String, String>,
    username_field: String,
    password_field: String,
    auth_headers: BTreeSet<String>,
    token_pattern: Option<TokenPattern>,
}

impl AuthDescriptor {
    pub fn build(cfg: &AuthConfig) -> Result<Self, ContextError> {
        let login_url = required(cfg.login_url.as_deref(), "auth.login_url")?;
        let credentials = cfg
            .credentials
            .clone()
            .ok_or_else(|| ContextError::missing("auth.credentials"))?;
        let username_field = required(cfg.username_field.as_deref(), "auth.username_field")?;
        let password_field = required(cfg.password_field.as_deref(), "auth.password_field")?;

        let parsed = Url::parse(login_url).map_err(|e| {
            ContextError::InvalidArgument(format!("auth.login_url `{login_url}` is not an absolute URL: {e}"))
        })?;
        if !parsed.has_host() {
            return Err(ContextError::InvalidArgument(format!(
                "auth.login_url `{login_url}` has no host"
            )));
        }

        let token_pattern = cfg
            .token_pattern
            .as_deref()
            .map(TokenPattern::new)
            .transpose()?;

        Ok(Self {
            display_name: cfg.display_name.clone(),
            login_url: login_url.to_string(),
            credentials,
            username_field: username_field.to_string(),
            password_field: password_field.to_string(),
            auth_headers: cfg
                .auth_headers
                .iter()
                .map(|h| h.trim())
                .filter(|h| !h.is_empty())
                .map(str::to_string)
                .collect(),
            token_pattern,
        })
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn login_url(&self) -> &str {
        &self.login_url
    }

    pub fn credentials(&self) -> &BTreeMap<String, String> {
        &self.credentials
    }

    pub fn username_field(&self) -> &str {
        &self.username_field
    }

    pub fn password_field(&self) -> &str {
        &self.password_field
    }

    pub fn auth_headers(&self) -> &BTreeSet<String> {
        &self.auth_headers
    }

    pub fn token_pattern(&self) -> Option<&TokenPattern> {
        self.token_pattern.as_ref()
    }

    /// The JSON body the engine posts to `login_url`.
    pub fn login_request_body(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.credentials
                .iter()
                .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
                .collect(),
        )
    }

    /// Pulls the bearer token out of a login response or header value.
    pub fn extract_token<'a>(&self, response: &'a str) -> Option<&'a str> {
        self.token_pattern.as_ref()?.extract(response)
    }
}

// Credential values stay out of logs.
impl fmt::Debug for AuthDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthDescriptor")
            .field("display_name", &self.display_name)
            .field("login_url", &self.login_url)
            .field("credential_keys", &self.credentials.keys().collect::<Vec<_>>())
            .field("username_field", &self.username_field)
            .field("password_field", &self.password_field)
            .field("auth_headers", &self.auth_headers)
            .field("token_pattern", &self.token_pattern.as_ref().map(TokenPattern::as_str))
            .finish()
    }
}

fn required<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, ContextError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ContextError::missing(field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> AuthConfig {
        AuthConfig::default()
    }

    #[test]
    fn test_build_from_defaults() {
        let auth = AuthDescriptor::build(&cfg()).unwrap();
        assert_eq!(auth.login_url(), "http://localhost:8083/api/tokens/generate");
        assert_eq!(auth.username_field(), "username");
        assert!(auth.auth_headers().contains("Authorization"));
        assert_eq!(auth.token_pattern().map(TokenPattern::as_str), Some("Bearer (.+)"));
    }

    #[test]
    fn test_missing_login_url() {
        let mut c = cfg();
        c.login_url = None;
        assert_eq!(
            AuthDescriptor::build(&c).unwrap_err(),
            ContextError::MissingField("auth.login_url".into())
        );

        c.login_url = Some("   ".into());
        assert_eq!(
            AuthDescriptor::build(&c).unwrap_err(),
            ContextError::MissingField("auth.login_url".into())
        );
    }

    #[test]
    fn test_missing_credentials() {
        let mut c = cfg();
        c.credentials = None;
        assert_eq!(
            AuthDescriptor::build(&c).unwrap_err(),
            ContextError::MissingField("auth.credentials".into())
        );
    }

    #[test]
    fn test_missing_field_names() {
        let mut c = cfg();
        c.password_field = None;
        assert_eq!(
            AuthDescriptor::build(&c).unwrap_err(),
            ContextError::MissingField("auth.password_field".into())
        );
    }

    #[test]
    fn test_relative_login_url_rejected() {
        let mut c = cfg();
        c.login_url = Some("/api/tokens/generate".into());
        assert!(matches!(
            AuthDescriptor::build(&c).unwrap_err(),
            ContextError::InvalidArgument(_)
        ));

        c.login_url = Some("localhost:8083/api/tokens".into());
        assert!(matches!(
            AuthDescriptor::build(&c).unwrap_err(),
            ContextError::InvalidArgument(_)
        ));
    }

    #[test]
    fn test_token_pattern_without_group_rejected() {
        let mut c = cfg();
        c.token_pattern = Some("Bearer .+".into());
        assert_eq!(AuthDescriptor::build(&c).unwrap_err().kind(), "invalid_pattern");

        c.token_pattern = Some("(?:Bearer) .+".into());
        assert_eq!(AuthDescriptor::build(&c).unwrap_err().kind(), "invalid_pattern");

        c.token_pattern = Some("Bearer (".into());
        assert_eq!(AuthDescriptor::build(&c).unwrap_err().kind(), "invalid_pattern");
    }

    #[test]
    fn test_token_pattern_is_optional() {
        let mut c = cfg();
        c.token_pattern = None;
        let auth = AuthDescriptor::build(&c).unwrap();
        assert!(auth.token_pattern().is_none());
        assert_eq!(auth.extract_token("Bearer abc"), None);
    }

    #[test]
    fn test_extract_token() {
        let auth = AuthDescriptor::build(&cfg()).unwrap();
        assert_eq!(auth.extract_token("Bearer eyJhbGciOi.x.y"), Some("eyJhbGciOi.x.y"));
        assert_eq!(auth.extract_token("no token here"), None);
    }

    #[test]
    fn test_login_body_and_debug_redaction() {
        let auth = AuthDescriptor::build(&cfg()).unwrap();
        assert_eq!(
            auth.login_request_body(),
            serde_json::json!({ "username": "testuser", "password": "testpass123" })
        );

        let dbg = format!("{auth:?}");
        assert!(dbg.contains("username"));
        assert!(!dbg.contains("testpass123"));
    }
}
