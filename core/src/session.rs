use std::collections::BTreeSet;

use serde::Serialize;

use crate::config::SessionConfig;
use crate::error::ContextError;

pub const DEFAULT_SESSION_TIMEOUT_SECS: u64 = 3_600;

/// Headers and cookies that carry session state, plus the idle timeout the
/// engine should assume. The timeout is data only; nothing here enforces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionTrackingPolicy {
    header_names: BTreeSet<String>,
    cookie_names: BTreeSet<String>,
    timeout_seconds: u64,
}

impl SessionTrackingPolicy {
    pub fn build<H, C, S>(header_names: H, cookie_names: C, timeout_seconds: i64) -> Result<Self, ContextError>
    where
        H: IntoIterator<Item = S>,
        C: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if timeout_seconds <= 0 {
            return Err(ContextError::InvalidArgument(format!(
                "session timeout must be positive, got {timeout_seconds}"
            )));
        }
        Ok(Self {
            header_names: names(header_names),
            cookie_names: names(cookie_names),
            timeout_seconds: timeout_seconds.unsigned_abs(),
        })
    }

    pub fn from_config(cfg: &SessionConfig) -> Result<Self, ContextError> {
        Self::build(&cfg.header_names, &cfg.cookie_names, cfg.timeout_seconds)
    }

    /// Tracks nothing; used when the configured policy is unusable.
    pub fn empty() -> Self {
        Self {
            header_names: BTreeSet::new(),
            cookie_names: BTreeSet::new(),
            timeout_seconds: DEFAULT_SESSION_TIMEOUT_SECS,
        }
    }

    pub fn header_names(&self) -> &BTreeSet<String> {
        &self.header_names
    }

    pub fn cookie_names(&self) -> &BTreeSet<String> {
        &self.cookie_names
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    pub fn is_empty(&self) -> bool {
        self.header_names.is_empty() && self.cookie_names.is_empty()
    }
}

fn names<I, S>(items: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|s| s.as_ref().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
