use std::fmt;

use regex::Regex;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::config::ScopeConfig;
use crate::error::ContextError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Include,
    Exclude,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Include => f.write_str("include"),
            Direction::Exclude => f.write_str("exclude"),
        }
    }
}

/// One scope rule. Patterns must match the whole URL, the same way the scan
/// engine applies context include/exclude regexes.
#[derive(Debug, Clone, Serialize)]
pub struct ScopePattern {
    pattern: String,
    direction: Direction,
    #[serde(skip)]
    compiled: Regex,
}

impl ScopePattern {
    pub fn new(pattern: &str, direction: Direction) -> Result<Self, ContextError> {
        // Validate the raw source first: wrapping can turn an unbalanced
        // pattern such as `a)(b` into a valid one.
        Regex::new(pattern).map_err(|e| ContextError::invalid_pattern(pattern, e.to_string()))?;
        // Anchor the parsed form, not the source text. Verbose-mode comments
        // run to end of line and would swallow a textual `)$` suffix.
        let hir = regex_syntax::parse(pattern)
            .map_err(|e| ContextError::invalid_pattern(pattern, e.to_string()))?;
        let compiled = Regex::new(&format!("^(?:{hir})$"))
            .map_err(|e| ContextError::invalid_pattern(pattern, e.to_string()))?;
        Ok(Self {
            pattern: pattern.to_string(),
            direction,
            compiled,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn matches(&self, url: &str) -> bool {
        self.compiled.is_match(url)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScopeVerdict {
    pub url: String,
    pub in_scope: bool,
    pub matched_include: Option<String>,
    pub matched_exclude: Option<String>,
}

/// Ordered include/exclude rules deciding which URLs a scan may touch.
///
/// A URL is in scope iff it matches at least one include pattern and no
/// exclude pattern. With no include patterns nothing is in scope.
#[derive(Debug, Clone, Default)]
pub struct ScopeMatcher {
    patterns: Vec<ScopePattern>,
}

impl ScopeMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the matcher for a `[scope]` table. An empty include list is
    /// rejected since nothing could ever be in scope.
    pub fn from_config(cfg: &ScopeConfig) -> Result<Self, ContextError> {
        if cfg.include.is_empty() {
            return Err(ContextError::missing("scope.include"));
        }
        let mut scope = Self::new();
        for p in &cfg.include {
            scope.add_include(p)?;
        }
        for p in &cfg.exclude {
            scope.add_exclude(p)?;
        }
        Ok(scope)
    }

    pub fn add_include(&mut self, pattern: &str) -> Result<(), ContextError> {
        self.push(pattern, Direction::Include)
    }

    pub fn add_exclude(&mut self, pattern: &str) -> Result<(), ContextError> {
        self.push(pattern, Direction::Exclude)
    }

    fn push(&mut self, pattern: &str, direction: Direction) -> Result<(), ContextError> {
        let p = ScopePattern::new(pattern, direction)?;
        tracing::debug!(
            target: "scanctx.scope",
            pattern = %pattern,
            direction = %direction,
            "scope pattern added"
        );
        self.patterns.push(p);
        Ok(())
    }

    pub fn is_in_scope(&self, url: &str) -> bool {
        self.explain(url).in_scope
    }

    pub fn explain(&self, url: &str) -> ScopeVerdict {
        let matched_include = self
            .of(Direction::Include)
            .find(|p| p.matches(url))
            .map(|p| p.pattern.clone());
        let matched_exclude = self
            .of(Direction::Exclude)
            .find(|p| p.matches(url))
            .map(|p| p.pattern.clone());

        ScopeVerdict {
            url: url.to_string(),
            in_scope: matched_include.is_some() && matched_exclude.is_none(),
            matched_include,
            matched_exclude,
        }
    }

    pub fn patterns(&self) -> &[ScopePattern] {
        &self.patterns
    }

    pub fn includes(&self) -> impl Iterator<Item = &str> {
        self.of(Direction::Include).map(ScopePattern::as_str)
    }

    pub fn excludes(&self) -> impl Iterator<Item = &str> {
        self.of(Direction::Exclude).map(ScopePattern::as_str)
    }

    pub fn include_count(&self) -> usize {
        self.of(Direction::Include).count()
    }

    pub fn exclude_count(&self) -> usize {
        self.of(Direction::Exclude).count()
    }

    fn of(&self, direction: Direction) -> impl Iterator<Item = &ScopePattern> {
        self.patterns.iter().filter(move |p| p.direction == direction)
    }
}

impl Serialize for ScopeMatcher {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut st = serializer.serialize_struct("ScopeMatcher", 2)?;
        st.serialize_field("include", &self.includes().collect::<Vec<_>>())?;
        st.serialize_field("exclude", &self.excludes().collect::<Vec<_>>())?;
        st.end()
    }
}
