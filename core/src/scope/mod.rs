mod matcher;

pub use matcher::{Direction, ScopeMatcher, ScopePattern, ScopeVerdict};
