mod builder;
mod types;

pub use builder::ContextBuilder;
pub use types::{BuildIssue, BuildStage, BuiltContext};
