mod config_error;
mod context_error;

pub use config_error::ConfigError;
pub use context_error::ContextError;
