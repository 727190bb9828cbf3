use scanctx_core::api::{ConfigError, ContextError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("scan context build failed: {0}")]
    Context(#[from] ContextError),

    #[error("handoff `{name}` failed")]
    Handoff {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to render output")]
    Render(#[from] serde_json::Error),
}
