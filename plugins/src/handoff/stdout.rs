use async_trait::async_trait;
use scanctx_core::api::{EngineHandoff, ScanContextDescriptor};
use tokio::io::AsyncWriteExt;

/// Prints the engine document, for piping into an engine-side loader.
#[derive(Debug, Default)]
pub struct StdoutHandoff;

impl StdoutHandoff {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EngineHandoff for StdoutHandoff {
    fn name(&self) -> &str {
        "stdout"
    }

    async fn hand_off(&self, descriptor: &ScanContextDescriptor) -> anyhow::Result<()> {
        let mut doc = descriptor.to_json_pretty()?;
        doc.push('\n');

        let mut out = tokio::io::stdout();
        out.write_all(doc.as_bytes()).await?;
        out.flush().await?;

        tracing::debug!(target: "scanctx.handoff", context_id = %descriptor.id(), "descriptor written to stdout");
        Ok(())
    }
}
