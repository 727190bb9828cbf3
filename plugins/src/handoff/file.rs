use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use scanctx_core::api::{EngineHandoff, ScanContextDescriptor};

/// Writes the engine document to a JSON file, creating parent directories.
/// An existing file is replaced.
#[derive(Debug, Clone)]
pub struct FileHandoff {
    path: PathBuf,
}

impl FileHandoff {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl EngineHandoff for FileHandoff {
    fn name(&self) -> &str {
        "file"
    }

    async fn hand_off(&self, descriptor: &ScanContextDescriptor) -> anyhow::Result<()> {
        let doc = descriptor.to_json_pretty()?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("create handoff dir {}", parent.display()))?;
        }
        tokio::fs::write(&self.path, doc)
            .await
            .with_context(|| format!("write handoff file {}", self.path.display()))?;

        tracing::info!(
            target: "scanctx.handoff",
            path = %self.path.display(),
            context_id = %descriptor.id(),
            "descriptor handed off"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scanctx_core::api::{ContextBuilder, ContextConfig};

    #[tokio::test]
    async fn test_writes_engine_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("context.json");

        let built = ContextBuilder::new(&ContextConfig::default()).build().unwrap();
        let sink = FileHandoff::new(&path);
        sink.hand_off(&built.descriptor).await.unwrap();

        let raw = tokio::fs::read_to_string(&path).await.unwrap();
        let v: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(v["id"], serde_json::json!(built.descriptor.id().to_string()));
        assert_eq!(v["scope"]["include"].as_array().map(Vec::len), Some(7));
        assert_eq!(v["auth"]["login_url"], "http://localhost:8083/api/tokens/generate");
        assert_eq!(v["auth"]["token_pattern"], "Bearer (.+)");
        assert_eq!(v["topology"][3]["scenarios"].as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn test_unwritable_path_errors() {
        let dir = tempfile::tempdir().unwrap();
        // a directory cannot be overwritten with a file
        let sink = FileHandoff::new(dir.path());

        let built = ContextBuilder::new(&ContextConfig::default()).build().unwrap();
        assert!(sink.hand_off(&built.descriptor).await.is_err());
    }
}
