//! Contract for the external scan engine.
//!
//! The core never drives a scan. It produces a [`ScanContextDescriptor`] and
//! an `EngineHandoff` implementation delivers it to whatever runs the scan.

use async_trait::async_trait;

use crate::descriptor::ScanContextDescriptor;

#[async_trait]
pub trait EngineHandoff: Send + Sync {
    fn name(&self) -> &str;

    async fn hand_off(&self, descriptor: &ScanContextDescriptor) -> anyhow::Result<()>;
}
