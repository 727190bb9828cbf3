use scanctx_core::api::{ContextConfig, EngineHandoff, HandoffConfig};

use crate::handoff::{FileHandoff, StdoutHandoff};

pub fn build_handoff(cfg: &ContextConfig) -> Option<Box<dyn EngineHandoff>> {
    match &cfg.handoff {
        HandoffConfig::None => None,
        HandoffConfig::Stdout => Some(Box::new(StdoutHandoff::new())),
        HandoffConfig::File(file_cfg) => Some(Box::new(FileHandoff::new(file_cfg.path.clone()))),
    }
}
