mod registry;

pub use registry::{CheckSubjects, TopologyCheck, TopologyCheckRegistry};
