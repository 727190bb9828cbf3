mod registry;
mod tier;

pub use registry::PolicyTierRegistry;
pub use tier::Tier;
