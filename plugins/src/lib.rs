pub mod factory;
pub mod handoff;
