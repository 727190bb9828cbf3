pub mod api;
pub mod auth;
pub mod config;
pub mod descriptor;
pub mod engine;
pub mod error;
pub mod handoff;
pub mod policy;
pub mod report;
pub mod scope;
pub mod session;
pub mod topology;
