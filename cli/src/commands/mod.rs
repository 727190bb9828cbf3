pub mod build;
pub mod cli;
pub mod scope;
pub mod tier;
