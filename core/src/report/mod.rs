mod report;
mod summary;

pub use report::ContextReport;
pub use summary::ContextSummary;
