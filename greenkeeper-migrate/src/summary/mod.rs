//! Per-repository outcomes and the totals of a migration run.

mod result;
mod run_summary;

pub use result::ProcessingResult;
pub use run_summary::RunSummary;
