pub mod api;
pub mod cli;
pub mod pattern;
pub mod reconciliation;
pub mod report;
pub mod rule;
pub mod sync_outcome;
