pub mod codacy_client;
pub mod reconciler;
pub mod report_writer;
pub mod rule_source;
pub mod synchronizer;
