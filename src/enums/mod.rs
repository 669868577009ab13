pub mod commands;
pub mod severity;
