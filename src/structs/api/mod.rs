pub mod coding_standard;
pub mod create_standard_request;
pub mod pagination;
pub mod pattern_config;
pub mod pattern_item;
pub mod patterns_response;
pub mod tool;
pub mod tool_patch_request;
