pub mod constants;
pub mod credentials;
