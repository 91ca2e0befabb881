pub mod config;
pub mod constants;
pub mod report;
pub mod schema;
pub mod session;
pub mod ticker;
pub mod tree;
pub mod upload;
