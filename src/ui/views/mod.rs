pub mod config;
pub mod stage;
pub mod status_line;
pub mod summary;
