pub mod status_log;
pub mod summary;
