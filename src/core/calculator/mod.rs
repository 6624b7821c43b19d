pub mod report;
pub mod sessions;
pub mod summary;
