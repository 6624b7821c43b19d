pub mod id;
pub mod mark;
pub mod mark_type;
pub mod payload;
pub mod report;
pub mod session;
pub mod user;
