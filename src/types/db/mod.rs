// Database entities
pub mod activity_log;
pub mod comment;
pub mod complaint;
pub mod user;
