// Stores layer - Data access and repository pattern
pub mod activity_log_store;
pub mod comment_store;
pub mod complaint_store;
pub mod user_store;

pub use activity_log_store::ActivityLogStore;
pub use comment_store::CommentStore;
pub use complaint_store::{ComplaintStore, StatusCounts};
pub use user_store::{RoleCounts, UserStore};
