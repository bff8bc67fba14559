use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::services::TokenService;
use crate::stores::{ActivityLogStore, CommentStore, ComplaintStore, UserStore};

/// Centralized application data following the main-owned stores pattern
///
/// All stores are created once at startup and shared across services
/// via `Arc<AppData>`. Services extract the subset they need, which
/// keeps their constructors stable as the store set grows.
pub struct AppData {
    pub db: DatabaseConnection,
    pub user_store: Arc<UserStore>,
    pub complaint_store: Arc<ComplaintStore>,
    pub comment_store: Arc<CommentStore>,
    pub activity_log_store: Arc<ActivityLogStore>,
    pub token_service: Arc<TokenService>,
}

impl AppData {
    /// Initialize all application data
    ///
    /// The database must already be connected and migrated.
    pub fn init(db: DatabaseConnection, jwt_secret: &str) -> Self {
        tracing::debug!("Creating stores...");

        let user_store = Arc::new(UserStore::new(db.clone()));
        let complaint_store = Arc::new(ComplaintStore::new(db.clone()));
        let comment_store = Arc::new(CommentStore::new(db.clone()));
        let activity_log_store = Arc::new(ActivityLogStore::new(db.clone()));
        let token_service = Arc::new(TokenService::new(jwt_secret));

        tracing::debug!("Stores created");

        Self {
            db,
            user_store,
            complaint_store,
            comment_store,
            activity_log_store,
            token_service,
        }
    }
}
