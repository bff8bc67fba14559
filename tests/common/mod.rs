// Shared setup for integration tests

use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use sea_orm::Database;

use complaint_desk_backend::app_data::AppData;
use complaint_desk_backend::types::db::user;
use complaint_desk_backend::types::internal::{ActorContext, Role};

/// AppData over a fresh in-memory database with migrations applied
pub async fn setup_app_data() -> Arc<AppData> {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    Arc::new(AppData::init(db, "integration-test-jwt-secret-32-chars"))
}

/// Insert a user directly with an opaque password hash
pub async fn create_user(
    app_data: &Arc<AppData>,
    name: &str,
    email: &str,
    role: Role,
) -> user::Model {
    app_data
        .user_store
        .insert(
            name,
            email,
            "$argon2id$v=19$m=19456,t=2,p=1$dGVzdHNhbHQ$dGVzdGhhc2g",
            role,
        )
        .await
        .expect("Failed to create user")
}

/// Actor snapshot for a stored user
pub fn actor_for(user: &user::Model) -> ActorContext {
    ActorContext::new(
        user.id.clone(),
        Role::parse(&user.role).expect("valid role"),
        user.is_active,
    )
}
