// Test utilities shared across unit tests
// Only compiled when running tests

use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

use crate::app_data::AppData;
use crate::types::db::{complaint, user};
use crate::types::internal::{ActorContext, Role};

/// Create an in-memory database with all migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Create AppData backed by an in-memory database
pub async fn setup_app_data() -> Arc<AppData> {
    let db = setup_test_db().await;
    Arc::new(AppData::init(db, "test-jwt-secret-minimum-32-characters"))
}

/// Insert a user directly, bypassing registration
///
/// The password hash is a fixed opaque value; tests that exercise real
/// credential checks go through AuthService::register instead.
pub async fn create_test_user(
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
        .expect("Failed to create test user")
}

/// Insert a complaint owned by the given student
pub async fn create_test_complaint(
    app_data: &Arc<AppData>,
    student: &user::Model,
) -> complaint::Model {
    app_data
        .complaint_store
        .insert(
            &student.id,
            "Broken projector",
            "Facilities",
            "The projector in room 204 is broken",
        )
        .await
        .expect("Failed to create test complaint")
}

/// Actor snapshot for a stored user
pub fn actor_for(user: &user::Model) -> ActorContext {
    ActorContext::new(
        user.id.clone(),
        Role::parse(&user.role).expect("test user has a valid role"),
        user.is_active,
    )
}
