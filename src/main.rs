use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use poem::{listener::TcpListener, Route, Server};
use poem_openapi::OpenApiService;

use complaint_desk_backend::api::{AdminUsersApi, AuthApi, ComplaintsApi, HealthApi};
use complaint_desk_backend::app_data::AppData;
use complaint_desk_backend::config::{init_logging, DatabaseSettings};

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_logging().expect("Failed to initialize logging");

    let settings = DatabaseSettings::from_env();
    let db = settings
        .connect()
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database: {}", settings.url);

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    tracing::info!("Database migrations completed");

    let jwt_secret =
        std::env::var("JWT_SECRET").expect("JWT_SECRET environment variable must be set");

    let app_data = Arc::new(AppData::init(db, &jwt_secret));

    let api_service = OpenApiService::new(
        (
            HealthApi,
            AuthApi::new(app_data.clone()),
            ComplaintsApi::new(app_data.clone()),
            AdminUsersApi::new(app_data.clone()),
        ),
        "Complaint Desk API",
        "1.0.0",
    )
    .server("http://localhost:3000/api");

    let ui = api_service.swagger_ui();

    let app = Route::new()
        .nest("/api", api_service)
        .nest("/swagger", ui);

    tracing::info!("Starting server on http://0.0.0.0:3000");

    Server::new(TcpListener::bind("0.0.0.0:3000")).run(app).await
}
