// Configuration layer - environment-driven settings
pub mod database;
pub mod logging;

pub use database::DatabaseSettings;
pub use logging::{init_logging, LoggingConfig, LoggingError};
