use thiserror::Error;

/// Infrastructure-level failures shared by stores and services
///
/// Not exposed via the API directly - endpoints convert these to a
/// generic failure response and the details stay in the server logs.
#[derive(Debug, Error)]
pub enum InternalError {
    #[error("Database error during {operation}: {source}")]
    Database {
        operation: String,
        source: sea_orm::DbErr,
    },

    #[error("Parse error: failed to parse {value_type}: {message}")]
    Parse {
        value_type: String,
        message: String,
    },

    #[error("Crypto error: {operation} failed: {message}")]
    Crypto {
        operation: String,
        message: String,
    },
}

impl InternalError {
    pub fn database(operation: &str, source: sea_orm::DbErr) -> Self {
        InternalError::Database {
            operation: operation.to_string(),
            source,
        }
    }

    pub fn parse(value_type: &str, message: impl Into<String>) -> Self {
        InternalError::Parse {
            value_type: value_type.to_string(),
            message: message.into(),
        }
    }

    pub fn crypto(operation: &str, message: impl Into<String>) -> Self {
        InternalError::Crypto {
            operation: operation.to_string(),
            message: message.into(),
        }
    }
}
