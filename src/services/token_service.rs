use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::types::db::user;

/// Session token lifetime
const TOKEN_TTL_HOURS: i64 = 24;

/// JWT claims carried by a session token
///
/// Claims only locate the user. The actor snapshot (role, active flag)
/// is re-read from the user store on every request, so a deactivation
/// or deletion takes effect immediately rather than at token expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    /// Role at issue time, informational only
    pub role: String,
    /// Expiry (unix seconds)
    pub exp: i64,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Token id
    pub jti: String,
}

/// Issues and validates session tokens
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    pub fn new(jwt_secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
        }
    }

    /// Issue a session token for a logged-in user
    pub fn issue(&self, user: &user::Model) -> Result<String, InternalError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.clone(),
            role: user.role.clone(),
            exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| InternalError::crypto("jwt_encode", e.to_string()))
    }

    /// Validate a bearer token and return its claims
    pub fn validate(&self, token: &str) -> Result<Claims, InternalError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| InternalError::crypto("jwt_validate", e.to_string()))
    }
}
