use std::sync::Arc;

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

use crate::app_data::AppData;
use crate::errors::{AuthError, InternalError};
use crate::services::token_service::TokenService;
use crate::stores::UserStore;
use crate::types::db::user;
use crate::types::internal::Role;

const MIN_PASSWORD_CHARS: usize = 6;

/// Registration, login and password changes
///
/// Passwords are hashed with Argon2id; the stored hash is opaque to the
/// rest of the system. Login matches on email and role together and
/// refuses deactivated accounts before checking the password.
pub struct AuthService {
    user_store: Arc<UserStore>,
    token_service: Arc<TokenService>,
}

impl AuthService {
    /// Create an AuthService from AppData
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            user_store: app_data.user_store.clone(),
            token_service: app_data.token_service.clone(),
        }
    }

    fn hash_password(password: &str) -> Result<String, InternalError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| InternalError::crypto("password_hash", e.to_string()))
    }

    fn verify_password(password: &str, stored_hash: &str) -> Result<bool, InternalError> {
        let parsed = PasswordHash::new(stored_hash)
            .map_err(|e| InternalError::crypto("password_hash_parse", e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    /// Register a new account
    ///
    /// Role is chosen at registration and immutable afterwards.
    ///
    /// # Errors
    /// * `Validation` - missing fields, unknown role, password mismatch,
    ///   password under 6 characters, or email already registered
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
        role: &str,
    ) -> Result<user::Model, AuthError> {
        let name = name.trim();
        let email = email.trim();
        if name.is_empty() || email.is_empty() || password.is_empty() || role.is_empty() {
            return Err(AuthError::validation("All fields are required."));
        }

        let role = Role::parse(role)
            .ok_or_else(|| AuthError::validation("Unknown role."))?;

        if password != confirm_password {
            return Err(AuthError::validation("Passwords do not match."));
        }
        if password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(AuthError::validation(
                "Password must be at least 6 characters.",
            ));
        }

        if self.user_store.find_by_email(email).await?.is_some() {
            return Err(AuthError::validation("Email already registered."));
        }

        let password_hash = Self::hash_password(password)?;
        let user = self
            .user_store
            .insert(name, email, &password_hash, role)
            .await?;

        tracing::info!("User {} registered as {}", user.id, user.role);

        Ok(user)
    }

    /// Verify credentials and issue a session token
    ///
    /// The email/role pair and the password are checked in one flow and
    /// every mismatch surfaces as the same `InvalidCredentials`, so a
    /// failed login does not reveal which part was wrong. A deactivated
    /// account is refused with its own error before the password check.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        role: &str,
    ) -> Result<(user::Model, String), AuthError> {
        let role = Role::parse(role).ok_or(AuthError::InvalidCredentials)?;

        let user = self
            .user_store
            .find_by_email_and_role(email.trim(), role)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.is_active {
            return Err(AuthError::AccountDeactivated);
        }

        if !Self::verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.token_service.issue(&user)?;

        tracing::info!("User {} logged in", user.id);

        Ok((user, token))
    }

    /// Change the caller's own password
    ///
    /// Requires the current password; authorization beyond that is the
    /// session layer's concern, since the target is always the caller.
    pub async fn change_password(
        &self,
        user_id: &str,
        current_password: &str,
        new_password: &str,
        confirm_new: &str,
    ) -> Result<(), AuthError> {
        if new_password != confirm_new {
            return Err(AuthError::validation("Passwords do not match."));
        }
        if new_password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(AuthError::validation(
                "Password must be at least 6 characters.",
            ));
        }

        let user = self
            .user_store
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !Self::verify_password(current_password, &user.password_hash)? {
            return Err(AuthError::validation("Current password is incorrect."));
        }

        let password_hash = Self::hash_password(new_password)?;
        self.user_store.update_password(&user.id, &password_hash).await?;

        tracing::info!("User {} changed their password", user.id);

        Ok(())
    }
}

#[cfg(test)]
#[path = "auth_service_tests.rs"]
mod auth_service_tests;
