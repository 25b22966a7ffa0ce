// Authentication service - business logic layer

use std::sync::Arc;

use axum::async_trait;
use tokio::task;
use tracing::{debug, error, info, warn};

use crate::auth::{
    error::AuthError, password::PasswordService, repository::UserStore, token::TokenService,
};
use crate::db::StoreError;

/// Registration, sign-in and token parsing
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Hash the password and store a new user, returning its id
    async fn register_user(
        &self,
        username: &str,
        password: &str,
        email: &str,
    ) -> Result<i32, AuthError>;

    /// Check the credentials and issue a signed token
    async fn generate_token(&self, username: &str, password: &str) -> Result<String, AuthError>;

    /// Resolve a token to the user id it was issued for
    fn parse_token(&self, token: &str) -> Result<i32, AuthError>;
}

/// Authentication service backed by a [`UserStore`]
pub struct AuthServiceImpl {
    users: Arc<dyn UserStore>,
    passwords: Arc<dyn PasswordService>,
    tokens: TokenService,
}

impl AuthServiceImpl {
    pub fn new(
        users: Arc<dyn UserStore>,
        passwords: Arc<dyn PasswordService>,
        tokens: TokenService,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    /// Argon2 runs on the blocking pool
    async fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let passwords = self.passwords.clone();
        let password = password.to_string();

        task::spawn_blocking(move || passwords.hash_password(&password))
            .await
            .map_err(|e| {
                error!("AuthService.hash_password - blocking task: {}", e);
                AuthError::HashingFailed
            })?
    }

    async fn verify_password(&self, password: &str, hash: String) -> Result<bool, AuthError> {
        let passwords = self.passwords.clone();
        let password = password.to_string();

        task::spawn_blocking(move || passwords.verify_password(&password, &hash))
            .await
            .map_err(|e| {
                error!("AuthService.verify_password - blocking task: {}", e);
                AuthError::HashingFailed
            })?
    }
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    async fn register_user(
        &self,
        username: &str,
        password: &str,
        email: &str,
    ) -> Result<i32, AuthError> {
        let password_hash = self.hash_password(password).await?;

        match self.users.create_user(username, &password_hash, email).await {
            Ok(id) => {
                info!(user_id = id, username, "user registered");
                Ok(id)
            }
            Err(StoreError::UniqueViolation) => {
                warn!(username, "registration with taken username");
                Err(AuthError::AlreadyExists)
            }
            Err(e) => {
                error!("AuthService.register_user - create_user: {}", e);
                Err(AuthError::CreateFailed(e.to_string()))
            }
        }
    }

    async fn generate_token(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let user = self
            .users
            .find_by_username(username)
            .await
            .map_err(|e| {
                error!("AuthService.generate_token - find_by_username: {}", e);
                AuthError::LookupFailed(e.to_string())
            })?
            .ok_or_else(|| {
                debug!(username, "sign-in for unknown username");
                AuthError::UserNotFound
            })?;

        if !self
            .verify_password(password, user.password_hash)
            .await?
        {
            debug!(username, "sign-in with wrong password");
            return Err(AuthError::UserNotFound);
        }

        self.tokens.issue(user.id, &user.username).map_err(|e| {
            error!("AuthService.generate_token - issue: {}", e);
            e
        })
    }

    fn parse_token(&self, token: &str) -> Result<i32, AuthError> {
        self.tokens.verify(token).map(|claims| claims.user_id)
    }
}
