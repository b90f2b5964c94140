//! Local auth backend: argon2 password hashes plus signed bearer tokens.

use std::sync::Arc;

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use async_trait::async_trait;
use log::warn;
use rand::rngs::OsRng;
use uuid::Uuid;

use super::auth_model::{NewUser, User};
use super::auth_traits::{AuthServiceTrait, UserRepositoryTrait};
use super::token::{issue_token, verify_token};
use crate::errors::{AuthError, DatabaseError, Error, Result};
use crate::health::Health;

/// Auth backend holding identities in our own store.
///
/// Tokens are HS256 JWTs signed with `jwt_secret`. A missing secret is a
/// configuration problem: it is reported through `health_check` and fails
/// individual operations with `AuthError::MissingJwtSecret` instead of
/// taking the process down.
pub struct LocalAuthService {
    users: Arc<dyn UserRepositoryTrait>,
    jwt_secret: Option<String>,
    token_expires_minutes: i64,
}

impl LocalAuthService {
    pub fn new(
        users: Arc<dyn UserRepositoryTrait>,
        jwt_secret: Option<String>,
        token_expires_minutes: i64,
    ) -> Self {
        Self {
            users,
            jwt_secret: jwt_secret.filter(|s| !s.is_empty()),
            token_expires_minutes,
        }
    }

    fn secret(&self) -> Result<&str> {
        self.jwt_secret
            .as_deref()
            .ok_or_else(|| AuthError::MissingJwtSecret.into())
    }

    fn hash_password(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| Error::Unexpected(format!("password hashing failed: {e}")))
    }

    fn verify_password(&self, password: &str, password_hash: &str) -> bool {
        match PasswordHash::new(password_hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                warn!("stored password hash is unparseable: {e}");
                false
            }
        }
    }
}

#[async_trait]
impl AuthServiceTrait for LocalAuthService {
    async fn health_check(&self) -> Health {
        let mut health = Health::ok();
        if self.jwt_secret.is_none() {
            health.errors.push("JWT secret is not set".to_string());
        }
        if let Err(e) = self.users.ping() {
            log::error!("user store health probe failed: {e}");
            health.errors.push("could not connect to database".to_string());
        }
        health
    }

    async fn register(&self, email: &str, password: &str) -> Result<(User, String)> {
        let secret = self.secret()?.to_string();
        let password_hash = self.hash_password(password)?;

        let stored = self
            .users
            .create_user(NewUser {
                email: email.to_string(),
                password_hash,
            })
            .await
            .map_err(|e| match e {
                Error::Database(DatabaseError::UniqueViolation(_)) => {
                    AuthError::EmailAlreadyExists.into()
                }
                other => other,
            })?;

        let token = issue_token(stored.id, &secret, self.token_expires_minutes)?;
        Ok((stored.into(), token))
    }

    async fn login(&self, email: &str, password: &str) -> Result<(User, String)> {
        let secret = self.secret()?.to_string();

        // Unknown email and wrong password take the same exit.
        let stored = match self.users.get_by_email(email)? {
            Some(stored) => stored,
            None => return Err(AuthError::InvalidCredentials.into()),
        };
        if !self.verify_password(password, &stored.password_hash) {
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = issue_token(stored.id, &secret, self.token_expires_minutes)?;
        Ok((stored.into(), token))
    }

    async fn user_from_token(&self, token: &str) -> Result<Option<User>> {
        let secret = self.secret()?;
        let user_id: Uuid = match verify_token(token, secret) {
            Some(user_id) => user_id,
            None => return Ok(None),
        };
        self.users.get_by_id(user_id)
    }
}
