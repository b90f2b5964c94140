use async_trait::async_trait;
use uuid::Uuid;

use super::auth_model::{NewUser, StoredUser, User};
use crate::errors::Result;
use crate::health::Health;

/// Trait defining the contract for auth backends.
///
/// The implementation (local or delegated) is selected once at process
/// startup from configuration and held behind `Arc<dyn AuthServiceTrait>`.
#[async_trait]
pub trait AuthServiceTrait: Send + Sync {
    /// Reports configuration and dependency problems as data, not errors.
    async fn health_check(&self) -> Health;

    /// Creates an account and returns the user plus a fresh bearer token.
    async fn register(&self, email: &str, password: &str) -> Result<(User, String)>;

    /// Verifies credentials and returns the user plus a fresh bearer token.
    async fn login(&self, email: &str, password: &str) -> Result<(User, String)>;

    /// Resolves a bearer token to a user.
    ///
    /// Fails open: a malformed, expired, or unverifiable token yields
    /// `Ok(None)`, never an error. Only infrastructure failures (store or
    /// provider unreachable, missing configuration) propagate as errors.
    async fn user_from_token(&self, token: &str) -> Result<Option<User>>;
}

/// Trait defining the contract for user storage, used by the local backend.
///
/// The delegated backend has no user store of its own; identity lives at
/// the provider.
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    /// Inserts a new user. A duplicate email surfaces as
    /// `DatabaseError::UniqueViolation` straight from the store's constraint;
    /// there is no pre-check, so concurrent registrations cannot race past it.
    async fn create_user(&self, new_user: NewUser) -> Result<StoredUser>;

    fn get_by_email(&self, email: &str) -> Result<Option<StoredUser>>;

    fn get_by_id(&self, user_id: Uuid) -> Result<Option<User>>;

    /// Cheap reachability probe for health checks.
    fn ping(&self) -> Result<()>;
}
