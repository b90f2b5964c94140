//! Auth module - user identity, token issuance, and the two auth backends.

mod auth_model;
mod auth_traits;
mod local;
mod supabase;
mod token;

pub use auth_model::{NewUser, StoredUser, User};
pub use auth_traits::{AuthServiceTrait, UserRepositoryTrait};
pub use local::LocalAuthService;
pub use supabase::{SupabaseAuthService, SupabaseConfig};
pub use token::{issue_token, verify_token};
