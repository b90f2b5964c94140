//! Signed, time-boxed bearer tokens.
//!
//! Issue and verify are pure functions of `(claims, secret)`; nothing here
//! knows about cookies or headers. Verification intentionally swallows every
//! decoding failure: an unverifiable token is "no identity", not an error.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{Error, Result};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// Issues an HS256 token for `user_id`, valid for `expires_minutes`.
pub fn issue_token(user_id: Uuid, secret: &str, expires_minutes: i64) -> Result<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::minutes(expires_minutes)).timestamp(),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| Error::Unexpected(format!("could not sign token: {e}")))
}

/// Extracts the subject from a token, or `None` if the token is malformed,
/// expired, signed with a different secret, or carries a non-UUID subject.
pub fn verify_token(token: &str, secret: &str) -> Option<Uuid> {
    let validation = Validation::new(Algorithm::HS256);
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .ok()?;
    Uuid::parse_str(&data.claims.sub).ok()
}
