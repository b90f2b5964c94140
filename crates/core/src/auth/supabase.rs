//! Delegated auth backend: Supabase Auth REST API (email + password).
//!
//! This provider resolves identity by token only; there is no
//! list-users-by-email capability without the admin API.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use uuid::Uuid;

use super::auth_model::User;
use super::auth_traits::AuthServiceTrait;
use crate::errors::{AuthError, Result};
use crate::health::Health;

/// Connection settings for the provider. Either field may be absent; that
/// is reported through `health_check` and fails operations with a typed
/// configuration error.
#[derive(Debug, Clone, Default)]
pub struct SupabaseConfig {
    pub url: Option<String>,
    pub anon_key: Option<String>,
}

pub struct SupabaseAuthService {
    config: SupabaseConfig,
    client: Client,
}

#[derive(Deserialize)]
struct SessionResponse {
    access_token: Option<String>,
}

#[derive(Deserialize)]
struct UserResponse {
    id: String,
    email: String,
    created_at: Option<String>,
}

impl SupabaseAuthService {
    pub fn new(config: SupabaseConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    pub fn with_client(config: SupabaseConfig, client: Client) -> Self {
        Self { config, client }
    }

    fn base_url(&self) -> Result<&str> {
        self.config
            .url
            .as_deref()
            .filter(|url| !url.is_empty())
            .map(|url| url.trim_end_matches('/'))
            .ok_or_else(|| AuthError::MissingProviderConfig("SUPABASE_URL".to_string()).into())
    }

    fn anon_key(&self) -> Result<&str> {
        self.config
            .anon_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                AuthError::MissingProviderConfig("SUPABASE_ANON_KEY".to_string()).into()
            })
    }

    fn domain_user(raw: UserResponse) -> Result<User> {
        let id = Uuid::parse_str(&raw.id).map_err(|_| AuthError::UserFetchFailed)?;
        let created_at = raw
            .created_at
            .as_deref()
            .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
            .map(|ts| ts.with_timezone(&Utc))
            .unwrap_or_else(Utc::now);
        Ok(User {
            id,
            email: raw.email,
            created_at,
        })
    }

    async fn fetch_user(&self, access_token: &str) -> Result<Option<User>> {
        let url = format!("{}/auth/v1/user", self.base_url()?);
        let response = self
            .client
            .get(url)
            .header("apikey", self.anon_key()?)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AuthError::ProviderUnreachable(e.to_string()))?;

        if !response.status().is_success() {
            debug!("provider rejected token: {}", response.status());
            return Ok(None);
        }

        let raw: UserResponse = response
            .json()
            .await
            .map_err(|_| AuthError::UserFetchFailed)?;
        Self::domain_user(raw).map(Some)
    }
}

#[async_trait]
impl AuthServiceTrait for SupabaseAuthService {
    async fn health_check(&self) -> Health {
        let mut health = Health::ok();
        if self.base_url().is_err() {
            health.errors.push("SUPABASE_URL is not set".to_string());
        }
        if self.anon_key().is_err() {
            health
                .errors
                .push("SUPABASE_ANON_KEY is not set".to_string());
        }
        health
    }

    async fn register(&self, email: &str, password: &str) -> Result<(User, String)> {
        let url = format!("{}/auth/v1/signup", self.base_url()?);
        let response = self
            .client
            .post(url)
            .header("apikey", self.anon_key()?)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| AuthError::ProviderUnreachable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AuthError::SignupFailed(response.status().to_string()).into());
        }

        let session: SessionResponse = response
            .json()
            .await
            .map_err(|_| AuthError::SignupFailed("unexpected response shape".to_string()))?;
        // No token on a successful signup means the provider is holding the
        // account until the email is confirmed.
        let access_token = session
            .access_token
            .ok_or(AuthError::EmailConfirmationRequired)?;

        let user = self
            .fetch_user(&access_token)
            .await?
            .ok_or(AuthError::UserFetchFailed)?;
        Ok((user, access_token))
    }

    async fn login(&self, email: &str, password: &str) -> Result<(User, String)> {
        let url = format!(
            "{}/auth/v1/token?grant_type=password",
            self.base_url()?
        );
        let response = self
            .client
            .post(url)
            .header("apikey", self.anon_key()?)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| AuthError::ProviderUnreachable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AuthError::InvalidCredentials.into());
        }

        let session: SessionResponse = response
            .json()
            .await
            .map_err(|_| AuthError::NoAccessToken)?;
        let access_token = session.access_token.ok_or(AuthError::NoAccessToken)?;

        let user = self
            .fetch_user(&access_token)
            .await?
            .ok_or(AuthError::TokenInvalid)?;
        Ok((user, access_token))
    }

    async fn user_from_token(&self, token: &str) -> Result<Option<User>> {
        self.fetch_user(token).await
    }
}
