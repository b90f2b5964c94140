//! Server configuration from environment variables (`FOLIO_*`).
//!
//! Missing auth settings are deliberately not fatal here: the server boots
//! and reports them through `/health` so the deployment shows up as degraded
//! instead of crash-looping.

use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Local,
    Supabase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Lax,
    Strict,
    None,
}

impl SameSite {
    fn as_str(&self) -> &'static str {
        match self {
            SameSite::Lax => "Lax",
            SameSite::Strict => "Strict",
            SameSite::None => "None",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub db_path: String,
    pub auth_mode: AuthMode,
    pub jwt_secret: Option<String>,
    pub jwt_expires_minutes: i64,
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
    pub cors_origins: Vec<String>,
    pub cookie: CookieSettings,
}

/// Attributes of the `access_token` cookie set on login/register.
#[derive(Debug, Clone)]
pub struct CookieSettings {
    pub secure: bool,
    pub same_site: SameSite,
    pub domain: Option<String>,
    pub max_age_seconds: i64,
}

impl CookieSettings {
    pub const COOKIE_NAME: &'static str = "access_token";

    /// Builds the `Set-Cookie` value carrying `token`.
    pub fn auth_cookie(&self, token: &str) -> String {
        self.cookie_with(token, self.max_age_seconds)
    }

    /// Builds the `Set-Cookie` value that expires the cookie.
    pub fn clear_cookie(&self) -> String {
        self.cookie_with("", 0)
    }

    fn cookie_with(&self, value: &str, max_age: i64) -> String {
        let mut cookie = format!(
            "{}={value}; HttpOnly; Path=/; SameSite={}; Max-Age={max_age}",
            Self::COOKIE_NAME,
            self.same_site.as_str()
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        if let Some(domain) = &self.domain {
            cookie.push_str("; Domain=");
            cookie.push_str(domain);
        }
        cookie
    }
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    pub fn from_env() -> Self {
        let auth_mode = match env_opt("FOLIO_AUTH_MODE").as_deref() {
            Some("supabase") => AuthMode::Supabase,
            Some("local") | None => AuthMode::Local,
            Some(other) => {
                tracing::warn!("unknown FOLIO_AUTH_MODE '{other}', falling back to local");
                AuthMode::Local
            }
        };

        let jwt_expires_minutes = env_opt("FOLIO_JWT_EXPIRES_MINUTES")
            .and_then(|v| v.parse().ok())
            .unwrap_or(folio_core::constants::DEFAULT_TOKEN_EXPIRES_MINUTES);

        let same_site = match env_opt("FOLIO_COOKIE_SAMESITE").as_deref() {
            Some("strict") => SameSite::Strict,
            Some("none") => SameSite::None,
            _ => SameSite::Lax,
        };
        let cookie_secure = env_opt("FOLIO_COOKIE_SECURE")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        if same_site == SameSite::None && !cookie_secure {
            tracing::warn!("SameSite=None cookies require Secure; browsers will reject these");
        }

        let cors_origins = env_opt("FOLIO_CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_else(|| vec!["http://localhost:3000".to_string()]);

        Self {
            listen_addr: env_opt("FOLIO_LISTEN_ADDR")
                .unwrap_or_else(|| "127.0.0.1:8080".to_string()),
            db_path: env_opt("FOLIO_DB_PATH").unwrap_or_else(|| "folio.db".to_string()),
            auth_mode,
            jwt_secret: env_opt("FOLIO_JWT_SECRET"),
            jwt_expires_minutes,
            supabase_url: env_opt("FOLIO_SUPABASE_URL"),
            supabase_anon_key: env_opt("FOLIO_SUPABASE_ANON_KEY"),
            cors_origins,
            cookie: CookieSettings {
                secure: cookie_secure,
                same_site,
                domain: env_opt("FOLIO_COOKIE_DOMAIN"),
                max_age_seconds: jwt_expires_minutes * 60,
            },
        }
    }
}
