use std::sync::Arc;

use folio_core::auth::{AuthServiceTrait, LocalAuthService, SupabaseAuthService, SupabaseConfig};
use folio_core::portfolio::{PortfolioService, PortfolioServiceTrait};
use folio_storage_sqlite::portfolio::PortfolioRepository;
use folio_storage_sqlite::users::UserRepository;
use folio_storage_sqlite::{create_pool, run_migrations, spawn_writer};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{AuthMode, Config, CookieSettings};

pub struct AppState {
    pub auth_service: Arc<dyn AuthServiceTrait>,
    pub portfolio_service: Arc<dyn PortfolioServiceTrait>,
    pub cookie: CookieSettings,
}

pub fn init_tracing() {
    let log_format = std::env::var("FOLIO_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let pool = create_pool(&config.db_path)?;
    run_migrations(&pool)?;
    tracing::info!("Database path in use: {}", config.db_path);
    let writer = spawn_writer(pool.clone())?;

    let user_repository = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let portfolio_repository = Arc::new(PortfolioRepository::new(pool, writer));

    let auth_service: Arc<dyn AuthServiceTrait> = match config.auth_mode {
        AuthMode::Local => Arc::new(LocalAuthService::new(
            user_repository,
            config.jwt_secret.clone(),
            config.jwt_expires_minutes,
        )),
        AuthMode::Supabase => Arc::new(SupabaseAuthService::new(SupabaseConfig {
            url: config.supabase_url.clone(),
            anon_key: config.supabase_anon_key.clone(),
        })),
    };

    let portfolio_service: Arc<dyn PortfolioServiceTrait> =
        Arc::new(PortfolioService::new(portfolio_repository));

    Ok(Arc::new(AppState {
        auth_service,
        portfolio_service,
        cookie: config.cookie.clone(),
    }))
}
