//! Credentials backend entry point.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use credentials_backend::inbound::http::health::HealthState;
use credentials_backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
use credentials_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{ServerConfig, ServerSettings, create_server};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load()
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::current())
        .map_err(std::io::Error::other)?;

    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        settings.bind_addr(),
    );
    if let Some(url) = settings.database_url() {
        run_pending_migrations(url)
            .await
            .map_err(std::io::Error::other)?;
        let pool = DbPool::new(PoolConfig::new(url))
            .await
            .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    } else {
        info!("no database configured; records live in memory");
    }

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
