//! wellf entry point: loads settings, migrates the database and serves the
//! REST API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use wellf::inbound::http::health::HealthState;
use wellf::inbound::http::session_config::fingerprint::key_fingerprint;
use wellf::inbound::http::session_config::{BuildMode, session_settings_from_env};
use wellf::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use wellf::settings::AppSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().wrap_err("failed to load configuration")?;
    let bind_addr = settings.bind_addr()?;
    let database_url = settings.database_url()?.to_owned();
    let max_connections = settings.max_connections()?;

    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .wrap_err("invalid session configuration")?;
    info!(
        fingerprint = %key_fingerprint(&session.key),
        "session signing key loaded"
    );

    if settings.run_migrations() {
        let url = database_url.clone();
        let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&url))
            .await
            .wrap_err("migration task panicked")?
            .wrap_err("failed to apply migrations")?;
        info!(applied, "database schema up to date");
    }

    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(max_connections))
        .await
        .wrap_err("failed to build database pool")?;

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        bind_addr,
        pool,
    );
    info!(%bind_addr, "starting HTTP server");
    let server = create_server(health_state, config)?;
    server.await?;
    Ok(())
}
