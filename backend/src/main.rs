//! Server entry-point: loads configuration, prepares storage and serves the
//! REST API with its OpenAPI docs.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use taskflow::inbound::http::health::HealthState;
use taskflow::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use taskflow::outbound::security::{BuildMode, load_token_secret};
use taskflow::settings::AppSettings;

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

    let settings =
        AppSettings::load().map_err(|err| eyre!("failed to load configuration: {err}"))?;

    let token_secret = load_token_secret(
        settings.token_secret_file(),
        BuildMode::from_debug_assertions(),
        settings.allow_ephemeral_secret,
    )
    .wrap_err("failed to load token secret")?;
    info!(
        fingerprint = %token_secret.fingerprint(),
        "token signing secret loaded"
    );

    let bind_addr = settings
        .bind_addr()
        .wrap_err("invalid bind address")?;
    let mut config =
        ServerConfig::new(token_secret, bind_addr).with_token_ttl(settings.token_ttl());

    if let Some(database_url) = settings.database_url() {
        run_pending_migrations(database_url)
            .await
            .wrap_err("failed to apply database migrations")?;
        let mut pool_config = PoolConfig::new(database_url);
        if let Some(size) = settings.pool_size {
            pool_config = pool_config.with_max_size(size);
        }
        let pool = DbPool::new(pool_config)
            .await
            .wrap_err("failed to build database pool")?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    info!(addr = %config.bind_addr(), "starting HTTP server");
    let server = create_server(health_state, config).wrap_err("failed to start HTTP server")?;
    server.await.wrap_err("HTTP server terminated unexpectedly")
}
