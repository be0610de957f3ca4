//! Backend entry-point: loads settings, prepares the store and serves the
//! listing API.

mod server;

use std::ffi::OsString;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use phongtro::inbound::http::health::HealthState;
use phongtro::outbound::persistence::{DbPool, run_migrations};
use server::{ServerConfig, ServerSettings, create_server};

fn settings_error(err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(format!("invalid configuration: {err}"))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        ServerSettings::load_from_iter(std::env::args_os().collect::<Vec<OsString>>())
            .map_err(settings_error)?;
    let bind_addr = settings.bind_addr().map_err(settings_error)?;
    let policy = settings.listing_policy().map_err(settings_error)?;
    let mut config = ServerConfig::new(bind_addr, policy, settings.code_generator());

    if let Some(database_url) = settings.database_url() {
        if settings.skip_migrations {
            info!("skipping database migrations");
        } else {
            run_migrations(database_url)
                .await
                .map_err(|e| std::io::Error::other(format!("database migrations failed: {e}")))?;
        }
        let pool_config = settings.pool_config(database_url).map_err(settings_error)?;
        let pool = DbPool::new(pool_config)
            .await
            .map_err(|e| std::io::Error::other(format!("database pool setup failed: {e}")))?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, retention = %policy.retention, "listing server started");
    let outcome = server.await;
    health_state.mark_unhealthy();
    outcome
}
