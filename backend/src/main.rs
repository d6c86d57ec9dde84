//! Service entry point: loads settings, connects to PostgreSQL, serves HTTP
//! until a termination signal arrives, then drains and closes the pool.

mod server;

use std::io;
use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use pets::config::PetsSettings;
use pets::domain::ports::PetRepository;
use pets::inbound::http::health::HealthState;
use pets::outbound::persistence::{DbPool, DieselPetRepository, PoolConfig};
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = PetsSettings::load_from_iter(std::env::args_os())
        .map_err(|err| io::Error::other(err.to_string()))?;
    let database_url = settings.database_url().map_err(io::Error::other)?;
    let bind_addr = settings.listen_addr().map_err(io::Error::other)?;
    info!(env = settings.env(), driver = settings.db_driver(), "settings loaded");

    let pool = DbPool::connect(PoolConfig::new(database_url))
        .await
        .map_err(io::Error::other)?;
    let repository = DieselPetRepository::new(pool, Arc::new(DefaultClock));

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state.clone(),
        ServerConfig::new(bind_addr.as_str()).with_repository(repository.clone()),
    )?;
    let handle = server.handle();
    let running = actix_web::rt::spawn(server);
    info!(%bind_addr, "http server listening");

    wait_for_shutdown_signal().await?;

    health_state.mark_unhealthy();
    handle.stop(true).await;
    match running.await {
        Ok(Ok(())) => info!("http server stopped"),
        Ok(Err(err)) => warn!(error = %err, "http server stopped with error"),
        Err(err) => warn!(error = %err, "http server task failed"),
    }
    repository.shutdown().await;
    Ok(())
}

#[cfg(unix)]
async fn wait_for_shutdown_signal() -> io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;
    let mut quit = signal(SignalKind::quit())?;
    let name = tokio::select! {
        _ = interrupt.recv() => "SIGINT",
        _ = terminate.recv() => "SIGTERM",
        _ = quit.recv() => "SIGQUIT",
    };
    info!(signal = name, "shutdown signal received");
    Ok(())
}

#[cfg(not(unix))]
async fn wait_for_shutdown_signal() -> io::Result<()> {
    tokio::signal::ctrl_c().await?;
    info!(signal = "ctrl-c", "shutdown signal received");
    Ok(())
}
