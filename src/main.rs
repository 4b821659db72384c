use anyhow::Context;
use rust_rewards_service::{
    adapters::customer::memory::MemoryCustomers, commands::DomainLogic, config::Config, http,
    telemetry,
};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    telemetry::init_logger();

    let config = Config::from_env().context("failed to read configuration")?;

    let customers = match &config.customers_file {
        Some(path) => MemoryCustomers::from_json_file(path)
            .with_context(|| format!("failed to load customers from {}", path.display()))?,
        None => MemoryCustomers::default(),
    };
    info!(customers = customers.len(), "customers loaded");

    let app = http::router(DomainLogic::new(customers));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "rewards service listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("rewards service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
