use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use docrelay::application::ports::JobRegistry;
use docrelay::application::services::{TransferPipeline, TransferService};
use docrelay::infrastructure::observability::init_tracing;
use docrelay::infrastructure::persistence::InMemoryJobRegistry;
use docrelay::infrastructure::storage::StoreFactory;
use docrelay::infrastructure::transform::TransformEngineFactory;
use docrelay::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    let json_logs = settings.logging.enable_json
        || std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));
    init_tracing(Some(&settings.logging.level), json_logs);
    tracing::info!(%environment, "Application starting");

    let stores = StoreFactory::create(&settings).context("Failed to configure document stores")?;
    let engine = TransformEngineFactory::create(&settings.transform);

    let registry = Arc::new(InMemoryJobRegistry::new());
    tokio::spawn(Arc::clone(&registry).run_sweeper());
    let job_registry: Arc<dyn JobRegistry> = registry;

    let policy = settings.dispatch.policy();
    let sweep = settings.registry.sweep_delays();

    let compress_service = Arc::new(TransferService::new(
        Arc::new(TransferPipeline::new(
            Arc::clone(&stores.source),
            stores.write_back,
            Arc::clone(&engine),
        )),
        Arc::clone(&job_registry),
        policy.clone(),
        sweep,
    ));
    let relay_service = Arc::new(TransferService::new(
        Arc::new(TransferPipeline::new(stores.source, stores.drive, engine)),
        Arc::clone(&job_registry),
        policy,
        sweep,
    ));

    let router = create_router(AppState {
        compress_service,
        relay_service,
        job_registry,
    });

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
