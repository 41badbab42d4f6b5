use aosearch::config::Cli;
use aosearch::executor::controller::QueueController;
use aosearch::executor::registry::TargetRegistry;
use aosearch::executor::scheduler::QueueDrainer;
use aosearch::service::actor::spawn;
use aosearch::service::handlers::{handle_health, router};
use aosearch::service::index_service::IndexService;
use aosearch::service::protocol::{ENDPOINT_HEALTH, INDEX_PREFIX, QUEUE_PREFIX};
use aosearch::service::queue_service::QueueService;

use axum::Router;
use axum::routing::get;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .init();

    let config = cli.service_config()?;

    tracing::info!("Starting node on {} (role: {:?})", cli.bind, cli.role);

    // 1. Forwarding targets:
    let registry = TargetRegistry::new();

    // 2. Services:
    let mut app = Router::new().route(ENDPOINT_HEALTH, get(handle_health));

    if cli.role.runs_index() {
        let (index, _) = spawn(IndexService::new(), config.mailbox_capacity);
        registry.register_mailbox("local", index.clone());
        app = app.nest(INDEX_PREFIX, router(index));
        tracing::info!("Indexing service mounted at {}", INDEX_PREFIX);
    }

    if cli.role.runs_queue() {
        let controller = QueueController::new(registry.clone(), &config);
        let (queue, _) = spawn(QueueService::new(controller, &config), config.mailbox_capacity);

        if let Some(interval) = config.process_interval {
            QueueDrainer::new(queue.clone(), interval).start();
        }

        app = app.nest(QUEUE_PREFIX, router(queue));
        tracing::info!("Queue service mounted at {}", QUEUE_PREFIX);

        if let Some(target) = &config.initial_target {
            tracing::info!("Initial target process: {}", target);
        }
    }

    // 3. Start HTTP server:
    tracing::info!("HTTP server listening on {}", cli.bind);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(cli.bind).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
