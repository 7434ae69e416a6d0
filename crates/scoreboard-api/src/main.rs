//! Scoreboard API server entry point.

use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

use scoreboard_api::config::AppConfig;
use scoreboard_api::error::AppError;
use scoreboard_api::state::AppState;
use scoreboard_core::clock::SystemClock;
use scoreboard_core::projection::ScoreProjection;
use scoreboard_exams::application::report_cache::CachePolicy;
use scoreboard_exams::application::store::ExamStore;
use scoreboard_ingest::pipeline::Ingestor;
use scoreboard_ingest::runner::{self, ReconnectPolicy};
use scoreboard_ingest::source::HttpConnector;
use scoreboard_students::application::store::StudentStore;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    info!("Starting scoreboard API server");

    let config = AppConfig::from_env()?;

    let students = Arc::new(StudentStore::new());
    let exams = Arc::new(ExamStore::with_policy(CachePolicy::from_enabled(
        config.report_cache_enabled,
    )));
    let projections: Vec<Arc<dyn ScoreProjection>> = vec![
        Arc::clone(&students) as Arc<dyn ScoreProjection>,
        Arc::clone(&exams) as Arc<dyn ScoreProjection>,
    ];
    let ingestor = Arc::new(Ingestor::new(projections, Arc::new(SystemClock)));

    let ingest_task = if config.ingest_enabled {
        let connector =
            HttpConnector::with_read_timeout(config.stream_url.clone(), config.stream_read_timeout)
                .map_err(AppError::StreamClient)?;
        let ingestor = Arc::clone(&ingestor);
        let policy = ReconnectPolicy::forever(config.reconnect_delay);
        info!(
            url = %config.stream_url,
            read_timeout_secs = config.stream_read_timeout.as_secs(),
            "starting score stream ingestion"
        );
        Some(tokio::spawn(async move {
            runner::run(&connector, &ingestor, policy).await;
        }))
    } else {
        info!("score stream ingestion disabled");
        None
    };

    let app_state = AppState::new(students, exams, ingestor);

    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = scoreboard_api::build_router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .map_err(|e| format!("invalid HOST:PORT combination: {e}"))?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(task) = ingest_task {
        task.abort();
    }
    info!("Scoreboard API server stopped");

    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!(%err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                error!(%err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, initiating shutdown"),
        () = terminate => info!("Received SIGTERM, initiating shutdown"),
    }
}
