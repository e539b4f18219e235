use std::process::ExitCode;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use flight_server::config::{ConfigError, ServerConfig};
use flight_server::dataset::DatasetError;
use flight_server::index::FlightIndex;
use flight_server::planner::SearchConfig;
use flight_server::web::{AppState, create_router};

/// Reasons the server fails to start or stops serving.
#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to load flight data: {0}")]
    Dataset(#[from] DatasetError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), StartupError> {
    let config = ServerConfig::from_env()?;

    info!(path = %config.data_path.display(), "loading flight data");
    let index = FlightIndex::load(&config.data_path)?;
    info!(
        airports = index.airport_count(),
        flights = index.flight_count(),
        "flight data loaded"
    );

    // Searches that touch these still fail at query time; this only
    // surfaces them early.
    for issue in index.integrity_issues() {
        warn!(%issue, "dataset integrity issue");
    }

    let state = AppState::new(index, SearchConfig::default());
    let app = create_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr, source })?;
    info!(%addr, "flight search listening");

    axum::serve(listener, app).await.map_err(StartupError::Serve)
}
