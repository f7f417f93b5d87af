use liveboard_server::config::{ServerConfig, load_snapshot};
use liveboard_server::web::{AppState, create_router};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = ServerConfig::from_env().expect("Invalid configuration");
    let addr = config.addr;
    let static_dir = config.static_dir.clone();
    let snapshot_file = config.snapshot_file.clone();

    let state = AppState::new(config);

    // Optional board to show before the first update arrives
    if let Some(path) = snapshot_file {
        match load_snapshot(&path, &state.parser) {
            Ok(board) => {
                info!(
                    path = %path.display(),
                    station = %board.station,
                    departures = board.departures().len(),
                    "loaded startup snapshot"
                );
                state.snapshot.replace(board).await;
            }
            Err(e) => error!("{e}"),
        }
    }

    let app = create_router(state, &static_dir);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");
    info!("liveboard listening on http://{addr}");
    info!("  GET      /liveboard  - current board (HTML or JSON)");
    info!("  PUT/POST /liveboard  - replace the board with iRail JSON");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("server error: {e}");
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("cannot listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
