use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use backend_application::commands::player_commands;
use backend_application::watch::{write_queue, GameWatcher, PollerPool};
use backend_application::AppState;
use backend_infrastructure::AppConfig;
use backend_interfaces_http::build_router;

use crate::context::AppContext;

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Wipe every stored player before watching starts.
    pub clear_on_start: bool,
}

fn build_router_with_layers(state: AppState) -> Router {
    build_router(state.clone())
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(Duration::from_secs(
            state.config.request_timeout_seconds,
        )))
        .layer(TraceLayer::new_for_http())
}

/// Starts the write serializer and the game watcher as detached tasks.
fn spawn_watch(context: &AppContext) {
    let state = &context.state;
    let intervals = state.config.intervals;
    let (writes, serializer) =
        write_queue(state.player_repo.clone(), state.metrics.clone(), intervals);
    tokio::spawn(serializer.run());

    let pool = PollerPool::new(
        context.sports_api.clone(),
        writes,
        intervals,
        state.metrics.clone(),
    );
    let watcher = GameWatcher::new(
        context.sports_api.clone(),
        pool,
        intervals,
        state.metrics.clone(),
    );
    tokio::spawn(watcher.run());
}

/// Binds `bind_addr` and returns the address actually bound (port 0 resolves here).
async fn bind_listener(bind_addr: &str) -> Result<(TcpListener, SocketAddr)> {
    let addr: SocketAddr = bind_addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;
    Ok((listener, local_addr))
}

pub async fn run_standalone(config: AppConfig, options: RunOptions) -> Result<()> {
    let context = AppContext::new(&config).await?;

    if options.clear_on_start {
        player_commands::clear_players(&context.state).await?;
    }

    spawn_watch(&context);

    let state = context.state;
    let app = build_router_with_layers(state.clone());
    let (listener, addr) = bind_listener(&state.config.bind_addr).await?;
    info!("listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!("ctrl-c handler unavailable: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("sigterm handler unavailable: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
