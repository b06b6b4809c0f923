use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use log::{error, info};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::middleware::log_request;
use crate::protocol::{
    handle_api, handle_delete, handle_download, handle_list, handle_stat, handle_upload,
    method_not_allowed_get, method_not_allowed_post,
};
use crate::storage::StorageRoot;

/// Room for multipart boundaries and the `path` field on top of the file itself
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Immutable state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub root: Arc<StorageRoot>,
    pub max_upload_bytes: u64,
}

impl AppState {
    pub fn new(root: StorageRoot, max_upload_bytes: u64) -> Self {
        Self {
            root: Arc::new(root),
            max_upload_bytes,
        }
    }
}

/// Builds the router with every route bound to its canonical method
pub fn build_router(state: AppState) -> Router {
    let body_limit = usize::try_from(state.max_upload_bytes)
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD);

    Router::new()
        .route("/api", get(handle_api).fallback(method_not_allowed_get))
        .route("/list", get(handle_list).fallback(method_not_allowed_get))
        .route("/stat", get(handle_stat).fallback(method_not_allowed_get))
        .route(
            "/upload",
            post(handle_upload)
                .fallback(method_not_allowed_post)
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .route(
            "/download",
            get(handle_download).fallback(method_not_allowed_get),
        )
        .route("/delete", post(handle_delete).fallback(method_not_allowed_post))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

pub struct Server {
    listener: TcpListener,
    router: Router,
}

impl Server {
    /// Opens the storage root and binds the listener
    pub async fn new(config: ServerConfig) -> io::Result<Self> {
        let root = match StorageRoot::open(config.server_root_path()) {
            Ok(root) => {
                info!("Server root directory: {}", root.path().display());
                root
            }
            Err(e) => {
                error!(
                    "Failed to open server root directory {}: {}",
                    config.server_root, e
                );
                return Err(e);
            }
        };

        let addr = config.listen_addr();
        let listener = match TcpListener::bind(&addr).await {
            Ok(listener) => {
                info!("Server bound to {}", addr);
                listener
            }
            Err(e) => {
                error!("Failed to bind to {}: {}", addr, e);
                return Err(e);
            }
        };

        let state = AppState::new(root, config.max_upload_size_bytes());

        Ok(Self {
            listener,
            router: build_router(state),
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serves requests until Ctrl-C
    pub async fn start(self) -> io::Result<()> {
        info!("Starting RAX file browser on {}", self.local_addr()?);

        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, stopping server");
}
