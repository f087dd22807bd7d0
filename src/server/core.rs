use log::{error, info, warn};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::server::routes::{ACTION_ROUTES, AppState, router};
use crate::storage::FileStore;

pub struct Server {
    listener: TcpListener,
    store: Arc<FileStore>,
    config: Arc<ServerConfig>,
}

impl Server {
    /// Opens the storage root and binds the listener.
    pub async fn new(config: ServerConfig) -> Result<Self, ServerError> {
        let store = FileStore::open(config.storage_root_path())?
            .with_max_upload_bytes(config.max_upload_bytes())
            .with_reserved_names(ACTION_ROUTES);
        info!("Storage root directory: {}", store.root().display());

        let socket = config.socket_address();
        let listener = match TcpListener::bind(&socket).await {
            Ok(listener) => listener,
            Err(e) => {
                error!("Failed to bind to {}: {}", socket, e);
                return Err(ServerError::Io(e));
            }
        };
        info!("Server bound to {}", listener.local_addr()?);

        Ok(Self {
            listener,
            store: Arc::new(store),
            config: Arc::new(config),
        })
    }

    /// Address the listener is bound to
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serves requests until Ctrl-C.
    pub async fn start(self) -> Result<(), ServerError> {
        let addr = self.listener.local_addr()?;
        let state = AppState {
            store: Arc::clone(&self.store),
        };
        let app = router(state, self.config.max_upload_bytes());

        info!(
            "Starting RAX file manager on {} (max upload {} MB)",
            addr, self.config.max_upload_size_mb
        );

        axum::serve(self.listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server on {} stopped", addr);
        Ok(())
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
