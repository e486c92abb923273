use anyhow::{Context, Result};
use axum::Router;
use std::net::SocketAddr;
use std::path::PathBuf;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};

use crate::routes::{self, AppState};

/// Dev server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Directory with the built widget (index.html, pkg/), served under /static
    pub web_dir: Option<PathBuf>,
}

/// Dev server instance
pub struct ChatServer {
    config: ServerConfig,
    state: AppState,
}

impl ChatServer {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            state: AppState::new(),
        }
    }

    /// Router with CORS and optional static files, without binding a socket
    pub fn router(&self) -> Router {
        let mut app = routes::create_router(self.state.clone());

        // The widget is usually served from another origin during development
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        app = app.layer(cors);

        if let Some(web_dir) = &self.config.web_dir {
            if web_dir.exists() {
                log::info!("Serving static files from: {}", web_dir.display());
                app = app.nest_service("/static", ServeDir::new(web_dir));
            } else {
                log::warn!("Web directory {} does not exist, not serving it", web_dir.display());
            }
        }

        app
    }

    /// Start the server and run until the process is stopped
    pub async fn start(self) -> Result<()> {
        let app = self.router();

        log::info!("Chat endpoint: http://{}/chat", self.config.bind_addr);

        let listener = tokio::net::TcpListener::bind(&self.config.bind_addr)
            .await
            .with_context(|| format!("Failed to bind {}", self.config.bind_addr))?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}
