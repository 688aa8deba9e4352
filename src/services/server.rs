use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use log::info;
use tower_http::cors::CorsLayer;

use crate::api::handlers::AppState;
use crate::api::routes::create_router;

pub struct ServerService {
    port: u16,
    document_path: PathBuf,
}

impl ServerService {
    pub fn new(port: u16, document_path: PathBuf) -> Self {
        Self {
            port,
            document_path,
        }
    }

    pub async fn run(&self) -> Result<()> {
        let state = Arc::new(AppState {
            document_path: self.document_path.clone(),
        });

        let app = create_router(state).layer(CorsLayer::permissive());

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        info!("Server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}
