//! Relay service between a map front end and the routing backend.
//!
//! - `BACKEND_URL` - routing backend base URL (default http://localhost:8000)
//! - `RELAY_PORT` - HTTP port (default 3000)
//! - `RUST_LOG` / `LOG_FORMAT` - see `route_picker::logging`

use std::net::SocketAddr;

use tracing::info;

use route_picker::client::RouteClient;
use route_picker::logging::{LoggingConfig, init_logging};
use route_picker::relay::{self, RelayConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(&LoggingConfig::from_env());

    let config = RelayConfig::from_env();
    info!(backend = %config.backend.base_url, port = config.port, "starting route relay");

    let client = RouteClient::new(config.backend.clone())?;
    let app = relay::router(client);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
