#![allow(clippy::too_many_arguments)]

pub mod dashboards;
pub mod domain;
pub mod handlers;
pub mod routes;
pub mod shared;
pub mod system;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use tokio::net::TcpListener;

    system::tracing::initialize()?;

    let config = shared::config::load_config()?;
    let addr = config.server.socket_addr()?;
    tracing::info!(
        "Storage: {:?}, transitions: {:?}, auth: {:?} (require_login = {})",
        config.storage.backend,
        config.transitions.policy,
        config.auth.mode,
        config.auth.require_login
    );

    let state = shared::state::AppState::from_config(config)
        .await
        .map_err(|e| anyhow::anyhow!("storage init failed: {e:#}"))?;

    let app = routes::configure_routes(state);

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    addr.port()
                );
            } else {
                tracing::error!("Failed to bind to {}. Error: {}", addr, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
