use anyhow::Context;
use dotenvy::dotenv;
use pei::router::init_router;
use pei::state::init_app_state;
use pei_config::ServerConfig;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    pei_observability::init_tracing()?;

    let server_config = ServerConfig::from_env();
    let state = init_app_state(&server_config).await?;
    let metrics = pei_observability::init_metrics()?;
    let app = init_router(state, metrics);

    let address = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    info!(%address, "Server running");
    info!("Swagger UI available at http://{address}/swagger-ui");
    info!("Scalar UI available at http://{address}/scalar");

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
