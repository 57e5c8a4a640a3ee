use pei_config::{CorsConfig, JwtConfig, ServerConfig};
use sqlx::PgPool;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
}

/// Connects the pool and loads configuration from the environment.
pub async fn init_app_state(server_config: &ServerConfig) -> anyhow::Result<AppState> {
    Ok(AppState {
        db: pei_db::init_db_pool(server_config.database_max_connections).await?,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
    })
}
