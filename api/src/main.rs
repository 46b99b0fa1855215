use actix_web::{web, HttpServer};
use anyhow::Context;
use log::info;
use std::sync::Arc;

use sk_api::app::create_app;
use sk_api::middleware::cors::create_cors;
use sk_api::state::AppState;
use sk_core::clock::{Clock, SystemClock};
use sk_infra::cache::{mask_url, RedisRefreshStore};
use sk_infra::database::{DatabasePool, MySqlIdentityStore};
use sk_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("loading configuration")?;

    env_logger::init_from_env(env_logger::Env::new().default_filter_or(config.logging.level.as_str()));

    info!("Starting SessionKeeper API Server ({})", config.environment);
    if config.auth.jwt.is_using_default_secret() {
        log::warn!("Using development signing secrets; set JWT_ACCESS_SECRET and JWT_REFRESH_SECRET");
    }

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let refresh_store = Arc::new(
        RedisRefreshStore::connect(&config.cache)
            .await
            .with_context(|| format!("connecting to Redis at {}", mask_url(&config.cache.url)))?,
    );
    if !refresh_store.health_check().await? {
        anyhow::bail!("Redis did not answer PING");
    }

    let database = DatabasePool::new(&config.database)
        .await
        .context("connecting to the identity database")?;
    let identity_store = Arc::new(MySqlIdentityStore::new(database.get_pool().clone()));

    let state = web::Data::new(AppState::new(
        &config.auth,
        refresh_store.clone(),
        identity_store,
        clock,
    ));

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let server_config = config.server.clone();
    let environment = config.environment;
    HttpServer::new(move || create_app(state.clone(), create_cors(&server_config, environment)))
        .bind(&bind_address)?
        .run()
        .await?;

    info!("Server stopped, closing stores");
    refresh_store.close().await;
    database.close().await;

    Ok(())
}
