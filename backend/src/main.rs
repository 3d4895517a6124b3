mod config;
mod redis_store;
mod routes;

use shared::{MemoryStore, SystemClock, TaskList};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, StoreKind};
use crate::redis_store::RedisStore;
use crate::routes::{AppState, BoxedStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_backend=debug,todo_shared=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let store: BoxedStore = match config.store {
        StoreKind::Redis => {
            info!("Redis URL: {}", config.redis_url);
            Box::new(RedisStore::connect(&config.redis_url)?)
        }
        StoreKind::Memory => {
            info!("Keeping tasks in memory only");
            Box::new(MemoryStore::new())
        }
    };
    let list = TaskList::open(store, &config.storage_key, SystemClock)?;
    info!(
        "Loaded {} task(s) from key '{}'",
        list.tasks().len(),
        config.storage_key
    );

    let app = routes::router(AppState::new(list))
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Server running on http://{}", config.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
