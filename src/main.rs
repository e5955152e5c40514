use std::net::SocketAddr;
use std::sync::Arc;

use placement_portal::{
    config::{get_config, init_config},
    database::{
        memory::MemoryStore, pool::create_pool, postgres::PgDocumentStore, store::DocumentStore,
    },
    middleware::cors::api_cors,
    routes::build_router,
    AppState,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    init_config()?;
    let config = get_config();

    let store: Arc<dyn DocumentStore> = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url).await?;
            sqlx::migrate!("./migrations").run(&pool).await?;
            info!("Using Postgres document store");
            Arc::new(PgDocumentStore::new(pool))
        }
        None => {
            warn!("DATABASE_URL not set; data is kept in memory and lost on restart");
            Arc::new(MemoryStore::new())
        }
    };

    let app_state = AppState::new(store, config.clone());
    let app = build_router(app_state)
        .layer(api_cors())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
