use dotenvy::dotenv;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use qrcodes_admin::config::Config;
use qrcodes_admin::routes::{create_routes, AppState};
use qrcodes_admin::store::memory::InMemoryStore;
use qrcodes_admin::store::postgres::PostgresStore;
use qrcodes_admin::store::QrCodeStore;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env().expect("Invalid configuration");

    let store: Arc<dyn QrCodeStore> = match &config.database_url {
        Some(url) => Arc::new(
            PostgresStore::connect(url, config.db_max_connections)
                .await
                .expect("Failed to open database"),
        ),
        None => {
            tracing::warn!("DATABASE_URL not set, QR codes are kept in memory only");
            Arc::new(InMemoryStore::new())
        }
    };

    let state = AppState::new(store, config.page_options(), config.view_sessions());
    let app = create_routes(state, &config);

    tracing::info!("🚀 Server running at http://{}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app).await.expect("Server failed");
}
