use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue},
    routing::{delete, get, post},
    Router,
};
use configuration::{ServerSettings, Settings};
use database::{DbRepository, InMemoryRepository, ProductStore};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod extract;
pub mod handlers;

/// The shared application state that all handlers can access.
///
/// Built once at startup and shared read-only for the life of the process.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProductStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }
}

/// Which `ProductStore` implementation backs the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    MySql,
    InMemory,
}

/// Builds the router with every product route, CORS, request tracing and the
/// body size limit applied.
pub fn build_router(state: Arc<AppState>, server: &ServerSettings) -> anyhow::Result<Router> {
    let origin: HeaderValue = server
        .cors_origin
        .parse()
        .with_context(|| format!("invalid CORS origin {:?}", server.cors_origin))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers([header::CONTENT_TYPE]);

    let app = Router::new()
        .route("/", get(handlers::greet))
        .route("/health", get(|| async { "OK" }))
        .route("/products", get(handlers::list_products))
        .route("/products/id/:id", get(handlers::get_product))
        .route("/products/name/:name", get(handlers::get_product_by_name))
        .route(
            "/products/:id",
            post(handlers::create_product).put(handlers::update_product),
        )
        .route("/products/del_id/:id", delete(handlers::delete_product))
        .route(
            "/products/del_name/:name",
            delete(handlers::delete_product_by_name),
        )
        .with_state(state)
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(server.body_limit_bytes));

    Ok(app)
}

/// Constructs the store, prepares the table and seeds it if empty.
pub async fn build_state(settings: &Settings, backend: StorageBackend) -> anyhow::Result<AppState> {
    let store: Arc<dyn ProductStore> = match backend {
        StorageBackend::MySql => {
            let pool = database::connect(&settings.database).await?;
            database::ensure_schema(&pool).await?;
            Arc::new(DbRepository::new(pool))
        }
        StorageBackend::InMemory => {
            tracing::warn!("Using the in-memory store; data is lost on exit.");
            Arc::new(InMemoryRepository::new())
        }
    };

    let outcome = database::seed_if_empty(store.as_ref()).await;
    tracing::debug!(?outcome, "Startup seeding finished.");

    Ok(AppState::new(store))
}

/// The main function to configure and run the web server.
///
/// Tracing must already be initialised by the caller.
pub async fn run_server(settings: Settings, backend: StorageBackend) -> anyhow::Result<()> {
    let state = Arc::new(build_state(&settings, backend).await?);
    let app = build_router(state, &settings.server)?;

    let listener =
        tokio::net::TcpListener::bind((settings.server.host.as_str(), settings.server.port))
            .await
            .with_context(|| {
                format!(
                    "failed to bind {}:{}",
                    settings.server.host, settings.server.port
                )
            })?;
    let addr = listener.local_addr()?;
    tracing::info!("Web server started and listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
