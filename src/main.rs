use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use talentscout_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    middleware::rate_limit,
    routes,
    services::gemini::GeminiClient,
    store::{DynStore, MemoryStore, PgStore},
    AppState,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let store: DynStore = match &config.database_url {
        Some(database_url) => {
            let pool = create_pool(database_url).await?;
            sqlx::migrate!("./migrations").run(&pool).await?;
            Arc::new(PgStore::new(pool))
        }
        None => {
            tracing::warn!(
                "DATABASE_URL is not set; using the in-memory store (data is lost on restart)"
            );
            Arc::new(MemoryStore::new())
        }
    };

    if config.gemini_api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY is not set; AI generation and assessment are disabled");
    }

    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(60))
        .build()
        .expect("failed to build HTTP client");
    let gemini = GeminiClient::new(
        config.gemini_api_key.clone(),
        config.gemini_model.clone(),
        http_client,
    );

    let app_state = AppState::new(store, gemini);

    let public_api = Router::new()
        .route("/api/public/config", get(routes::health::service_config))
        .route("/api/public/jobs", get(routes::job::list_public_jobs))
        .route("/api/public/jobs/:id", get(routes::job::get_public_job))
        .route(
            "/api/public/jobs/:id/applications",
            post(routes::application::submit_application),
        )
        .layer(axum::middleware::from_fn_with_state(
            rate_limit::PublicRateLimit::per_second(config.public_rps),
            rate_limit::public_rate_limit,
        ));

    let admin_api = Router::new()
        .route(
            "/api/admin/jobs",
            get(routes::job::list_admin_jobs).post(routes::job::create_job),
        )
        .route(
            "/api/admin/jobs/generate",
            post(routes::job::generate_job_details),
        )
        .route(
            "/api/admin/jobs/:id/applications",
            get(routes::application::list_candidates),
        )
        .route(
            "/api/admin/jobs/:id/analyze-all",
            post(routes::application::analyze_all),
        )
        .route(
            "/api/admin/applications/:id/analyze",
            post(routes::application::analyze_application),
        );

    let app = Router::new()
        .route("/health", get(routes::health::health))
        .merge(public_api)
        .merge(admin_api)
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
