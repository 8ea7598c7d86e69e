use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use homecare_leads_server::clients::{
    GoogleCalendarClient, MapsGeocoder, OpenAiAssistant, SupabaseAuth,
};
use homecare_leads_server::db::{create_pool, PgStore};
use homecare_leads_server::{routes, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "homecare_leads_server=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Home-Care Leads Server...");

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "Environment: {}, Server: {}",
        config.environment,
        config.server_address()
    );

    // Create database connection pool
    let pool = create_pool(&config.database_url).await?;

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Migrations complete");

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(
            config
                .allowed_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect::<Vec<_>>(),
        )
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers(Any);

    // Wire up outbound service clients
    let http = reqwest::Client::new();
    let state = AppState {
        store: Arc::new(PgStore::new(pool)),
        geocoder: Arc::new(MapsGeocoder::new(http.clone(), config.maps_api_key.clone())),
        calendar: Arc::new(GoogleCalendarClient::new(
            http.clone(),
            config.google_service_account_email.clone(),
            config.google_private_key.clone(),
            config.google_calendar_id.clone(),
            config.booking_sheet_id.clone(),
        )),
        auth: Arc::new(SupabaseAuth::new(
            http.clone(),
            config.auth_base_url.clone(),
            config.auth_api_key.clone(),
        )),
        assistant: Arc::new(OpenAiAssistant::new(
            http,
            config.llm_api_key.clone(),
            config.llm_assistant_id.clone(),
        )),
        config: config.clone(),
    };

    // Build router
    let app = routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr: SocketAddr = config.server_address().parse()?;
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
