use ai_service::{DeepSeekClient, NarrativeAnalyzer};
use anyhow::Result;
use api::{logging, AppState};
use blockchain::{ExplorerClient, TokenDataService};
use risk::RiskEngine;
use shared::config::Config;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_from_env();

    tracing::info!("Starting NEAR token risk checker");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded successfully");

    // Explorer client and ingestion
    let explorer = ExplorerClient::new(&config.nearblocks, &config.upstream)?;
    tracing::info!(
        "Explorer client initialized ({}, timeout {:?}, {} attempts)",
        explorer.base_url(),
        config.upstream.timeout(),
        config.upstream.max_attempts
    );
    let token_data = Arc::new(TokenDataService::new(explorer));

    // Rule-based scoring
    tracing::info!(
        "Risk engine initialized (positive adjustment: {}, zero-score label: {})",
        config.risk.positive_factor_adjustment,
        config.risk.zero_score_risk
    );
    let risk_engine = Arc::new(RiskEngine::new(config.risk));

    // Narrative analysis is optional
    let narrative: Option<Arc<dyn NarrativeAnalyzer>> = match &config.deepseek {
        Some(deepseek) => {
            let client: Arc<dyn NarrativeAnalyzer> = Arc::new(DeepSeekClient::new(deepseek)?);
            tracing::info!("Narrative analysis enabled (model {})", deepseek.model);
            Some(client)
        }
        None => {
            tracing::info!("DEEPSEEK_API_KEY not set, narrative analysis disabled");
            None
        }
    };

    let app_state = Arc::new(AppState::new(token_data, risk_engine, narrative));

    // Create router with CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = api::routes::create_router(app_state, &config.server.static_dir)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server running at http://{}", addr);
    tracing::info!("Serving static files from {}", config.server.static_dir);

    axum::serve(listener, app).await?;

    Ok(())
}
