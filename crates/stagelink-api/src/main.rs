use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use stagelink_api::{
    config::Config,
    middleware::logging,
    routes::{health, messages},
    state::AppState,
};
use stagelink_llm::{CompletionConfig, OpenRouterClient};
use stagelink_persist::{MessageStore, MongoMessageStore};
use stagelink_summarizer::ChatSummarizer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let config = Config::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    init_logging(&config);

    tracing::info!("Starting StageLink API server");
    tracing::info!("Config loaded: {}:{}", config.server.host, config.server.port);

    // Completion client (API key validated here, not on first request)
    let completion_config = CompletionConfig::new(config.openrouter_api_key.clone())
        .with_model(config.llm.model.clone())
        .with_temperature(config.llm.temperature)
        .with_max_tokens(config.llm.max_tokens);
    let llm_client = Arc::new(OpenRouterClient::new(completion_config)?);

    tracing::info!("Connecting to MongoDB");
    let store: Arc<dyn MessageStore> = Arc::new(
        MongoMessageStore::connect(&config.mongodb_uri, &config.mongodb.database).await?,
    );
    tracing::info!("MongoDB connected");

    let summarizer = ChatSummarizer::new(store.clone(), llm_client);

    let state = Arc::new(AppState::new(config.clone(), store, summarizer));

    let app = build_router(state.clone());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        // Health
        .route("/health", get(health::health_check))
        // Messages
        .route("/messages", post(messages::create_message))
        .route("/messages/conversations", get(messages::list_conversations))
        .route(
            "/messages/conversation/:user_a/:user_b",
            get(messages::get_conversation),
        )
        .route(
            "/messages/unread/:user_id/:other_user_id",
            get(messages::get_unread),
        )
        .route(
            "/messages/unread/:user_id/:other_user_id/summary",
            post(messages::summarize_unread),
        );

    // The outer timeout is the only end-to-end deadline; the completion
    // client bounds each of its attempts separately.
    Router::new()
        .merge(api_routes)
        .layer(middleware::from_fn(logging::log_request))
        .layer(TimeoutLayer::new(std::time::Duration::from_secs(120)))
        .layer(CompressionLayer::new())
        .layer(build_cors_layer(&state.config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn build_cors_layer(config: &Config) -> CorsLayer {
    if config.cors.enabled {
        let cors = CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers(Any);

        if config.cors.origins.iter().any(|o| o == "*") {
            cors.allow_origin(Any)
        } else {
            let parsed_origins: Vec<axum::http::HeaderValue> = config
                .cors
                .origins
                .iter()
                .filter_map(|o| o.parse::<axum::http::HeaderValue>().ok())
                .collect();

            cors.allow_origin(parsed_origins)
        }
    } else {
        CorsLayer::permissive()
    }
}

fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }
}
