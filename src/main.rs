use std::error::Error;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cryptostart_buddy::adapters::ai::{OpenAIConfig, OpenAIProvider};
use cryptostart_buddy::adapters::http::{build_app_router, ChatHandlers, LearnerHandlers};
use cryptostart_buddy::adapters::logging::TracingLogSink;
use cryptostart_buddy::adapters::memory::InMemoryEntityStore;
use cryptostart_buddy::application::handlers::{AdviceSettings, SubmitChatMessageHandler};
use cryptostart_buddy::application::Logger;
use cryptostart_buddy::config::{AppConfig, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Configuration ---
    let config = AppConfig::load()?;
    config.validate()?;

    // --- Tracing ---
    init_tracing(&config.server);
    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        environment = ?config.server.environment,
        "Loaded server configuration"
    );

    // --- Store ---
    let store = Arc::new(InMemoryEntityStore::new());
    if config.server.should_seed() {
        store.seed_sample_data().await?;
    }

    // --- Logger ---
    let logger = Logger::new(Arc::new(TracingLogSink::new()), config.server.is_development());

    // --- Completion provider ---
    let provider_config = OpenAIConfig::new(config.ai.api_key.clone())
        .with_base_url(config.ai.base_url.clone())
        .with_model(config.ai.model.clone())
        .with_timeout(config.ai.timeout());
    if !provider_config.is_configured() {
        tracing::warn!("No completion API key configured; chat requests will fail");
    }
    let provider = Arc::new(OpenAIProvider::new(provider_config)?);

    // --- Handlers ---
    let chat = ChatHandlers::new(Arc::new(
        SubmitChatMessageHandler::new(provider, logger.clone()).with_settings(AdviceSettings {
            max_tokens: config.ai.max_tokens,
            temperature: config.ai.temperature,
        }),
    ));
    let learner = LearnerHandlers::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store,
        logger,
    );

    // --- Serve ---
    let app = build_app_router(chat, learner, &config.server);
    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down");
    Ok(())
}

/// JSON output in production, human-readable text otherwise.
fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(server.log_level.as_str()));

    let registry = tracing_subscriber::registry().with(filter);
    if server.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
