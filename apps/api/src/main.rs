use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use codelab_api::config::Config;
use codelab_api::imaging::StabilityClient;
use codelab_api::llm_client::{self, LlmClient};
use codelab_api::resume::extractor::LlmApplicantExtractor;
use codelab_api::routes::build_app;
use codelab_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Codelab API v{}", env!("CARGO_PKG_VERSION"));

    // The inventory lives in this process only. Run a single instance: extra
    // instances behind a load balancer would each serve their own collection.
    let mut state = AppState::new();
    info!("In-memory inventory store initialized");

    match &config.openai_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone())?;
            state = state.with_extractor(Arc::new(LlmApplicantExtractor::new(llm)));
            info!("LLM client initialized (model: {})", llm_client::MODEL);
        }
        None => warn!("OPENAI_API_KEY not set; resume extraction endpoints disabled"),
    }

    match &config.stability_api_key {
        Some(key) => {
            state = state.with_bg_remover(Arc::new(StabilityClient::new(key.clone())?));
            info!("Background removal client initialized");
        }
        None => warn!("STABILITY_API_KEY not set; /remove-bg disabled"),
    }

    let app = build_app(state);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
