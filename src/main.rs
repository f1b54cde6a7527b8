//! Moolah Gateway server.
//!
//! Serves the checkout and IPN endpoints over in-memory order, session and
//! event adapters.

use std::sync::Arc;

use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use moolah_gateway::adapters::http::{gateway_router, GatewayAppState};
use moolah_gateway::adapters::{
    InMemoryEventBus, InMemoryOrderRepository, InMemorySessionStore, MoolahConfig,
    MoolahPaymentProcessor,
};
use moolah_gateway::config::{AppConfig, ServerConfig, ValidationError};
use moolah_gateway::domain::payment::fingerprint;
use secrecy::ExposeSecret;

fn init_tracing(server: &ServerConfig) -> Result<(), ValidationError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => server.log_filter()?,
    };

    if server.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server)?;

    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "Invalid configuration");
        return Err(e.into());
    }

    let gateway = Arc::new(config.gateway.clone());
    tracing::info!(
        enabled = gateway.enabled,
        currencies = gateway.currency_options().len(),
        ipn_secret = %fingerprint(gateway.ipn_secret.expose_secret()),
        site_url = %gateway.site_url,
        "Starting Moolah gateway"
    );

    let processor = MoolahPaymentProcessor::new(
        MoolahConfig::new()
            .with_base_url(gateway.api_base_url.clone())
            .with_timeout(gateway.request_timeout()),
    )?;

    let state = GatewayAppState {
        config: gateway,
        order_repository: Arc::new(InMemoryOrderRepository::new()),
        session_store: Arc::new(InMemorySessionStore::new()),
        payment_processor: Arc::new(processor),
        event_publisher: Arc::new(InMemoryEventBus::new()),
        payment_args_filters: Vec::new(),
    };

    let app = gateway_router()
        .with_state(state)
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app).await?;

    Ok(())
}
