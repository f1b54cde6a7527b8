//! HTTP adapters - REST API implementations.

pub mod gateway;

// Re-export key types for convenience
pub use gateway::gateway_router;
pub use gateway::GatewayAppState;
