//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `events` - Event bus implementations (in-memory)
//! - `http` - Axum routes for checkout and IPN callbacks
//! - `moolah` - Moolah.io payment API client
//! - `storage` - In-memory order, session and settings stores

pub mod events;
pub mod http;
pub mod moolah;
pub mod storage;

pub use events::InMemoryEventBus;
pub use moolah::{MockPaymentProcessor, MoolahConfig, MoolahPaymentProcessor};
pub use storage::{InMemoryOrderRepository, InMemorySessionStore, InMemorySettingsStore};
