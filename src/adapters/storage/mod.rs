//! In-memory storage adapters.
//!
//! Stand-ins for the host platform's order, session and option storage,
//! used by the standalone server and in tests.

mod in_memory_order_repository;
mod in_memory_session_store;
mod in_memory_settings_store;

pub use in_memory_order_repository::InMemoryOrderRepository;
pub use in_memory_session_store::InMemorySessionStore;
pub use in_memory_settings_store::InMemorySettingsStore;
