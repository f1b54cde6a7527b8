//! Event bus adapters.
//!
//! - `InMemoryEventBus` - In-process bus that records and logs order events

mod in_memory;

pub use in_memory::InMemoryEventBus;
