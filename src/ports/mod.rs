//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the gateway and the host platform. Adapters implement these ports.
//!
//! ## Host Platform Ports
//!
//! - `OrderRepository` - Order lookup and versioned update
//! - `SessionStore` - Per-buyer checkout session values
//! - `SettingsStore` - Merchant option storage
//! - `EventPublisher` - Order events for fulfillment
//! - `PaymentArgsFilter` - Extension point for outgoing payment parameters
//!
//! ## Processor Ports
//!
//! - `PaymentProcessor` - Remote create-payment API

mod event_publisher;
mod order_repository;
mod payment_args_filter;
mod payment_processor;
mod session_store;
mod settings_store;

pub use event_publisher::EventPublisher;
pub use order_repository::OrderRepository;
pub use payment_args_filter::PaymentArgsFilter;
pub use payment_processor::{PaymentError, PaymentErrorCode, PaymentProcessor, PaymentSession};
pub use session_store::{SessionStore, SELECTED_GUID_KEY};
pub use settings_store::SettingsStore;
