//! Moolah.io payment processor adapter.
//!
//! Implements the `PaymentProcessor` port:
//! - Sends the signed create-payment request over HTTPS
//! - Maps transport, status and payload failures to `PaymentError`
//!
//! The request hash is computed by the domain before the adapter sees the
//! request; the adapter only appends it to the query string.

mod mock_payment_processor;
mod moolah_processor;

pub use mock_payment_processor::MockPaymentProcessor;
pub use moolah_processor::{
    MoolahConfig, MoolahPaymentProcessor, DEFAULT_API_BASE_URL, DEFAULT_TIMEOUT_SECS,
};
