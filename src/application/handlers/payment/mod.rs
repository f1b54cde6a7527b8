//! Payment handlers.
//!
//! Command and query handlers for the Moolah.io checkout:
//!
//! ## Commands
//! - Processing the checkout form (currency selection)
//! - Creating the remote payment from the pay page
//! - Handling IPN callbacks
//!
//! ## Queries
//! - Payment options shown at checkout

mod create_payment;
mod get_payment_options;
mod handle_ipn;
mod process_payment;

use crate::config::GatewayConfig;
use crate::domain::payment::GatewayError;

// Commands
pub use create_payment::{CreatePaymentCommand, CreatePaymentHandler, CreatePaymentResult};
pub use handle_ipn::{HandleIpnCommand, HandleIpnHandler, HandleIpnResult, MAX_UPDATE_ATTEMPTS};
pub use process_payment::{ProcessPaymentCommand, ProcessPaymentHandler, ProcessPaymentResult};

// Queries
pub use get_payment_options::{
    GetPaymentOptionsHandler, GetPaymentOptionsQuery, GetPaymentOptionsResult,
};

/// Order note added when the processor reports a completed payment.
pub const NOTE_PAYMENT_COMPLETE: &str = "Moolah.io : payment complete.";

/// Order note added when the processor reports a cancelled payment.
pub const NOTE_PAYMENT_CANCELLED: &str = "Moolah.io Payment cancelled/timed out.";

/// Rejects checkout operations while the gateway cannot be offered.
fn ensure_available(config: &GatewayConfig) -> Result<(), GatewayError> {
    if !config.enabled {
        return Err(GatewayError::Disabled);
    }
    if let Err(e) = config.validate() {
        return Err(GatewayError::NotConfigured(e.to_string()));
    }
    if !config.is_available() {
        return Err(GatewayError::NotConfigured(
            "gateway credentials or currencies missing".to_string(),
        ));
    }
    Ok(())
}
