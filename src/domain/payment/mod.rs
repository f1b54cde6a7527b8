//! Payment domain module.
//!
//! Pure logic of the processor integration: the signed outbound payment
//! request and the inbound notification.
//!
//! # Module Structure
//!
//! - `amount` - 8-decimal amount formatting
//! - `cryptocurrency` - Supported coins and configured currency options
//! - `errors` - GatewayError and its categories
//! - `ipn` - Callback parameters and parsed notification
//! - `payment_request` - Ordered parameters, query encoding and signing
//! - `signature` - Request hash and secret comparison
//! - `urls` - Return, pay-page and callback URLs

mod amount;
mod cryptocurrency;
mod errors;
mod ipn;
mod payment_request;
mod signature;
mod urls;

pub use amount::{format_amount, AMOUNT_DECIMALS};
pub use cryptocurrency::{CurrencyOption, Cryptocurrency};
pub use errors::{ErrorCategory, GatewayError};
pub use ipn::{IpnNotification, IpnRequest, IpnStatus};
pub use payment_request::{
    encode_component, PaymentParams, PaymentRequest, PaymentRequestContext, SignedPaymentRequest,
};
pub use signature::{fingerprint, request_hash, secrets_match};
pub use urls::{CheckoutUrls, IPN_PATH};
