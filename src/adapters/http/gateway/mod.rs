//! HTTP adapter for the Moolah.io checkout.
//!
//! Exposes the payment gateway via HTTP:
//! - `GET /checkout/moolah/options` - Payment fields for the checkout page
//! - `POST /checkout/moolah/orders/:order_id/process` - Submit the selected currency
//! - `GET /checkout/moolah/orders/:order_id/pay` - Create the payment and redirect
//! - `GET /wc-api/WC_Gateway_Moolah` - IPN callback from the processor

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{
    CheckoutSession, GatewayApiError, GatewayAppState, IPN_FAILURE_BODY, SESSION_HEADER,
};
pub use routes::{checkout_routes, gateway_router, ipn_routes};
