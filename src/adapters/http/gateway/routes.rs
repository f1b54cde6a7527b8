//! Axum router configuration for checkout endpoints.
//!
//! This module defines the route structure for the payment gateway and wires
//! routes to their corresponding handlers.

use axum::{
    routing::{get, post},
    Router,
};

use crate::domain::payment::IPN_PATH;

use super::handlers::{
    get_payment_options, handle_ipn, pay_order, process_payment, GatewayAppState,
};

/// Create the checkout router.
///
/// # Routes
///
/// ## Buyer Endpoints (require `X-Session-Id`)
/// - `POST /checkout/moolah/orders/:order_id/process` - Submit the selected currency
/// - `GET /checkout/moolah/orders/:order_id/pay` - Redirect to the processor
///
/// ## Public Endpoints
/// - `GET /checkout/moolah/options` - Payment fields for the checkout page
pub fn checkout_routes() -> Router<GatewayAppState> {
    Router::new()
        .route("/checkout/moolah/options", get(get_payment_options))
        .route(
            "/checkout/moolah/orders/:order_id/process",
            post(process_payment),
        )
        .route("/checkout/moolah/orders/:order_id/pay", get(pay_order))
}

/// Create the IPN router.
///
/// Callbacks carry no session; they are authenticated by the shared secret.
pub fn ipn_routes() -> Router<GatewayAppState> {
    Router::new().route(IPN_PATH, get(handle_ipn))
}

/// Create the complete gateway router.
///
/// # Example
///
/// ```ignore
/// let app = gateway_router().with_state(app_state);
/// ```
pub fn gateway_router() -> Router<GatewayAppState> {
    Router::new().merge(checkout_routes()).merge(ipn_routes())
}
