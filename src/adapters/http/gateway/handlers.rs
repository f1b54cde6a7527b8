//! HTTP handlers for checkout and IPN endpoints.
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::{Json, Path, Query, RawQuery, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::application::handlers::payment::{
    CreatePaymentCommand, CreatePaymentHandler, GetPaymentOptionsHandler, GetPaymentOptionsQuery,
    HandleIpnCommand, HandleIpnHandler, ProcessPaymentCommand, ProcessPaymentHandler,
};
use crate::config::GatewayConfig;
use crate::domain::foundation::{OrderId, SessionId};
use crate::domain::payment::{ErrorCategory, GatewayError, IpnRequest};
use crate::ports::{
    EventPublisher, OrderRepository, PaymentArgsFilter, PaymentProcessor, SessionStore,
};

use super::dto::{
    ErrorResponse, PayPageQuery, PaymentOptionsResponse, ProcessPaymentRequest,
    ProcessPaymentResponse,
};

/// Plain-text body returned for rejected callbacks.
pub const IPN_FAILURE_BODY: &str = "Moolah.io IPN Request Failure";

/// Header carrying the buyer's checkout session.
pub const SESSION_HEADER: &str = "X-Session-Id";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// This struct is cloned for each request and contains Arc-wrapped dependencies
/// for efficient sharing across handlers.
#[derive(Clone)]
pub struct GatewayAppState {
    pub config: Arc<GatewayConfig>,
    pub order_repository: Arc<dyn OrderRepository>,
    pub session_store: Arc<dyn SessionStore>,
    pub payment_processor: Arc<dyn PaymentProcessor>,
    pub event_publisher: Arc<dyn EventPublisher>,
    pub payment_args_filters: Vec<Arc<dyn PaymentArgsFilter>>,
}

impl GatewayAppState {
    /// Create handlers on demand from the shared state.
    pub fn payment_options_handler(&self) -> GetPaymentOptionsHandler {
        GetPaymentOptionsHandler::new(self.config.clone())
    }

    pub fn process_payment_handler(&self) -> ProcessPaymentHandler {
        ProcessPaymentHandler::new(
            self.config.clone(),
            self.order_repository.clone(),
            self.session_store.clone(),
        )
    }

    pub fn create_payment_handler(&self) -> CreatePaymentHandler {
        CreatePaymentHandler::new(
            self.config.clone(),
            self.order_repository.clone(),
            self.session_store.clone(),
            self.payment_processor.clone(),
            self.event_publisher.clone(),
        )
        .with_filters(self.payment_args_filters.clone())
    }

    pub fn ipn_handler(&self) -> HandleIpnHandler {
        HandleIpnHandler::new(
            self.config.clone(),
            self.order_repository.clone(),
            self.event_publisher.clone(),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Checkout Session
// ════════════════════════════════════════════════════════════════════════════════

/// Buyer session extracted from the `X-Session-Id` header.
#[derive(Debug, Clone, Copy)]
pub struct CheckoutSession {
    pub session_id: SessionId,
}

/// Rejection type for CheckoutSession extraction.
pub struct SessionRequired;

impl IntoResponse for SessionRequired {
    fn into_response(self) -> Response {
        let error = ErrorResponse::new("SESSION_REQUIRED", "A checkout session is required");
        (StatusCode::BAD_REQUEST, Json(error)).into_response()
    }
}

#[async_trait]
impl<S> axum::extract::FromRequestParts<S> for CheckoutSession
where
    S: Send + Sync,
{
    type Rejection = SessionRequired;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let session_id = parts
            .headers
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<SessionId>().ok())
            .ok_or(SessionRequired)?;

        Ok(CheckoutSession { session_id })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Checkout Endpoints
// ════════════════════════════════════════════════════════════════════════════════

/// GET /checkout/moolah/options - Payment fields shown at checkout
pub async fn get_payment_options(State(state): State<GatewayAppState>) -> impl IntoResponse {
    let result = state.payment_options_handler().handle(GetPaymentOptionsQuery);
    Json(PaymentOptionsResponse::from(result))
}

/// POST /checkout/moolah/orders/:order_id/process - Checkout form submission
pub async fn process_payment(
    State(state): State<GatewayAppState>,
    session: CheckoutSession,
    Path(order_id): Path<u64>,
    Json(request): Json<ProcessPaymentRequest>,
) -> Result<impl IntoResponse, GatewayApiError> {
    let cmd = ProcessPaymentCommand {
        order_id: OrderId::new(order_id),
        session_id: session.session_id,
        guid: request.guid,
    };

    let result = state.process_payment_handler().handle(cmd).await?;

    Ok(Json(ProcessPaymentResponse::success(result.redirect)))
}

/// GET /checkout/moolah/orders/:order_id/pay - Pay page, redirects to the processor
pub async fn pay_order(
    State(state): State<GatewayAppState>,
    session: CheckoutSession,
    Path(order_id): Path<u64>,
    Query(query): Query<PayPageQuery>,
) -> Result<impl IntoResponse, GatewayApiError> {
    let cmd = CreatePaymentCommand {
        order_id: OrderId::new(order_id),
        session_id: session.session_id,
        order_key: query.key,
    };

    let result = state.create_payment_handler().handle(cmd).await?;

    Ok((
        StatusCode::SEE_OTHER,
        [(header::LOCATION, result.redirect_url)],
    ))
}

// ════════════════════════════════════════════════════════════════════════════════
// IPN Endpoint
// ════════════════════════════════════════════════════════════════════════════════

/// GET /wc-api/WC_Gateway_Moolah - Processor payment notification
pub async fn handle_ipn(
    State(state): State<GatewayAppState>,
    RawQuery(query): RawQuery,
) -> Response {
    let cmd = HandleIpnCommand {
        request: IpnRequest::from_query(query.as_deref().unwrap_or_default()),
    };

    match state.ipn_handler().handle(cmd).await {
        Ok(_) => StatusCode::OK.into_response(),
        Err(e) => (e.status_code(), IPN_FAILURE_BODY).into_response(),
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts gateway errors to HTTP responses.
#[derive(Debug)]
pub struct GatewayApiError(GatewayError);

impl From<GatewayError> for GatewayApiError {
    fn from(err: GatewayError) -> Self {
        Self(err)
    }
}

impl IntoResponse for GatewayApiError {
    fn into_response(self) -> Response {
        let error_code = match &self.0 {
            GatewayError::CurrencyNotSelected => "CURRENCY_NOT_SELECTED",
            GatewayError::UnknownCurrency => "UNKNOWN_CURRENCY",
            GatewayError::OrderKeyMismatch => "ORDER_KEY_MISMATCH",
            GatewayError::OrderNotPayable(_) => "ORDER_NOT_PAYABLE",
            GatewayError::OrderNotFound(_) | GatewayError::OrderNotFoundForTx(_) => {
                "ORDER_NOT_FOUND"
            }
            err => match err.category() {
                ErrorCategory::Configuration => "GATEWAY_UNAVAILABLE",
                ErrorCategory::Validation => "VALIDATION_FAILED",
                ErrorCategory::Upstream => "PAYMENT_ERROR",
                ErrorCategory::NotFound => "NOT_FOUND",
                ErrorCategory::Infrastructure => "INTERNAL_ERROR",
            },
        };

        if self.0.category() == ErrorCategory::Infrastructure {
            tracing::error!(error = %self.0, "Checkout request failed");
        }

        let body = ErrorResponse::new(error_code, self.0.public_message());
        (self.0.status_code(), Json(body)).into_response()
    }
}
