//! Integration tests for the full checkout flow.
//!
//! These tests drive the HTTP router end to end:
//! 1. Buyer submits the checkout form with a currency GUID
//! 2. Pay page signs the request, calls the processor and redirects
//! 3. Processor calls back through the IPN endpoint
//! 4. Order status, notes and events reflect the callback
//!
//! Uses in-memory adapters and a mock processor, no network access.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use rust_decimal_macros::dec;
use secrecy::SecretString;
use tower::ServiceExt;

use moolah_gateway::adapters::http::gateway::{IPN_FAILURE_BODY, SESSION_HEADER};
use moolah_gateway::adapters::http::{gateway_router, GatewayAppState};
use moolah_gateway::adapters::{
    InMemoryEventBus, InMemoryOrderRepository, InMemorySessionStore, InMemorySettingsStore,
    MockPaymentProcessor,
};
use moolah_gateway::config::GatewayConfig;
use moolah_gateway::domain::foundation::{OrderId, SessionId};
use moolah_gateway::domain::order::{Order, OrderStatus};
use moolah_gateway::domain::payment::{request_hash, Cryptocurrency, PaymentParams, IPN_PATH};
use moolah_gateway::ports::{OrderRepository, PaymentArgsFilter};

// =============================================================================
// Test Infrastructure
// =============================================================================

const SECRET: &str = "s3cret";
const PROCESSOR_URL: &str = "https://moolah.io/pay/tx123";

struct Harness {
    router: Router,
    orders: Arc<InMemoryOrderRepository>,
    processor: MockPaymentProcessor,
    events: Arc<InMemoryEventBus>,
}

fn gateway_config() -> GatewayConfig {
    GatewayConfig {
        api_key: SecretString::new("api-key".to_string()),
        ipn_secret: SecretString::new(SECRET.to_string()),
        site_url: "https://shop.example.com".to_string(),
        ..Default::default()
    }
    .with_guid(Cryptocurrency::Bitcoin, "btc-guid")
    .with_guid(Cryptocurrency::Dogecoin, "doge-guid")
}

async fn harness(config: GatewayConfig, filters: Vec<Arc<dyn PaymentArgsFilter>>) -> Harness {
    let orders = Arc::new(InMemoryOrderRepository::new());
    orders
        .insert(Order::new(OrderId::new(100), "100", "wc_order_abc", dec!(0.05), "EUR").unwrap())
        .await;
    let processor = MockPaymentProcessor::returning(PROCESSOR_URL, "tx123");
    let events = Arc::new(InMemoryEventBus::new());

    let state = GatewayAppState {
        config: Arc::new(config),
        order_repository: orders.clone(),
        session_store: Arc::new(InMemorySessionStore::new()),
        payment_processor: Arc::new(processor.clone()),
        event_publisher: events.clone(),
        payment_args_filters: filters,
    };

    Harness {
        router: gateway_router().with_state(state),
        orders,
        processor,
        events,
    }
}

impl Harness {
    async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = location.unwrap_or_else(|| String::from_utf8(bytes.to_vec()).unwrap());
        (status, body)
    }

    async fn checkout(&self, session: SessionId, guid: &str) -> String {
        let (status, body) = self
            .send(
                Request::builder()
                    .method("POST")
                    .uri("/checkout/moolah/orders/100/process")
                    .header(SESSION_HEADER, session.to_string())
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(format!(r#"{{"guid":"{}"}}"#, guid)))
                    .unwrap(),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        json["redirect"].as_str().unwrap().to_string()
    }

    async fn pay(&self, session: SessionId, pay_url: &str) -> (StatusCode, String) {
        let path = pay_url.trim_start_matches("https://shop.example.com");
        self.send(
            Request::builder()
                .uri(path)
                .header(SESSION_HEADER, session.to_string())
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    async fn ipn(&self, query: &str) -> (StatusCode, String) {
        self.send(
            Request::builder()
                .uri(format!("{}?{}", IPN_PATH, query))
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    async fn order(&self) -> Order {
        self.orders.find_by_id(OrderId::new(100)).await.unwrap().unwrap()
    }
}

// =============================================================================
// Happy Path
// =============================================================================

#[tokio::test]
async fn checkout_pay_and_complete_ipn_marks_order_paid() {
    let h = harness(gateway_config(), Vec::new()).await;
    let session = SessionId::new();

    let pay_url = h.checkout(session, "btc-guid").await;
    assert_eq!(
        pay_url,
        "https://shop.example.com/checkout/moolah/orders/100/pay?key=wc_order_abc"
    );

    let (status, location) = h.pay(session, &pay_url).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location, PROCESSOR_URL);

    // Request sent to the processor is complete and correctly signed
    let request = h.processor.last_request().unwrap();
    let params = request.params();
    assert_eq!(params.get("currency"), Some("EUR"));
    assert_eq!(params.get("amount"), Some("0.05000000"));
    assert_eq!(params.get("product"), Some("Order 100"));
    assert_eq!(params.get("guid"), Some("btc-guid"));
    assert_eq!(
        params.get("return"),
        Some("https://shop.example.com/checkout/order-received/100/?key=wc_order_abc")
    );
    assert_eq!(
        params.get("ipn"),
        Some("https://shop.example.com/wc-api/WC_Gateway_Moolah")
    );
    assert_eq!(request.hash(), request_hash(request.query(), SECRET));

    let (status, _) = h.ipn("ipn_secret=s3cret&status=complete&tx=tx123").await;
    assert_eq!(status, StatusCode::OK);

    let order = h.order().await;
    assert_eq!(order.status, OrderStatus::Processing);
    assert!(order.has_note_containing("payment complete"));
    assert!(order.paid_at.is_some());
    assert!(h.events.has_event("order.payment_requested").await);
    assert!(h.events.has_event("order.payment_completed").await);
}

#[tokio::test]
async fn duplicate_complete_ipn_is_acknowledged_once() {
    let h = harness(gateway_config(), Vec::new()).await;
    let session = SessionId::new();
    let pay_url = h.checkout(session, "btc-guid").await;
    h.pay(session, &pay_url).await;

    for _ in 0..2 {
        let (status, _) = h.ipn("ipn_secret=s3cret&status=complete&tx=tx123").await;
        assert_eq!(status, StatusCode::OK);
    }

    let order = h.order().await;
    assert_eq!(order.status, OrderStatus::Processing);
    let completion_notes = order
        .notes
        .iter()
        .filter(|n| n.content.contains("payment complete"))
        .count();
    assert_eq!(completion_notes, 1);
    assert_eq!(h.events.events_of_type("order.payment_completed").await.len(), 1);
}

#[tokio::test]
async fn cancelled_ipn_cancels_order() {
    let h = harness(gateway_config(), Vec::new()).await;
    let session = SessionId::new();
    let pay_url = h.checkout(session, "doge-guid").await;
    h.pay(session, &pay_url).await;

    let (status, _) = h.ipn("ipn_secret=s3cret&status=cancelled&tx=tx123").await;

    assert_eq!(status, StatusCode::OK);
    let order = h.order().await;
    assert_eq!(order.status, OrderStatus::Cancelled);
    assert!(order.has_note_containing("cancelled/timed out"));
}

#[tokio::test]
async fn cancelled_ipn_after_payment_cancels_order() {
    let h = harness(gateway_config(), Vec::new()).await;
    let session = SessionId::new();
    let pay_url = h.checkout(session, "btc-guid").await;
    h.pay(session, &pay_url).await;
    h.ipn("ipn_secret=s3cret&status=complete&tx=tx123").await;

    let (status, _) = h.ipn("ipn_secret=s3cret&status=cancelled&tx=tx123").await;

    assert_eq!(status, StatusCode::OK);
    let order = h.order().await;
    assert_eq!(order.status, OrderStatus::Cancelled);
    assert!(order.has_note_containing("cancelled/timed out"));
    assert!(h.events.has_event("order.payment_cancelled").await);
}

// =============================================================================
// Rejections
// =============================================================================

#[tokio::test]
async fn wrong_secret_leaves_order_untouched() {
    let h = harness(gateway_config(), Vec::new()).await;
    let session = SessionId::new();
    let pay_url = h.checkout(session, "btc-guid").await;
    h.pay(session, &pay_url).await;
    let before = h.order().await;

    let (status, body) = h.ipn("ipn_secret=guess&status=complete&tx=tx123").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, IPN_FAILURE_BODY);
    let after = h.order().await;
    assert_eq!(after.status, OrderStatus::Pending);
    assert_eq!(after.version, before.version);
    assert!(!h.events.has_event("order.payment_completed").await);
}

#[tokio::test]
async fn ipn_before_payment_created_finds_no_order() {
    let h = harness(gateway_config(), Vec::new()).await;

    let (status, body) = h.ipn("ipn_secret=s3cret&status=complete&tx=tx123").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, IPN_FAILURE_BODY);
    assert_eq!(h.order().await.status, OrderStatus::Pending);
}

#[tokio::test]
async fn unknown_status_is_acknowledged_without_change() {
    let h = harness(gateway_config(), Vec::new()).await;
    let session = SessionId::new();
    let pay_url = h.checkout(session, "btc-guid").await;
    h.pay(session, &pay_url).await;

    let (status, _) = h.ipn("ipn_secret=s3cret&status=pending&tx=tx123").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(h.order().await.status, OrderStatus::Pending);
}

// =============================================================================
// Extension Points
// =============================================================================

#[tokio::test]
async fn filters_change_signed_parameters() {
    let filter: Arc<dyn PaymentArgsFilter> =
        Arc::new(|order: &Order, params: &mut PaymentParams| {
            params.set("product", format!("Shop order #{}", order.number));
        });
    let h = harness(gateway_config(), vec![filter]).await;
    let session = SessionId::new();
    let pay_url = h.checkout(session, "btc-guid").await;

    let (status, _) = h.pay(session, &pay_url).await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    let request = h.processor.last_request().unwrap();
    assert_eq!(request.params().get("product"), Some("Shop order #100"));
    assert_eq!(request.hash(), request_hash(request.query(), SECRET));
}

#[tokio::test]
async fn settings_loaded_gateway_serves_checkout() {
    let settings = InMemorySettingsStore::with_values([
        ("enabled", "yes"),
        ("api_key", "api-key"),
        ("ipn_secret", SECRET),
        ("litecoin_guid", "ltc-guid"),
    ]);
    let base = GatewayConfig {
        site_url: "https://shop.example.com".to_string(),
        ..Default::default()
    };
    let config = GatewayConfig::from_settings(&settings, &base).await.unwrap();
    let h = harness(config, Vec::new()).await;
    let session = SessionId::new();

    let pay_url = h.checkout(session, "ltc-guid").await;
    let (status, _) = h.pay(session, &pay_url).await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let (status, _) = h.ipn("ipn_secret=s3cret&status=complete&tx=tx123").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(h.order().await.status, OrderStatus::Processing);
}
