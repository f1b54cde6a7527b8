//! Buyer-facing and callback URLs derived from the store's site URL.

use crate::domain::foundation::OrderId;

use super::payment_request::encode_component;

/// Path the processor calls back on.
pub const IPN_PATH: &str = "/wc-api/WC_Gateway_Moolah";

/// URL builder rooted at the store's public site URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutUrls {
    site_url: String,
}

impl CheckoutUrls {
    /// Creates a builder; a trailing slash on `site_url` is ignored.
    pub fn new(site_url: impl Into<String>) -> Self {
        let site_url = site_url.into();
        Self {
            site_url: site_url.trim_end_matches('/').to_string(),
        }
    }

    /// Where the processor sends payment notifications.
    pub fn ipn_url(&self) -> String {
        format!("{}{}", self.site_url, IPN_PATH)
    }

    /// Order-received page the buyer returns to after paying.
    pub fn return_url(&self, order_id: OrderId, order_key: &str) -> String {
        format!(
            "{}/checkout/order-received/{}/?key={}",
            self.site_url,
            order_id,
            encode_component(order_key)
        )
    }

    /// Pay page that builds the processor request for an order.
    pub fn pay_url(&self, order_id: OrderId, order_key: &str) -> String {
        format!(
            "{}/checkout/moolah/orders/{}/pay?key={}",
            self.site_url,
            order_id,
            encode_component(order_key)
        )
    }
}
