//! Outbound payment request: ordered parameters, canonical query string and
//! the shared-secret hash.

use secrecy::{ExposeSecret, SecretString};

use crate::domain::order::Order;

use super::amount::format_amount;
use super::signature::request_hash;
use super::urls::CheckoutUrls;

/// Ordered key/value parameters of a payment request.
///
/// Insertion order is preserved; it is part of the signed bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentParams {
    entries: Vec<(String, String)>,
}

impl PaymentParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key`, replacing an existing value in place or appending.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Canonical `application/x-www-form-urlencoded` serialization.
    pub fn to_query(&self) -> String {
        self.entries
            .iter()
            .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Form-encodes one key or value.
///
/// Everything except ASCII alphanumerics and `-_.` is percent-encoded and
/// space becomes `+`.
pub fn encode_component(raw: &str) -> String {
    url::form_urlencoded::byte_serialize(raw.as_bytes())
        .collect::<String>()
        .replace('*', "%2A")
}

/// Inputs for building a payment request for one order.
#[derive(Debug, Clone)]
pub struct PaymentRequestContext<'a> {
    pub guid: &'a str,
    pub urls: &'a CheckoutUrls,
}

/// Unsigned payment request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    params: PaymentParams,
}

impl PaymentRequest {
    /// Builds `currency, amount, product, return, guid, ipn` for an order.
    pub fn for_order(order: &Order, ctx: &PaymentRequestContext<'_>) -> Self {
        let mut params = PaymentParams::new();
        params.set("currency", order.currency.clone());
        params.set("amount", format_amount(order.total));
        params.set("product", format!("Order {}", order.number));
        params.set("return", ctx.urls.return_url(order.id, &order.order_key));
        params.set("guid", ctx.guid);
        params.set("ipn", ctx.urls.ipn_url());
        Self { params }
    }

    pub fn from_params(params: PaymentParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &PaymentParams {
        &self.params
    }

    /// Mutable access for extension filters.
    pub fn params_mut(&mut self) -> &mut PaymentParams {
        &mut self.params
    }

    /// Serializes and hashes the request with the shared secret.
    pub fn sign(self, secret: &SecretString) -> SignedPaymentRequest {
        let query = self.params.to_query();
        let hash = request_hash(&query, secret.expose_secret());
        SignedPaymentRequest {
            params: self.params,
            query,
            hash,
        }
    }
}

/// Payment request ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedPaymentRequest {
    params: PaymentParams,
    query: String,
    hash: String,
}

impl SignedPaymentRequest {
    pub fn params(&self) -> &PaymentParams {
        &self.params
    }

    /// Serialized parameters without the hash.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Query string sent on the wire: parameters followed by `hash`.
    pub fn query_with_hash(&self) -> String {
        format!("{}&hash={}", self.query, self.hash)
    }
}
