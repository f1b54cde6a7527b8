//! Moolah Gateway - Cryptocurrency checkout through Moolah.io
//!
//! This crate builds signed payment requests for store orders, redirects
//! buyers to the Moolah.io payment page and applies the processor's IPN
//! callbacks to order status.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
