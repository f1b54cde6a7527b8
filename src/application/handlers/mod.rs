//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod payment;

pub use payment::{
    CreatePaymentCommand, CreatePaymentHandler, CreatePaymentResult, GetPaymentOptionsHandler,
    GetPaymentOptionsQuery, GetPaymentOptionsResult, HandleIpnCommand, HandleIpnHandler,
    HandleIpnResult, ProcessPaymentCommand, ProcessPaymentHandler, ProcessPaymentResult,
};
