//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod handlers;

pub use handlers::{
    // Checkout handlers
    CreatePaymentCommand, CreatePaymentHandler, CreatePaymentResult,
    GetPaymentOptionsHandler, GetPaymentOptionsQuery, GetPaymentOptionsResult,
    ProcessPaymentCommand, ProcessPaymentHandler, ProcessPaymentResult,
    // IPN handlers
    HandleIpnCommand, HandleIpnHandler, HandleIpnResult,
};
