//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `order` - Order aggregate, status lifecycle and events
//! - `payment` - Payment request signing, IPN parsing and gateway errors

pub mod foundation;
pub mod order;
pub mod payment;
