//! Order domain module.
//!
//! The slice of the host system's order that the payment gateway reads and
//! mutates.
//!
//! # Module Structure
//!
//! - `aggregate` - Order entity and its payment transitions
//! - `status` - OrderStatus state machine
//! - `events` - OrderEvent emitted after persisted transitions

mod aggregate;
mod events;
mod status;

pub use aggregate::{Order, OrderNote};
pub use events::OrderEvent;
pub use status::OrderStatus;
