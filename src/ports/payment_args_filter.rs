//! Extension point for payment request parameters.
//!
//! Filters run after the standard parameters are built and before the
//! request is signed, so anything they change is covered by the hash.

use crate::domain::order::Order;
use crate::domain::payment::PaymentParams;

pub trait PaymentArgsFilter: Send + Sync {
    /// Modify the parameters for `order` in place.
    fn filter(&self, order: &Order, params: &mut PaymentParams);
}

/// Closures work as filters.
impl<F> PaymentArgsFilter for F
where
    F: Fn(&Order, &mut PaymentParams) + Send + Sync,
{
    fn filter(&self, order: &Order, params: &mut PaymentParams) {
        self(order, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::OrderId;
    use rust_decimal_macros::dec;

    #[test]
    fn closure_filter_modifies_params() {
        let order = Order::new(OrderId::new(1), "1", "k", dec!(1), "EUR").unwrap();
        let filter = |_: &Order, params: &mut PaymentParams| params.set("product", "Custom");
        let mut params = PaymentParams::new();
        params.set("product", "Order 1");

        filter.filter(&order, &mut params);

        assert_eq!(params.get("product"), Some("Custom"));
    }

    #[test]
    fn payment_args_filter_is_object_safe() {
        fn _accepts_dyn(_filter: &dyn PaymentArgsFilter) {}
    }
}
