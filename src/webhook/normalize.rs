//! Event type to order status mapping.

use crate::orders::OrderStatus;

pub const PAYMENT_CAPTURE_COMPLETED: &str = "PAYMENT.CAPTURE.COMPLETED";
pub const PAYMENT_CAPTURE_PENDING: &str = "PAYMENT.CAPTURE.PENDING";
pub const PAYMENT_CAPTURE_DENIED: &str = "PAYMENT.CAPTURE.DENIED";
pub const CHECKOUT_ORDER_APPROVED: &str = "CHECKOUT.ORDER.APPROVED";
pub const CHECKOUT_ORDER_COMPLETED: &str = "CHECKOUT.ORDER.COMPLETED";

/// Every event type with a dedicated status.
pub const KNOWN_EVENT_TYPES: [(&str, OrderStatus); 5] = [
    (PAYMENT_CAPTURE_COMPLETED, OrderStatus::Completed),
    (PAYMENT_CAPTURE_PENDING, OrderStatus::Pending),
    (PAYMENT_CAPTURE_DENIED, OrderStatus::Denied),
    (CHECKOUT_ORDER_APPROVED, OrderStatus::Approved),
    (CHECKOUT_ORDER_COMPLETED, OrderStatus::Completed),
];

/// Map a raw event type to a status. Matching is exact.
pub fn normalize_status(event_type: &str) -> OrderStatus {
    match event_type {
        PAYMENT_CAPTURE_COMPLETED | CHECKOUT_ORDER_COMPLETED => OrderStatus::Completed,
        PAYMENT_CAPTURE_PENDING => OrderStatus::Pending,
        PAYMENT_CAPTURE_DENIED => OrderStatus::Denied,
        CHECKOUT_ORDER_APPROVED => OrderStatus::Approved,
        _ => OrderStatus::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_event_types() {
        for (event_type, expected) in KNOWN_EVENT_TYPES {
            assert_eq!(normalize_status(event_type), expected, "{event_type}");
        }
    }

    #[test]
    fn test_everything_else_is_unknown() {
        for event_type in [
            "",
            "PAYMENT.CAPTURE.REFUNDED",
            "payment.capture.completed",
            "CHECKOUT.ORDER.APPROVED ",
            "BILLING.SUBSCRIPTION.CREATED",
        ] {
            assert_eq!(normalize_status(event_type), OrderStatus::Unknown);
        }
    }
}
