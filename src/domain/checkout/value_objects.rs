use serde::{Deserialize, Serialize};

// ============================================================================
// Checkout Value Objects
// ============================================================================

/// Shipping details as entered in the checkout form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingDetails {
    pub full_name: String,
    pub address: String,
    pub phone_number: String,
}

impl ShippingDetails {
    pub fn new(
        full_name: impl Into<String>,
        address: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            address: address.into(),
            phone_number: phone_number.into(),
        }
    }
}

/// Payment method identifiers as the backend numbers them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum PaymentMethodId {
    CashOnDelivery,
    Paypal,
    Other(i64),
}

impl From<i64> for PaymentMethodId {
    fn from(id: i64) -> Self {
        match id {
            1 => PaymentMethodId::CashOnDelivery,
            2 => PaymentMethodId::Paypal,
            other => PaymentMethodId::Other(other),
        }
    }
}

impl From<PaymentMethodId> for i64 {
    fn from(id: PaymentMethodId) -> Self {
        match id {
            PaymentMethodId::CashOnDelivery => 1,
            PaymentMethodId::Paypal => 2,
            PaymentMethodId::Other(other) => other,
        }
    }
}

impl PaymentMethodId {
    /// Short label used for metrics and log fields.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethodId::CashOnDelivery => "cod",
            PaymentMethodId::Paypal => "paypal",
            PaymentMethodId::Other(_) => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: PaymentMethodId,
    pub status: String,
}

impl PaymentMethod {
    pub fn is_active(&self) -> bool {
        self.status == "active"
    }
}

/// Identifiers linking a created order to its PayPal counterpart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingOrder {
    pub order_id: String,
    pub paypal_order_id: String,
}

impl PendingOrder {
    /// Split a `<paypalOrderId>-<internalOrderId>` composite id.
    ///
    /// Splits at the first dash so internal ids that carry dashes themselves
    /// stay intact. Returns `None` when either half is empty.
    pub fn from_composite_id(composite: &str) -> Option<Self> {
        let (paypal_order_id, order_id) = composite.split_once('-')?;
        if paypal_order_id.is_empty() || order_id.is_empty() {
            return None;
        }

        Some(Self {
            order_id: order_id.to_string(),
            paypal_order_id: paypal_order_id.to_string(),
        })
    }
}
