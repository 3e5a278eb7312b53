use crate::metrics::Metrics;
use crate::ports::OrderBackend;

use super::value_objects::{PaymentMethod, PaymentMethodId};

/// Payment methods the backend currently offers.
#[derive(Debug, Clone, Default)]
pub struct PaymentMethodAvailability {
    methods: Vec<PaymentMethod>,
    fetch_failed: bool,
}

impl PaymentMethodAvailability {
    /// Fetch the method list once. A failed fetch leaves only cash on delivery.
    pub async fn fetch<B: OrderBackend + ?Sized>(backend: &B, metrics: &Metrics) -> Self {
        match backend.list_payment_methods().await {
            Ok(response) => {
                tracing::debug!(methods = response.data.len(), "Payment methods loaded");
                Self {
                    methods: response.data,
                    fetch_failed: false,
                }
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Failed to load payment methods, offering cash on delivery only"
                );
                metrics.payment_methods_fetch_failures.inc();
                Self {
                    methods: Vec::new(),
                    fetch_failed: true,
                }
            }
        }
    }

    pub fn fetch_failed(&self) -> bool {
        self.fetch_failed
    }

    pub fn is_active(&self, id: PaymentMethodId) -> bool {
        self.methods.iter().any(|m| m.id == id && m.is_active())
    }

    pub fn paypal_available(&self) -> bool {
        self.is_active(PaymentMethodId::Paypal)
    }
}
