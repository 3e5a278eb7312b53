use std::sync::Arc;

use crate::config::PaypalOptions;

use super::orchestrator::CheckoutOrchestrator;

/// Callback surface the PayPal buttons drive.
///
/// The provider calls these on its own schedule and expects plain values
/// back, so errors are logged here and never surfaced to it.
pub struct PaypalButtons {
    checkout: Arc<CheckoutOrchestrator>,
    options: PaypalOptions,
}

impl PaypalButtons {
    pub fn new(checkout: Arc<CheckoutOrchestrator>, options: PaypalOptions) -> Self {
        tracing::debug!(
            environment = ?options.environment,
            currency = %options.currency,
            locale = %options.locale,
            "PayPal buttons configured"
        );
        Self { checkout, options }
    }

    pub fn script_url(&self) -> String {
        self.options.script_url()
    }

    /// Whether the buttons render at all and whether they accept clicks.
    pub async fn rendered(&self) -> Option<bool> {
        let control = self.checkout.paypal_control().await;
        control.visible.then_some(!control.disabled)
    }

    pub async fn on_click(&self) -> bool {
        match self.checkout.enable_paypal().await {
            Ok(enabled) => enabled,
            Err(e) => {
                tracing::debug!(error = %e, "PayPal click ignored");
                false
            }
        }
    }

    /// Returns the PayPal order id, or an empty string to abort the flow.
    pub async fn create_order(&self) -> String {
        match self.checkout.create_paypal_order().await {
            Ok(creation) => creation.widget_order_id().to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "PayPal create rejected");
                String::new()
            }
        }
    }

    pub async fn on_approve(&self, paypal_order_id: &str) {
        if let Err(e) = self.checkout.capture_paypal_order(paypal_order_id).await {
            tracing::warn!(paypal_order_id, error = %e, "PayPal approval rejected");
        }
    }
}
