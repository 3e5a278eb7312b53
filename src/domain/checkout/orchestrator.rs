use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::backend::{BackendError, CreateOrderRequest, CreateOrderResponse};
use crate::config::CheckoutConfig;
use crate::metrics::Metrics;
use crate::navigation::Destination;
use crate::ports::{CartService, Navigator, Notifier, OrderBackend};

use super::availability::PaymentMethodAvailability;
use super::errors::{CheckoutError, CreateFailure};
use super::form::ShippingForm;
use super::session::{CheckoutEvent, CheckoutSession, CreateStep};
use super::state::{CheckoutOutcome, CheckoutState, PaypalControl, PaypalCreation};
use super::validation::ShippingField;
use super::value_objects::{PaymentMethodId, PendingOrder};

// ============================================================================
// Checkout Orchestrator
// ============================================================================
//
// Drives one checkout session against the backend:
//   cash:   create(paymentId=1) -> refresh cart -> /success
//                               -> clear cart   -> /failed?message=...
//   paypal: create(paymentId=2) -> cache pending order -> capture
//           capture failures keep the pending order so capture can be retried
//
// The session lock is never held across a backend call. The create gate is,
// so concurrent PayPal create hooks produce a single backend order.
//
// ============================================================================

pub const CAPTURE_FAILED_MESSAGE: &str = "Failed to complete your order, please try again!";

/// Collaborators a checkout needs.
#[derive(Clone)]
pub struct CheckoutDeps {
    pub backend: Arc<dyn OrderBackend>,
    pub cart: Arc<dyn CartService>,
    pub navigator: Arc<dyn Navigator>,
    pub notifier: Arc<dyn Notifier>,
    pub metrics: Arc<Metrics>,
}

pub struct CheckoutOrchestrator {
    session_id: Uuid,
    deps: CheckoutDeps,
    config: CheckoutConfig,
    availability: PaymentMethodAvailability,
    session: Mutex<CheckoutSession>,
    create_gate: Mutex<()>,
}

impl CheckoutOrchestrator {
    /// Start a checkout session, loading the payment methods on offer.
    pub async fn mount(deps: CheckoutDeps, config: CheckoutConfig) -> Self {
        let availability =
            PaymentMethodAvailability::fetch(deps.backend.as_ref(), &deps.metrics).await;
        Self::with_availability(deps, config, availability)
    }

    pub fn with_availability(
        deps: CheckoutDeps,
        config: CheckoutConfig,
        availability: PaymentMethodAvailability,
    ) -> Self {
        let session_id = Uuid::new_v4();
        tracing::info!(
            session_id = %session_id,
            paypal_available = availability.paypal_available(),
            "Checkout session started"
        );

        Self {
            session_id,
            deps,
            config,
            availability,
            session: Mutex::new(CheckoutSession::default()),
            create_gate: Mutex::new(()),
        }
    }

    pub async fn set_field(&self, field: ShippingField, value: impl Into<String>) {
        self.session.lock().await.set_field(field, value);
    }

    pub async fn form(&self) -> ShippingForm {
        self.session.lock().await.form().clone()
    }

    pub async fn state(&self) -> CheckoutState {
        self.session.lock().await.state()
    }

    pub async fn pending_order(&self) -> Option<PendingOrder> {
        self.session.lock().await.pending_order().cloned()
    }

    pub async fn cash_disabled(&self) -> bool {
        self.session.lock().await.cash_disabled()
    }

    pub async fn paypal_control(&self) -> PaypalControl {
        self.session
            .lock()
            .await
            .paypal_control(self.availability.paypal_available())
    }

    /// Re-validate the form when the buyer interacts with the PayPal control.
    pub async fn enable_paypal(&self) -> Result<bool, CheckoutError> {
        let enabled = self.session.lock().await.enable_paypal()?;
        tracing::debug!(session_id = %self.session_id, enabled, "PayPal control toggled");
        Ok(enabled)
    }

    pub async fn submit_cash_on_delivery(&self) -> Result<CheckoutOutcome, CheckoutError> {
        let details = self.session.lock().await.begin_cash()?;
        let payment = PaymentMethodId::CashOnDelivery;

        tracing::info!(session_id = %self.session_id, payment = payment.label(), "Placing order");

        let request = CreateOrderRequest::new(payment, &details);
        let result = self.deps.backend.create_order(request).await;

        match accepted_order(result) {
            Ok(order_id) => {
                self.deps
                    .metrics
                    .orders_created
                    .with_label_values(&[payment.label()])
                    .inc();
                tracing::info!(session_id = %self.session_id, order_id = ?order_id, "Order placed");

                self.session.lock().await.apply(CheckoutEvent::CashSucceeded);
                let destination = self.finish_success().await;
                Ok(CheckoutOutcome::Completed(destination))
            }
            Err(failure) => {
                self.record_create_failure(payment, &failure);
                self.session.lock().await.apply(CheckoutEvent::CashFailed);
                let destination = self.finish_failure(failure.buyer_message()).await;
                Ok(CheckoutOutcome::Failed(destination))
            }
        }
    }

    /// PayPal `createOrder` hook. Creates at most one backend order per session.
    pub async fn create_paypal_order(&self) -> Result<PaypalCreation, CheckoutError> {
        let _gate = self.create_gate.lock().await;

        let step = self
            .session
            .lock()
            .await
            .begin_paypal_create(self.availability.paypal_available())?;

        let details = match step {
            CreateStep::UseCached(paypal_order_id) => {
                self.deps.metrics.paypal_create_reused.inc();
                tracing::debug!(
                    session_id = %self.session_id,
                    paypal_order_id = %paypal_order_id,
                    "Reusing pending PayPal order"
                );
                return Ok(PaypalCreation::Reused(paypal_order_id));
            }
            CreateStep::Create(details) => details,
        };

        let payment = PaymentMethodId::Paypal;
        tracing::info!(session_id = %self.session_id, payment = payment.label(), "Creating order");

        let request = CreateOrderRequest::new(payment, &details);
        let result = self.deps.backend.create_order(request).await;

        let pending = accepted_order(result)
            .and_then(|id| id.ok_or(CreateFailure::Rejected))
            .and_then(|id| {
                PendingOrder::from_composite_id(&id).ok_or(CreateFailure::MalformedId(id))
            });

        match pending {
            Ok(pending) => {
                self.deps
                    .metrics
                    .orders_created
                    .with_label_values(&[payment.label()])
                    .inc();
                tracing::info!(
                    session_id = %self.session_id,
                    order_id = %pending.order_id,
                    paypal_order_id = %pending.paypal_order_id,
                    "PayPal order created"
                );

                let paypal_order_id = pending.paypal_order_id.clone();
                self.session
                    .lock()
                    .await
                    .apply(CheckoutEvent::PaypalOrderCreated(pending));
                Ok(PaypalCreation::Created(paypal_order_id))
            }
            Err(failure) => {
                self.record_create_failure(payment, &failure);
                self.session
                    .lock()
                    .await
                    .apply(CheckoutEvent::PaypalCreateFailed);
                let destination = self.finish_failure(failure.buyer_message()).await;
                Ok(PaypalCreation::Aborted(destination))
            }
        }
    }

    /// PayPal `onApprove` hook. Failures leave the session open for another try.
    pub async fn capture_paypal_order(
        &self,
        paypal_order_id: &str,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        let pending = self.session.lock().await.begin_capture(paypal_order_id)?;

        let captured = match self
            .deps
            .backend
            .capture_order(&pending.paypal_order_id, &pending.order_id)
            .await
        {
            Ok(response) if response.success => true,
            Ok(_) => {
                tracing::warn!(
                    session_id = %self.session_id,
                    order_id = %pending.order_id,
                    "Capture was not accepted"
                );
                false
            }
            Err(e) => {
                tracing::warn!(
                    session_id = %self.session_id,
                    order_id = %pending.order_id,
                    error = %e,
                    "Capture failed"
                );
                false
            }
        };

        if captured {
            self.deps.metrics.captures.with_label_values(&["completed"]).inc();
            tracing::info!(
                session_id = %self.session_id,
                order_id = %pending.order_id,
                paypal_order_id = %pending.paypal_order_id,
                "PayPal order captured"
            );

            self.session.lock().await.apply(CheckoutEvent::CaptureSucceeded);
            let destination = self.finish_success().await;
            return Ok(CheckoutOutcome::Completed(destination));
        }

        self.deps.metrics.captures.with_label_values(&["retryable"]).inc();
        self.session.lock().await.apply(CheckoutEvent::CaptureFailed);
        self.deps.notifier.error(CAPTURE_FAILED_MESSAGE);
        Ok(CheckoutOutcome::Retryable)
    }

    fn record_create_failure(&self, payment: PaymentMethodId, failure: &CreateFailure) {
        self.deps
            .metrics
            .order_create_failures
            .with_label_values(&[payment.label()])
            .inc();
        tracing::error!(
            session_id = %self.session_id,
            payment = payment.label(),
            error = %failure,
            "Order creation failed"
        );
    }

    async fn finish_success(&self) -> Destination {
        if let Err(e) = self.deps.cart.refresh_from_server().await {
            tracing::warn!(session_id = %self.session_id, error = %e, "Cart refresh failed");
        }
        self.navigate(Destination::Success).await
    }

    async fn finish_failure(&self, message: String) -> Destination {
        if let Err(e) = self.deps.cart.clear().await {
            tracing::warn!(session_id = %self.session_id, error = %e, "Cart clear failed");
        }
        self.navigate(Destination::failed(message)).await
    }

    async fn navigate(&self, destination: Destination) -> Destination {
        let path = destination.path(&self.config);
        if let Err(e) = self.deps.navigator.go_to(&path).await {
            tracing::warn!(session_id = %self.session_id, path = %path, error = %e, "Navigation failed");
        }
        destination
    }
}

/// Whether the backend accepted the order. Acceptance rests on `success`
/// alone; the id is returned when the backend sent one.
fn accepted_order(
    result: Result<CreateOrderResponse, BackendError>,
) -> Result<Option<String>, CreateFailure> {
    match result? {
        CreateOrderResponse {
            success: true,
            data,
        } => Ok(data.map(|order| order.id)),
        CreateOrderResponse { success: false, .. } => Err(CreateFailure::Rejected),
    }
}
