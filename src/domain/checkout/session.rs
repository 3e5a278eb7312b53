use super::errors::CheckoutError;
use super::form::ShippingForm;
use super::state::{CheckoutState, PaypalControl};
use super::validation::ShippingField;
use super::value_objects::{PendingOrder, ShippingDetails};

// ============================================================================
// Checkout Session - state of one purchase attempt
// ============================================================================
//
// Guards (`begin_*`) check whether an operation may start and record that it
// did. Backend results come back through `apply`. No I/O happens here.
//
// ============================================================================

#[derive(Debug, Clone)]
pub enum CheckoutEvent {
    CashSucceeded,
    CashFailed,
    PaypalOrderCreated(PendingOrder),
    PaypalCreateFailed,
    CaptureSucceeded,
    CaptureFailed,
}

/// What the PayPal create hook should do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateStep {
    UseCached(String),
    Create(ShippingDetails),
}

#[derive(Debug, Clone)]
pub struct CheckoutSession {
    state: CheckoutState,
    form: ShippingForm,
    paypal_enabled: bool,
    // Set once a PayPal create starts; cash stays off for the session.
    cash_disabled: bool,
    // Set while a cash submission is in flight.
    paypal_disabled: bool,
    pending: Option<PendingOrder>,
}

impl Default for CheckoutSession {
    fn default() -> Self {
        Self::new(ShippingForm::new())
    }
}

impl CheckoutSession {
    pub fn new(form: ShippingForm) -> Self {
        let paypal_enabled = form.is_valid();
        Self {
            state: CheckoutState::Idle,
            form,
            paypal_enabled,
            cash_disabled: false,
            paypal_disabled: false,
            pending: None,
        }
    }

    pub fn state(&self) -> CheckoutState {
        self.state
    }

    pub fn form(&self) -> &ShippingForm {
        &self.form
    }

    pub fn pending_order(&self) -> Option<&PendingOrder> {
        self.pending.as_ref()
    }

    pub fn cash_disabled(&self) -> bool {
        self.cash_disabled || self.state == CheckoutState::Submitting || self.state.is_terminal()
    }

    pub fn paypal_control(&self, paypal_available: bool) -> PaypalControl {
        PaypalControl {
            visible: paypal_available,
            disabled: !self.paypal_enabled
                || !self.form.is_valid()
                || self.paypal_disabled
                || self.state.is_terminal(),
        }
    }

    fn ensure_open(&self) -> Result<(), CheckoutError> {
        if self.state.is_terminal() {
            return Err(CheckoutError::SessionClosed(self.state));
        }
        Ok(())
    }

    pub fn set_field(&mut self, field: ShippingField, value: impl Into<String>) {
        self.form.set_field(field, value);
        self.paypal_enabled = self.form.is_valid();
    }

    /// Re-validate the form when the buyer reaches for PayPal.
    pub fn enable_paypal(&mut self) -> Result<bool, CheckoutError> {
        self.ensure_open()?;
        self.paypal_enabled = self.form.trigger();

        match (self.paypal_enabled, self.state) {
            (true, CheckoutState::Idle) => self.state = CheckoutState::AwaitingApproval,
            (false, CheckoutState::AwaitingApproval) => self.state = CheckoutState::Idle,
            _ => {}
        }

        Ok(self.paypal_enabled)
    }

    pub fn begin_cash(&mut self) -> Result<ShippingDetails, CheckoutError> {
        self.ensure_open()?;
        if self.cash_disabled || self.state == CheckoutState::Submitting {
            return Err(CheckoutError::PaymentInProgress);
        }

        let details = self
            .form
            .submit()
            .map_err(|_| CheckoutError::InvalidShippingDetails)?;

        self.state = CheckoutState::Submitting;
        self.paypal_disabled = true;
        Ok(details)
    }

    pub fn begin_paypal_create(
        &mut self,
        paypal_available: bool,
    ) -> Result<CreateStep, CheckoutError> {
        self.ensure_open()?;
        if !paypal_available {
            return Err(CheckoutError::PaypalUnavailable);
        }
        if self.paypal_disabled {
            return Err(CheckoutError::PaymentInProgress);
        }

        let details = match self.form.submit() {
            Ok(details) => details,
            Err(_) => {
                self.paypal_enabled = false;
                return Err(CheckoutError::InvalidShippingDetails);
            }
        };

        self.cash_disabled = true;

        if let Some(pending) = &self.pending {
            return Ok(CreateStep::UseCached(pending.paypal_order_id.clone()));
        }

        self.state = CheckoutState::Creating;
        Ok(CreateStep::Create(details))
    }

    pub fn begin_capture(&mut self, paypal_order_id: &str) -> Result<PendingOrder, CheckoutError> {
        self.ensure_open()?;
        let pending = self.pending.clone().ok_or(CheckoutError::NoPendingOrder)?;

        if pending.paypal_order_id != paypal_order_id {
            return Err(CheckoutError::UnknownPaypalOrder(paypal_order_id.to_string()));
        }
        if self.state == CheckoutState::Capturing {
            return Err(CheckoutError::CaptureInProgress);
        }

        self.state = CheckoutState::Capturing;
        Ok(pending)
    }

    pub fn apply(&mut self, event: CheckoutEvent) {
        match event {
            CheckoutEvent::CashSucceeded | CheckoutEvent::CaptureSucceeded => {
                self.state = CheckoutState::Done;
            }
            CheckoutEvent::CashFailed | CheckoutEvent::PaypalCreateFailed => {
                self.state = CheckoutState::Failed;
            }
            CheckoutEvent::PaypalOrderCreated(pending) => {
                self.pending = Some(pending);
                self.state = CheckoutState::PendingCapture;
            }
            CheckoutEvent::CaptureFailed => {
                self.state = CheckoutState::Retryable;
            }
        }
    }
}
