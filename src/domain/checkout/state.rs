use crate::navigation::Destination;

// ============================================================================
// Checkout States and Outcomes
// ============================================================================

/// Where a checkout session currently is.
///
/// Cash path:   Idle -> Submitting -> Done | Failed
/// PayPal path: Idle -> AwaitingApproval -> Creating -> PendingCapture
///              -> Capturing -> Done, with Capturing -> Retryable -> Capturing
///              on capture failure, and Creating -> Failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutState {
    Idle,
    Submitting,
    AwaitingApproval,
    Creating,
    PendingCapture,
    Capturing,
    Retryable,
    Done,
    Failed,
}

impl CheckoutState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, CheckoutState::Done | CheckoutState::Failed)
    }
}

/// Result of a cash submission or a PayPal capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Order placed; buyer was sent to the success view.
    Completed(Destination),
    /// Order could not be placed; buyer was sent to the failure view.
    Failed(Destination),
    /// Capture failed; buyer stays on checkout and may try again.
    Retryable,
}

/// Result of the PayPal create hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaypalCreation {
    Created(String),
    /// Answered from the pending order, no backend call made.
    Reused(String),
    Aborted(Destination),
}

impl PaypalCreation {
    /// Id handed back to the PayPal buttons. Empty tells them to abort.
    pub fn widget_order_id(&self) -> &str {
        match self {
            PaypalCreation::Created(id) | PaypalCreation::Reused(id) => id.as_str(),
            PaypalCreation::Aborted(_) => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaypalControl {
    pub visible: bool,
    pub disabled: bool,
}
