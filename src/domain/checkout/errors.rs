use crate::backend::BackendError;

use super::state::CheckoutState;

// ============================================================================
// Checkout Guard Errors
// ============================================================================
//
// CheckoutError is returned when an operation is called in a state that does
// not allow it. Backend failures are not errors here: they become outcomes,
// classified internally as CreateFailure.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckoutError {
    #[error("Shipping details are incomplete or invalid")]
    InvalidShippingDetails,

    #[error("Checkout session has already finished ({0:?})")]
    SessionClosed(CheckoutState),

    #[error("Another payment is already in progress")]
    PaymentInProgress,

    #[error("PayPal is not available for this checkout")]
    PaypalUnavailable,

    #[error("No PayPal order has been created for this checkout")]
    NoPendingOrder,

    #[error("PayPal order {0} does not belong to this checkout")]
    UnknownPaypalOrder(String),

    #[error("A capture is already in progress")]
    CaptureInProgress,
}

/// Why an order-create call did not yield a usable order.
#[derive(Debug, thiserror::Error)]
pub enum CreateFailure {
    #[error("Order could not be placed")]
    Rejected,

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("Unexpected order id from server: {0}")]
    MalformedId(String),
}

impl CreateFailure {
    /// Message carried to the failure view.
    pub fn buyer_message(&self) -> String {
        match self {
            CreateFailure::Backend(e) => e.message(),
            other => other.to_string(),
        }
    }
}
