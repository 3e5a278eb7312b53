// ============================================================================
// Checkout Domain
// ============================================================================
//
// - Value objects (ShippingDetails, PaymentMethod, PendingOrder)
// - Validation rules and the shipping form
// - Payment method availability
// - Session state machine (CheckoutSession) and its orchestrator
// - PayPal widget callbacks
//
// ============================================================================

pub mod value_objects;
pub mod validation;
pub mod form;
pub mod availability;
pub mod state;
pub mod errors;
pub mod session;
pub mod orchestrator;
pub mod widget;

pub use value_objects::*;
pub use validation::{validate_all, validate_field, FieldResult, ShippingField, ValidationReport};
pub use form::ShippingForm;
pub use availability::PaymentMethodAvailability;
pub use state::*;
pub use errors::*;
pub use session::{CheckoutEvent, CheckoutSession, CreateStep};
pub use orchestrator::{CheckoutDeps, CheckoutOrchestrator, CAPTURE_FAILED_MESSAGE};
pub use widget::PaypalButtons;
