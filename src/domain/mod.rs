// ============================================================================
// Domain Layer
// ============================================================================
//
// - checkout: shipping form, payment availability, checkout state machine
// - history:  read-only paginated view over the buyer's past orders
//
// Neither module performs I/O directly; collaborators come in through the
// traits in `crate::ports`.
//
// ============================================================================

pub mod checkout;
pub mod history;
