// ============================================================================
// Order History Domain
// ============================================================================

pub mod value_objects;
pub mod view;

pub use value_objects::*;
pub use view::{HistoryState, OrderHistoryView, OrderRow, EMPTY_MESSAGE, ERROR_MESSAGE};
