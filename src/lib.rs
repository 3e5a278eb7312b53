//! Storefront checkout and order-history client.
//!
//! Collects shipping details, places orders by cash on delivery or PayPal
//! (create, approve, capture with retry), and pages through past orders.
//! All business rules live in the storefront backend, reached through
//! [`ports::OrderBackend`].

pub mod backend;
pub mod cart;
pub mod config;
pub mod domain;
pub mod metrics;
pub mod navigation;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::{BackendError, HttpBackend};
pub use cart::SharedCart;
pub use config::{AppConfig, CheckoutConfig, ConfigError};
pub use domain::checkout::{
    CheckoutDeps, CheckoutError, CheckoutOrchestrator, CheckoutOutcome, CheckoutState,
    PaypalButtons, PaypalCreation, ShippingDetails, ShippingField,
};
pub use domain::history::{HistoryState, OrderHistoryView};
pub use metrics::Metrics;
pub use navigation::{Destination, LoggingNavigator, LoggingNotifier};
