use std::sync::Arc;

use crate::metrics::Metrics;
use crate::ports::OrderBackend;

use super::value_objects::{BadgeColor, Order};

pub const ERROR_MESSAGE: &str = "Internal Server Error";
pub const EMPTY_MESSAGE: &str = "There aren't any orders";

#[derive(Debug, Clone, PartialEq)]
pub enum HistoryState {
    Loading,
    Error,
    Empty,
    Loaded {
        orders: Vec<Order>,
        page: u32,
        total_pages: u32,
    },
}

/// One table row, formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRow {
    pub id: String,
    pub receiver: String,
    pub phone: String,
    pub address: String,
    pub sub_total: String,
    pub total: String,
    pub status: &'static str,
    pub badge: BadgeColor,
    pub created_at: String,
}

impl From<&Order> for OrderRow {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.clone(),
            receiver: order.receiver.clone(),
            phone: order.receiver_phone.clone(),
            address: order.delivery_address.clone(),
            sub_total: format!("{:.2}", order.sub_total),
            total: format!("{:.2}", order.total),
            status: order.status.as_str(),
            badge: order.status.badge_color(),
            created_at: order.created_at.to_rfc3339(),
        }
    }
}

/// Paginated list of the buyer's past orders. Every page change re-fetches.
pub struct OrderHistoryView {
    backend: Arc<dyn OrderBackend>,
    metrics: Arc<Metrics>,
    page: u32,
    state: HistoryState,
}

impl OrderHistoryView {
    pub fn new(backend: Arc<dyn OrderBackend>, metrics: Arc<Metrics>) -> Self {
        Self {
            backend,
            metrics,
            page: 1,
            state: HistoryState::Loading,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn state(&self) -> &HistoryState {
        &self.state
    }

    /// Message shown instead of the table, if any.
    pub fn message(&self) -> Option<&'static str> {
        match self.state {
            HistoryState::Error => Some(ERROR_MESSAGE),
            HistoryState::Empty => Some(EMPTY_MESSAGE),
            _ => None,
        }
    }

    pub fn rows(&self) -> Vec<OrderRow> {
        match &self.state {
            HistoryState::Loaded { orders, .. } => orders.iter().map(OrderRow::from).collect(),
            _ => Vec::new(),
        }
    }

    pub async fn load_page(&mut self, page: u32) -> &HistoryState {
        let page = page.max(1);
        self.page = page;
        self.state = HistoryState::Loading;

        self.state = match self.backend.list_orders(page).await {
            Ok(response) if response.data.order.is_empty() => {
                self.metrics.history_fetches.with_label_values(&["empty"]).inc();
                tracing::debug!(page, "No orders on page");
                HistoryState::Empty
            }
            Ok(response) => {
                self.metrics.history_fetches.with_label_values(&["loaded"]).inc();
                tracing::debug!(page, orders = response.data.order.len(), "Order page loaded");
                HistoryState::Loaded {
                    orders: response.data.order,
                    page,
                    total_pages: response.data.pagination.total_pages.max(1),
                }
            }
            Err(e) => {
                self.metrics.history_fetches.with_label_values(&["error"]).inc();
                tracing::error!(page, error = %e, "Failed to load order history");
                HistoryState::Error
            }
        };

        &self.state
    }

    pub async fn change_page(&mut self, page: u32) -> &HistoryState {
        self.load_page(page).await
    }
}
