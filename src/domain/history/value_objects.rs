use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::backend::string_or_number;

// ============================================================================
// Order History Value Objects
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", from = "String")]
pub enum OrderStatus {
    Unpaid,
    Pending,
    Confirmed,
    Shipping,
    Delivered,
    Cancelled,
    Failed,
    Unknown,
}

impl From<String> for OrderStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "UNPAID" => OrderStatus::Unpaid,
            "PENDING" => OrderStatus::Pending,
            "CONFIRMED" => OrderStatus::Confirmed,
            "SHIPPING" => OrderStatus::Shipping,
            "DELIVERED" => OrderStatus::Delivered,
            "CANCELLED" => OrderStatus::Cancelled,
            "FAILED" => OrderStatus::Failed,
            _ => OrderStatus::Unknown,
        }
    }
}

/// Badge color shown next to an order's status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeColor {
    Default,
    Primary,
    Info,
    Success,
    Warning,
    Error,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Unpaid => "UNPAID",
            OrderStatus::Pending => "PENDING",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Shipping => "SHIPPING",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
            OrderStatus::Failed => "FAILED",
            OrderStatus::Unknown => "UNKNOWN",
        }
    }

    pub fn badge_color(&self) -> BadgeColor {
        match self {
            OrderStatus::Pending => BadgeColor::Warning,
            OrderStatus::Unpaid => BadgeColor::Default,
            OrderStatus::Confirmed => BadgeColor::Info,
            OrderStatus::Shipping => BadgeColor::Primary,
            OrderStatus::Delivered => BadgeColor::Success,
            OrderStatus::Cancelled | OrderStatus::Failed => BadgeColor::Error,
            OrderStatus::Unknown => BadgeColor::Default,
        }
    }
}

/// A past order as the backend reports it. Read-only on this side.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Order {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub receiver: String,
    pub receiver_phone: String,
    pub delivery_address: String,
    #[serde(rename = "subTotal")]
    pub sub_total: Decimal,
    pub total: Decimal,
    pub status: OrderStatus,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Pagination {
    #[serde(rename = "totalPages", default)]
    pub total_pages: u32,
}
