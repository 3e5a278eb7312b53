// ============================================================================
// Backend Module - wire contract of the storefront API
// ============================================================================
//
// Request/response shapes the checkout and history code depend on, plus the
// error type every backend call returns. `http` holds the reqwest client.
//
// ============================================================================

mod http;

use serde::{Deserialize, Serialize};

use crate::domain::checkout::{PaymentMethod, PaymentMethodId, ShippingDetails};
use crate::domain::history::{Order, Pagination};

pub use http::HttpBackend;

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The backend answered with a non-2xx status.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl BackendError {
    /// Message suitable for showing to the buyer.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            BackendError::Decode(err.to_string())
        } else {
            BackendError::Transport(err.to_string())
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateOrderRequest {
    #[serde(rename = "paymentId")]
    pub payment_id: PaymentMethodId,
    pub receiver: String,
    pub receiver_phone: String,
    pub delivery_address: String,
}

impl CreateOrderRequest {
    pub fn new(payment_id: PaymentMethodId, details: &ShippingDetails) -> Self {
        Self {
            payment_id,
            receiver: details.full_name.clone(),
            receiver_phone: details.phone_number.clone(),
            delivery_address: details.address.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatedOrder {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderResponse {
    pub success: bool,
    pub data: Option<CreatedOrder>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CaptureOrderResponse {
    pub success: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentMethodsResponse {
    #[serde(default)]
    pub data: Vec<PaymentMethod>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderPage {
    #[serde(default)]
    pub order: Vec<Order>,
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListOrdersResponse {
    pub data: OrderPage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CartContents {
    #[serde(default)]
    pub items: Vec<CartItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CartResponse {
    #[serde(default)]
    pub data: CartContents,
}

/// Ids arrive as JSON strings or numbers depending on the endpoint.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

/// Error body the backend sends alongside non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Flatten `message`, which may be a string or a list of strings.
    pub(crate) fn into_message(self) -> Option<String> {
        match self.message? {
            serde_json::Value::String(s) => Some(s),
            serde_json::Value::Array(items) => {
                let parts: Vec<String> = items
                    .into_iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect();
                (!parts.is_empty()).then(|| parts.join(", "))
            }
            _ => None,
        }
    }
}
