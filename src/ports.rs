use async_trait::async_trait;

use crate::backend::{
    BackendError, CaptureOrderResponse, CartResponse, CreateOrderRequest, CreateOrderResponse,
    ListOrdersResponse, PaymentMethodsResponse,
};

// ============================================================================
// Collaborator Ports
// ============================================================================
//
// Everything outside this crate is reached through one of these traits:
// - OrderBackend: the storefront order/payment API
// - CartService:  the buyer's shared cart
// - Navigator:    moves the buyer to another view
// - Notifier:     transient, non-navigating messages
//
// ============================================================================

#[async_trait]
pub trait OrderBackend: Send + Sync + 'static {
    async fn create_order(
        &self,
        request: CreateOrderRequest,
    ) -> Result<CreateOrderResponse, BackendError>;

    async fn capture_order(
        &self,
        paypal_order_id: &str,
        order_id: &str,
    ) -> Result<CaptureOrderResponse, BackendError>;

    async fn list_payment_methods(&self) -> Result<PaymentMethodsResponse, BackendError>;

    async fn list_orders(&self, page: u32) -> Result<ListOrdersResponse, BackendError>;

    async fn fetch_cart(&self) -> Result<CartResponse, BackendError>;
}

/// Shared cart state. Mutated once per terminal checkout outcome.
#[async_trait]
pub trait CartService: Send + Sync {
    async fn refresh_from_server(&self) -> anyhow::Result<()>;

    async fn clear(&self) -> anyhow::Result<()>;
}

#[async_trait]
pub trait Navigator: Send + Sync {
    async fn go_to(&self, path: &str) -> anyhow::Result<()>;
}

pub trait Notifier: Send + Sync {
    fn error(&self, message: &str);
}
