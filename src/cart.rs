use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::backend::CartItem;
use crate::ports::{CartService, OrderBackend};

/// Buyer cart shared between checkout and any other view that shows it.
///
/// The server owns the cart; this holds the last snapshot fetched from it.
pub struct SharedCart<B: OrderBackend> {
    backend: Arc<B>,
    items: RwLock<Vec<CartItem>>,
}

impl<B: OrderBackend> SharedCart<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            items: RwLock::new(Vec::new()),
        }
    }

    pub async fn items(&self) -> Vec<CartItem> {
        self.items.read().await.clone()
    }
}

#[async_trait]
impl<B: OrderBackend> CartService for SharedCart<B> {
    async fn refresh_from_server(&self) -> anyhow::Result<()> {
        let response = self.backend.fetch_cart().await?;
        let count = response.data.items.len();
        *self.items.write().await = response.data.items;

        tracing::debug!(items = count, "Cart refreshed from server");
        Ok(())
    }

    async fn clear(&self) -> anyhow::Result<()> {
        self.items.write().await.clear();
        tracing::debug!("Cart cleared");
        Ok(())
    }
}
