// In-memory collaborators for unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;

use crate::backend::{
    BackendError, CaptureOrderResponse, CartContents, CartItem, CartResponse, CreateOrderRequest,
    CreateOrderResponse, CreatedOrder, ListOrdersResponse, OrderPage, PaymentMethodsResponse,
};
use crate::domain::checkout::{PaymentMethod, PaymentMethodId, ShippingDetails};
use crate::domain::history::{Order, OrderStatus, Pagination};
use crate::ports::{CartService, Navigator, Notifier, OrderBackend};

pub const PAYPAL_ID: &str = "5O190127TN364715T";
pub const ORDER_ID: &str = "42";

pub fn valid_details() -> ShippingDetails {
    ShippingDetails::new("Jane Doe", "1 Main St", "0123456789")
}

pub fn api_error(message: &str) -> BackendError {
    BackendError::Api {
        status: 400,
        message: message.to_string(),
    }
}

pub fn created(id: &str) -> CreateOrderResponse {
    CreateOrderResponse {
        success: true,
        data: Some(CreatedOrder { id: id.to_string() }),
    }
}

pub fn order(id: &str, status: OrderStatus) -> Order {
    Order {
        id: id.to_string(),
        receiver: "Jane Doe".to_string(),
        receiver_phone: "0123456789".to_string(),
        delivery_address: "1 Main St".to_string(),
        sub_total: Decimal::new(1950, 2),
        total: Decimal::new(2450, 2),
        status,
        created_at: Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap(),
    }
}

#[derive(Default)]
struct BackendState {
    create_requests: Vec<CreateOrderRequest>,
    create_responses: VecDeque<Result<CreateOrderResponse, BackendError>>,
    capture_requests: Vec<(String, String)>,
    capture_responses: VecDeque<Result<CaptureOrderResponse, BackendError>>,
    payment_methods: Vec<PaymentMethod>,
    fail_payment_methods: bool,
    pages: HashMap<u32, Vec<Order>>,
    total_pages: u32,
    fail_orders: bool,
    order_requests: Vec<u32>,
    cart: Vec<CartItem>,
    fail_cart: bool,
}

/// Scriptable `OrderBackend`. Unscripted calls succeed.
pub struct FakeBackend {
    state: Mutex<BackendState>,
    create_delay: Option<Duration>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeBackend {
    pub fn new() -> Self {
        let state = BackendState {
            payment_methods: vec![
                PaymentMethod {
                    id: PaymentMethodId::CashOnDelivery,
                    status: "active".to_string(),
                },
                PaymentMethod {
                    id: PaymentMethodId::Paypal,
                    status: "active".to_string(),
                },
            ],
            total_pages: 1,
            ..BackendState::default()
        };

        Self {
            state: Mutex::new(state),
            create_delay: None,
        }
    }

    pub fn with_create_delay(mut self, delay: Duration) -> Self {
        self.create_delay = Some(delay);
        self
    }

    pub fn push_create(&self, response: Result<CreateOrderResponse, BackendError>) {
        self.state.lock().unwrap().create_responses.push_back(response);
    }

    pub fn push_capture(&self, response: Result<CaptureOrderResponse, BackendError>) {
        self.state.lock().unwrap().capture_responses.push_back(response);
    }

    pub fn set_payment_methods(&self, methods: Vec<PaymentMethod>) {
        self.state.lock().unwrap().payment_methods = methods;
    }

    pub fn fail_payment_methods(&self, fail: bool) {
        self.state.lock().unwrap().fail_payment_methods = fail;
    }

    pub fn set_page(&self, page: u32, orders: Vec<Order>) {
        self.state.lock().unwrap().pages.insert(page, orders);
    }

    pub fn set_total_pages(&self, total: u32) {
        self.state.lock().unwrap().total_pages = total;
    }

    pub fn fail_orders(&self, fail: bool) {
        self.state.lock().unwrap().fail_orders = fail;
    }

    pub fn set_cart(&self, items: Vec<CartItem>) {
        self.state.lock().unwrap().cart = items;
    }

    pub fn fail_cart(&self, fail: bool) {
        self.state.lock().unwrap().fail_cart = fail;
    }

    pub fn create_requests(&self) -> Vec<CreateOrderRequest> {
        self.state.lock().unwrap().create_requests.clone()
    }

    pub fn capture_requests(&self) -> Vec<(String, String)> {
        self.state.lock().unwrap().capture_requests.clone()
    }

    pub fn order_requests(&self) -> Vec<u32> {
        self.state.lock().unwrap().order_requests.clone()
    }
}

#[async_trait]
impl OrderBackend for FakeBackend {
    async fn create_order(
        &self,
        request: CreateOrderRequest,
    ) -> Result<CreateOrderResponse, BackendError> {
        let payment_id = request.payment_id;
        let scripted = {
            let mut state = self.state.lock().unwrap();
            state.create_requests.push(request);
            state.create_responses.pop_front()
        };

        if let Some(delay) = self.create_delay {
            tokio::time::sleep(delay).await;
        }

        scripted.unwrap_or_else(|| match payment_id {
            PaymentMethodId::Paypal => Ok(created(&format!("{PAYPAL_ID}-{ORDER_ID}"))),
            _ => Ok(created(ORDER_ID)),
        })
    }

    async fn capture_order(
        &self,
        paypal_order_id: &str,
        order_id: &str,
    ) -> Result<CaptureOrderResponse, BackendError> {
        let mut state = self.state.lock().unwrap();
        state
            .capture_requests
            .push((paypal_order_id.to_string(), order_id.to_string()));
        state
            .capture_responses
            .pop_front()
            .unwrap_or(Ok(CaptureOrderResponse { success: true }))
    }

    async fn list_payment_methods(&self) -> Result<PaymentMethodsResponse, BackendError> {
        let state = self.state.lock().unwrap();
        if state.fail_payment_methods {
            return Err(BackendError::Transport("connection refused".to_string()));
        }
        Ok(PaymentMethodsResponse {
            data: state.payment_methods.clone(),
        })
    }

    async fn list_orders(&self, page: u32) -> Result<ListOrdersResponse, BackendError> {
        let mut state = self.state.lock().unwrap();
        state.order_requests.push(page);
        if state.fail_orders {
            return Err(api_error("Internal server error"));
        }
        Ok(ListOrdersResponse {
            data: OrderPage {
                order: state.pages.get(&page).cloned().unwrap_or_default(),
                pagination: Pagination {
                    total_pages: state.total_pages,
                },
            },
        })
    }

    async fn fetch_cart(&self) -> Result<CartResponse, BackendError> {
        let state = self.state.lock().unwrap();
        if state.fail_cart {
            return Err(BackendError::Transport("connection reset".to_string()));
        }
        Ok(CartResponse {
            data: CartContents {
                items: state.cart.clone(),
            },
        })
    }
}

#[derive(Default)]
pub struct FakeCart {
    refreshes: AtomicUsize,
    clears: AtomicUsize,
}

impl FakeCart {
    pub fn refreshes(&self) -> usize {
        self.refreshes.load(Ordering::SeqCst)
    }

    pub fn clears(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CartService for FakeCart {
    async fn refresh_from_server(&self) -> anyhow::Result<()> {
        self.refreshes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn clear(&self) -> anyhow::Result<()> {
        self.clears.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeNavigator {
    paths: Mutex<Vec<String>>,
}

impl FakeNavigator {
    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

#[async_trait]
impl Navigator for FakeNavigator {
    async fn go_to(&self, path: &str) -> anyhow::Result<()> {
        self.paths.lock().unwrap().push(path.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeNotifier {
    messages: Mutex<Vec<String>>,
}

impl FakeNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for FakeNotifier {
    fn error(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}
