use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use super::{
    BackendError, CaptureOrderResponse, CartResponse, CreateOrderRequest, CreateOrderResponse,
    ErrorBody, ListOrdersResponse, PaymentMethodsResponse,
};
use crate::config::AppConfig;
use crate::ports::OrderBackend;

// ============================================================================
// HTTP Backend - reqwest client for the storefront API
// ============================================================================

pub struct HttpBackend {
    client: Client,
    base_url: String,
    api_token: Option<String>,
}

impl HttpBackend {
    pub fn new(config: &AppConfig) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .map_err(|e| BackendError::Transport(format!("failed to build client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.api_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, BackendError> {
        let response = self.authorized(builder).send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let body = response.text().await.unwrap_or_default();
        Err(api_error(status, &body))
    }
}

/// Turn a non-2xx response into an `Api` error carrying the backend's message.
fn api_error(status: StatusCode, body: &str) -> BackendError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(ErrorBody::into_message)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });

    tracing::debug!(status = status.as_u16(), message = %message, "Backend returned error status");

    BackendError::Api {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl OrderBackend for HttpBackend {
    async fn create_order(
        &self,
        request: CreateOrderRequest,
    ) -> Result<CreateOrderResponse, BackendError> {
        tracing::debug!(payment = request.payment_id.label(), "POST /orders");
        self.send(self.client.post(self.url("/orders")).json(&request))
            .await
    }

    async fn capture_order(
        &self,
        paypal_order_id: &str,
        order_id: &str,
    ) -> Result<CaptureOrderResponse, BackendError> {
        let path = format!(
            "/orders/{}/capture/{}",
            urlencoding::encode(paypal_order_id),
            urlencoding::encode(order_id)
        );
        tracing::debug!(paypal_order_id, order_id, "POST capture");
        self.send(self.client.post(self.url(&path))).await
    }

    async fn list_payment_methods(&self) -> Result<PaymentMethodsResponse, BackendError> {
        self.send(self.client.get(self.url("/payment-method"))).await
    }

    async fn list_orders(&self, page: u32) -> Result<ListOrdersResponse, BackendError> {
        self.send(
            self.client
                .get(self.url("/orders"))
                .query(&[("page", page)]),
        )
        .await
    }

    async fn fetch_cart(&self) -> Result<CartResponse, BackendError> {
        self.send(self.client.get(self.url("/cart"))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::checkout::{PaymentMethodId, ShippingDetails};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    fn config(url: &str) -> AppConfig {
        AppConfig {
            api_url: url.to_string(),
            ..AppConfig::default()
        }
    }

    /// Serve a single canned response on a local port and hand back the raw
    /// request the client sent.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut chunk = [0u8; 1024];

            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                raw.extend_from_slice(&chunk[..n]);
                let text = String::from_utf8_lossy(&raw).to_string();
                if let Some(end) = text.find("\r\n\r\n") {
                    let content_length = text[..end]
                        .lines()
                        .filter_map(|line| line.split_once(':'))
                        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if raw.len() >= end + 4 + content_length {
                        break;
                    }
                }
                if n == 0 {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\n\
                 Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();

            String::from_utf8_lossy(&raw).to_string()
        });

        (base_url, handle)
    }

    fn backend(base_url: &str, token: Option<&str>) -> HttpBackend {
        let config = AppConfig {
            api_url: base_url.to_string(),
            api_token: token.map(str::to_string),
            ..AppConfig::default()
        };
        HttpBackend::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_create_order_posts_json_with_bearer_token() {
        let (url, server) = serve_once("201 Created", r#"{"success":true,"data":{"id":42}}"#).await;
        let backend = backend(&url, Some("secret-token"));
        let details = ShippingDetails::new("Jane Doe", "1 Main St", "0123456789");

        let response = backend
            .create_order(CreateOrderRequest::new(PaymentMethodId::CashOnDelivery, &details))
            .await
            .unwrap();

        assert!(response.success);
        assert_eq!(response.data.unwrap().id, "42");

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /orders HTTP/1.1\r\n"));
        assert!(request
            .to_ascii_lowercase()
            .contains("authorization: bearer secret-token"));
        assert!(request.contains(r#""paymentId":1"#));
        assert!(request.contains(r#""receiver_phone":"0123456789""#));
    }

    #[tokio::test]
    async fn test_capture_order_path_carries_both_ids() {
        let (url, server) = serve_once("200 OK", r#"{"success":true}"#).await;
        let backend = backend(&url, None);

        let response = backend.capture_order("5O190127TN364715T", "42").await.unwrap();
        assert!(response.success);

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /orders/5O190127TN364715T/capture/42 HTTP/1.1\r\n"));
        assert!(!request.to_ascii_lowercase().contains("authorization:"));
    }

    #[tokio::test]
    async fn test_list_orders_sends_page_query() {
        let (url, server) = serve_once(
            "200 OK",
            r#"{"data":{"order":[],"pagination":{"totalPages":4}}}"#,
        )
        .await;
        let backend = backend(&url, None);

        let response = backend.list_orders(3).await.unwrap();
        assert!(response.data.order.is_empty());
        assert_eq!(response.data.pagination.total_pages, 4);

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /orders?page=3 HTTP/1.1\r\n"));
    }

    #[tokio::test]
    async fn test_error_status_maps_to_api_error() {
        let (url, server) = serve_once(
            "400 Bad Request",
            r#"{"statusCode":400,"message":"Cart is empty"}"#,
        )
        .await;
        let backend = backend(&url, None);

        let err = backend.fetch_cart().await.unwrap_err();
        assert!(matches!(err, BackendError::Api { status: 400, .. }));
        assert_eq!(err.message(), "Cart is empty");

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /cart HTTP/1.1\r\n"));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let backend = HttpBackend::new(&config("http://localhost:3000/api/")).unwrap();
        assert_eq!(backend.url("/orders"), "http://localhost:3000/api/orders");
    }

    #[test]
    fn test_api_error_uses_backend_message() {
        let err = api_error(
            StatusCode::BAD_REQUEST,
            r#"{"statusCode":400,"message":"Cart is empty"}"#,
        );
        assert!(matches!(err, BackendError::Api { status: 400, .. }));
        assert_eq!(err.message(), "Cart is empty");
    }

    #[test]
    fn test_api_error_falls_back_to_reason_phrase() {
        let err = api_error(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");
        assert_eq!(err.message(), "Bad Gateway");
    }
}
