use std::env;

// ============================================================================
// Configuration
// ============================================================================
//
// Read from the process environment, with a `.env` file loaded first when
// present. Only the API base URL is required.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_url: String,
    pub api_token: Option<String>,
    pub http_timeout_secs: u64,
    pub checkout: CheckoutConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3000".to_string(),
            api_token: None,
            http_timeout_secs: 30,
            checkout: CheckoutConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        if dotenv::dotenv().is_ok() {
            tracing::debug!("Loaded .env file");
        }

        let defaults = Self::default();
        let api_url = env::var("STOREFRONT_API_URL")
            .map_err(|_| ConfigError::Missing("STOREFRONT_API_URL"))?;

        let http_timeout_secs = match env::var("STOREFRONT_HTTP_TIMEOUT_SECS") {
            Ok(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "STOREFRONT_HTTP_TIMEOUT_SECS",
                value,
            })?,
            Err(_) => defaults.http_timeout_secs,
        };

        let mut checkout = CheckoutConfig::default();
        if let Ok(path) = env::var("STOREFRONT_SUCCESS_PATH") {
            checkout.success_path = path;
        }
        if let Ok(path) = env::var("STOREFRONT_FAILED_PATH") {
            checkout.failed_path = path;
        }
        checkout.paypal.client_id = env::var("PAYPAL_CLIENT_ID").unwrap_or_default();

        Ok(Self {
            api_url,
            api_token: env::var("STOREFRONT_API_TOKEN").ok().filter(|t| !t.is_empty()),
            http_timeout_secs,
            checkout,
        })
    }
}

/// Where checkout sends the buyer, and how the PayPal buttons are set up.
#[derive(Debug, Clone)]
pub struct CheckoutConfig {
    pub success_path: String,
    pub failed_path: String,
    pub paypal: PaypalOptions,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            success_path: "/success".to_string(),
            failed_path: "/failed".to_string(),
            paypal: PaypalOptions::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaypalEnvironment {
    Sandbox,
    Production,
}

impl PaypalEnvironment {
    fn sdk_base(&self) -> &'static str {
        match self {
            PaypalEnvironment::Sandbox => "https://www.sandbox.paypal.com/sdk/js",
            PaypalEnvironment::Production => "https://www.paypal.com/sdk/js",
        }
    }
}

#[derive(Debug, Clone)]
pub struct PaypalOptions {
    pub client_id: String,
    pub currency: String,
    pub buyer_country: String,
    pub locale: String,
    pub disable_funding: Vec<String>,
    pub environment: PaypalEnvironment,
}

impl Default for PaypalOptions {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            currency: "USD".to_string(),
            buyer_country: "US".to_string(),
            locale: "en_GB".to_string(),
            disable_funding: vec!["paylater".to_string(), "card".to_string()],
            environment: PaypalEnvironment::Sandbox,
        }
    }
}

impl PaypalOptions {
    /// SDK loader URL the buttons are rendered from.
    pub fn script_url(&self) -> String {
        let params = [
            ("client-id", self.client_id.clone()),
            ("components", "buttons".to_string()),
            ("currency", self.currency.clone()),
            ("buyer-country", self.buyer_country.clone()),
            ("locale", self.locale.clone()),
            ("disable-funding", self.disable_funding.join(",")),
        ];

        let query = params
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", self.environment.sdk_base(), query)
    }
}
