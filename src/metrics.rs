use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

// ============================================================================
// Metrics Module - Prometheus counters for checkout and order history
// ============================================================================
//
// Tracks:
// - Order creation per payment path (and failures)
// - PayPal create calls answered from the cached pending order
// - Capture outcomes
// - Payment method listing failures (silently degraded for the buyer)
// - Order history fetches
//
// ============================================================================

pub struct Metrics {
    registry: Registry,

    pub orders_created: IntCounterVec,
    pub order_create_failures: IntCounterVec,
    pub paypal_create_reused: IntCounter,
    pub captures: IntCounterVec,
    pub payment_methods_fetch_failures: IntCounter,
    pub history_fetches: IntCounterVec,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let orders_created = IntCounterVec::new(
            Opts::new("orders_created_total", "Orders created by the backend"),
            &["payment"],
        )?;
        registry.register(Box::new(orders_created.clone()))?;

        let order_create_failures = IntCounterVec::new(
            Opts::new("order_create_failures_total", "Order-create calls that failed"),
            &["payment"],
        )?;
        registry.register(Box::new(order_create_failures.clone()))?;

        let paypal_create_reused = IntCounter::with_opts(Opts::new(
            "paypal_create_reused_total",
            "PayPal create calls answered from the cached pending order",
        ))?;
        registry.register(Box::new(paypal_create_reused.clone()))?;

        let captures = IntCounterVec::new(
            Opts::new("captures_total", "PayPal capture attempts"),
            &["outcome"],
        )?;
        registry.register(Box::new(captures.clone()))?;

        let payment_methods_fetch_failures = IntCounter::with_opts(Opts::new(
            "payment_methods_fetch_failures_total",
            "Failed payment method listings",
        ))?;
        registry.register(Box::new(payment_methods_fetch_failures.clone()))?;

        let history_fetches = IntCounterVec::new(
            Opts::new("history_fetch_total", "Order history page fetches"),
            &["outcome"],
        )?;
        registry.register(Box::new(history_fetches.clone()))?;

        Ok(Self {
            registry,
            orders_created,
            order_create_failures,
            paypal_create_reused,
            captures,
            payment_methods_fetch_failures,
            history_fetches,
        })
    }

    /// Text exposition of every registered metric.
    pub fn render(&self) -> anyhow::Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
