use std::env;
use std::sync::Arc;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use storefront_checkout::{
    AppConfig, CheckoutDeps, CheckoutOrchestrator, HistoryState, HttpBackend, LoggingNavigator,
    LoggingNotifier, Metrics, OrderHistoryView, PaypalButtons, SharedCart, ShippingField,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG overrides the default filter, e.g. RUST_LOG=debug
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,storefront_checkout=debug")),
        )
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!(api_url = %config.api_url, "Starting storefront checkout");

    let backend = Arc::new(HttpBackend::new(&config)?);
    let metrics = Arc::new(Metrics::new()?);
    let cart = Arc::new(SharedCart::new(backend.clone()));
    let navigator = Arc::new(LoggingNavigator::default());

    // === 1. Checkout ===
    let deps = CheckoutDeps {
        backend: backend.clone(),
        cart: cart.clone(),
        navigator: navigator.clone(),
        notifier: Arc::new(LoggingNotifier),
        metrics: metrics.clone(),
    };
    let checkout = Arc::new(CheckoutOrchestrator::mount(deps, config.checkout.clone()).await);

    checkout
        .set_field(ShippingField::FullName, env::var("CHECKOUT_FULL_NAME").unwrap_or_default())
        .await;
    checkout
        .set_field(ShippingField::Address, env::var("CHECKOUT_ADDRESS").unwrap_or_default())
        .await;
    checkout
        .set_field(ShippingField::PhoneNumber, env::var("CHECKOUT_PHONE").unwrap_or_default())
        .await;

    let form = checkout.form().await;
    for result in form.report().errors() {
        tracing::warn!(field = result.field.name(), error = result.error, "Invalid shipping field");
    }

    let payment = env::var("CHECKOUT_PAYMENT").unwrap_or_else(|_| "cod".to_string());
    if payment == "paypal" {
        let buttons = PaypalButtons::new(checkout.clone(), config.checkout.paypal.clone());
        tracing::info!(script_url = %buttons.script_url(), "Loading PayPal buttons");
        if buttons.on_click().await {
            let paypal_order_id = buttons.create_order().await;
            if !paypal_order_id.is_empty() {
                tracing::info!(paypal_order_id = %paypal_order_id, "Approve the order in PayPal, then capture");
                buttons.on_approve(&paypal_order_id).await;
            }
        }
    } else {
        match checkout.submit_cash_on_delivery().await {
            Ok(outcome) => tracing::info!(?outcome, "Checkout finished"),
            Err(e) => tracing::warn!(error = %e, "Checkout not submitted"),
        }
    }

    let state = checkout.state().await;
    let cart_items = cart.items().await.len();
    tracing::info!(
        state = ?state,
        last_path = ?navigator.last(),
        cart_items,
        "Checkout session state"
    );

    // === 2. Order history ===
    let mut history = OrderHistoryView::new(backend, metrics.clone());
    history.load_page(1).await;
    match history.state() {
        HistoryState::Loaded { total_pages, .. } => {
            for row in history.rows() {
                tracing::info!(
                    id = %row.id,
                    status = row.status,
                    badge = ?row.badge,
                    total = %row.total,
                    "Order"
                );
            }
            tracing::info!(total_pages, "Order history loaded");
        }
        _ => tracing::info!(message = ?history.message(), "Order history"),
    }

    tracing::debug!(metrics = %metrics.render()?, "Metrics snapshot");
    Ok(())
}
