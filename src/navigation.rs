use std::sync::Mutex;

use async_trait::async_trait;

use crate::config::CheckoutConfig;
use crate::ports::{Navigator, Notifier};

/// Terminal view a checkout session ends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Success,
    Failed { message: String },
}

impl Destination {
    pub fn failed(message: impl Into<String>) -> Self {
        Destination::Failed {
            message: message.into(),
        }
    }

    /// Path for this destination; the failure message travels URL-encoded.
    pub fn path(&self, config: &CheckoutConfig) -> String {
        match self {
            Destination::Success => config.success_path.clone(),
            Destination::Failed { message } => format!(
                "{}?message={}",
                config.failed_path,
                urlencoding::encode(message)
            ),
        }
    }
}

/// Navigator for headless runs: logs and remembers every path it was sent to.
#[derive(Default)]
pub struct LoggingNavigator {
    history: Mutex<Vec<String>>,
}

impl LoggingNavigator {
    pub fn last(&self) -> Option<String> {
        self.history.lock().ok().and_then(|h| h.last().cloned())
    }
}

#[async_trait]
impl Navigator for LoggingNavigator {
    async fn go_to(&self, path: &str) -> anyhow::Result<()> {
        tracing::info!(path, "Navigating");
        self.history
            .lock()
            .map_err(|_| anyhow::anyhow!("navigation history poisoned"))?
            .push(path.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct LoggingNotifier;

impl Notifier for LoggingNotifier {
    fn error(&self, message: &str) {
        tracing::warn!(message, "Buyer notification");
    }
}
