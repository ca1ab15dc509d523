use tracing::{info, warn};

use sitewatch_common::Alert;

use super::backend::AlertBackend;

/// Wraps the configured backend and reduces every delivery outcome to a
/// boolean. Transport failures are logged, never propagated, never
/// retried; a missing backend is an expected condition, not an error.
pub struct AlertRouter {
    backend: Option<Box<dyn AlertBackend>>,
}

impl AlertRouter {
    pub fn new(backend: Option<Box<dyn AlertBackend>>) -> Self {
        Self { backend }
    }

    /// True when a delivery backend is configured.
    pub fn is_configured(&self) -> bool {
        self.backend.is_some()
    }

    /// Deliver `alert`, returning whether it was sent.
    pub async fn deliver(&self, alert: &Alert) -> bool {
        let backend = match &self.backend {
            Some(backend) => backend,
            None => {
                info!("Email not configured, skipping delivery");
                return false;
            }
        };

        match backend.send(alert).await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, headline = alert.headline.as_str(), "Failed to deliver alert");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;

    struct FailingBackend;

    #[async_trait]
    impl AlertBackend for FailingBackend {
        async fn send(&self, _alert: &Alert) -> anyhow::Result<()> {
            anyhow::bail!("connection reset")
        }
    }

    fn alert() -> Alert {
        Alert {
            headline: "Breaking: Raised $10M".to_string(),
            detail: "Matched keywords: breaking, raised".to_string(),
        }
    }

    #[tokio::test]
    async fn test_unconfigured_router_reports_not_sent() {
        let router = AlertRouter::new(None);
        assert!(!router.is_configured());
        assert!(!router.deliver(&alert()).await);
    }

    #[tokio::test]
    async fn test_transport_failure_is_absorbed() {
        let router = AlertRouter::new(Some(Box::new(FailingBackend)));
        assert!(!router.deliver(&alert()).await);
    }

    #[tokio::test]
    async fn test_noop_backend_counts_as_sent() {
        let router = AlertRouter::new(Some(Box::new(super::super::noop::NoopBackend)));
        assert!(router.deliver(&alert()).await);
    }
}
