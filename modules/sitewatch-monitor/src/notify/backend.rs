use async_trait::async_trait;

use sitewatch_common::Alert;

/// Pluggable notification backend.
#[async_trait]
pub trait AlertBackend: Send + Sync {
    /// Deliver a single alert.
    async fn send(&self, alert: &Alert) -> anyhow::Result<()>;
}
