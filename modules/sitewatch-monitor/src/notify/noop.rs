use async_trait::async_trait;

use sitewatch_common::Alert;

use super::backend::AlertBackend;

/// No-op notification backend for testing.
pub struct NoopBackend;

#[async_trait]
impl AlertBackend for NoopBackend {
    async fn send(&self, _alert: &Alert) -> anyhow::Result<()> {
        Ok(())
    }
}
