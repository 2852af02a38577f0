use anyhow::Result;
use async_trait::async_trait;
use reqwest::Url;

/// Delivers one request to the device and reports the HTTP status
#[async_trait]
pub trait DispenserTransport: Send + Sync {
    async fn send(&self, url: Url) -> Result<u16>;
}
