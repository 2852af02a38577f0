use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::traits::DispenserTransport;

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl DispenserTransport for HttpTransport {
    async fn send(&self, url: Url) -> Result<u16> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to send dispenser request")?;

        Ok(response.status().as_u16())
    }
}
