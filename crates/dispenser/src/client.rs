use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use pill_types::Reminder;
use tokio::task::JoinHandle;

use crate::config::DispenserConfig;
use crate::http::HttpTransport;
use crate::request::DispenserRequest;
use crate::traits::DispenserTransport;

#[derive(Clone)]
pub struct DispenserClient {
    transport: Arc<dyn DispenserTransport>,
    address: String,
    enabled: bool,
}

impl DispenserClient {
    pub fn new(config: &DispenserConfig) -> Result<Self> {
        let transport = HttpTransport::new(Duration::from_secs(config.timeout_secs))?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    pub fn with_transport(config: &DispenserConfig, transport: Arc<dyn DispenserTransport>) -> Self {
        Self {
            transport,
            address: config.address.clone(),
            enabled: config.enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Sends one update and returns the HTTP status.
    pub async fn send(&self, request: &DispenserRequest) -> Result<u16> {
        let url = request.url(&self.address)?;
        tracing::debug!("Dispenser request: {}", url);
        self.transport.send(url).await
    }

    /// Fire-and-forget update for a newly added reminder.
    ///
    /// Spawns a one-shot task on the current runtime. The outcome is only
    /// logged. Returns `None` when the dispenser is disabled.
    pub fn notify(&self, reminder: &Reminder) -> Option<JoinHandle<()>> {
        if !self.enabled {
            tracing::debug!("Dispenser disabled, skipping update for {}", reminder.name);
            return None;
        }

        let client = self.clone();
        let request = DispenserRequest::from_reminder(reminder);

        Some(tokio::spawn(async move {
            match client.send(&request).await {
                Ok(status) if (200..300).contains(&status) => {
                    tracing::info!("Dispenser accepted {} (status {})", request.name, status);
                }
                Ok(status) => {
                    tracing::warn!("Dispenser rejected {} (status {})", request.name, status);
                }
                Err(e) => {
                    tracing::error!("Error sending {} to dispenser: {:#}", request.name, e);
                }
            }
        }))
    }
}
