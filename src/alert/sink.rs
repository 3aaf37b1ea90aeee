use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::alert::message::AlertMessage;
use crate::error::DriftError;

/// One delivery attempt. Retrying is the dispatcher's job.
#[async_trait]
pub trait AlertSink: Send + Sync {
    async fn send(&self, message: &AlertMessage) -> Result<(), DriftError>;
}

pub struct WebhookSink {
    client: Client,
    url: String,
}

impl WebhookSink {
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, DriftError> {
        let mut builder =
            Client::builder().user_agent(concat!("driftdune/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            url: url.into(),
        })
    }
}

#[async_trait]
impl AlertSink for WebhookSink {
    async fn send(&self, message: &AlertMessage) -> Result<(), DriftError> {
        self.client
            .post(&self.url)
            .json(message)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
