//! Best-effort copy of each recorded donation to an external webhook
//! (typically a spreadsheet). Runs detached from the request; failures are
//! logged and otherwise ignored.

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::entities::donation;

pub const FORWARD_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardPayload {
    pub id: i64,
    pub amount: i64,
    pub numbers: Vec<i32>,
    pub method: String,
    pub donor_name: String,
    pub donor_phone: String,
    pub donor_address: String,
    pub created_at: DateTime<Utc>,
}

impl From<&donation::Model> for ForwardPayload {
    fn from(d: &donation::Model) -> Self {
        Self {
            id: d.id,
            amount: d.amount,
            numbers: d.number_list(),
            method: d.method.clone(),
            donor_name: d.donor_name.clone(),
            donor_phone: d.donor_phone.clone(),
            donor_address: d.donor_address.clone(),
            created_at: d.created_at,
        }
    }
}

/// Build the shared outbound client.
pub fn create_client() -> Client {
    Client::builder()
        .timeout(FORWARD_TIMEOUT)
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!("Failed to build HTTP client with timeout ({}), using defaults", e);
            Client::new()
        })
}

/// Spawn the POST and return immediately. Does nothing without a URL.
pub fn spawn_forward(client: &Client, url: Option<&str>, payload: ForwardPayload) {
    let Some(url) = url else {
        return;
    };

    let client = client.clone();
    let url = url.to_string();
    tokio::spawn(async move {
        if let Err(e) = send(&client, &url, &payload).await {
            tracing::warn!(donation_id = payload.id, "Forwarding donation failed: {}", e);
        }
    });
}

async fn send(
    client: &Client,
    url: &str,
    payload: &ForwardPayload,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let response = client.post(url).json(payload).send().await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read error body".to_string());
        return Err(format!("webhook responded with status {}: {}", status, body).into());
    }

    tracing::debug!(donation_id = payload.id, "Forwarded donation");
    Ok(())
}
