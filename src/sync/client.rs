//! Second-brain API client

use reqwest::Client;
use serde_json::Value;

use super::{RemoteRecord, SyncError};

/// Build the `/brain` endpoint for a base URL
pub fn brain_endpoint(api_url: &str) -> String {
    format!("{}/brain", api_url.trim_end_matches('/'))
}

fn user_agent() -> &'static str {
    concat!("folio/", env!("CARGO_PKG_VERSION"))
}

/// Fetch every record from `GET {api_url}/brain`.
///
/// A non-2xx status or a body that is not a JSON array is an error. Array
/// entries that are not objects are skipped with a warning.
pub async fn fetch_records(api_url: &str) -> Result<Vec<RemoteRecord>, SyncError> {
    let endpoint = brain_endpoint(api_url);
    tracing::info!("Fetching {}", endpoint);

    let client = Client::builder().user_agent(user_agent()).build()?;
    let response = client.get(&endpoint).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(SyncError::Status { status });
    }

    let text = response.text().await?;
    let data: Value = serde_json::from_str(&text)
        .map_err(|e| SyncError::InvalidPayload(format!("response is not JSON: {}", e)))?;
    let Value::Array(items) = data else {
        return Err(SyncError::InvalidPayload(
            "expected an array from /brain".to_string(),
        ));
    };

    let mut records = Vec::with_capacity(items.len());
    for item in items {
        match serde_json::from_value::<RemoteRecord>(item) {
            Ok(record) => records.push(record),
            Err(e) => tracing::warn!("Skipping malformed record: {}", e),
        }
    }

    Ok(records)
}
