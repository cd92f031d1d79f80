use anyhow::{Context, Result};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use super::geojson::FeatureCollection;
use crate::config::ServiceConfig;
use crate::domain::Feature;

const USER_AGENT: &str = concat!("tsunamizones/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("feature service error {code}: {message}")]
    Remote { code: i64, message: String },
    #[error("feature service returned error status: {0}")]
    Status(u16),
    #[error("feature service failed after {attempts} attempts: {last}")]
    RetriesExhausted { attempts: u32, last: String },
}

/// Build the `where` clause restricting the layer to the given counties
///
/// Single quotes inside county names are doubled. No counties selects all.
pub fn definition_expression(counties: &[String]) -> String {
    if counties.is_empty() {
        return "1=1".to_string();
    }

    let quoted: Vec<String> = counties
        .iter()
        .map(|c| format!("'{}'", c.replace('\'', "''")))
        .collect();

    format!("County in ({})", quoted.join(", "))
}

/// Query URL for the configured layer
pub fn query_url(config: &ServiceConfig) -> String {
    format!("{}/{}/query", config.url.trim_end_matches('/'), config.layer)
}

/// Turn the `error` member of an ArcGIS response into a `ServiceError`
///
/// The member may be an object with `code`, `message` and `details`, any of
/// which can be missing, null or oddly typed, or a bare string.
fn remote_error(error: &Value) -> ServiceError {
    if let Some(message) = error.as_str() {
        return ServiceError::Remote {
            code: 0,
            message: message.to_string(),
        };
    }

    let code = match error.get("code") {
        Some(Value::Number(n)) => n.as_i64().unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    };
    let message = error
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("Unknown error")
        .to_string();
    let details: Vec<&str> = error
        .get("details")
        .and_then(Value::as_array)
        .map(|d| d.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    let message = if details.is_empty() {
        message
    } else {
        format!("{} ({})", message, details.join("; "))
    };

    ServiceError::Remote { code, message }
}

/// Decode a query response body into a feature collection
///
/// Any body carrying an `error` member is a failure, and a body without a
/// `features` array is rejected rather than read as an empty batch.
fn parse_query_response(body: &str) -> Result<FeatureCollection> {
    let value: Value =
        serde_json::from_str(body).context("Failed to parse feature service response")?;

    if let Some(error) = value.get("error") {
        return Err(remote_error(error).into());
    }

    serde_json::from_value(value).context("Feature service response is not a feature collection")
}

/// Fetch every hazard zone matching the configured counties
///
/// The layer is queried once; the result is used as a single batch. When the
/// service truncates the result a warning is printed and the partial set is
/// returned.
pub fn fetch_zones(config: &ServiceConfig) -> Result<Vec<Feature>> {
    let where_clause = definition_expression(&config.counties);
    let collection = execute_query(config, &where_clause)?;

    if collection.exceeded_transfer_limit() {
        eprintln!(
            "Warning: feature service truncated the result at {} features",
            collection.features.len()
        );
    }

    Ok(collection.into_features())
}

/// Execute a layer query with retry logic for overload responses
fn execute_query(config: &ServiceConfig, where_clause: &str) -> Result<FeatureCollection> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .context("Failed to create HTTP client")?;

    let url = query_url(config);
    let max_retries = config.max_retries.max(1);
    let mut last_error = None;

    for attempt in 0..max_retries {
        if attempt > 0 {
            let wait_secs = config.retry_delay_secs * attempt as u64;
            eprintln!(
                "Feature service busy, retrying in {} seconds (attempt {}/{})",
                wait_secs,
                attempt + 1,
                max_retries
            );
            std::thread::sleep(Duration::from_secs(wait_secs));
        }

        let response = client
            .get(&url)
            .query(&[
                ("where", where_clause),
                ("outFields", "*"),
                ("returnGeometry", "true"),
                ("outSR", "4326"),
                ("f", "geojson"),
            ])
            .send()
            .context("Failed to send request to feature service")?;

        match response.status().as_u16() {
            200 => {
                let body = response
                    .text()
                    .context("Failed to read feature service response")?;
                return parse_query_response(&body);
            }
            429 | 502 | 503 | 504 => {
                last_error = Some(format!(
                    "status {} (attempt {})",
                    response.status(),
                    attempt + 1
                ));
                continue;
            }
            status => return Err(ServiceError::Status(status).into()),
        }
    }

    Err(ServiceError::RetriesExhausted {
        attempts: max_retries,
        last: last_error.unwrap_or_else(|| "Unknown error".to_string()),
    }
    .into())
}
