//! VIES registry client for VAT number verification.
//!
//! Talks to the EU's VAT Information Exchange System over its REST
//! interface: a single `POST /check-vat-number` per verification, no
//! retries. The caller decides what a transport or registry failure means;
//! the evaluation hooks treat every failure as "not a valid VATIN".

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use vatrc_core::Vatin;

use crate::config::ViesConfig;

/// Errors that can occur when querying the VIES registry.
#[derive(Debug, Error)]
pub enum ViesError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Registry returned an error response.
    #[error("VIES error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Registry reported itself or a member state unavailable.
    #[error("VIES unavailable: {0}")]
    Unavailable(String),

    /// Failed to parse the response body.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result of a registry check.
#[derive(Debug, Clone)]
pub struct ViesCheck {
    /// Whether the registry considers the number valid.
    pub valid: bool,
    /// Trader name, when the member state discloses it.
    pub name: Option<String>,
    /// Trader address, when the member state discloses it.
    pub address: Option<String>,
    /// Registry-side timestamp of the check.
    pub request_date: Option<DateTime<FixedOffset>>,
}

/// Client for the VIES `check-vat-number` endpoint.
#[derive(Debug, Clone)]
pub struct ViesClient {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckVatRequest<'a> {
    country_code: &'a str,
    vat_number: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckVatResponse {
    #[serde(default)]
    valid: bool,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    request_date: Option<String>,
    #[serde(default)]
    user_error: Option<String>,
    #[serde(default)]
    error_wrappers: Vec<ErrorWrapper>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorWrapper {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl ViesClient {
    /// Create a new VIES client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &ViesConfig) -> Result<Self, ViesError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_owned(),
        })
    }

    /// Check a VATIN against the registry.
    ///
    /// VIES expects the registration prefix as the country code, so `EL`
    /// and `XI` are sent untranslated.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails, the registry answers with a
    /// non-success status or an error payload, or the body cannot be
    /// parsed.
    pub async fn check(&self, vatin: &Vatin) -> Result<ViesCheck, ViesError> {
        let url = format!("{}/check-vat-number", self.endpoint);
        let body = CheckVatRequest {
            country_code: vatin.prefix(),
            vat_number: vatin.number(),
        };

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ViesError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let response: CheckVatResponse = response
            .json()
            .await
            .map_err(|e| ViesError::Parse(e.to_string()))?;

        debug!(vatin = %vatin, response = ?response, "Got response from VIES");

        if let Some(error) = first_error(&response) {
            return Err(ViesError::Unavailable(error));
        }

        let request_date = response
            .request_date
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok());

        Ok(ViesCheck {
            valid: response.valid,
            name: none_if_unavailable(response.name),
            address: none_if_unavailable(response.address),
            request_date,
        })
    }
}

/// Extract the first registry-side error from a response, if any.
fn first_error(response: &CheckVatResponse) -> Option<String> {
    if let Some(user_error) = response.user_error.as_deref()
        && user_error != "VALID"
        && user_error != "INVALID"
    {
        return Some(user_error.to_owned());
    }
    response.error_wrappers.iter().find_map(|wrapper| {
        wrapper
            .error
            .clone()
            .or_else(|| wrapper.message.clone())
    })
}

/// Member states that withhold trader details answer with "---".
fn none_if_unavailable(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty() && v != "---")
}
