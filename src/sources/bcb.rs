use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, info};

use super::RateSource;
use crate::error::CalcError;
use crate::series::RawRateRecord;

/// BCB SGS endpoint for series 11 (daily Selic rate)
pub const DEFAULT_BCB_URL: &str = "https://api.bcb.gov.br/dados/serie/bcdata.sgs.11/dados";

/// Error body the SGS API returns for bad queries
#[derive(Debug, Deserialize)]
struct BcbErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Blocking client for the BCB SGS API. One request, no retry.
#[derive(Debug, Clone)]
pub struct BcbClient {
    client: Client,
    base_url: String,
}

impl BcbClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (compatible; SelicCalc/1.0)")
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full request URL for a `dd/mm/yyyy` range
    pub fn request_url(&self, start_param: &str, end_param: &str) -> String {
        format!(
            "{}?formato=json&dataInicial={}&dataFinal={}",
            self.base_url, start_param, end_param
        )
    }
}

impl RateSource for BcbClient {
    fn fetch(&self, start_param: &str, end_param: &str) -> Result<Vec<RawRateRecord>> {
        let url = self.request_url(start_param, end_param);
        info!("Fetching Selic rates from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| CalcError::Fetch(e.to_string()))
            .context("Failed to send request to BCB")?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| CalcError::Fetch(e.to_string()))
            .context("Failed to read BCB response body")?;

        if !status.is_success() {
            let detail = serde_json::from_str::<BcbErrorBody>(&body)
                .ok()
                .and_then(|b| b.message.or(b.error))
                .unwrap_or_else(|| body.chars().take(200).collect());
            return Err(CalcError::Fetch(format!("BCB returned {}: {}", status, detail)).into());
        }

        let rows = parse_response(&body)?;
        debug!("BCB returned {} rows", rows.len());
        Ok(rows)
    }
}

/// Decode the SGS JSON array of `{"data", "valor"}` objects.
pub fn parse_response(body: &str) -> Result<Vec<RawRateRecord>> {
    serde_json::from_str(body)
        .map_err(|e| CalcError::MalformedSeries(e.to_string()))
        .context("Failed to parse BCB response")
}
