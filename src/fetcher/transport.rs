// transport.rs
use crate::fetcher::FetchError;
use reqwest::blocking::Client;
use serde_json::Value;
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = concat!("niger-portal/", env!("CARGO_PKG_VERSION"));

/// One blocking GET returning parsed JSON.
pub trait Transport: Send + Sync {
    fn get_json(&self, url: &str, params: &[(String, String)]) -> Result<Value, FetchError>;
}

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get_json(&self, url: &str, params: &[(String, String)]) -> Result<Value, FetchError> {
        let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))?;

        let resp = self
            .client
            .get(parsed)
            .query(params)
            .send()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let text = resp
            .text()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        serde_json::from_str(&text).map_err(|e| FetchError::JsonParse(e.to_string()))
    }
}
