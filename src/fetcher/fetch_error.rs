use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },
    #[error("JSON parse error: {0}")]
    JsonParse(String),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
