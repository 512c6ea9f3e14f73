use std::error;
use std::fmt;
use std::sync::Arc;

use weather_info::provider::ProviderError;

pub mod client;

#[derive(Debug, Clone)]
pub enum ApiError {
    RequestError(Arc<reqwest::Error>),
    JsonError(Arc<serde_json::Error>),
    /// Non-success status. `endpoint` never contains the api key.
    InvalidResponse {
        status_code: reqwest::StatusCode,
        endpoint: String,
        response: Option<String>,
    },
}

impl error::Error for ApiError {}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ApiError::RequestError(e) => write!(f, "HTTP request error: {}", e),
            ApiError::JsonError(e) => write!(f, "JSON parse error: {}", e),
            ApiError::InvalidResponse {
                status_code,
                endpoint,
                response,
            } => match response {
                Some(text) if !text.is_empty() => {
                    write!(
                        f,
                        "Invalid Response ({}) {}: {}",
                        status_code, endpoint, text
                    )
                }
                _ => {
                    write!(f, "Invalid Response ({}) {}", status_code, endpoint)
                }
            },
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        // reqwest errors carry the request url, including the `appid` query.
        ApiError::RequestError(Arc::new(e.without_url()))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::JsonError(Arc::new(e))
    }
}

impl From<ApiError> for ProviderError {
    fn from(value: ApiError) -> Self {
        match value {
            ApiError::JsonError(_) => {
                ProviderError::Malformed(value.to_string())
            }
            ApiError::RequestError(_) | ApiError::InvalidResponse { .. } => {
                ProviderError::Unavailable(value.to_string())
            }
        }
    }
}
