//! HTTP client abstraction for testability

use thiserror::Error;

/// Default request timeout when the caller does not supply one.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors raised while talking to a remote service over HTTP.
///
/// Transport failures and error statuses are kept apart because callers
/// treat them differently: a missing tile comes back as `404` and is not
/// a failure at all, while a connection reset always is.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HttpError {
    /// The request never produced a response (DNS, connect, timeout, ...).
    #[error("request failed: {0}")]
    Transport(String),
    /// The server answered with a non-success status.
    #[error("HTTP {code} from {url}")]
    Status { code: u16, url: String },
}

impl HttpError {
    /// Returns true when the error is an HTTP 404 response.
    pub fn is_not_found(&self) -> bool {
        matches!(self, HttpError::Status { code: 404, .. })
    }
}

/// Trait for synchronous HTTP client operations.
///
/// This abstraction allows for dependency injection and easier testing
/// by enabling mock HTTP clients in tests.
pub trait HttpClient: Send + Sync {
    /// Performs an HTTP GET request.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to request
    ///
    /// # Returns
    ///
    /// The response body as bytes or an error.
    fn get(&self, url: &str) -> Result<Vec<u8>, HttpError>;

    /// Performs an HTTP POST request with JSON body.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to request
    /// * `json_body` - JSON body as a string
    ///
    /// # Returns
    ///
    /// The response body as bytes or an error.
    fn post_json(&self, url: &str, json_body: &str) -> Result<Vec<u8>, HttpError>;
}

/// Real HTTP client implementation using reqwest.
#[derive(Clone)]
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// Creates a new ReqwestClient with default configuration.
    pub fn new() -> Result<Self, HttpError> {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    /// Creates a new ReqwestClient with custom timeout.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self, HttpError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| HttpError::Transport(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> Result<Vec<u8>, HttpError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| HttpError::Transport(format!("request failed: {}", e)))?;

        // Check HTTP status
        if !response.status().is_success() {
            return Err(HttpError::Status {
                code: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        // Read response body
        response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| HttpError::Transport(format!("failed to read response: {}", e)))
    }

    fn post_json(&self, url: &str, json_body: &str) -> Result<Vec<u8>, HttpError> {
        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .body(json_body.to_string())
            .send()
            .map_err(|e| HttpError::Transport(format!("POST request failed: {}", e)))?;

        // Check HTTP status
        if !response.status().is_success() {
            return Err(HttpError::Status {
                code: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        // Read response body
        response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| HttpError::Transport(format!("failed to read response: {}", e)))
    }
}
