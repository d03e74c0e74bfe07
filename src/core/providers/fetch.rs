use thiserror::Error;

/// Everything that can go wrong between reading the token and holding a parsed billing page.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("DigitalOcean API token not found. Please set {0} environment variable.")]
    CredentialMissing(String),
    #[error("Invalid DigitalOcean API token. Please check your token and try again.")]
    Unauthorized,
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,
    #[error("HTTP {status} from {endpoint}: {body}")]
    Http {
        endpoint: String,
        status: u16,
        body: String,
    },
    #[error("Request timed out. Please try again later.")]
    Timeout,
    #[error("Connection error: {0}")]
    Network(#[source] reqwest::Error),
    #[error("Failed to parse {endpoint} response: {message}")]
    Parse { endpoint: String, message: String },
    #[error("{0}")]
    InvalidEndpoint(String),
    #[error("Invalid API config: {0}")]
    InvalidConfig(String),
}

impl FetchError {
    /// Coarse error class written to the daily report.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CredentialMissing(_) | Self::Unauthorized => "CredentialError",
            _ => "ApiError",
        }
    }

    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Network(err)
        }
    }
}

/// Validate that an API URL uses HTTPS before a token is sent to it.
///
/// Plain HTTP is only accepted for loopback hosts.
pub fn validate_endpoint(url: &str) -> Result<(), FetchError> {
    if url.starts_with("https://") {
        return Ok(());
    }
    let loopback = ["http://127.0.0.1", "http://localhost", "http://[::1]"];
    if loopback.iter().any(|prefix| {
        url.strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with(':') || rest.starts_with('/'))
    }) {
        return Ok(());
    }
    Err(FetchError::InvalidEndpoint(format!(
        "endpoint must use HTTPS, got: {}",
        url
    )))
}
