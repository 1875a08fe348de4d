use thiserror::Error;

/// Failure of a single weather lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The provider answered, but with a non-success `cod` (unknown city, bad key, ...).
    #[error("upstream rejected the request ({code}): {message}")]
    UpstreamRejected { code: u16, message: String },

    /// Transport failure, timeout, or a body that does not match the expected schema.
    #[error("failed to fetch weather data: {0}")]
    FetchFailed(String),
}

impl FetchError {
    pub fn failed(reason: impl Into<String>) -> Self {
        FetchError::FetchFailed(reason.into())
    }

    /// True when the rejection is caused by the caller's input rather than the service.
    pub fn is_bad_input(&self) -> bool {
        matches!(self, FetchError::UpstreamRejected { code: 400 | 404, .. })
    }
}

impl From<reqwest::Error> for FetchError {
    /// The request URL carries the API key, so it is stripped before the text is kept.
    fn from(err: reqwest::Error) -> Self {
        let err = err.without_url();
        if err.is_timeout() {
            FetchError::FetchFailed(format!("upstream timed out: {err}"))
        } else {
            FetchError::FetchFailed(err.to_string())
        }
    }
}
