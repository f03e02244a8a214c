use thiserror::Error;

/// Failure taxonomy shared by the gateway and every provider adapter.
///
/// Adapters must map any upstream transport failure, non-2xx response or
/// malformed payload into one of these variants; raw provider errors never
/// leak to callers.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Malformed, missing or out-of-range caller input. Raised by the
    /// gateway before any provider call is made.
    #[error("invalid request: {0}")]
    Validation(String),

    /// Network-level failure reaching the upstream provider, including
    /// timeouts and refused connections.
    #[error("weather provider unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a non-success status. `code` and
    /// `message` come from the provider's structured error body when it
    /// parses, otherwise `code` is the raw HTTP status.
    #[error("weather provider error [{code}]: {message}")]
    Provider { code: u16, message: String },

    /// The provider body was not valid JSON or did not match the expected
    /// schema.
    #[error("malformed provider response: {0}")]
    Decode(String),
}

impl WeatherError {
    /// True for errors caused by the caller rather than the upstream.
    pub fn is_validation(&self) -> bool {
        matches!(self, WeatherError::Validation(_))
    }
}
