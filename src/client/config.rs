use crate::error::ApiError;
use std::env;
use url::Url;

/// Connection details for the backend API, supplied by the surrounding
/// application or the environment.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Origin the admin endpoints live under, e.g. `https://api.example.com`.
    pub base_url: Url,
    /// Value sent in the `x-api-key` header on every request.
    pub api_key: String,
}

impl ApiConfig {
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self, ApiError> {
        let api_key = api_key.into();
        if base_url.is_empty() || api_key.is_empty() {
            return Err(ApiError::MissingCredentials);
        }
        Ok(Self {
            base_url: Url::parse(base_url)?,
            api_key,
        })
    }

    /// Reads `DRIPFLOW_API_URL` and `DRIPFLOW_API_KEY`.
    pub fn from_env() -> Result<Self, ApiError> {
        let base_url = env::var("DRIPFLOW_API_URL").map_err(|_| ApiError::MissingCredentials)?;
        let api_key = env::var("DRIPFLOW_API_KEY").map_err(|_| ApiError::MissingCredentials)?;
        Self::new(&base_url, api_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_credentials() {
        assert!(matches!(
            ApiConfig::new("", "key"),
            Err(ApiError::MissingCredentials)
        ));
        assert!(matches!(
            ApiConfig::new("https://api.example.com", ""),
            Err(ApiError::MissingCredentials)
        ));
    }

    #[test]
    fn rejects_unparseable_url() {
        assert!(matches!(
            ApiConfig::new("not a url", "key"),
            Err(ApiError::InvalidBaseUrl(_))
        ));
    }
}
