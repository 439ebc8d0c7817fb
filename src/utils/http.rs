// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue};

use crate::error::{AppError, Result};
use crate::models::FetchConfig;

/// Build the header set sent with every source request.
pub fn default_headers(config: &FetchConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, header_value("accept", &config.accept)?);
    headers.insert(
        ACCEPT_LANGUAGE,
        header_value("accept_language", &config.accept_language)?,
    );
    Ok(headers)
}

fn header_value(field: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| AppError::config(format!("fetch.{field} is not a valid header: {e}")))
}

/// Create a configured asynchronous HTTP client.
pub fn create_async_client(config: &FetchConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .default_headers(default_headers(config)?)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_headers() {
        let headers = default_headers(&FetchConfig::default()).unwrap();
        assert!(headers[ACCEPT].to_str().unwrap().starts_with("text/html"));
        assert!(headers[ACCEPT_LANGUAGE].to_str().unwrap().starts_with("ru-RU"));
    }

    #[test]
    fn test_invalid_header_is_config_error() {
        let config = FetchConfig {
            accept: "bad\nvalue".into(),
            ..FetchConfig::default()
        };
        assert!(matches!(default_headers(&config), Err(AppError::Config(_))));
    }

    #[test]
    fn test_create_client() {
        assert!(create_async_client(&FetchConfig::default()).is_ok());
    }
}
