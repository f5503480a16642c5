use async_trait::async_trait;
use reqwest::header::{ACCEPT, CACHE_CONTROL, CONTENT_TYPE};
use secure_config_core::{
    ConfigError, ConfigSource, ProtectedConfig, PublicConfig, Result, API_KEY_HEADER,
};
use serde::de::DeserializeOwned;
use tokio::sync::OnceCell;
use tracing::{debug, error, info};

use crate::ClientConfig;

/// Client for the public and protected config endpoints.
///
/// The API key is fetched lazily on first use and kept in memory for the life of the
/// client. It is never written anywhere else.
#[derive(Debug)]
pub struct ConfigClient {
    config: ClientConfig,
    http: reqwest::Client,
    api_key: OnceCell<String>,
}

impl ConfigClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
            api_key: OnceCell::new(),
        }
    }

    pub async fn fetch_public_config(&self) -> Result<PublicConfig> {
        let url = self.config.public_url();
        info!("Fetching public config from {}...", self.config.public_path);

        let resp = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(|e| {
                error!("Error fetching public config: {}", e);
                ConfigError::Network(e.to_string())
            })?;

        if !resp.status().is_success() {
            error!("Public config fetch failed: {}", resp.status());
            return Err(ConfigError::HttpStatus {
                context: "public config".into(),
                status: resp.status().to_string(),
            });
        }

        let config: PublicConfig = Self::parse_body(resp).await?;
        info!("Public config fetched successfully");
        Ok(config)
    }

    /// Returns the memoized key, fetching the public config the first time.
    pub async fn get_api_key(&self) -> Result<String> {
        let key = self
            .api_key
            .get_or_try_init(|| async move {
                let public = self.fetch_public_config().await?;
                if public.api_key.is_empty() {
                    return Err(ConfigError::MissingKey);
                }
                Ok::<_, ConfigError>(public.api_key)
            })
            .await?;

        Ok(key.clone())
    }

    pub async fn fetch_config(&self) -> Result<ProtectedConfig> {
        let key = self.get_api_key().await?;
        let url = self.config.protected_url();
        debug!("Fetching protected config from {}", self.config.protected_path);

        let resp = self
            .http
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, key)
            .send()
            .await
            .map_err(|e| {
                error!("Error fetching protected config: {}", e);
                ConfigError::Network(e.to_string())
            })?;

        if !resp.status().is_success() {
            error!("Protected config fetch failed: {}", resp.status());
            return Err(ConfigError::HttpStatus {
                context: "protected config".into(),
                status: resp.status().to_string(),
            });
        }

        Self::parse_body(resp).await
    }

    async fn parse_body<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
        let body = resp
            .text()
            .await
            .map_err(|e| ConfigError::Network(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| {
            ConfigError::Parse(format!(
                "{} - Body: {}",
                e,
                body.chars().take(200).collect::<String>()
            ))
        })
    }
}

#[async_trait]
impl ConfigSource for ConfigClient {
    async fn fetch_config(&self) -> Result<ProtectedConfig> {
        ConfigClient::fetch_config(self).await
    }
}
