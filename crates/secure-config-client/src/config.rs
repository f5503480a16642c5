pub const BASE_URL_ENV: &str = "SECURE_CONFIG_BASE_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub public_path: String,
    pub protected_path: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            public_path: "/config.json".to_string(),
            protected_path: "/api/config".to_string(),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let base_url = std::env::var(BASE_URL_ENV).unwrap_or(defaults.base_url.clone());
        Self {
            base_url,
            ..defaults
        }
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    pub fn public_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.public_path)
    }

    pub fn protected_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.protected_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_strip_trailing_slash() {
        let cfg = ClientConfig::with_base_url("http://127.0.0.1:9000/");
        assert_eq!(cfg.public_url(), "http://127.0.0.1:9000/config.json");
        assert_eq!(cfg.protected_url(), "http://127.0.0.1:9000/api/config");
    }
}
