use std::env;

use anyhow::{Context, Result};

const DEFAULT_FRONTEND_ORIGIN: &str = "http://localhost:5173";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub api_key: Option<String>,
    pub entra_client_id: Option<String>,
    pub entra_scope: Option<String>,
    pub frontend_origin: String,
    pub host: String,
    pub port: u16,
}

fn non_empty(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let port = match non_empty("PORT") {
            Some(p) => p.parse().with_context(|| format!("Invalid PORT: {p}"))?,
            None => defaults.port,
        };

        Ok(Self {
            api_key: non_empty("API_KEY"),
            entra_client_id: non_empty("ENTRA_CLIENT_ID"),
            entra_scope: non_empty("ENTRA_SCOPE"),
            frontend_origin: non_empty("FRONTEND_ORIGIN").unwrap_or(defaults.frontend_origin),
            host: non_empty("HOST").unwrap_or(defaults.host),
            port,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            entra_client_id: None,
            entra_scope: None,
            frontend_origin: DEFAULT_FRONTEND_ORIGIN.to_string(),
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}
