use serde::{Deserialize, Serialize};

/// Request header carrying the key on protected calls.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Body of the unauthenticated `/config.json` endpoint.
///
/// A missing `apiKey` deserializes to an empty string; callers treat empty as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicConfig {
    #[serde(rename = "apiKey", default)]
    pub api_key: String,
}

/// Settings returned by the protected `/api/config` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectedConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entra_client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entra_scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_config_without_key() {
        let cfg: PublicConfig = serde_json::from_str("{}").unwrap();
        assert!(cfg.api_key.is_empty());
    }

    #[test]
    fn test_public_config_field_name() {
        let cfg: PublicConfig = serde_json::from_str(r#"{"apiKey":"k1"}"#).unwrap();
        assert_eq!(cfg.api_key, "k1");
    }

    #[test]
    fn test_protected_config_partial() {
        let cfg: ProtectedConfig = serde_json::from_str(r#"{"is_enabled":false}"#).unwrap();
        assert_eq!(cfg.is_enabled, Some(false));
        assert!(cfg.entra_client_id.is_none());
        assert_eq!(serde_json::to_string(&cfg).unwrap(), r#"{"is_enabled":false}"#);
    }
}
