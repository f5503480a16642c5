use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::State,
    http::{HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use secure_config_core::{ProtectedConfig, PublicConfig, API_KEY_HEADER};
use serde_json::json;
use tower_http::{
    cors::{AllowHeaders, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, warn};

use crate::config::ServerConfig;

const CONFIG_TIMESTAMP: &str = "2025-05-20T12:00:00Z";

type AppState = Arc<ServerConfig>;

/// Error body in the `{"detail": ...}` shape the client expects.
#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    detail: &'static str,
}

impl ApiError {
    fn forbidden(detail: &'static str) -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            detail,
        }
    }

    fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: "Internal server error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

pub fn router(config: AppState) -> Result<Router> {
    let cors = CorsLayer::new()
        .allow_origin(HeaderValue::from_str(&config.frontend_origin)?)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(AllowHeaders::mirror_request());

    let api_routes = Router::new().route("/config", get(protected_config));

    Ok(Router::new()
        .route("/", get(root))
        .route("/config.json", get(public_config))
        .nest("/api", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(config))
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({ "status": "API is running" }))
}

fn expected_key(config: &ServerConfig) -> Result<&str, ApiError> {
    config.api_key.as_deref().ok_or_else(|| {
        error!("API_KEY environment variable is not set");
        ApiError::internal()
    })
}

async fn public_config(State(config): State<AppState>) -> Result<Json<PublicConfig>, ApiError> {
    let api_key = expected_key(&config)?;
    Ok(Json(PublicConfig {
        api_key: api_key.to_string(),
    }))
}

fn verify_api_key(config: &ServerConfig, headers: &HeaderMap) -> Result<(), ApiError> {
    let expected = expected_key(config)?;

    let provided = headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty());

    match provided {
        None => {
            warn!("Rejected request: API key is missing");
            Err(ApiError::forbidden("API key is missing"))
        }
        Some(key) if key != expected => {
            warn!("Rejected request: invalid API key");
            Err(ApiError::forbidden("Invalid API key"))
        }
        Some(_) => Ok(()),
    }
}

async fn protected_config(
    State(config): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ProtectedConfig>, ApiError> {
    verify_api_key(&config, &headers)?;

    let (Some(client_id), Some(scope)) = (&config.entra_client_id, &config.entra_scope) else {
        error!("Server configuration error: Missing required environment variables");
        return Err(ApiError::internal());
    };

    Ok(Json(ProtectedConfig {
        entra_client_id: Some(client_id.clone()),
        entra_scope: Some(scope.clone()),
        timestamp: Some(CONFIG_TIMESTAMP.to_string()),
        is_enabled: Some(true),
    }))
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;

    fn configured() -> ServerConfig {
        ServerConfig {
            api_key: Some("k1".into()),
            entra_client_id: Some("client-123".into()),
            entra_scope: Some("api://client-123/.default".into()),
            ..ServerConfig::default()
        }
    }

    async fn get(config: ServerConfig, uri: &str, key: Option<&str>) -> (StatusCode, Value) {
        let app = router(Arc::new(config)).unwrap();
        let mut req = Request::builder().uri(uri);
        if let Some(key) = key {
            req = req.header(API_KEY_HEADER, key);
        }
        let resp = app.oneshot(req.body(Body::empty()).unwrap()).await.unwrap();
        let status = resp.status();
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_root_health() {
        let (status, body) = get(configured(), "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "API is running");
    }

    #[tokio::test]
    async fn test_public_config_exposes_key() {
        let (status, body) = get(configured(), "/config.json", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "apiKey": "k1" }));
    }

    #[tokio::test]
    async fn test_public_config_without_key_configured() {
        let (status, _) = get(ServerConfig::default(), "/config.json", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_protected_config_with_valid_key() {
        let (status, body) = get(configured(), "/api/config", Some("k1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "entra_client_id": "client-123",
                "entra_scope": "api://client-123/.default",
                "timestamp": CONFIG_TIMESTAMP,
                "is_enabled": true
            })
        );
    }

    #[tokio::test]
    async fn test_protected_config_missing_key() {
        let (status, body) = get(configured(), "/api/config", None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["detail"], "API key is missing");
    }

    #[tokio::test]
    async fn test_protected_config_wrong_key() {
        let (status, body) = get(configured(), "/api/config", Some("nope")).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["detail"], "Invalid API key");
    }

    #[tokio::test]
    async fn test_protected_config_missing_entra_settings() {
        let config = ServerConfig {
            entra_scope: None,
            ..configured()
        };
        let (status, body) = get(config, "/api/config", Some("k1")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["detail"], "Internal server error");
    }
}
