use crate::echoenv::GIT_COMMIT_HASH;
use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct Health {
    status: String,
    version: String,
    commit: String,
    timestamp: String,
}

impl Health {
    fn up() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            commit: GIT_COMMIT_HASH.to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = Health),
    ),
    tag = "health",
)]
#[instrument]
pub async fn health(method: Method) -> Response {
    debug!(method = ?method, "HTTP request method: {}", method);

    // OPTIONS probes get an empty 200
    if method == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }

    (StatusCode::OK, Json(Health::up())).into_response()
}

#[cfg(test)]
mod tests {
    use super::{health, Health};
    use axum::{
        body::to_bytes,
        http::{Method, StatusCode},
    };

    #[tokio::test]
    async fn get_returns_health_document() {
        let response = health(Method::GET).await;
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let health: Health = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(health.status, "ok");
        assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
        assert!(!health.commit.is_empty());
        assert!(chrono::DateTime::parse_from_rfc3339(&health.timestamp).is_ok());
    }

    #[tokio::test]
    async fn options_returns_empty_ok() {
        let response = health(Method::OPTIONS).await;
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }
}
