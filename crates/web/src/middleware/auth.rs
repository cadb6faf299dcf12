//! Bearer token authentication.
//!
//! Tokens are HS256 JWTs issued by the external identity provider. The `sub`
//! claim carries the user id; a verified token becomes a [`Session`] in the
//! request extensions for handlers to pick up.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use scrimhub_storage::Session;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::WebError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// User id
    pub sub: Uuid,
    pub exp: i64,
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Claims {
    pub fn new(user_id: Uuid, validity: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            exp: (now + validity).timestamp(),
            iat: Some(now.timestamp()),
            email: None,
        }
    }
}

struct KeyMaterial {
    decoding: DecodingKey,
    encoding: EncodingKey,
    validation: Validation,
}

/// Shared HMAC key used to verify session tokens
#[derive(Clone)]
pub struct JwtKeys {
    inner: Arc<KeyMaterial>,
}

impl JwtKeys {
    /// Only the signature and expiry are checked; audience and issuer vary
    /// between identity providers and are ignored.
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_aud = false;
        validation.validate_nbf = false;

        Self {
            inner: Arc::new(KeyMaterial {
                decoding: DecodingKey::from_secret(secret),
                encoding: EncodingKey::from_secret(secret),
                validation,
            }),
        }
    }

    pub fn validate(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let data = decode::<Claims>(token, &self.inner.decoding, &self.inner.validation)?;
        Ok(data.claims)
    }

    pub fn encode(&self, claims: &Claims) -> Result<String, jsonwebtoken::errors::Error> {
        encode(&Header::new(Algorithm::HS256), claims, &self.inner.encoding)
    }
}

pub async fn require_auth(
    State(keys): State<JwtKeys>,
    mut request: Request,
    next: Next,
) -> Result<Response, WebError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| WebError::Unauthorized("Missing Authorization header".to_string()))?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        WebError::Unauthorized(
            "Invalid Authorization header format. Expected 'Bearer <token>'".to_string(),
        )
    })?;

    let claims = keys.validate(token).map_err(|e| {
        tracing::warn!("Rejected session token: {}", e);
        WebError::Unauthorized("Invalid or expired token".to_string())
    })?;

    request.extensions_mut().insert(Session::new(claims.sub));

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Extension, Json, Router,
        body::Body,
        http::{Request, StatusCode},
        middleware,
        routing::get,
    };
    use tower::ServiceExt;

    use crate::error::ErrorResponse;

    async fn whoami(Extension(session): Extension<Session>) -> Json<Session> {
        Json(session)
    }

    fn app(keys: JwtKeys) -> Router {
        Router::new()
            .route("/whoami", get(whoami))
            .route_layer(middleware::from_fn_with_state(keys, require_auth))
    }

    fn request_with(authorization: Option<String>) -> Request<Body> {
        let mut builder = Request::builder().uri("/whoami");
        if let Some(value) = authorization {
            builder = builder.header("Authorization", value);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn error_body(response: Response) -> ErrorResponse {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_valid_token_yields_session() {
        let keys = JwtKeys::new(b"test-secret");
        let user_id = Uuid::new_v4();
        let token = keys.encode(&Claims::new(user_id, Duration::hours(1))).unwrap();

        let response = app(keys)
            .oneshot(request_with(Some(format!("Bearer {}", token))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let session: Session = serde_json::from_slice(&body).unwrap();
        assert_eq!(session.user_id, user_id);
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthorized() {
        let response = app(JwtKeys::new(b"test-secret"))
            .oneshot(request_with(None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let error = error_body(response).await;
        assert_eq!(error.code, "UNAUTHORIZED");
        assert!(error.error.contains("Missing"));
    }

    #[tokio::test]
    async fn test_non_bearer_scheme_is_unauthorized() {
        let response = app(JwtKeys::new(b"test-secret"))
            .oneshot(request_with(Some("Basic dXNlcjpwYXNz".to_string())))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(
            error_body(response)
                .await
                .error
                .contains("Invalid Authorization header format")
        );
    }

    #[tokio::test]
    async fn test_expired_token_is_unauthorized() {
        let keys = JwtKeys::new(b"test-secret");
        let token = keys
            .encode(&Claims::new(Uuid::new_v4(), Duration::minutes(-10)))
            .unwrap();

        let response = app(keys)
            .oneshot(request_with(Some(format!("Bearer {}", token))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_token_signed_with_other_secret_is_unauthorized() {
        let forged = JwtKeys::new(b"other-secret")
            .encode(&Claims::new(Uuid::new_v4(), Duration::hours(1)))
            .unwrap();

        let response = app(JwtKeys::new(b"test-secret"))
            .oneshot(request_with(Some(format!("Bearer {}", forged))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
