use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Bearer-token gate for protected routes.
///
/// Verifies the access token from the `Authorization` header and attaches
/// the decoded claims to the request extensions for the role gate and the
/// handlers. Registered with `axum::middleware::from_fn_with_state`.
pub async fn jwt_required(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let Some(header) = header else {
        return Err(ApiError::Unauthorized("Token is necessary".into()));
    };

    let Some(token) = header.strip_prefix("Bearer ") else {
        return Err(ApiError::Unauthorized("Token not provided".into()));
    };

    let claims = state.token_keys.verify_access_token(token)?;
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::mock_db::MockDb;
    use crate::models::user::UserRole;
    use crate::test_support::{build_state, token_payload};
    use axum::{body::Body, http::StatusCode, middleware, routing::get, Router};
    use tower::ServiceExt;

    fn app(state: AppState) -> Router {
        Router::new()
            .route("/", get(|| async { "ok" }))
            .route_layer(middleware::from_fn_with_state(state, jwt_required))
    }

    async fn message_of(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        value["message"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn missing_header_is_unauthorized() {
        let state = build_state(MockDb::default());
        let response = app(state)
            .oneshot(axum::http::Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(message_of(response).await, "Token is necessary");
    }

    #[tokio::test]
    async fn non_bearer_scheme_is_unauthorized() {
        let state = build_state(MockDb::default());
        let response = app(state)
            .oneshot(
                axum::http::Request::get("/")
                    .header("authorization", "Basic abc123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(message_of(response).await, "Token not provided");
    }

    #[tokio::test]
    async fn tampered_token_propagates_the_verifier_error() {
        let state = build_state(MockDb::default());
        let response = app(state)
            .oneshot(
                axum::http::Request::get("/")
                    .header("authorization", "Bearer not.a.token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(message_of(response).await, "Invalid or expired access token");
    }

    #[tokio::test]
    async fn valid_bearer_token_reaches_the_handler() {
        let state = build_state(MockDb::default());
        let token = state
            .token_keys
            .issue_access_token(&token_payload(UserRole::Visitor))
            .unwrap();

        let response = app(state)
            .oneshot(
                axum::http::Request::get("/")
                    .header("authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
