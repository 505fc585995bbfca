use axum::{
    extract::{Json, State},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::dto::user::LoginPayload;
use crate::error::ApiError;
use crate::state::AppState;
use crate::utils::exists::found_or;
use crate::utils::jwt::TokenPayload;
use crate::utils::password::verify_password;
use crate::utils::validate::{parse_payload, validate_body};

pub fn auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/refresh", post(refresh_token))
}

/// POST /auth/login: exchanges credentials for an access/refresh token pair.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, ApiError> {
    let payload: LoginPayload = parse_payload(body)?;
    let credentials = validate_body(&payload)?;

    let user = state.users.find_user_by_email(&credentials.email).await?;
    let user = found_or(user, "User", "email is invalid")?;

    let verified = verify_password(&credentials.password, &user.password_hash)
        .map_err(|e| ApiError::Internal(format!("password verification failed: {e}")))?;
    if !verified {
        return Err(ApiError::Unauthorized("Invalid password".into()));
    }

    let token_payload = TokenPayload {
        id: user.id,
        email: user.email.clone(),
        role: user.role,
    };

    let access_token = state.token_keys.issue_access_token(&token_payload)?;
    let refresh_token = state.token_keys.issue_refresh_token(&token_payload)?;

    Ok(Json(json!({
        "accessToken": access_token,
        "refreshToken": refresh_token,
        "user": {
            "id": user.id,
            "email": user.email,
            "role": user.role,
        }
    }))
    .into_response())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: Option<String>,
}

/// POST /auth/refresh: mints a new access token from a refresh token.
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, ApiError> {
    let payload: RefreshRequest = parse_payload(body)?;

    let refresh_token = payload
        .refresh_token
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Refresh token required".into()))?;

    let claims = state.token_keys.verify_refresh_token(refresh_token)?;

    let access_token = state.token_keys.issue_access_token(&TokenPayload {
        id: claims.id,
        email: claims.email,
        role: claims.role,
    })?;

    Ok(Json(json!({ "accessToken": access_token })).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::mock_db::MockDb;
    use crate::models::user::UserRole;
    use crate::test_support::{build_state, sample_user, token_payload};
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn login_returns_both_tokens_and_the_user_summary() {
        let db = MockDb::default();
        let user = sample_user(UserRole::Visitor, "a@b.com", "secret");
        db.users.lock().unwrap().push(user.clone());
        let state = build_state(db);

        let response = login(
            State(state.clone()),
            Json(json!({ "email": "a@b.com", "password": "secret" })),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["user"]["email"], "a@b.com");
        assert_eq!(body["user"]["role"], "visitor");
        assert!(body["user"].get("passwordHash").is_none());

        let access = body["accessToken"].as_str().unwrap();
        let refresh = body["refreshToken"].as_str().unwrap();
        assert!(state.token_keys.verify_access_token(access).is_ok());
        assert!(state.token_keys.verify_refresh_token(refresh).is_ok());
        // tokens are kind-bound, never interchangeable
        assert!(state.token_keys.verify_refresh_token(access).is_err());
    }

    #[tokio::test]
    async fn login_with_unknown_email_is_a_labelled_404() {
        let state = build_state(MockDb::default());
        let err = login(
            State(state),
            Json(json!({ "email": "ghost@b.com", "password": "secret" })),
        )
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), "User email is invalid");
    }

    #[tokio::test]
    async fn login_with_wrong_password_is_unauthorized() {
        let db = MockDb::default();
        db.users
            .lock()
            .unwrap()
            .push(sample_user(UserRole::Visitor, "a@b.com", "secret"));
        let state = build_state(db);

        let err = login(
            State(state),
            Json(json!({ "email": "a@b.com", "password": "wrong" })),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ApiError::Unauthorized(_)));
        assert_eq!(err.to_string(), "Invalid password");
    }

    #[tokio::test]
    async fn login_without_password_is_an_aggregated_400() {
        let state = build_state(MockDb::default());
        let err = login(State(state), Json(json!({ "email": "a@b.com" })))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::BadRequest(_)));
        assert!(err.to_string().contains("password is required"));
    }

    #[tokio::test]
    async fn refresh_mints_a_new_access_token() {
        let state = build_state(MockDb::default());
        let refresh = state
            .token_keys
            .issue_refresh_token(&token_payload(UserRole::Organizer))
            .unwrap();

        let response = refresh_token(
            State(state.clone()),
            Json(json!({ "refreshToken": refresh })),
        )
        .await
        .unwrap();

        let body = body_json(response).await;
        let access = body["accessToken"].as_str().unwrap();
        let claims = state.token_keys.verify_access_token(access).unwrap();
        assert_eq!(claims.role, UserRole::Organizer);
    }

    #[tokio::test]
    async fn refresh_without_token_is_a_400() {
        let state = build_state(MockDb::default());
        let err = refresh_token(State(state), Json(json!({})))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Refresh token required");
    }

    #[tokio::test]
    async fn refresh_rejects_an_access_token() {
        let state = build_state(MockDb::default());
        let access = state
            .token_keys
            .issue_access_token(&token_payload(UserRole::Visitor))
            .unwrap();

        let err = refresh_token(State(state), Json(json!({ "refreshToken": access })))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Unauthorized(_)));
        assert_eq!(err.to_string(), "Invalid or expired refresh token");
    }
}
