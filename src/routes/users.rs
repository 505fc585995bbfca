use axum::{
    extract::{Json, Path, State},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};

use crate::dto::booking::BookingPayload;
use crate::dto::user::UserPayload;
use crate::error::ApiError;
use crate::middleware::auth::jwt_required;
use crate::middleware::role::{allow_all_users, only_admin};
use crate::models::user::NewUser;
use crate::responses::JsonResponse;
use crate::state::AppState;
use crate::utils::exists::found;
use crate::utils::password::hash_password;
use crate::utils::validate::{parse_payload, parse_uuid, validate_body};

pub fn user_router(state: AppState) -> Router<AppState> {
    let auth = middleware::from_fn_with_state(state, jwt_required);

    let admin_routes = Router::new()
        .route("/", get(find_all_users))
        .route("/{id}", get(find_user_by_id).delete(delete_user))
        .layer(middleware::from_fn(only_admin));

    let booking_routes = Router::new()
        .route("/booking", post(event_booking))
        .layer(middleware::from_fn(allow_all_users));

    // any authenticated user may update a profile; no role restriction
    let profile_routes = Router::new().route("/{id}", put(update_user));

    let protected = admin_routes
        .merge(booking_routes)
        .merge(profile_routes)
        .layer(auth);

    Router::new()
        .route("/register", post(register_user))
        .merge(protected)
}

/// POST /user/register: public; the role whitelist keeps admin out.
pub async fn register_user(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, ApiError> {
    let payload: UserPayload = parse_payload(body)?;
    let registration = validate_body(&payload)?;

    let password_hash = hash_password(&registration.credentials.password)
        .map_err(|e| ApiError::Internal(format!("password hashing failed: {e}")))?;

    let user = state
        .users
        .create_user(&NewUser {
            name: registration.name,
            email: registration.credentials.email,
            password_hash,
            profile_pick: registration.profile_pick,
            role: registration.role,
        })
        .await?;

    let data = serde_json::to_value(&user)
        .map_err(|e| ApiError::Internal(format!("user serialization failed: {e}")))?;
    Ok(JsonResponse::created("User registered", data).into_response())
}

/// POST /user/booking: books an event for a user; both must exist.
pub async fn event_booking(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, ApiError> {
    let payload: BookingPayload = parse_payload(body)?;
    let booking = validate_body(&payload)?;

    let user = state.users.find_user_by_id(booking.user_id).await?;
    found(user, "User")?;

    let event = state.events.find_event_by_id(booking.event_id).await?;
    found(event, "Event")?;

    let stored = state
        .users
        .insert_booking(booking.event_id, booking.user_id)
        .await?;

    let data = serde_json::to_value(&stored)
        .map_err(|e| ApiError::Internal(format!("booking serialization failed: {e}")))?;
    Ok(JsonResponse::ok_with("Event booked", data).into_response())
}

/// GET /user/: admin only.
pub async fn find_all_users(State(state): State<AppState>) -> Result<Response, ApiError> {
    let users = state.users.list_users().await?;

    if users.is_empty() {
        return Ok(JsonResponse::ok("No users found").into_response());
    }

    let data = serde_json::to_value(&users)
        .map_err(|e| ApiError::Internal(format!("user serialization failed: {e}")))?;
    Ok(JsonResponse::ok_with("Users found", data).into_response())
}

/// GET /user/{id}: admin only.
pub async fn find_user_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_uuid(&id)?;

    let user = state.users.find_user_by_id(id).await?;
    let user = found(user, "User")?;

    let data = serde_json::to_value(&user)
        .map_err(|e| ApiError::Internal(format!("user serialization failed: {e}")))?;
    Ok(JsonResponse::ok_with("User found", data).into_response())
}

/// PUT /user/{id}: full replacement; the incoming password is re-hashed.
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, ApiError> {
    let id = parse_uuid(&id)?;

    let payload: UserPayload = parse_payload(body)?;
    let registration = validate_body(&payload)?;

    let existing = state.users.find_user_by_id(id).await?;
    found(existing, "User")?;

    let password_hash = hash_password(&registration.credentials.password)
        .map_err(|e| ApiError::Internal(format!("password hashing failed: {e}")))?;

    let updated = state
        .users
        .update_user(
            id,
            &NewUser {
                name: registration.name,
                email: registration.credentials.email,
                password_hash,
                profile_pick: registration.profile_pick,
                role: registration.role,
            },
        )
        .await?;

    let data = serde_json::to_value(&updated)
        .map_err(|e| ApiError::Internal(format!("user serialization failed: {e}")))?;
    Ok(JsonResponse::ok_with("User updated", data).into_response())
}

/// DELETE /user/{id}: admin only.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_uuid(&id)?;

    let user = state.users.find_user_by_id(id).await?;
    found(user, "User")?;

    state.users.delete_user(id).await?;

    Ok(JsonResponse::ok("User deleted successfully").into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::mock_db::MockDb;
    use crate::models::user::UserRole;
    use crate::test_support::{access_token_for, build_state, sample_user};
    use axum::body::Body;
    use axum::http::StatusCode;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn register_stores_the_user_and_hides_the_password() {
        let state = build_state(MockDb::default());

        let response = register_user(
            State(state.clone()),
            Json(json!({
                "name": "A",
                "userLogin": { "email": "a@b.com", "password": "secret" },
                "role": "visitor"
            })),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["message"], "User registered");
        assert_eq!(body["data"]["email"], "a@b.com");
        assert!(body["data"].get("passwordHash").is_none());
        assert!(body["data"].get("password").is_none());

        let stored = state.users.find_user_by_email("a@b.com").await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "secret");
        assert!(crate::utils::password::verify_password("secret", &stored.password_hash).unwrap());
    }

    #[tokio::test]
    async fn register_rejects_the_admin_role() {
        let state = build_state(MockDb::default());

        let err = register_user(
            State(state),
            Json(json!({
                "name": "A",
                "userLogin": { "email": "a@b.com", "password": "secret" },
                "role": "admin"
            })),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[tokio::test]
    async fn booking_requires_an_existing_event() {
        let db = MockDb::default();
        let user = sample_user(UserRole::Visitor, "a@b.com", "secret");
        db.users.lock().unwrap().push(user.clone());
        let state = build_state(db);

        let err = event_booking(
            State(state),
            Json(json!({
                "eventId": Uuid::new_v4().to_string(),
                "userId": user.id.to_string()
            })),
        )
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), "Event not found");
    }

    #[tokio::test]
    async fn empty_user_list_answers_with_a_message_only() {
        let state = build_state(MockDb::default());
        let response = find_all_users(State(state)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body, json!({ "message": "No users found" }));
    }

    #[tokio::test]
    async fn malformed_path_id_fails_before_any_lookup() {
        let state = build_state(MockDb::default());
        let err = find_user_by_id(State(state), Path("not-a-uuid".into()))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid UUID");
    }

    #[tokio::test]
    async fn visitor_token_cannot_list_users() {
        let db = MockDb::default();
        let visitor = sample_user(UserRole::Visitor, "v@b.com", "secret");
        db.users.lock().unwrap().push(visitor.clone());
        let state = build_state(db);
        let token = access_token_for(&state, &visitor);

        let app = user_router(state.clone()).with_state(state);
        let response = app
            .oneshot(
                axum::http::Request::get("/")
                    .header("authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn admin_token_lists_users() {
        let db = MockDb::default();
        let admin = sample_user(UserRole::Admin, "root@b.com", "secret");
        db.users.lock().unwrap().push(admin.clone());
        let state = build_state(db);
        let token = access_token_for(&state, &admin);

        let app = user_router(state.clone()).with_state(state);
        let response = app
            .oneshot(
                axum::http::Request::get("/")
                    .header("authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Users found");
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_rehashes_the_incoming_password() {
        let db = MockDb::default();
        let user = sample_user(UserRole::Visitor, "a@b.com", "old-secret");
        db.users.lock().unwrap().push(user.clone());
        let state = build_state(db);

        let response = update_user(
            State(state.clone()),
            Path(user.id.to_string()),
            Json(json!({
                "name": "Renamed",
                "userLogin": { "email": "a@b.com", "password": "new-secret" },
                "role": "visitor"
            })),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let stored = state.users.find_user_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Renamed");
        assert!(crate::utils::password::verify_password("new-secret", &stored.password_hash).unwrap());
    }

    #[tokio::test]
    async fn deleting_an_unknown_user_is_a_404() {
        let state = build_state(MockDb::default());
        let err = delete_user(State(state), Path(Uuid::new_v4().to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "User not found");
    }
}
