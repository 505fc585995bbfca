use axum::{
    extract::{Json, Path, State},
    middleware,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Router,
};

use crate::dto::visit::VisitPayload;
use crate::error::ApiError;
use crate::middleware::auth::jwt_required;
use crate::middleware::role::{allow_all_users, allow_organizer};
use crate::models::visit::NewVisit;
use crate::responses::JsonResponse;
use crate::state::AppState;
use crate::utils::exists::found;
use crate::utils::validate::{parse_payload, parse_uuid, validate_body};

pub fn visit_router(state: AppState) -> Router<AppState> {
    let auth = middleware::from_fn_with_state(state, jwt_required);

    let any_role_routes = Router::new()
        .route("/", post(register_visit).get(find_all_visits).put(update_visit))
        .route("/user/{user_id}", get(find_visits_by_user))
        .route("/place/{place_id}", get(find_visits_by_place))
        .layer(middleware::from_fn(allow_all_users));

    let organizer_routes = Router::new()
        .route("/{user_id}/{place_id}", delete(delete_visit))
        .layer(middleware::from_fn(allow_organizer));

    any_role_routes.merge(organizer_routes).layer(auth)
}

/// POST /visited/: records a visit; user and place must exist.
pub async fn register_visit(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, ApiError> {
    let payload: VisitPayload = parse_payload(body)?;
    let draft = validate_body(&payload)?;

    let user = state.users.find_user_by_id(draft.user_id).await?;
    found(user, "User")?;

    let place = state.places.find_place_by_id(draft.place_id).await?;
    found(place, "Place")?;

    let visit = state
        .visits
        .create_visit(&NewVisit {
            user_id: draft.user_id,
            place_id: draft.place_id,
            visit_date: draft.visit_date,
        })
        .await?;

    let data = serde_json::to_value(&visit)
        .map_err(|e| ApiError::Internal(format!("visit serialization failed: {e}")))?;
    Ok(JsonResponse::created("Visit registered", data).into_response())
}

/// GET /visited/: any authenticated role.
pub async fn find_all_visits(State(state): State<AppState>) -> Result<Response, ApiError> {
    let visits = state.visits.list_visits().await?;

    if visits.is_empty() {
        return Ok(JsonResponse::ok("No visits found").into_response());
    }

    let data = serde_json::to_value(&visits)
        .map_err(|e| ApiError::Internal(format!("visit serialization failed: {e}")))?;
    Ok(JsonResponse::ok_with("Visits found", data).into_response())
}

/// GET /visited/user/{userId}: visits of one user.
pub async fn find_visits_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Response, ApiError> {
    let user_id = parse_uuid(&user_id)?;

    let user = state.users.find_user_by_id(user_id).await?;
    found(user, "User")?;

    let visits = state.visits.list_visits_by_user(user_id).await?;

    if visits.is_empty() {
        return Ok(JsonResponse::ok("User has no visit records").into_response());
    }

    let data = serde_json::to_value(&visits)
        .map_err(|e| ApiError::Internal(format!("visit serialization failed: {e}")))?;
    Ok(JsonResponse::ok_with("Visits found", data).into_response())
}

/// GET /visited/place/{placeId}: visits recorded for one place.
pub async fn find_visits_by_place(
    State(state): State<AppState>,
    Path(place_id): Path<String>,
) -> Result<Response, ApiError> {
    let place_id = parse_uuid(&place_id)?;

    let place = state.places.find_place_by_id(place_id).await?;
    found(place, "Place")?;

    let visits = state.visits.list_visits_by_place(place_id).await?;

    if visits.is_empty() {
        return Ok(JsonResponse::ok("No visits recorded for this place").into_response());
    }

    let data = serde_json::to_value(&visits)
        .map_err(|e| ApiError::Internal(format!("visit serialization failed: {e}")))?;
    Ok(JsonResponse::ok_with("Visits found", data).into_response())
}

/// PUT /visited/: updates the visit date of the (user, place) record.
pub async fn update_visit(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, ApiError> {
    let payload: VisitPayload = parse_payload(body)?;
    let draft = validate_body(&payload)?;

    let user = state.users.find_user_by_id(draft.user_id).await?;
    found(user, "User")?;

    let place = state.places.find_place_by_id(draft.place_id).await?;
    found(place, "Place")?;

    let visit = state.visits.find_visit(draft.user_id, draft.place_id).await?;
    found(visit, "VisitedPlace")?;

    let updated = state
        .visits
        .update_visit_date(draft.user_id, draft.place_id, draft.visit_date)
        .await?;

    let data = serde_json::to_value(&updated)
        .map_err(|e| ApiError::Internal(format!("visit serialization failed: {e}")))?;
    Ok(JsonResponse::ok_with("Visit updated", data).into_response())
}

/// DELETE /visited/{userId}/{placeId}: organizer or admin; deletion by the
/// composite key.
pub async fn delete_visit(
    State(state): State<AppState>,
    Path((user_id, place_id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let user_id = parse_uuid(&user_id)?;
    let place_id = parse_uuid(&place_id)?;

    let user = state.users.find_user_by_id(user_id).await?;
    found(user, "User")?;

    let place = state.places.find_place_by_id(place_id).await?;
    found(place, "Place")?;

    let visit = state.visits.find_visit(user_id, place_id).await?;
    found(visit, "VisitedPlace")?;

    state.visits.delete_visit(user_id, place_id).await?;

    Ok(JsonResponse::ok("Visit deleted successfully").into_response())
}
