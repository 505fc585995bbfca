use axum::{
    extract::{Json, Path, State},
    middleware,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Router,
};

use crate::dto::place::PlacePayload;
use crate::error::ApiError;
use crate::middleware::auth::jwt_required;
use crate::middleware::role::{allow_all_users, allow_organizer, only_admin};
use crate::models::place::NewPlace;
use crate::responses::JsonResponse;
use crate::state::AppState;
use crate::utils::exists::found;
use crate::utils::validate::{parse_payload, parse_uuid, validate_body};

pub fn place_router(state: AppState) -> Router<AppState> {
    let auth = middleware::from_fn_with_state(state, jwt_required);

    let organizer_routes = Router::new()
        .route("/", post(register_place))
        .route("/{id}", put(update_place))
        .layer(middleware::from_fn(allow_organizer));

    let read_routes = Router::new()
        .route("/", get(find_all_places))
        .route("/{id}", get(find_place_by_id))
        .layer(middleware::from_fn(allow_all_users));

    // deletion is the only place operation reserved to admins
    let admin_routes = Router::new()
        .route("/{id}", delete(delete_place))
        .layer(middleware::from_fn(only_admin));

    organizer_routes.merge(read_routes).merge(admin_routes).layer(auth)
}

/// POST /place/: organizer or admin.
pub async fn register_place(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, ApiError> {
    let payload: PlacePayload = parse_payload(body)?;
    let draft = validate_body(&payload)?;

    let place = state
        .places
        .create_place(&NewPlace {
            name: draft.name,
            place_type: draft.place_type,
            address: draft.address,
        })
        .await?;

    let data = serde_json::to_value(&place)
        .map_err(|e| ApiError::Internal(format!("place serialization failed: {e}")))?;
    Ok(JsonResponse::created("Place registered", data).into_response())
}

/// GET /place/: any authenticated role.
pub async fn find_all_places(State(state): State<AppState>) -> Result<Response, ApiError> {
    let places = state.places.list_places().await?;

    if places.is_empty() {
        return Ok(JsonResponse::ok("No places found").into_response());
    }

    let data = serde_json::to_value(&places)
        .map_err(|e| ApiError::Internal(format!("place serialization failed: {e}")))?;
    Ok(JsonResponse::ok_with("Places found", data).into_response())
}

/// GET /place/{id}: any authenticated role.
pub async fn find_place_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_uuid(&id)?;

    let place = state.places.find_place_by_id(id).await?;
    let place = found(place, "Place")?;

    let data = serde_json::to_value(&place)
        .map_err(|e| ApiError::Internal(format!("place serialization failed: {e}")))?;
    Ok(JsonResponse::ok_with("Place found", data).into_response())
}

/// PUT /place/{id}: organizer or admin.
pub async fn update_place(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, ApiError> {
    let id = parse_uuid(&id)?;

    let payload: PlacePayload = parse_payload(body)?;
    let draft = validate_body(&payload)?;

    let place = state.places.find_place_by_id(id).await?;
    found(place, "Place")?;

    let updated = state
        .places
        .update_place(
            id,
            &NewPlace {
                name: draft.name,
                place_type: draft.place_type,
                address: draft.address,
            },
        )
        .await?;

    let data = serde_json::to_value(&updated)
        .map_err(|e| ApiError::Internal(format!("place serialization failed: {e}")))?;
    Ok(JsonResponse::ok_with("Place updated", data).into_response())
}

/// DELETE /place/{id}: admin only.
pub async fn delete_place(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_uuid(&id)?;

    let place = state.places.find_place_by_id(id).await?;
    found(place, "Place")?;

    state.places.delete_place(id).await?;

    Ok(JsonResponse::ok("Place deleted successfully").into_response())
}
