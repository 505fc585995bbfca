use axum::{
    extract::{Json, Path, State},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};

use crate::dto::event::EventPayload;
use crate::error::ApiError;
use crate::middleware::auth::jwt_required;
use crate::middleware::role::{allow_all_users, allow_organizer};
use crate::models::event::NewEvent;
use crate::responses::JsonResponse;
use crate::state::AppState;
use crate::utils::exists::found;
use crate::utils::validate::{parse_payload, parse_uuid, validate_body};

pub fn event_router(state: AppState) -> Router<AppState> {
    let auth = middleware::from_fn_with_state(state, jwt_required);

    let organizer_routes = Router::new()
        .route("/", post(create_event))
        .route("/{id}", axum::routing::put(update_event).delete(delete_event))
        .layer(middleware::from_fn(allow_organizer));

    let read_routes = Router::new()
        .route("/", get(find_all_events))
        .route("/{id}", get(find_event_by_id))
        .layer(middleware::from_fn(allow_all_users));

    organizer_routes.merge(read_routes).layer(auth)
}

/// POST /event/: organizer or admin; the hosting place must exist.
pub async fn create_event(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, ApiError> {
    let payload: EventPayload = parse_payload(body)?;
    let draft = validate_body(&payload)?;

    let place = state.places.find_place_by_id(draft.place_id).await?;
    found(place, "Place")?;

    let event = state
        .events
        .create_event(&NewEvent {
            title: draft.title,
            event_date: draft.event_date,
            description: draft.description,
            place_id: draft.place_id,
        })
        .await?;

    let data = serde_json::to_value(&event)
        .map_err(|e| ApiError::Internal(format!("event serialization failed: {e}")))?;
    Ok(JsonResponse::created("Event created", data).into_response())
}

/// GET /event/: any authenticated role.
pub async fn find_all_events(State(state): State<AppState>) -> Result<Response, ApiError> {
    let events = state.events.list_events().await?;

    if events.is_empty() {
        return Ok(JsonResponse::ok("No events found").into_response());
    }

    let data = serde_json::to_value(&events)
        .map_err(|e| ApiError::Internal(format!("event serialization failed: {e}")))?;
    Ok(JsonResponse::ok_with("Events found", data).into_response())
}

/// GET /event/{id}: any authenticated role.
pub async fn find_event_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_uuid(&id)?;

    let event = state.events.find_event_by_id(id).await?;
    let event = found(event, "Event")?;

    let data = serde_json::to_value(&event)
        .map_err(|e| ApiError::Internal(format!("event serialization failed: {e}")))?;
    Ok(JsonResponse::ok_with("Event found", data).into_response())
}

/// PUT /event/{id}: organizer or admin; place and event must both exist.
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, ApiError> {
    let id = parse_uuid(&id)?;

    let payload: EventPayload = parse_payload(body)?;
    let draft = validate_body(&payload)?;

    let place = state.places.find_place_by_id(draft.place_id).await?;
    found(place, "Place")?;

    let event = state.events.find_event_by_id(id).await?;
    found(event, "Event")?;

    let updated = state
        .events
        .update_event(
            id,
            &NewEvent {
                title: draft.title,
                event_date: draft.event_date,
                description: draft.description,
                place_id: draft.place_id,
            },
        )
        .await?;

    let data = serde_json::to_value(&updated)
        .map_err(|e| ApiError::Internal(format!("event serialization failed: {e}")))?;
    Ok(JsonResponse::ok_with("Event updated", data).into_response())
}

/// DELETE /event/{id}: organizer or admin.
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_uuid(&id)?;

    let event = state.events.find_event_by_id(id).await?;
    found(event, "Event")?;

    state.events.delete_event(id).await?;

    Ok(JsonResponse::ok("Event deleted successfully").into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::mock_db::MockDb;
    use crate::models::place::{Address, Place, PlaceType};
    use crate::models::user::UserRole;
    use crate::test_support::{access_token_for, build_state, sample_user};
    use axum::body::Body;
    use axum::http::StatusCode;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    fn sample_place() -> Place {
        Place {
            id: Uuid::new_v4(),
            name: "Museu da Cidade".into(),
            place_type: PlaceType::Museum,
            address: Address {
                postal_code: "30190-922".into(),
                street: "Praça da Liberdade".into(),
                number_house: "10".into(),
                complement: None,
            },
        }
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn create_event_requires_an_existing_place() {
        let state = build_state(MockDb::default());

        let err = create_event(
            State(state),
            Json(json!({
                "title": "Feira",
                "eventDate": "2026-09-01T10:00:00Z",
                "place": Uuid::new_v4().to_string()
            })),
        )
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), "Place not found");
    }

    #[tokio::test]
    async fn create_event_links_the_place() {
        let db = MockDb::default();
        let place = sample_place();
        db.places.lock().unwrap().push(place.clone());
        let state = build_state(db);

        let response = create_event(
            State(state),
            Json(json!({
                "title": "Feira",
                "eventDate": "2026-09-01T10:00:00Z",
                "description": "Feira de artesanato",
                "place": place.id.to_string()
            })),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Event created");
        assert_eq!(body["data"]["placeId"], place.id.to_string());
    }

    #[tokio::test]
    async fn unknown_event_lookup_is_a_404() {
        let state = build_state(MockDb::default());
        let err = find_event_by_id(State(state), Path(Uuid::new_v4().to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Event not found");
    }

    #[tokio::test]
    async fn visitor_cannot_create_events_but_can_read_them() {
        let db = MockDb::default();
        let visitor = sample_user(UserRole::Visitor, "v@b.com", "secret");
        db.users.lock().unwrap().push(visitor.clone());
        let state = build_state(db);
        let token = access_token_for(&state, &visitor);

        let app = event_router(state.clone()).with_state(state);

        let write = app
            .clone()
            .oneshot(
                axum::http::Request::post("/")
                    .header("authorization", format!("Bearer {token}"))
                    .header("content-type", "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(write.status(), StatusCode::FORBIDDEN);

        let read = app
            .oneshot(
                axum::http::Request::get("/")
                    .header("authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(read.status(), StatusCode::OK);
    }
}
