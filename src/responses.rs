use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Success envelope: `{ "message": ..., "data": ... }`, `data` omitted when
/// there is nothing to attach. Errors use the same single-message shape via
/// `ApiError`.
#[derive(Serialize, Deserialize)]
pub struct JsonResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonResponse {
    pub fn ok(message: &str) -> impl IntoResponse {
        (
            StatusCode::OK,
            Json(JsonResponse {
                message: message.to_string(),
                data: None,
            }),
        )
    }

    pub fn ok_with(message: &str, data: Value) -> impl IntoResponse {
        (
            StatusCode::OK,
            Json(JsonResponse {
                message: message.to_string(),
                data: Some(data),
            }),
        )
    }

    pub fn created(message: &str, data: Value) -> impl IntoResponse {
        (
            StatusCode::CREATED,
            Json(JsonResponse {
                message: message.to_string(),
                data: Some(data),
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::JsonResponse;
    use axum::response::IntoResponse;
    use serde_json::{from_slice, json};

    #[tokio::test]
    async fn ok_omits_data() {
        let resp = JsonResponse::ok("No users found").into_response();
        assert_eq!(resp.status(), axum::http::StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
        let value: serde_json::Value = from_slice(&body).unwrap();
        assert_eq!(value, json!({ "message": "No users found" }));
    }

    #[tokio::test]
    async fn created_carries_data() {
        let resp = JsonResponse::created("User registered", json!({ "name": "A" })).into_response();
        assert_eq!(resp.status(), axum::http::StatusCode::CREATED);

        let body = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
        let parsed: JsonResponse = from_slice(&body).unwrap();
        assert_eq!(parsed.message, "User registered");
        assert_eq!(parsed.data, Some(json!({ "name": "A" })));
    }
}
