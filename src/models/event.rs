use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub event_date: NaiveDateTime,
    pub description: Option<String>,
    pub place_id: Option<Uuid>,
}

#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title: String,
    pub event_date: NaiveDateTime,
    pub description: Option<String>,
    pub place_id: Uuid,
}

/// Row of the user-event join table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub event_id: Uuid,
    pub user_id: Uuid,
}
