use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A user's visit to a place, keyed by the (user, place) pair.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitedPlace {
    pub user_id: Uuid,
    pub place_id: Uuid,
    pub visit_date: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct NewVisit {
    pub user_id: Uuid,
    pub place_id: Uuid,
    pub visit_date: Option<NaiveDateTime>,
}
