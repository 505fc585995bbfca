use async_trait::async_trait;
use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::models::visit::{NewVisit, VisitedPlace};

#[async_trait]
pub trait VisitRepository: Send + Sync {
    async fn create_visit(&self, new_visit: &NewVisit) -> Result<VisitedPlace, sqlx::Error>;
    async fn list_visits(&self) -> Result<Vec<VisitedPlace>, sqlx::Error>;
    async fn list_visits_by_user(&self, user_id: Uuid) -> Result<Vec<VisitedPlace>, sqlx::Error>;
    async fn list_visits_by_place(&self, place_id: Uuid) -> Result<Vec<VisitedPlace>, sqlx::Error>;
    async fn find_visit(
        &self,
        user_id: Uuid,
        place_id: Uuid,
    ) -> Result<Option<VisitedPlace>, sqlx::Error>;
    /// Updates the visit date of an existing record; `None` keeps the stored
    /// date unchanged.
    async fn update_visit_date(
        &self,
        user_id: Uuid,
        place_id: Uuid,
        visit_date: Option<NaiveDateTime>,
    ) -> Result<VisitedPlace, sqlx::Error>;
    async fn delete_visit(&self, user_id: Uuid, place_id: Uuid) -> Result<(), sqlx::Error>;
}
