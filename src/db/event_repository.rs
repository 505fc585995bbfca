use async_trait::async_trait;
use uuid::Uuid;

use crate::models::event::{Event, NewEvent};

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create_event(&self, new_event: &NewEvent) -> Result<Event, sqlx::Error>;
    async fn list_events(&self) -> Result<Vec<Event>, sqlx::Error>;
    async fn find_event_by_id(&self, id: Uuid) -> Result<Option<Event>, sqlx::Error>;
    async fn update_event(&self, id: Uuid, changes: &NewEvent) -> Result<Event, sqlx::Error>;
    async fn delete_event(&self, id: Uuid) -> Result<(), sqlx::Error>;
}
