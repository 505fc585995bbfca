use async_trait::async_trait;
use uuid::Uuid;

use crate::models::place::{NewPlace, Place};

#[async_trait]
pub trait PlaceRepository: Send + Sync {
    async fn create_place(&self, new_place: &NewPlace) -> Result<Place, sqlx::Error>;
    async fn list_places(&self) -> Result<Vec<Place>, sqlx::Error>;
    async fn find_place_by_id(&self, id: Uuid) -> Result<Option<Place>, sqlx::Error>;
    async fn update_place(&self, id: Uuid, changes: &NewPlace) -> Result<Place, sqlx::Error>;
    async fn delete_place(&self, id: Uuid) -> Result<(), sqlx::Error>;
}
