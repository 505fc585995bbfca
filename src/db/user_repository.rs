use async_trait::async_trait;
use uuid::Uuid;

use crate::models::event::Booking;
use crate::models::user::{NewUser, User};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, new_user: &NewUser) -> Result<User, sqlx::Error>;
    async fn list_users(&self) -> Result<Vec<User>, sqlx::Error>;
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, sqlx::Error>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error>;
    async fn update_user(&self, id: Uuid, changes: &NewUser) -> Result<User, sqlx::Error>;
    async fn delete_user(&self, id: Uuid) -> Result<(), sqlx::Error>;
    async fn insert_booking(&self, event_id: Uuid, user_id: Uuid) -> Result<Booking, sqlx::Error>;
}
