use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::event_repository::EventRepository;
use crate::models::event::{Event, NewEvent};

const EVENT_COLUMNS: &str = "id, title, event_date, description, place_id";

pub struct PostgresEventRepository {
    pub pool: PgPool,
}

#[async_trait]
impl EventRepository for PostgresEventRepository {
    async fn create_event(&self, new_event: &NewEvent) -> Result<Event, sqlx::Error> {
        let query = format!(
            "INSERT INTO event (title, event_date, description, place_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {EVENT_COLUMNS}"
        );

        sqlx::query_as::<_, Event>(&query)
            .bind(&new_event.title)
            .bind(new_event.event_date)
            .bind(&new_event.description)
            .bind(new_event.place_id)
            .fetch_one(&self.pool)
            .await
    }

    async fn list_events(&self) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!("SELECT {EVENT_COLUMNS} FROM event ORDER BY event_date");
        sqlx::query_as::<_, Event>(&query).fetch_all(&self.pool).await
    }

    async fn find_event_by_id(&self, id: Uuid) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("SELECT {EVENT_COLUMNS} FROM event WHERE id = $1");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn update_event(&self, id: Uuid, changes: &NewEvent) -> Result<Event, sqlx::Error> {
        let query = format!(
            "UPDATE event
             SET title = $2, event_date = $3, description = $4, place_id = $5
             WHERE id = $1
             RETURNING {EVENT_COLUMNS}"
        );

        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(&changes.title)
            .bind(changes.event_date)
            .bind(&changes.description)
            .bind(changes.place_id)
            .fetch_one(&self.pool)
            .await
    }

    async fn delete_event(&self, id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM event WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
