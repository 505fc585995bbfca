use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::visit_repository::VisitRepository;
use crate::models::visit::{NewVisit, VisitedPlace};

const VISIT_COLUMNS: &str = "user_id, place_id, visit_date";

pub struct PostgresVisitRepository {
    pub pool: PgPool,
}

#[async_trait]
impl VisitRepository for PostgresVisitRepository {
    async fn create_visit(&self, new_visit: &NewVisit) -> Result<VisitedPlace, sqlx::Error> {
        // visit_date falls back to the column default (now()) when absent
        let query = format!(
            "INSERT INTO visited_places (user_id, place_id, visit_date)
             VALUES ($1, $2, COALESCE($3, now()))
             RETURNING {VISIT_COLUMNS}"
        );

        sqlx::query_as::<_, VisitedPlace>(&query)
            .bind(new_visit.user_id)
            .bind(new_visit.place_id)
            .bind(new_visit.visit_date)
            .fetch_one(&self.pool)
            .await
    }

    async fn list_visits(&self) -> Result<Vec<VisitedPlace>, sqlx::Error> {
        let query = format!("SELECT {VISIT_COLUMNS} FROM visited_places ORDER BY visit_date DESC");
        sqlx::query_as::<_, VisitedPlace>(&query)
            .fetch_all(&self.pool)
            .await
    }

    async fn list_visits_by_user(&self, user_id: Uuid) -> Result<Vec<VisitedPlace>, sqlx::Error> {
        let query = format!(
            "SELECT {VISIT_COLUMNS} FROM visited_places
             WHERE user_id = $1 ORDER BY visit_date DESC"
        );
        sqlx::query_as::<_, VisitedPlace>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn list_visits_by_place(&self, place_id: Uuid) -> Result<Vec<VisitedPlace>, sqlx::Error> {
        let query = format!(
            "SELECT {VISIT_COLUMNS} FROM visited_places
             WHERE place_id = $1 ORDER BY visit_date DESC"
        );
        sqlx::query_as::<_, VisitedPlace>(&query)
            .bind(place_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn find_visit(
        &self,
        user_id: Uuid,
        place_id: Uuid,
    ) -> Result<Option<VisitedPlace>, sqlx::Error> {
        let query = format!(
            "SELECT {VISIT_COLUMNS} FROM visited_places
             WHERE user_id = $1 AND place_id = $2"
        );
        sqlx::query_as::<_, VisitedPlace>(&query)
            .bind(user_id)
            .bind(place_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn update_visit_date(
        &self,
        user_id: Uuid,
        place_id: Uuid,
        visit_date: Option<NaiveDateTime>,
    ) -> Result<VisitedPlace, sqlx::Error> {
        let query = format!(
            "UPDATE visited_places
             SET visit_date = COALESCE($3, visit_date)
             WHERE user_id = $1 AND place_id = $2
             RETURNING {VISIT_COLUMNS}"
        );

        sqlx::query_as::<_, VisitedPlace>(&query)
            .bind(user_id)
            .bind(place_id)
            .bind(visit_date)
            .fetch_one(&self.pool)
            .await
    }

    async fn delete_visit(&self, user_id: Uuid, place_id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM visited_places WHERE user_id = $1 AND place_id = $2")
            .bind(user_id)
            .bind(place_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
