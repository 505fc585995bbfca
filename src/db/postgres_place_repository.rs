use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::place_repository::PlaceRepository;
use crate::models::place::{NewPlace, Place};

const PLACE_COLUMNS: &str = "id, name, place_type, postal_code, street, number_house, complement";

pub struct PostgresPlaceRepository {
    pub pool: PgPool,
}

#[async_trait]
impl PlaceRepository for PostgresPlaceRepository {
    async fn create_place(&self, new_place: &NewPlace) -> Result<Place, sqlx::Error> {
        let query = format!(
            "INSERT INTO place (name, place_type, postal_code, street, number_house, complement)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {PLACE_COLUMNS}"
        );

        sqlx::query_as::<_, Place>(&query)
            .bind(&new_place.name)
            .bind(new_place.place_type)
            .bind(&new_place.address.postal_code)
            .bind(&new_place.address.street)
            .bind(&new_place.address.number_house)
            .bind(&new_place.address.complement)
            .fetch_one(&self.pool)
            .await
    }

    async fn list_places(&self) -> Result<Vec<Place>, sqlx::Error> {
        let query = format!("SELECT {PLACE_COLUMNS} FROM place ORDER BY name");
        sqlx::query_as::<_, Place>(&query).fetch_all(&self.pool).await
    }

    async fn find_place_by_id(&self, id: Uuid) -> Result<Option<Place>, sqlx::Error> {
        let query = format!("SELECT {PLACE_COLUMNS} FROM place WHERE id = $1");
        sqlx::query_as::<_, Place>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn update_place(&self, id: Uuid, changes: &NewPlace) -> Result<Place, sqlx::Error> {
        let query = format!(
            "UPDATE place
             SET name = $2, place_type = $3, postal_code = $4, street = $5,
                 number_house = $6, complement = $7
             WHERE id = $1
             RETURNING {PLACE_COLUMNS}"
        );

        sqlx::query_as::<_, Place>(&query)
            .bind(id)
            .bind(&changes.name)
            .bind(changes.place_type)
            .bind(&changes.address.postal_code)
            .bind(&changes.address.street)
            .bind(&changes.address.number_house)
            .bind(&changes.address.complement)
            .fetch_one(&self.pool)
            .await
    }

    async fn delete_place(&self, id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM place WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
