use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::user_repository::UserRepository;
use crate::models::event::Booking;
use crate::models::user::{NewUser, User};

const USER_COLUMNS: &str = "id, name, email, password_hash, profile_pick, role";

pub struct PostgresUserRepository {
    pub pool: PgPool,
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create_user(&self, new_user: &NewUser) -> Result<User, sqlx::Error> {
        let query = format!(
            r#"INSERT INTO "user" (name, email, password_hash, profile_pick, role)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING {USER_COLUMNS}"#
        );

        sqlx::query_as::<_, User>(&query)
            .bind(&new_user.name)
            .bind(&new_user.email)
            .bind(&new_user.password_hash)
            .bind(&new_user.profile_pick)
            .bind(new_user.role)
            .fetch_one(&self.pool)
            .await
    }

    async fn list_users(&self) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(r#"SELECT {USER_COLUMNS} FROM "user" ORDER BY name"#);
        sqlx::query_as::<_, User>(&query).fetch_all(&self.pool).await
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, sqlx::Error> {
        let query = format!(r#"SELECT {USER_COLUMNS} FROM "user" WHERE id = $1"#);
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!(r#"SELECT {USER_COLUMNS} FROM "user" WHERE email = $1"#);
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
    }

    async fn update_user(&self, id: Uuid, changes: &NewUser) -> Result<User, sqlx::Error> {
        let query = format!(
            r#"UPDATE "user"
               SET name = $2, email = $3, password_hash = $4, profile_pick = $5, role = $6
               WHERE id = $1
               RETURNING {USER_COLUMNS}"#
        );

        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&changes.name)
            .bind(&changes.email)
            .bind(&changes.password_hash)
            .bind(&changes.profile_pick)
            .bind(changes.role)
            .fetch_one(&self.pool)
            .await
    }

    async fn delete_user(&self, id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query(r#"DELETE FROM "user" WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn insert_booking(&self, event_id: Uuid, user_id: Uuid) -> Result<Booking, sqlx::Error> {
        sqlx::query_as::<_, Booking>(
            "INSERT INTO booking (event_id, user_id)
             VALUES ($1, $2)
             RETURNING event_id, user_id",
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
    }
}
