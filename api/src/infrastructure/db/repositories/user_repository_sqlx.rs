use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::application::ports::store_error::StoreResult;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::{NewUser, User, UserChanges};
use crate::infrastructure::db::{PgPool, bounded, require_affected};

pub struct SqlxUserRepository {
    pub pool: PgPool,
}

impl SqlxUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_user(r: &PgRow) -> User {
    User {
        id: r.get("id"),
        email: r.get("email"),
        password_hash: r.get("password_hash"),
        first_name: r.get("first_name"),
        last_name: r.get("last_name"),
        phone: r.get("phone"),
        created_at: r.get("created_at"),
    }
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn create(&self, user: &NewUser) -> StoreResult<User> {
        let row = bounded(
            sqlx::query(
                r#"INSERT INTO users (email, password_hash, first_name, last_name, phone)
                   VALUES ($1, $2, $3, $4, $5)
                   RETURNING id, email, password_hash, first_name, last_name, phone, created_at"#,
            )
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.phone)
            .fetch_one(&self.pool),
        )
        .await?;
        Ok(map_user(&row))
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<User> {
        let row = bounded(
            sqlx::query(
                r#"SELECT id, email, password_hash, first_name, last_name, phone, created_at
                   FROM users WHERE id = $1"#,
            )
            .bind(id)
            .fetch_one(&self.pool),
        )
        .await?;
        Ok(map_user(&row))
    }

    async fn get_by_email(&self, email: &str) -> StoreResult<User> {
        let row = bounded(
            sqlx::query(
                r#"SELECT id, email, password_hash, first_name, last_name, phone, created_at
                   FROM users WHERE email = $1"#,
            )
            .bind(email)
            .fetch_one(&self.pool),
        )
        .await?;
        Ok(map_user(&row))
    }

    async fn update_by_id(&self, id: i64, changes: &UserChanges) -> StoreResult<User> {
        let row = bounded(
            sqlx::query(
                r#"UPDATE users
                   SET email = COALESCE($1, email), phone = COALESCE($2, phone)
                   WHERE id = $3
                   RETURNING id, email, password_hash, first_name, last_name, phone, created_at"#,
            )
            .bind(changes.email.as_deref())
            .bind(changes.phone.as_deref())
            .bind(id)
            .fetch_one(&self.pool),
        )
        .await?;
        Ok(map_user(&row))
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        let res = bounded(
            sqlx::query("DELETE FROM users WHERE id = $1")
                .bind(id)
                .execute(&self.pool),
        )
        .await?;
        require_affected(res.rows_affected())
    }
}
