use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::application::ports::store_error::StoreResult;
use crate::application::ports::subscription_repository::SubscriptionRepository;
use crate::domain::subscriptions::{NewSubscription, Subscription};
use crate::infrastructure::db::{PgPool, bounded, require_affected};

pub struct SqlxSubscriptionRepository {
    pub pool: PgPool,
}

impl SqlxSubscriptionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_subscription(r: &PgRow) -> Subscription {
    Subscription {
        id: r.get("id"),
        user_id: r.get("user_id"),
        email: r.get("email"),
        created_at: r.get("created_at"),
    }
}

#[async_trait]
impl SubscriptionRepository for SqlxSubscriptionRepository {
    async fn create(&self, sub: &NewSubscription) -> StoreResult<Subscription> {
        let row = bounded(
            sqlx::query(
                r#"INSERT INTO subscriptions (user_id, email) VALUES ($1, $2)
                   RETURNING id, user_id, email, created_at"#,
            )
            .bind(sub.user_id)
            .bind(&sub.email)
            .fetch_one(&self.pool),
        )
        .await?;
        Ok(map_subscription(&row))
    }

    async fn list_all(&self) -> StoreResult<Vec<Subscription>> {
        let rows = bounded(
            sqlx::query("SELECT id, user_id, email, created_at FROM subscriptions ORDER BY id")
                .fetch_all(&self.pool),
        )
        .await?;
        Ok(rows.iter().map(map_subscription).collect())
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        let res = bounded(
            sqlx::query("DELETE FROM subscriptions WHERE id = $1")
                .bind(id)
                .execute(&self.pool),
        )
        .await?;
        require_affected(res.rows_affected())
    }

    async fn delete_by_user(&self, user_id: i64) -> StoreResult<()> {
        let res = bounded(
            sqlx::query("DELETE FROM subscriptions WHERE user_id = $1")
                .bind(user_id)
                .execute(&self.pool),
        )
        .await?;
        require_affected(res.rows_affected())
    }

    async fn delete_by_email(&self, email: &str) -> StoreResult<()> {
        let res = bounded(
            sqlx::query("DELETE FROM subscriptions WHERE email = $1")
                .bind(email)
                .execute(&self.pool),
        )
        .await?;
        require_affected(res.rows_affected())
    }
}
