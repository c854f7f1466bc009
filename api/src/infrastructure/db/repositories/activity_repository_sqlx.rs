use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::application::ports::activity_repository::ActivityRepository;
use crate::application::ports::store_error::StoreResult;
use crate::domain::activities::{Activity, ActivityChanges, NewActivity};
use crate::infrastructure::db::{PgPool, bounded, require_affected};

pub struct SqlxActivityRepository {
    pub pool: PgPool,
}

impl SqlxActivityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_activity(r: &PgRow) -> Activity {
    Activity {
        id: r.get("id"),
        trip_id: r.get("trip_id"),
        name: r.get("name"),
        description: r.get("description"),
        price: r.get("price"),
        created_at: r.get("created_at"),
    }
}

#[async_trait]
impl ActivityRepository for SqlxActivityRepository {
    async fn create(&self, activity: &NewActivity) -> StoreResult<Activity> {
        let row = bounded(
            sqlx::query(
                r#"INSERT INTO activities (trip_id, name, description, price)
                   VALUES ($1, $2, $3, $4)
                   RETURNING id, trip_id, name, description, price, created_at"#,
            )
            .bind(activity.trip_id)
            .bind(&activity.name)
            .bind(&activity.description)
            .bind(activity.price)
            .fetch_one(&self.pool),
        )
        .await?;
        Ok(map_activity(&row))
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<Activity> {
        let row = bounded(
            sqlx::query(
                r#"SELECT id, trip_id, name, description, price, created_at
                   FROM activities WHERE id = $1"#,
            )
            .bind(id)
            .fetch_one(&self.pool),
        )
        .await?;
        Ok(map_activity(&row))
    }

    async fn list_by_trip(&self, trip_id: i64) -> StoreResult<Vec<Activity>> {
        let rows = bounded(
            sqlx::query(
                r#"SELECT id, trip_id, name, description, price, created_at
                   FROM activities WHERE trip_id = $1 ORDER BY id"#,
            )
            .bind(trip_id)
            .fetch_all(&self.pool),
        )
        .await?;
        Ok(rows.iter().map(map_activity).collect())
    }

    async fn update_by_id(&self, id: i64, changes: &ActivityChanges) -> StoreResult<Activity> {
        let row = bounded(
            sqlx::query(
                r#"UPDATE activities SET
                       name = COALESCE($1, name),
                       description = COALESCE($2, description),
                       price = COALESCE($3, price)
                   WHERE id = $4
                   RETURNING id, trip_id, name, description, price, created_at"#,
            )
            .bind(changes.name.as_deref())
            .bind(changes.description.as_deref())
            .bind(changes.price)
            .bind(id)
            .fetch_one(&self.pool),
        )
        .await?;
        Ok(map_activity(&row))
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        let res = bounded(
            sqlx::query("DELETE FROM activities WHERE id = $1")
                .bind(id)
                .execute(&self.pool),
        )
        .await?;
        require_affected(res.rows_affected())
    }
}
