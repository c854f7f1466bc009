use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::application::ports::activity_repository::ActivityPhotoRepository;
use crate::application::ports::store_error::StoreResult;
use crate::domain::activities::{ActivityPhoto, NewActivityPhoto};
use crate::infrastructure::db::{PgPool, bounded, require_affected};

pub struct SqlxActivityPhotoRepository {
    pub pool: PgPool,
}

impl SqlxActivityPhotoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_photo(r: &PgRow) -> ActivityPhoto {
    ActivityPhoto {
        id: r.get("id"),
        activity_id: r.get("activity_id"),
        photo_url: r.get("photo_url"),
        uploaded_at: r.get("uploaded_at"),
    }
}

#[async_trait]
impl ActivityPhotoRepository for SqlxActivityPhotoRepository {
    async fn create(&self, photo: &NewActivityPhoto) -> StoreResult<ActivityPhoto> {
        let row = bounded(
            sqlx::query(
                r#"INSERT INTO activity_photos (activity_id, photo_url) VALUES ($1, $2)
                   RETURNING id, activity_id, photo_url, uploaded_at"#,
            )
            .bind(photo.activity_id)
            .bind(&photo.photo_url)
            .fetch_one(&self.pool),
        )
        .await?;
        Ok(map_photo(&row))
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<ActivityPhoto> {
        let row = bounded(
            sqlx::query(
                r#"SELECT id, activity_id, photo_url, uploaded_at
                   FROM activity_photos WHERE id = $1"#,
            )
            .bind(id)
            .fetch_one(&self.pool),
        )
        .await?;
        Ok(map_photo(&row))
    }

    async fn list_by_activity(&self, activity_id: i64) -> StoreResult<Vec<ActivityPhoto>> {
        let rows = bounded(
            sqlx::query(
                r#"SELECT id, activity_id, photo_url, uploaded_at
                   FROM activity_photos WHERE activity_id = $1 ORDER BY id"#,
            )
            .bind(activity_id)
            .fetch_all(&self.pool),
        )
        .await?;
        Ok(rows.iter().map(map_photo).collect())
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        let res = bounded(
            sqlx::query("DELETE FROM activity_photos WHERE id = $1")
                .bind(id)
                .execute(&self.pool),
        )
        .await?;
        require_affected(res.rows_affected())
    }

    async fn delete_by_activity(&self, activity_id: i64) -> StoreResult<()> {
        let res = bounded(
            sqlx::query("DELETE FROM activity_photos WHERE activity_id = $1")
                .bind(activity_id)
                .execute(&self.pool),
        )
        .await?;
        require_affected(res.rows_affected())
    }
}
