use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::application::ports::photo_repository::PhotoRepository;
use crate::application::ports::store_error::StoreResult;
use crate::domain::photos::{NewPhoto, Photo};
use crate::infrastructure::db::{PgPool, bounded, require_affected};

pub struct SqlxPhotoRepository {
    pub pool: PgPool,
}

impl SqlxPhotoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_photo(r: &PgRow) -> Photo {
    Photo {
        id: r.get("id"),
        trip_id: r.get("trip_id"),
        photo_url: r.get("photo_url"),
        uploaded_at: r.get("uploaded_at"),
    }
}

#[async_trait]
impl PhotoRepository for SqlxPhotoRepository {
    async fn create(&self, photo: &NewPhoto) -> StoreResult<Photo> {
        let row = bounded(
            sqlx::query(
                r#"INSERT INTO photos (trip_id, photo_url) VALUES ($1, $2)
                   RETURNING id, trip_id, photo_url, uploaded_at"#,
            )
            .bind(photo.trip_id)
            .bind(&photo.photo_url)
            .fetch_one(&self.pool),
        )
        .await?;
        Ok(map_photo(&row))
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<Photo> {
        let row = bounded(
            sqlx::query("SELECT id, trip_id, photo_url, uploaded_at FROM photos WHERE id = $1")
                .bind(id)
                .fetch_one(&self.pool),
        )
        .await?;
        Ok(map_photo(&row))
    }

    async fn list_by_trip(&self, trip_id: i64) -> StoreResult<Vec<Photo>> {
        let rows = bounded(
            sqlx::query(
                r#"SELECT id, trip_id, photo_url, uploaded_at FROM photos
                   WHERE trip_id = $1 ORDER BY id"#,
            )
            .bind(trip_id)
            .fetch_all(&self.pool),
        )
        .await?;
        Ok(rows.iter().map(map_photo).collect())
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        let res = bounded(
            sqlx::query("DELETE FROM photos WHERE id = $1")
                .bind(id)
                .execute(&self.pool),
        )
        .await?;
        require_affected(res.rows_affected())
    }

    async fn delete_by_trip(&self, trip_id: i64) -> StoreResult<()> {
        let res = bounded(
            sqlx::query("DELETE FROM photos WHERE trip_id = $1")
                .bind(trip_id)
                .execute(&self.pool),
        )
        .await?;
        require_affected(res.rows_affected())
    }
}
