use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::application::ports::accommodation_repository::AccommodationPhotoRepository;
use crate::application::ports::store_error::StoreResult;
use crate::domain::accommodations::{AccommodationPhoto, NewAccommodationPhoto};
use crate::infrastructure::db::{PgPool, bounded, require_affected};

pub struct SqlxAccommodationPhotoRepository {
    pub pool: PgPool,
}

impl SqlxAccommodationPhotoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_photo(r: &PgRow) -> AccommodationPhoto {
    AccommodationPhoto {
        id: r.get("id"),
        accommodation_id: r.get("accommodation_id"),
        photo_url: r.get("photo_url"),
        created_at: r.get("created_at"),
    }
}

#[async_trait]
impl AccommodationPhotoRepository for SqlxAccommodationPhotoRepository {
    async fn create(&self, photo: &NewAccommodationPhoto) -> StoreResult<AccommodationPhoto> {
        let row = bounded(
            sqlx::query(
                r#"INSERT INTO accommodation_photos (accommodation_id, photo_url) VALUES ($1, $2)
                   RETURNING id, accommodation_id, photo_url, created_at"#,
            )
            .bind(photo.accommodation_id)
            .bind(&photo.photo_url)
            .fetch_one(&self.pool),
        )
        .await?;
        Ok(map_photo(&row))
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<AccommodationPhoto> {
        let row = bounded(
            sqlx::query(
                r#"SELECT id, accommodation_id, photo_url, created_at
                   FROM accommodation_photos WHERE id = $1"#,
            )
            .bind(id)
            .fetch_one(&self.pool),
        )
        .await?;
        Ok(map_photo(&row))
    }

    async fn list_by_accommodation(
        &self,
        accommodation_id: i64,
    ) -> StoreResult<Vec<AccommodationPhoto>> {
        let rows = bounded(
            sqlx::query(
                r#"SELECT id, accommodation_id, photo_url, created_at
                   FROM accommodation_photos WHERE accommodation_id = $1 ORDER BY id"#,
            )
            .bind(accommodation_id)
            .fetch_all(&self.pool),
        )
        .await?;
        Ok(rows.iter().map(map_photo).collect())
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        let res = bounded(
            sqlx::query("DELETE FROM accommodation_photos WHERE id = $1")
                .bind(id)
                .execute(&self.pool),
        )
        .await?;
        require_affected(res.rows_affected())
    }

    async fn delete_by_accommodation(&self, accommodation_id: i64) -> StoreResult<()> {
        let res = bounded(
            sqlx::query("DELETE FROM accommodation_photos WHERE accommodation_id = $1")
                .bind(accommodation_id)
                .execute(&self.pool),
        )
        .await?;
        require_affected(res.rows_affected())
    }
}
