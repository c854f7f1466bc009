use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::application::ports::accommodation_repository::AccommodationRepository;
use crate::application::ports::store_error::StoreResult;
use crate::domain::accommodations::{Accommodation, AccommodationChanges, NewAccommodation};
use crate::infrastructure::db::{PgPool, bounded};

pub struct SqlxAccommodationRepository {
    pub pool: PgPool,
}

impl SqlxAccommodationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_accommodation(r: &PgRow) -> Accommodation {
    Accommodation {
        id: r.get("id"),
        trip_id: r.get("trip_id"),
        name: r.get("name"),
        description: r.get("description"),
        price_per_night: r.get("price_per_night"),
        created_at: r.get("created_at"),
    }
}

#[async_trait]
impl AccommodationRepository for SqlxAccommodationRepository {
    async fn create(&self, accommodation: &NewAccommodation) -> StoreResult<Accommodation> {
        let row = bounded(
            sqlx::query(
                r#"INSERT INTO accommodations (trip_id, name, description, price_per_night)
                   VALUES ($1, $2, $3, $4)
                   RETURNING id, trip_id, name, description, price_per_night, created_at"#,
            )
            .bind(accommodation.trip_id)
            .bind(&accommodation.name)
            .bind(&accommodation.description)
            .bind(accommodation.price_per_night)
            .fetch_one(&self.pool),
        )
        .await?;
        Ok(map_accommodation(&row))
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<Accommodation> {
        let row = bounded(
            sqlx::query(
                r#"SELECT id, trip_id, name, description, price_per_night, created_at
                   FROM accommodations WHERE id = $1"#,
            )
            .bind(id)
            .fetch_one(&self.pool),
        )
        .await?;
        Ok(map_accommodation(&row))
    }

    async fn list_by_trip(&self, trip_id: i64) -> StoreResult<Vec<Accommodation>> {
        let rows = bounded(
            sqlx::query(
                r#"SELECT id, trip_id, name, description, price_per_night, created_at
                   FROM accommodations WHERE trip_id = $1 ORDER BY id"#,
            )
            .bind(trip_id)
            .fetch_all(&self.pool),
        )
        .await?;
        Ok(rows.iter().map(map_accommodation).collect())
    }

    async fn update_by_id(
        &self,
        id: i64,
        changes: &AccommodationChanges,
    ) -> StoreResult<Accommodation> {
        let row = bounded(
            sqlx::query(
                r#"UPDATE accommodations SET
                       name = COALESCE($1, name),
                       description = COALESCE($2, description),
                       price_per_night = COALESCE($3, price_per_night)
                   WHERE id = $4
                   RETURNING id, trip_id, name, description, price_per_night, created_at"#,
            )
            .bind(changes.name.as_deref())
            .bind(changes.description.as_deref())
            .bind(changes.price_per_night)
            .bind(id)
            .fetch_one(&self.pool),
        )
        .await?;
        Ok(map_accommodation(&row))
    }
}
