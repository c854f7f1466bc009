use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::application::ports::store_error::StoreResult;
use crate::application::ports::trip_repository::TripRepository;
use crate::domain::trips::{NewTrip, Trip, TripChanges};
use crate::infrastructure::db::{PgPool, bounded};

pub struct SqlxTripRepository {
    pub pool: PgPool,
}

impl SqlxTripRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_trip(r: &PgRow) -> Trip {
    Trip {
        id: r.get("id"),
        name: r.get("name"),
        description: r.get("description"),
        location: r.get("location"),
        start_date: r.get("start_date"),
        end_date: r.get("end_date"),
        price: r.get("price"),
        seats: r.get("seats"),
        available_seats: r.get("available_seats"),
        created_at: r.get("created_at"),
    }
}

#[async_trait]
impl TripRepository for SqlxTripRepository {
    async fn create(&self, trip: &NewTrip) -> StoreResult<Trip> {
        let row = bounded(
            sqlx::query(
                r#"INSERT INTO trips (name, description, location, start_date, end_date, price, seats, available_seats)
                   VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                   RETURNING id, name, description, location, start_date, end_date, price, seats, available_seats, created_at"#,
            )
            .bind(&trip.name)
            .bind(&trip.description)
            .bind(&trip.location)
            .bind(trip.start_date)
            .bind(trip.end_date)
            .bind(trip.price)
            .bind(trip.seats)
            .bind(trip.available_seats)
            .fetch_one(&self.pool),
        )
        .await?;
        Ok(map_trip(&row))
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<Trip> {
        let row = bounded(
            sqlx::query(
                r#"SELECT id, name, description, location, start_date, end_date, price, seats, available_seats, created_at
                   FROM trips WHERE id = $1"#,
            )
            .bind(id)
            .fetch_one(&self.pool),
        )
        .await?;
        Ok(map_trip(&row))
    }

    async fn list_all(&self) -> StoreResult<Vec<Trip>> {
        let rows = bounded(
            sqlx::query(
                r#"SELECT id, name, description, location, start_date, end_date, price, seats, available_seats, created_at
                   FROM trips ORDER BY id"#,
            )
            .fetch_all(&self.pool),
        )
        .await?;
        Ok(rows.iter().map(map_trip).collect())
    }

    async fn list_by_location(&self, location: &str) -> StoreResult<Vec<Trip>> {
        let rows = bounded(
            sqlx::query(
                r#"SELECT id, name, description, location, start_date, end_date, price, seats, available_seats, created_at
                   FROM trips WHERE location = $1 ORDER BY start_date, id"#,
            )
            .bind(location)
            .fetch_all(&self.pool),
        )
        .await?;
        Ok(rows.iter().map(map_trip).collect())
    }

    async fn list_upcoming(&self, from: NaiveDate) -> StoreResult<Vec<Trip>> {
        let rows = bounded(
            sqlx::query(
                r#"SELECT id, name, description, location, start_date, end_date, price, seats, available_seats, created_at
                   FROM trips WHERE start_date >= $1 ORDER BY start_date, id"#,
            )
            .bind(from)
            .fetch_all(&self.pool),
        )
        .await?;
        Ok(rows.iter().map(map_trip).collect())
    }

    async fn update_by_id(&self, id: i64, changes: &TripChanges) -> StoreResult<Trip> {
        let row = bounded(
            sqlx::query(
                r#"UPDATE trips SET
                       name = COALESCE($1, name),
                       description = COALESCE($2, description),
                       location = COALESCE($3, location),
                       start_date = COALESCE($4, start_date),
                       end_date = COALESCE($5, end_date),
                       price = COALESCE($6, price),
                       seats = COALESCE($7, seats),
                       available_seats = COALESCE($8, available_seats)
                   WHERE id = $9
                   RETURNING id, name, description, location, start_date, end_date, price, seats, available_seats, created_at"#,
            )
            .bind(changes.name.as_deref())
            .bind(changes.description.as_deref())
            .bind(changes.location.as_deref())
            .bind(changes.start_date)
            .bind(changes.end_date)
            .bind(changes.price)
            .bind(changes.seats)
            .bind(changes.available_seats)
            .bind(id)
            .fetch_one(&self.pool),
        )
        .await?;
        Ok(map_trip(&row))
    }
}
