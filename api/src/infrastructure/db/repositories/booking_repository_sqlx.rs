use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::application::ports::booking_repository::BookingRepository;
use crate::application::ports::store_error::StoreResult;
use crate::domain::bookings::{Booking, NewBooking};
use crate::infrastructure::db::{PgPool, bounded};

pub struct SqlxBookingRepository {
    pub pool: PgPool,
}

impl SqlxBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_booking(r: &PgRow) -> Booking {
    Booking {
        id: r.get("id"),
        user_id: r.get("user_id"),
        trip_id: r.get("trip_id"),
        status: r.get("status"),
        created_at: r.get("created_at"),
    }
}

#[async_trait]
impl BookingRepository for SqlxBookingRepository {
    async fn create(&self, booking: &NewBooking) -> StoreResult<Booking> {
        let row = bounded(
            sqlx::query(
                r#"INSERT INTO bookings (user_id, trip_id, status) VALUES ($1, $2, $3)
                   RETURNING id, user_id, trip_id, status, created_at"#,
            )
            .bind(booking.user_id)
            .bind(booking.trip_id)
            .bind(&booking.status)
            .fetch_one(&self.pool),
        )
        .await?;
        Ok(map_booking(&row))
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<Booking> {
        let row = bounded(
            sqlx::query(
                "SELECT id, user_id, trip_id, status, created_at FROM bookings WHERE id = $1",
            )
            .bind(id)
            .fetch_one(&self.pool),
        )
        .await?;
        Ok(map_booking(&row))
    }

    async fn list_by_trip(&self, trip_id: i64) -> StoreResult<Vec<Booking>> {
        let rows = bounded(
            sqlx::query(
                r#"SELECT id, user_id, trip_id, status, created_at FROM bookings
                   WHERE trip_id = $1 ORDER BY id"#,
            )
            .bind(trip_id)
            .fetch_all(&self.pool),
        )
        .await?;
        Ok(rows.iter().map(map_booking).collect())
    }

    async fn list_by_user(&self, user_id: i64) -> StoreResult<Vec<Booking>> {
        let rows = bounded(
            sqlx::query(
                r#"SELECT id, user_id, trip_id, status, created_at FROM bookings
                   WHERE user_id = $1 ORDER BY id"#,
            )
            .bind(user_id)
            .fetch_all(&self.pool),
        )
        .await?;
        Ok(rows.iter().map(map_booking).collect())
    }

    async fn update_status(&self, id: i64, status: &str) -> StoreResult<Booking> {
        let row = bounded(
            sqlx::query(
                r#"UPDATE bookings SET status = $1 WHERE id = $2
                   RETURNING id, user_id, trip_id, status, created_at"#,
            )
            .bind(status)
            .bind(id)
            .fetch_one(&self.pool),
        )
        .await?;
        Ok(map_booking(&row))
    }
}
