use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::bootstrap::app_context::AppContext;
use crate::domain::trips::{NewTrip, Trip, TripChanges};
use crate::presentation::http::error::{ApiError, ApiResult};
use crate::presentation::http::extract::{self, PathId, PathText, Validate, ValidatedJson};

#[derive(Debug, Serialize, ToSchema)]
pub struct TripResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub location: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub price: f64,
    pub seats: i32,
    pub available_seats: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Trip> for TripResponse {
    fn from(t: Trip) -> Self {
        TripResponse {
            id: t.id,
            name: t.name,
            description: t.description,
            location: t.location,
            start_date: t.start_date,
            end_date: t.end_date,
            price: t.price,
            seats: t.seats,
            available_seats: t.available_seats,
            created_at: t.created_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTripRequest {
    pub name: String,
    pub description: String,
    pub location: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub price: f64,
    pub seats: i32,
    pub available_seats: i32,
}

impl Validate for CreateTripRequest {
    fn validate(&self) -> Result<(), String> {
        extract::required("name", &self.name, 100)?;
        extract::required("description", &self.description, 255)?;
        extract::required("location", &self.location, 100)?;
        extract::date_order(self.start_date, self.end_date)?;
        extract::positive_amount("price", self.price)?;
        check_seats(self.seats, self.available_seats)
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateTripRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub price: Option<f64>,
    pub seats: Option<i32>,
    pub available_seats: Option<i32>,
}

impl UpdateTripRequest {
    fn touches_schedule_or_capacity(&self) -> bool {
        self.start_date.is_some()
            || self.end_date.is_some()
            || self.seats.is_some()
            || self.available_seats.is_some()
    }
}

impl Validate for UpdateTripRequest {
    fn validate(&self) -> Result<(), String> {
        extract::any_field(&[
            self.name.is_some(),
            self.description.is_some(),
            self.location.is_some(),
            self.start_date.is_some(),
            self.end_date.is_some(),
            self.price.is_some(),
            self.seats.is_some(),
            self.available_seats.is_some(),
        ])?;
        extract::optional("name", self.name.as_ref(), 100)?;
        extract::optional("description", self.description.as_ref(), 255)?;
        extract::optional("location", self.location.as_ref(), 100)?;
        if let Some(price) = self.price {
            extract::positive_amount("price", price)?;
        }
        Ok(())
    }
}

fn check_seats(seats: i32, available: i32) -> Result<(), String> {
    if seats <= 0 {
        return Err("seats must be greater than zero".into());
    }
    if available < 0 || available > seats {
        return Err("available_seats must be between 0 and seats".into());
    }
    Ok(())
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/trips", get(list_trips).post(create_trip))
        .route("/trips/id/:id", get(get_trip).patch(update_trip))
        .route("/trips/location/:location", get(list_trips_by_location))
        .route("/trips/upcoming", get(list_upcoming_trips))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/v1/trips", tag = "Trips", request_body = CreateTripRequest, responses(
    (status = 201, body = TripResponse),
    (status = 400, description = "Invalid payload")
))]
pub async fn create_trip(
    State(ctx): State<AppContext>,
    ValidatedJson(req): ValidatedJson<CreateTripRequest>,
) -> ApiResult<(StatusCode, Json<TripResponse>)> {
    let new_trip = NewTrip {
        name: req.name,
        description: req.description,
        location: req.location,
        start_date: req.start_date,
        end_date: req.end_date,
        price: req.price,
        seats: req.seats,
        available_seats: req.available_seats,
    };
    let trip = ctx.trip_repo().create(&new_trip).await?;
    tracing::debug!(trip_id = trip.id, "trip_created");
    Ok((StatusCode::CREATED, Json(trip.into())))
}

#[utoipa::path(get, path = "/v1/trips", tag = "Trips",
    responses((status = 200, body = [TripResponse])))]
pub async fn list_trips(State(ctx): State<AppContext>) -> ApiResult<Json<Vec<TripResponse>>> {
    let trips = ctx.trip_repo().list_all().await?;
    Ok(Json(trips.into_iter().map(Into::into).collect()))
}

#[utoipa::path(get, path = "/v1/trips/id/{id}", tag = "Trips",
    params(("id" = i64, Path, description = "Trip id")),
    responses((status = 200, body = TripResponse), (status = 404, description = "Not found")))]
pub async fn get_trip(
    State(ctx): State<AppContext>,
    PathId(id): PathId,
) -> ApiResult<Json<TripResponse>> {
    let trip = ctx.trip_repo().get_by_id(id).await?;
    Ok(Json(trip.into()))
}

#[utoipa::path(get, path = "/v1/trips/location/{location}", tag = "Trips",
    params(("location" = String, Path, description = "Exact location")),
    responses((status = 200, body = [TripResponse])))]
pub async fn list_trips_by_location(
    State(ctx): State<AppContext>,
    PathText(location): PathText,
) -> ApiResult<Json<Vec<TripResponse>>> {
    let trips = ctx.trip_repo().list_by_location(location.trim()).await?;
    Ok(Json(trips.into_iter().map(Into::into).collect()))
}

#[utoipa::path(get, path = "/v1/trips/upcoming", tag = "Trips",
    responses((status = 200, body = [TripResponse], description = "Trips starting today or later, soonest first")))]
pub async fn list_upcoming_trips(
    State(ctx): State<AppContext>,
) -> ApiResult<Json<Vec<TripResponse>>> {
    let today = Utc::now().date_naive();
    let trips = ctx.trip_repo().list_upcoming(today).await?;
    Ok(Json(trips.into_iter().map(Into::into).collect()))
}

#[utoipa::path(patch, path = "/v1/trips/id/{id}", tag = "Trips",
    params(("id" = i64, Path, description = "Trip id")),
    request_body = UpdateTripRequest,
    responses((status = 200, body = TripResponse), (status = 404, description = "Not found")))]
pub async fn update_trip(
    State(ctx): State<AppContext>,
    PathId(id): PathId,
    ValidatedJson(req): ValidatedJson<UpdateTripRequest>,
) -> ApiResult<Json<TripResponse>> {
    let repo = ctx.trip_repo();
    // Cross-field rules need the stored values for whatever the patch leaves out
    if req.touches_schedule_or_capacity() {
        let current = repo.get_by_id(id).await?;
        extract::date_order(
            req.start_date.unwrap_or(current.start_date),
            req.end_date.unwrap_or(current.end_date),
        )
        .and_then(|_| {
            check_seats(
                req.seats.unwrap_or(current.seats),
                req.available_seats.unwrap_or(current.available_seats),
            )
        })
        .map_err(ApiError::BadRequest)?;
    }
    let changes = TripChanges {
        name: req.name,
        description: req.description,
        location: req.location,
        start_date: req.start_date,
        end_date: req.end_date,
        price: req.price,
        seats: req.seats,
        available_seats: req.available_seats,
    };
    let trip = repo.update_by_id(id, &changes).await?;
    Ok(Json(trip.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn beach_trip() -> CreateTripRequest {
        serde_json::from_value(serde_json::json!({
            "name": "Beach Trip",
            "description": "Sun and sand",
            "location": "Goa",
            "start_date": "2025-12-01",
            "end_date": "2025-12-10",
            "price": 499.99,
            "seats": 20,
            "available_seats": 20
        }))
        .unwrap()
    }

    #[test]
    fn valid_trip_passes() {
        assert!(beach_trip().validate().is_ok());
    }

    #[test]
    fn overbooked_trip_is_rejected() {
        let mut trip = beach_trip();
        trip.available_seats = 21;
        assert!(trip.validate().is_err());
    }

    #[test]
    fn reversed_dates_are_rejected() {
        let mut trip = beach_trip();
        std::mem::swap(&mut trip.start_date, &mut trip.end_date);
        assert!(trip.validate().is_err());
    }

    #[test]
    fn partial_update_needs_a_field() {
        assert!(UpdateTripRequest::default().validate().is_err());
        let req = UpdateTripRequest {
            price: Some(350.0),
            ..Default::default()
        };
        assert!(req.validate().is_ok());
        assert!(!req.touches_schedule_or_capacity());
    }
}
