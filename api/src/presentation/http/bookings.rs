use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::bootstrap::app_context::AppContext;
use crate::domain::bookings::{Booking, NewBooking};
use crate::presentation::http::error::ApiResult;
use crate::presentation::http::extract::{self, PathId, Validate, ValidatedJson};

const STATUS_MAX: usize = 50;

#[derive(Debug, Serialize, ToSchema)]
pub struct BookingResponse {
    pub id: i64,
    pub user_id: i64,
    pub trip_id: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(b: Booking) -> Self {
        BookingResponse {
            id: b.id,
            user_id: b.user_id,
            trip_id: b.trip_id,
            status: b.status,
            created_at: b.created_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBookingRequest {
    pub user_id: i64,
    pub trip_id: i64,
    pub status: String,
}

impl Validate for CreateBookingRequest {
    fn validate(&self) -> Result<(), String> {
        extract::positive_id("user_id", self.user_id)?;
        extract::positive_id("trip_id", self.trip_id)?;
        extract::required("status", &self.status, STATUS_MAX)
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    pub status: String,
}

impl Validate for UpdateStatusRequest {
    fn validate(&self) -> Result<(), String> {
        extract::required("status", &self.status, STATUS_MAX)
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/bookings", post(create_booking))
        .route("/bookings/id/:id", get(get_booking).patch(update_booking))
        .route("/bookings/tripId/:id", get(list_bookings_by_trip))
        .route("/bookings/userId/:id", get(list_bookings_by_user))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/v1/bookings", tag = "Bookings", request_body = CreateBookingRequest, responses(
    (status = 201, body = BookingResponse),
    (status = 400, description = "Invalid payload")
))]
pub async fn create_booking(
    State(ctx): State<AppContext>,
    ValidatedJson(req): ValidatedJson<CreateBookingRequest>,
) -> ApiResult<(StatusCode, Json<BookingResponse>)> {
    let booking = ctx
        .booking_repo()
        .create(&NewBooking {
            user_id: req.user_id,
            trip_id: req.trip_id,
            status: req.status.trim().to_string(),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(booking.into())))
}

#[utoipa::path(get, path = "/v1/bookings/id/{id}", tag = "Bookings",
    params(("id" = i64, Path, description = "Booking id")),
    responses((status = 200, body = BookingResponse), (status = 404, description = "Not found")))]
pub async fn get_booking(
    State(ctx): State<AppContext>,
    PathId(id): PathId,
) -> ApiResult<Json<BookingResponse>> {
    let booking = ctx.booking_repo().get_by_id(id).await?;
    Ok(Json(booking.into()))
}

#[utoipa::path(patch, path = "/v1/bookings/id/{id}", tag = "Bookings",
    params(("id" = i64, Path, description = "Booking id")),
    request_body = UpdateStatusRequest,
    responses((status = 200, body = BookingResponse), (status = 404, description = "Not found")))]
pub async fn update_booking(
    State(ctx): State<AppContext>,
    PathId(id): PathId,
    ValidatedJson(req): ValidatedJson<UpdateStatusRequest>,
) -> ApiResult<Json<BookingResponse>> {
    let booking = ctx
        .booking_repo()
        .update_status(id, req.status.trim())
        .await?;
    Ok(Json(booking.into()))
}

#[utoipa::path(get, path = "/v1/bookings/tripId/{id}", tag = "Bookings",
    params(("id" = i64, Path, description = "Trip id")),
    responses((status = 200, body = [BookingResponse])))]
pub async fn list_bookings_by_trip(
    State(ctx): State<AppContext>,
    PathId(trip_id): PathId,
) -> ApiResult<Json<Vec<BookingResponse>>> {
    let bookings = ctx.booking_repo().list_by_trip(trip_id).await?;
    Ok(Json(bookings.into_iter().map(Into::into).collect()))
}

#[utoipa::path(get, path = "/v1/bookings/userId/{id}", tag = "Bookings",
    params(("id" = i64, Path, description = "User id")),
    responses((status = 200, body = [BookingResponse])))]
pub async fn list_bookings_by_user(
    State(ctx): State<AppContext>,
    PathId(user_id): PathId,
) -> ApiResult<Json<Vec<BookingResponse>>> {
    let bookings = ctx.booking_repo().list_by_user(user_id).await?;
    Ok(Json(bookings.into_iter().map(Into::into).collect()))
}
