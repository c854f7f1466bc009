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
use crate::domain::accommodations::{Accommodation, AccommodationChanges, NewAccommodation};
use crate::presentation::http::error::ApiResult;
use crate::presentation::http::extract::{self, PathId, Validate, ValidatedJson};

#[derive(Debug, Serialize, ToSchema)]
pub struct AccommodationResponse {
    pub id: i64,
    pub trip_id: i64,
    pub name: String,
    pub description: String,
    pub price_per_night: f64,
    pub created_at: DateTime<Utc>,
}

impl From<Accommodation> for AccommodationResponse {
    fn from(a: Accommodation) -> Self {
        AccommodationResponse {
            id: a.id,
            trip_id: a.trip_id,
            name: a.name,
            description: a.description,
            price_per_night: a.price_per_night,
            created_at: a.created_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAccommodationRequest {
    pub trip_id: i64,
    pub name: String,
    pub description: String,
    pub price_per_night: f64,
}

impl Validate for CreateAccommodationRequest {
    fn validate(&self) -> Result<(), String> {
        extract::positive_id("trip_id", self.trip_id)?;
        extract::required("name", &self.name, 100)?;
        extract::required("description", &self.description, 255)?;
        extract::positive_amount("price_per_night", self.price_per_night)
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateAccommodationRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price_per_night: Option<f64>,
}

impl Validate for UpdateAccommodationRequest {
    fn validate(&self) -> Result<(), String> {
        extract::any_field(&[
            self.name.is_some(),
            self.description.is_some(),
            self.price_per_night.is_some(),
        ])?;
        extract::optional("name", self.name.as_ref(), 100)?;
        extract::optional("description", self.description.as_ref(), 255)?;
        match self.price_per_night {
            Some(p) => extract::positive_amount("price_per_night", p),
            None => Ok(()),
        }
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/accommodations", post(create_accommodation))
        .route(
            "/accommodations/id/:id",
            get(get_accommodation).patch(update_accommodation),
        )
        .route(
            "/accommodations/tripId/:id",
            get(list_accommodations_by_trip),
        )
        .with_state(ctx)
}

#[utoipa::path(post, path = "/v1/accommodations", tag = "Accommodations",
    request_body = CreateAccommodationRequest, responses(
    (status = 201, body = AccommodationResponse),
    (status = 400, description = "Invalid payload")
))]
pub async fn create_accommodation(
    State(ctx): State<AppContext>,
    ValidatedJson(req): ValidatedJson<CreateAccommodationRequest>,
) -> ApiResult<(StatusCode, Json<AccommodationResponse>)> {
    let accommodation = ctx
        .accommodation_repo()
        .create(&NewAccommodation {
            trip_id: req.trip_id,
            name: req.name,
            description: req.description,
            price_per_night: req.price_per_night,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(accommodation.into())))
}

#[utoipa::path(get, path = "/v1/accommodations/id/{id}", tag = "Accommodations",
    params(("id" = i64, Path, description = "Accommodation id")),
    responses((status = 200, body = AccommodationResponse), (status = 404, description = "Not found")))]
pub async fn get_accommodation(
    State(ctx): State<AppContext>,
    PathId(id): PathId,
) -> ApiResult<Json<AccommodationResponse>> {
    let accommodation = ctx.accommodation_repo().get_by_id(id).await?;
    Ok(Json(accommodation.into()))
}

#[utoipa::path(patch, path = "/v1/accommodations/id/{id}", tag = "Accommodations",
    params(("id" = i64, Path, description = "Accommodation id")),
    request_body = UpdateAccommodationRequest,
    responses((status = 200, body = AccommodationResponse), (status = 404, description = "Not found")))]
pub async fn update_accommodation(
    State(ctx): State<AppContext>,
    PathId(id): PathId,
    ValidatedJson(req): ValidatedJson<UpdateAccommodationRequest>,
) -> ApiResult<Json<AccommodationResponse>> {
    let changes = AccommodationChanges {
        name: req.name,
        description: req.description,
        price_per_night: req.price_per_night,
    };
    let accommodation = ctx.accommodation_repo().update_by_id(id, &changes).await?;
    Ok(Json(accommodation.into()))
}

#[utoipa::path(get, path = "/v1/accommodations/tripId/{id}", tag = "Accommodations",
    params(("id" = i64, Path, description = "Trip id")),
    responses((status = 200, body = [AccommodationResponse])))]
pub async fn list_accommodations_by_trip(
    State(ctx): State<AppContext>,
    PathId(trip_id): PathId,
) -> ApiResult<Json<Vec<AccommodationResponse>>> {
    let items = ctx.accommodation_repo().list_by_trip(trip_id).await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}
