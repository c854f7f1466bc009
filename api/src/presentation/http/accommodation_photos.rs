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
use crate::domain::accommodations::{AccommodationPhoto, NewAccommodationPhoto};
use crate::presentation::http::error::ApiResult;
use crate::presentation::http::extract::{self, PathId, Validate, ValidatedJson};
use crate::presentation::http::photos::PHOTO_URL_MAX;

#[derive(Debug, Serialize, ToSchema)]
pub struct AccommodationPhotoResponse {
    pub id: i64,
    pub accommodation_id: i64,
    pub photo_url: String,
    pub created_at: DateTime<Utc>,
}

impl From<AccommodationPhoto> for AccommodationPhotoResponse {
    fn from(p: AccommodationPhoto) -> Self {
        AccommodationPhotoResponse {
            id: p.id,
            accommodation_id: p.accommodation_id,
            photo_url: p.photo_url,
            created_at: p.created_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAccommodationPhotoRequest {
    #[serde(alias = "accomodation_id")]
    pub accommodation_id: i64,
    pub photo_url: String,
}

impl Validate for CreateAccommodationPhotoRequest {
    fn validate(&self) -> Result<(), String> {
        extract::positive_id("accommodation_id", self.accommodation_id)?;
        extract::required("photo_url", &self.photo_url, PHOTO_URL_MAX)
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/accommodationPhotos", post(create_accommodation_photo))
        .route(
            "/accommodationPhotos/id/:id",
            get(get_accommodation_photo).delete(delete_accommodation_photo),
        )
        .route(
            "/accommodationPhotos/accommodationId/:id",
            get(list_photos_by_accommodation).delete(delete_photos_by_accommodation),
        )
        .with_state(ctx)
}

#[utoipa::path(post, path = "/v1/accommodationPhotos", tag = "Accommodations",
    request_body = CreateAccommodationPhotoRequest, responses(
    (status = 201, body = AccommodationPhotoResponse),
    (status = 400, description = "Invalid payload")
))]
pub async fn create_accommodation_photo(
    State(ctx): State<AppContext>,
    ValidatedJson(req): ValidatedJson<CreateAccommodationPhotoRequest>,
) -> ApiResult<(StatusCode, Json<AccommodationPhotoResponse>)> {
    let photo = ctx
        .accommodation_photo_repo()
        .create(&NewAccommodationPhoto {
            accommodation_id: req.accommodation_id,
            photo_url: req.photo_url.trim().to_string(),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(photo.into())))
}

#[utoipa::path(get, path = "/v1/accommodationPhotos/id/{id}", tag = "Accommodations",
    params(("id" = i64, Path, description = "Photo id")),
    responses((status = 200, body = AccommodationPhotoResponse), (status = 404, description = "Not found")))]
pub async fn get_accommodation_photo(
    State(ctx): State<AppContext>,
    PathId(id): PathId,
) -> ApiResult<Json<AccommodationPhotoResponse>> {
    let photo = ctx.accommodation_photo_repo().get_by_id(id).await?;
    Ok(Json(photo.into()))
}

#[utoipa::path(delete, path = "/v1/accommodationPhotos/id/{id}", tag = "Accommodations",
    params(("id" = i64, Path, description = "Photo id")),
    responses((status = 204), (status = 404, description = "Not found")))]
pub async fn delete_accommodation_photo(
    State(ctx): State<AppContext>,
    PathId(id): PathId,
) -> ApiResult<StatusCode> {
    ctx.accommodation_photo_repo().delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/v1/accommodationPhotos/accommodationId/{id}", tag = "Accommodations",
    params(("id" = i64, Path, description = "Accommodation id")),
    responses((status = 200, body = [AccommodationPhotoResponse])))]
pub async fn list_photos_by_accommodation(
    State(ctx): State<AppContext>,
    PathId(accommodation_id): PathId,
) -> ApiResult<Json<Vec<AccommodationPhotoResponse>>> {
    let photos = ctx
        .accommodation_photo_repo()
        .list_by_accommodation(accommodation_id)
        .await?;
    Ok(Json(photos.into_iter().map(Into::into).collect()))
}

#[utoipa::path(delete, path = "/v1/accommodationPhotos/accommodationId/{id}", tag = "Accommodations",
    params(("id" = i64, Path, description = "Accommodation id")),
    responses((status = 204), (status = 404, description = "Accommodation has no photos")))]
pub async fn delete_photos_by_accommodation(
    State(ctx): State<AppContext>,
    PathId(accommodation_id): PathId,
) -> ApiResult<StatusCode> {
    ctx.accommodation_photo_repo()
        .delete_by_accommodation(accommodation_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
