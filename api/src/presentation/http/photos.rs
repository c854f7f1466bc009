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
use crate::domain::photos::{NewPhoto, Photo};
use crate::presentation::http::error::ApiResult;
use crate::presentation::http::extract::{self, PathId, Validate, ValidatedJson};

/// Longest photo URL accepted by every photo resource.
pub const PHOTO_URL_MAX: usize = 2048;

#[derive(Debug, Serialize, ToSchema)]
pub struct PhotoResponse {
    pub id: i64,
    pub trip_id: i64,
    pub photo_url: String,
    pub uploaded_at: DateTime<Utc>,
}

impl From<Photo> for PhotoResponse {
    fn from(p: Photo) -> Self {
        PhotoResponse {
            id: p.id,
            trip_id: p.trip_id,
            photo_url: p.photo_url,
            uploaded_at: p.uploaded_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePhotoRequest {
    pub trip_id: i64,
    pub photo_url: String,
}

impl Validate for CreatePhotoRequest {
    fn validate(&self) -> Result<(), String> {
        extract::positive_id("trip_id", self.trip_id)?;
        extract::required("photo_url", &self.photo_url, PHOTO_URL_MAX)
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/photos", post(create_photo))
        .route("/photos/id/:id", get(get_photo).delete(delete_photo))
        .route(
            "/photos/tripId/:id",
            get(list_photos_by_trip).delete(delete_photos_by_trip),
        )
        .with_state(ctx)
}

#[utoipa::path(post, path = "/v1/photos", tag = "Photos", request_body = CreatePhotoRequest, responses(
    (status = 201, body = PhotoResponse),
    (status = 400, description = "Invalid payload")
))]
pub async fn create_photo(
    State(ctx): State<AppContext>,
    ValidatedJson(req): ValidatedJson<CreatePhotoRequest>,
) -> ApiResult<(StatusCode, Json<PhotoResponse>)> {
    let photo = ctx
        .photo_repo()
        .create(&NewPhoto {
            trip_id: req.trip_id,
            photo_url: req.photo_url.trim().to_string(),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(photo.into())))
}

#[utoipa::path(get, path = "/v1/photos/id/{id}", tag = "Photos",
    params(("id" = i64, Path, description = "Photo id")),
    responses((status = 200, body = PhotoResponse), (status = 404, description = "Not found")))]
pub async fn get_photo(
    State(ctx): State<AppContext>,
    PathId(id): PathId,
) -> ApiResult<Json<PhotoResponse>> {
    let photo = ctx.photo_repo().get_by_id(id).await?;
    Ok(Json(photo.into()))
}

#[utoipa::path(delete, path = "/v1/photos/id/{id}", tag = "Photos",
    params(("id" = i64, Path, description = "Photo id")),
    responses((status = 204), (status = 404, description = "Not found")))]
pub async fn delete_photo(State(ctx): State<AppContext>, PathId(id): PathId) -> ApiResult<StatusCode> {
    ctx.photo_repo().delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/v1/photos/tripId/{id}", tag = "Photos",
    params(("id" = i64, Path, description = "Trip id")),
    responses((status = 200, body = [PhotoResponse])))]
pub async fn list_photos_by_trip(
    State(ctx): State<AppContext>,
    PathId(trip_id): PathId,
) -> ApiResult<Json<Vec<PhotoResponse>>> {
    let photos = ctx.photo_repo().list_by_trip(trip_id).await?;
    Ok(Json(photos.into_iter().map(Into::into).collect()))
}

#[utoipa::path(delete, path = "/v1/photos/tripId/{id}", tag = "Photos",
    params(("id" = i64, Path, description = "Trip id")),
    responses((status = 204), (status = 404, description = "Trip has no photos")))]
pub async fn delete_photos_by_trip(
    State(ctx): State<AppContext>,
    PathId(trip_id): PathId,
) -> ApiResult<StatusCode> {
    ctx.photo_repo().delete_by_trip(trip_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
