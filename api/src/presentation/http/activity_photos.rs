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
use crate::domain::activities::{ActivityPhoto, NewActivityPhoto};
use crate::presentation::http::error::ApiResult;
use crate::presentation::http::extract::{self, PathId, Validate, ValidatedJson};
use crate::presentation::http::photos::PHOTO_URL_MAX;

#[derive(Debug, Serialize, ToSchema)]
pub struct ActivityPhotoResponse {
    pub id: i64,
    pub activity_id: i64,
    pub photo_url: String,
    pub uploaded_at: DateTime<Utc>,
}

impl From<ActivityPhoto> for ActivityPhotoResponse {
    fn from(p: ActivityPhoto) -> Self {
        ActivityPhotoResponse {
            id: p.id,
            activity_id: p.activity_id,
            photo_url: p.photo_url,
            uploaded_at: p.uploaded_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateActivityPhotoRequest {
    pub activity_id: i64,
    pub photo_url: String,
}

impl Validate for CreateActivityPhotoRequest {
    fn validate(&self) -> Result<(), String> {
        extract::positive_id("activity_id", self.activity_id)?;
        extract::required("photo_url", &self.photo_url, PHOTO_URL_MAX)
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/activityPhotos", post(create_activity_photo))
        .route(
            "/activityPhotos/id/:id",
            get(get_activity_photo).delete(delete_activity_photo),
        )
        .route(
            "/activityPhotos/activityId/:id",
            get(list_photos_by_activity).delete(delete_photos_by_activity),
        )
        .with_state(ctx)
}

#[utoipa::path(post, path = "/v1/activityPhotos", tag = "Activities",
    request_body = CreateActivityPhotoRequest, responses(
    (status = 201, body = ActivityPhotoResponse),
    (status = 400, description = "Invalid payload")
))]
pub async fn create_activity_photo(
    State(ctx): State<AppContext>,
    ValidatedJson(req): ValidatedJson<CreateActivityPhotoRequest>,
) -> ApiResult<(StatusCode, Json<ActivityPhotoResponse>)> {
    let photo = ctx
        .activity_photo_repo()
        .create(&NewActivityPhoto {
            activity_id: req.activity_id,
            photo_url: req.photo_url.trim().to_string(),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(photo.into())))
}

#[utoipa::path(get, path = "/v1/activityPhotos/id/{id}", tag = "Activities",
    params(("id" = i64, Path, description = "Photo id")),
    responses((status = 200, body = ActivityPhotoResponse), (status = 404, description = "Not found")))]
pub async fn get_activity_photo(
    State(ctx): State<AppContext>,
    PathId(id): PathId,
) -> ApiResult<Json<ActivityPhotoResponse>> {
    let photo = ctx.activity_photo_repo().get_by_id(id).await?;
    Ok(Json(photo.into()))
}

#[utoipa::path(delete, path = "/v1/activityPhotos/id/{id}", tag = "Activities",
    params(("id" = i64, Path, description = "Photo id")),
    responses((status = 204), (status = 404, description = "Not found")))]
pub async fn delete_activity_photo(
    State(ctx): State<AppContext>,
    PathId(id): PathId,
) -> ApiResult<StatusCode> {
    ctx.activity_photo_repo().delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/v1/activityPhotos/activityId/{id}", tag = "Activities",
    params(("id" = i64, Path, description = "Activity id")),
    responses((status = 200, body = [ActivityPhotoResponse])))]
pub async fn list_photos_by_activity(
    State(ctx): State<AppContext>,
    PathId(activity_id): PathId,
) -> ApiResult<Json<Vec<ActivityPhotoResponse>>> {
    let photos = ctx.activity_photo_repo().list_by_activity(activity_id).await?;
    Ok(Json(photos.into_iter().map(Into::into).collect()))
}

#[utoipa::path(delete, path = "/v1/activityPhotos/activityId/{id}", tag = "Activities",
    params(("id" = i64, Path, description = "Activity id")),
    responses((status = 204), (status = 404, description = "Activity has no photos")))]
pub async fn delete_photos_by_activity(
    State(ctx): State<AppContext>,
    PathId(activity_id): PathId,
) -> ApiResult<StatusCode> {
    ctx.activity_photo_repo()
        .delete_by_activity(activity_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
