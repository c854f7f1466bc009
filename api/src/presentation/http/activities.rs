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
use crate::domain::activities::{Activity, ActivityChanges, NewActivity};
use crate::presentation::http::error::ApiResult;
use crate::presentation::http::extract::{self, PathId, Validate, ValidatedJson};

#[derive(Debug, Serialize, ToSchema)]
pub struct ActivityResponse {
    pub id: i64,
    pub trip_id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub created_at: DateTime<Utc>,
}

impl From<Activity> for ActivityResponse {
    fn from(a: Activity) -> Self {
        ActivityResponse {
            id: a.id,
            trip_id: a.trip_id,
            name: a.name,
            description: a.description,
            price: a.price,
            created_at: a.created_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateActivityRequest {
    pub trip_id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
}

impl Validate for CreateActivityRequest {
    fn validate(&self) -> Result<(), String> {
        extract::positive_id("trip_id", self.trip_id)?;
        extract::required("name", &self.name, 100)?;
        extract::required("description", &self.description, 255)?;
        extract::positive_amount("price", self.price)
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateActivityRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
}

impl Validate for UpdateActivityRequest {
    fn validate(&self) -> Result<(), String> {
        extract::any_field(&[
            self.name.is_some(),
            self.description.is_some(),
            self.price.is_some(),
        ])?;
        extract::optional("name", self.name.as_ref(), 100)?;
        extract::optional("description", self.description.as_ref(), 255)?;
        match self.price {
            Some(p) => extract::positive_amount("price", p),
            None => Ok(()),
        }
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/activities", post(create_activity))
        .route(
            "/activities/id/:id",
            get(get_activity)
                .patch(update_activity)
                .delete(delete_activity),
        )
        .route("/activities/tripId/:id", get(list_activities_by_trip))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/v1/activities", tag = "Activities",
    request_body = CreateActivityRequest, responses(
    (status = 201, body = ActivityResponse),
    (status = 400, description = "Invalid payload")
))]
pub async fn create_activity(
    State(ctx): State<AppContext>,
    ValidatedJson(req): ValidatedJson<CreateActivityRequest>,
) -> ApiResult<(StatusCode, Json<ActivityResponse>)> {
    let activity = ctx
        .activity_repo()
        .create(&NewActivity {
            trip_id: req.trip_id,
            name: req.name,
            description: req.description,
            price: req.price,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(activity.into())))
}

#[utoipa::path(get, path = "/v1/activities/id/{id}", tag = "Activities",
    params(("id" = i64, Path, description = "Activity id")),
    responses((status = 200, body = ActivityResponse), (status = 404, description = "Not found")))]
pub async fn get_activity(
    State(ctx): State<AppContext>,
    PathId(id): PathId,
) -> ApiResult<Json<ActivityResponse>> {
    let activity = ctx.activity_repo().get_by_id(id).await?;
    Ok(Json(activity.into()))
}

#[utoipa::path(patch, path = "/v1/activities/id/{id}", tag = "Activities",
    params(("id" = i64, Path, description = "Activity id")),
    request_body = UpdateActivityRequest,
    responses((status = 200, body = ActivityResponse), (status = 404, description = "Not found")))]
pub async fn update_activity(
    State(ctx): State<AppContext>,
    PathId(id): PathId,
    ValidatedJson(req): ValidatedJson<UpdateActivityRequest>,
) -> ApiResult<Json<ActivityResponse>> {
    let changes = ActivityChanges {
        name: req.name,
        description: req.description,
        price: req.price,
    };
    let activity = ctx.activity_repo().update_by_id(id, &changes).await?;
    Ok(Json(activity.into()))
}

#[utoipa::path(delete, path = "/v1/activities/id/{id}", tag = "Activities",
    params(("id" = i64, Path, description = "Activity id")),
    responses((status = 204), (status = 404, description = "Not found")))]
pub async fn delete_activity(
    State(ctx): State<AppContext>,
    PathId(id): PathId,
) -> ApiResult<StatusCode> {
    ctx.activity_repo().delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/v1/activities/tripId/{id}", tag = "Activities",
    params(("id" = i64, Path, description = "Trip id")),
    responses((status = 200, body = [ActivityResponse])))]
pub async fn list_activities_by_trip(
    State(ctx): State<AppContext>,
    PathId(trip_id): PathId,
) -> ApiResult<Json<Vec<ActivityResponse>>> {
    let activities = ctx.activity_repo().list_by_trip(trip_id).await?;
    Ok(Json(activities.into_iter().map(Into::into).collect()))
}
