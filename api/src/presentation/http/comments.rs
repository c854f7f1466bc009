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
use crate::domain::comments::{Comment, NewComment};
use crate::presentation::http::error::ApiResult;
use crate::presentation::http::extract::{self, PathId, Validate, ValidatedJson};

#[derive(Debug, Serialize, ToSchema)]
pub struct CommentResponse {
    pub id: i64,
    pub user_id: i64,
    pub trip_id: i64,
    pub comment: String,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(c: Comment) -> Self {
        CommentResponse {
            id: c.id,
            user_id: c.user_id,
            trip_id: c.trip_id,
            comment: c.comment,
            rating: c.rating,
            created_at: c.created_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCommentRequest {
    pub user_id: i64,
    pub trip_id: i64,
    pub comment: String,
    pub rating: i32,
}

impl Validate for CreateCommentRequest {
    fn validate(&self) -> Result<(), String> {
        extract::positive_id("user_id", self.user_id)?;
        extract::positive_id("trip_id", self.trip_id)?;
        extract::required("comment", &self.comment, 2000)?;
        extract::rating(self.rating)
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/comments", post(create_comment))
        .route("/comments/id/:id", get(get_comment).delete(delete_comment))
        .route(
            "/comments/tripId/:id",
            get(list_comments_by_trip).delete(delete_comments_by_trip),
        )
        .with_state(ctx)
}

#[utoipa::path(post, path = "/v1/comments", tag = "Comments", request_body = CreateCommentRequest, responses(
    (status = 201, body = CommentResponse),
    (status = 400, description = "Invalid payload")
))]
pub async fn create_comment(
    State(ctx): State<AppContext>,
    ValidatedJson(req): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<(StatusCode, Json<CommentResponse>)> {
    let comment = ctx
        .comment_repo()
        .create(&NewComment {
            user_id: req.user_id,
            trip_id: req.trip_id,
            comment: req.comment,
            rating: req.rating,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(comment.into())))
}

#[utoipa::path(get, path = "/v1/comments/id/{id}", tag = "Comments",
    params(("id" = i64, Path, description = "Comment id")),
    responses((status = 200, body = CommentResponse), (status = 404, description = "Not found")))]
pub async fn get_comment(
    State(ctx): State<AppContext>,
    PathId(id): PathId,
) -> ApiResult<Json<CommentResponse>> {
    let comment = ctx.comment_repo().get_by_id(id).await?;
    Ok(Json(comment.into()))
}

#[utoipa::path(delete, path = "/v1/comments/id/{id}", tag = "Comments",
    params(("id" = i64, Path, description = "Comment id")),
    responses((status = 204), (status = 404, description = "Not found")))]
pub async fn delete_comment(State(ctx): State<AppContext>, PathId(id): PathId) -> ApiResult<StatusCode> {
    ctx.comment_repo().delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/v1/comments/tripId/{id}", tag = "Comments",
    params(("id" = i64, Path, description = "Trip id")),
    responses((status = 200, body = [CommentResponse])))]
pub async fn list_comments_by_trip(
    State(ctx): State<AppContext>,
    PathId(trip_id): PathId,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    let comments = ctx.comment_repo().list_by_trip(trip_id).await?;
    Ok(Json(comments.into_iter().map(Into::into).collect()))
}

#[utoipa::path(delete, path = "/v1/comments/tripId/{id}", tag = "Comments",
    params(("id" = i64, Path, description = "Trip id")),
    responses((status = 204), (status = 404, description = "Trip has no comments")))]
pub async fn delete_comments_by_trip(
    State(ctx): State<AppContext>,
    PathId(trip_id): PathId,
) -> ApiResult<StatusCode> {
    ctx.comment_repo().delete_by_trip(trip_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
