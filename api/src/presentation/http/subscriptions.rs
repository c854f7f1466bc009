use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{delete, get},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::bootstrap::app_context::AppContext;
use crate::domain::subscriptions::{NewSubscription, Subscription};
use crate::presentation::http::error::ApiResult;
use crate::presentation::http::extract::{self, PathId, PathText, Validate, ValidatedJson};

#[derive(Debug, Serialize, ToSchema)]
pub struct SubscriptionResponse {
    pub id: i64,
    pub user_id: i64,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<Subscription> for SubscriptionResponse {
    fn from(s: Subscription) -> Self {
        SubscriptionResponse {
            id: s.id,
            user_id: s.user_id,
            email: s.email,
            created_at: s.created_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSubscriptionRequest {
    pub user_id: i64,
    pub email: String,
}

impl Validate for CreateSubscriptionRequest {
    fn validate(&self) -> Result<(), String> {
        extract::positive_id("user_id", self.user_id)?;
        extract::email("email", &self.email)
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route(
            "/subscriptions",
            get(list_subscriptions).post(create_subscription),
        )
        .route("/subscriptions/id/:id", delete(delete_subscription))
        .route(
            "/subscriptions/userId/:id",
            delete(delete_subscriptions_by_user),
        )
        .route(
            "/subscriptions/email/:email",
            delete(delete_subscription_by_email),
        )
        .with_state(ctx)
}

#[utoipa::path(post, path = "/v1/subscriptions", tag = "Subscriptions",
    request_body = CreateSubscriptionRequest, responses(
    (status = 201, body = SubscriptionResponse),
    (status = 400, description = "Invalid payload"),
    (status = 409, description = "Email already subscribed")
))]
pub async fn create_subscription(
    State(ctx): State<AppContext>,
    ValidatedJson(req): ValidatedJson<CreateSubscriptionRequest>,
) -> ApiResult<(StatusCode, Json<SubscriptionResponse>)> {
    let sub = ctx
        .subscription_repo()
        .create(&NewSubscription {
            user_id: req.user_id,
            email: req.email.trim().to_string(),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(sub.into())))
}

#[utoipa::path(get, path = "/v1/subscriptions", tag = "Subscriptions",
    responses((status = 200, body = [SubscriptionResponse])))]
pub async fn list_subscriptions(
    State(ctx): State<AppContext>,
) -> ApiResult<Json<Vec<SubscriptionResponse>>> {
    let subs = ctx.subscription_repo().list_all().await?;
    Ok(Json(subs.into_iter().map(Into::into).collect()))
}

#[utoipa::path(delete, path = "/v1/subscriptions/id/{id}", tag = "Subscriptions",
    params(("id" = i64, Path, description = "Subscription id")),
    responses((status = 204), (status = 404, description = "Not found")))]
pub async fn delete_subscription(
    State(ctx): State<AppContext>,
    PathId(id): PathId,
) -> ApiResult<StatusCode> {
    ctx.subscription_repo().delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(delete, path = "/v1/subscriptions/userId/{id}", tag = "Subscriptions",
    params(("id" = i64, Path, description = "User id")),
    responses((status = 204), (status = 404, description = "User has no subscriptions")))]
pub async fn delete_subscriptions_by_user(
    State(ctx): State<AppContext>,
    PathId(user_id): PathId,
) -> ApiResult<StatusCode> {
    ctx.subscription_repo().delete_by_user(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(delete, path = "/v1/subscriptions/email/{email}", tag = "Subscriptions",
    params(("email" = String, Path, description = "Subscribed email")),
    responses((status = 204), (status = 404, description = "Not found")))]
pub async fn delete_subscription_by_email(
    State(ctx): State<AppContext>,
    PathText(email): PathText,
) -> ApiResult<StatusCode> {
    ctx.subscription_repo().delete_by_email(email.trim()).await?;
    Ok(StatusCode::NO_CONTENT)
}
