use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::use_cases::auth::register::Register;
use crate::bootstrap::app_context::AppContext;
use crate::domain::users::{User, UserChanges};
use crate::presentation::http::auth::RegisterRequest;
use crate::presentation::http::error::ApiResult;
use crate::presentation::http::extract::{self, PathId, PathText, Validate, ValidatedJson};

/// Public view of a user; the password hash never leaves the server.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        UserResponse {
            id: u.id,
            email: u.email,
            first_name: u.first_name,
            last_name: u.last_name,
            phone: u.phone,
            created_at: u.created_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl Validate for UpdateUserRequest {
    fn validate(&self) -> Result<(), String> {
        extract::any_field(&[self.email.is_some(), self.phone.is_some()])?;
        if let Some(email) = &self.email {
            extract::email("email", email)?;
        }
        extract::optional("phone", self.phone.as_ref(), 255)
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/users", post(create_user))
        .route(
            "/users/id/:id",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .route("/users/email/:email", get(get_user_by_email))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/v1/users", tag = "Users", request_body = RegisterRequest, responses(
    (status = 201, body = UserResponse),
    (status = 400, description = "Invalid payload"),
    (status = 409, description = "Email already registered")
))]
pub async fn create_user(
    State(ctx): State<AppContext>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let repo = ctx.user_repo();
    let uc = Register {
        repo: repo.as_ref(),
    };
    let user = uc.execute(&req.into()).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[utoipa::path(get, path = "/v1/users/id/{id}", tag = "Users",
    params(("id" = i64, Path, description = "User id")),
    responses((status = 200, body = UserResponse), (status = 404, description = "Not found")))]
pub async fn get_user(
    State(ctx): State<AppContext>,
    PathId(id): PathId,
) -> ApiResult<Json<UserResponse>> {
    let user = ctx.user_repo().get_by_id(id).await?;
    Ok(Json(user.into()))
}

#[utoipa::path(get, path = "/v1/users/email/{email}", tag = "Users",
    params(("email" = String, Path, description = "Registered email")),
    responses((status = 200, body = UserResponse), (status = 404, description = "Not found")))]
pub async fn get_user_by_email(
    State(ctx): State<AppContext>,
    PathText(email): PathText,
) -> ApiResult<Json<UserResponse>> {
    let user = ctx.user_repo().get_by_email(email.trim()).await?;
    Ok(Json(user.into()))
}

#[utoipa::path(patch, path = "/v1/users/id/{id}", tag = "Users",
    params(("id" = i64, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses((status = 200, body = UserResponse), (status = 404, description = "Not found")))]
pub async fn update_user(
    State(ctx): State<AppContext>,
    PathId(id): PathId,
    ValidatedJson(req): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let changes = UserChanges {
        email: req.email.map(|e| e.trim().to_string()),
        phone: req.phone,
    };
    let user = ctx.user_repo().update_by_id(id, &changes).await?;
    Ok(Json(user.into()))
}

#[utoipa::path(delete, path = "/v1/users/id/{id}", tag = "Users",
    params(("id" = i64, Path, description = "User id")),
    responses((status = 204), (status = 404, description = "Not found")))]
pub async fn delete_user(State(ctx): State<AppContext>, PathId(id): PathId) -> ApiResult<StatusCode> {
    ctx.user_repo().delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_update_is_rejected() {
        let req = UpdateUserRequest {
            email: None,
            phone: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn update_email_must_be_well_formed() {
        let req = UpdateUserRequest {
            email: Some("nope".into()),
            phone: None,
        };
        assert!(req.validate().is_err());
    }
}
