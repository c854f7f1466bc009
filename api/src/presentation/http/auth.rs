use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::ports::StoreError;
use crate::application::use_cases::auth::login::{Login as LoginUc, LoginRequest as LoginDto};
use crate::application::use_cases::auth::me::GetMe;
use crate::application::use_cases::auth::register::{
    Register as RegisterUc, RegisterRequest as RegisterDto,
};
use crate::bootstrap::app_context::AppContext;
use crate::bootstrap::config::Config;
use crate::domain::users::User;
use crate::presentation::http::error::{ApiError, ApiResult};
use crate::presentation::http::extract::{self, Validate, ValidatedJson};
use crate::presentation::http::users::UserResponse;

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
}

impl Validate for RegisterRequest {
    fn validate(&self) -> Result<(), String> {
        extract::required("first_name", &self.first_name, 100)?;
        extract::required("last_name", &self.last_name, 100)?;
        extract::email("email", &self.email)?;
        extract::password(&self.password)?;
        extract::required("phone", &self.phone, 255)
    }
}

impl From<RegisterRequest> for RegisterDto {
    fn from(req: RegisterRequest) -> Self {
        RegisterDto {
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
            phone: req.phone,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), String> {
        extract::required("email", &self.email, 255)?;
        extract::required("password", &self.password, 24)
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub iat: usize,
    pub exp: usize,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/v1/register", tag = "Auth", request_body = RegisterRequest, responses(
    (status = 201, body = AuthResponse),
    (status = 400, description = "Invalid payload"),
    (status = 409, description = "Email already registered")
))]
pub async fn register(
    State(ctx): State<AppContext>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let repo = ctx.user_repo();
    let uc = RegisterUc {
        repo: repo.as_ref(),
    };
    let user = uc.execute(&req.into()).await?;
    let token = issue_token(&ctx.cfg, &user)?;
    tracing::info!(user_id = user.id, "user_registered");
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: user.into(),
        }),
    ))
}

#[utoipa::path(post, path = "/v1/login", tag = "Auth", request_body = LoginRequest, responses(
    (status = 200, body = AuthResponse),
    (status = 401, description = "Unknown email or wrong password")
))]
pub async fn login(
    State(ctx): State<AppContext>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let repo = ctx.user_repo();
    let uc = LoginUc {
        repo: repo.as_ref(),
    };
    let dto = LoginDto {
        email: req.email,
        password: req.password,
    };
    let user = uc.execute(&dto).await?.ok_or(ApiError::Unauthorized)?;
    let token = issue_token(&ctx.cfg, &user)?;
    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

#[utoipa::path(get, path = "/v1/me", tag = "Auth", security(("bearerAuth" = [])), responses(
    (status = 200, body = UserResponse),
    (status = 401, description = "Missing or invalid token")
))]
pub async fn me(State(ctx): State<AppContext>, bearer: Bearer) -> ApiResult<Json<UserResponse>> {
    let claims = validate_bearer(&ctx.cfg, &bearer)?;
    let id: i64 = claims.sub.parse().map_err(|_| ApiError::Unauthorized)?;
    let repo = ctx.user_repo();
    let uc = GetMe {
        repo: repo.as_ref(),
    };
    match uc.execute(id).await {
        Ok(user) => Ok(Json(user.into())),
        // token outlived its user
        Err(StoreError::NotFound) => Err(ApiError::Unauthorized),
        Err(e) => Err(e.into()),
    }
}

pub fn issue_token(cfg: &Config, user: &User) -> anyhow::Result<String> {
    let now = chrono::Utc::now().timestamp().max(0) as usize;
    let claims = Claims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        iat: now,
        exp: now.saturating_add(usize::try_from(cfg.jwt_expires_secs).unwrap_or(0)),
    };
    let token = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(cfg.jwt_secret.as_bytes()),
    )?;
    Ok(token)
}

pub fn validate_bearer(cfg: &Config, bearer: &Bearer) -> Result<Claims, ApiError> {
    let data = jsonwebtoken::decode::<Claims>(
        &bearer.0,
        &DecodingKey::from_secret(cfg.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| ApiError::Unauthorized)?;
    Ok(data.claims)
}

// --- Bearer extractor ---

pub struct Bearer(pub String);

#[axum::async_trait]
impl<S> FromRequestParts<S> for Bearer
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|auth| auth.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| Bearer(t.to_string()))
            .ok_or(ApiError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: 7,
            email: "ana@example.com".into(),
            password_hash: String::new(),
            first_name: "Ana".into(),
            last_name: "Silva".into(),
            phone: "555-0100".into(),
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn token_round_trips_user_identity() {
        let cfg = Config::from_lookup(|_| None).unwrap();
        let token = issue_token(&cfg, &user()).unwrap();
        let claims = validate_bearer(&cfg, &Bearer(token)).unwrap();
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.email, "ana@example.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn huge_expiry_still_issues_a_valid_token() {
        let cfg = Config::from_lookup(|key| {
            (key == "JWT_EXPIRES_SECS").then(|| i64::MAX.to_string())
        })
        .unwrap();
        let token = issue_token(&cfg, &user()).unwrap();
        let claims = validate_bearer(&cfg, &Bearer(token)).unwrap();
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let cfg = Config::from_lookup(|_| None).unwrap();
        let other = Config::from_lookup(|key| {
            (key == "JWT_SECRET").then(|| "some-other-secret-value".to_string())
        })
        .unwrap();
        let token = issue_token(&other, &user()).unwrap();
        assert!(matches!(
            validate_bearer(&cfg, &Bearer(token)),
            Err(ApiError::Unauthorized)
        ));
    }

    #[test]
    fn register_payload_rules() {
        let mut req = RegisterRequest {
            first_name: "Ana".into(),
            last_name: "Silva".into(),
            email: "ana@example.com".into(),
            password: "correct-horse".into(),
            phone: "555-0100".into(),
        };
        assert!(req.validate().is_ok());
        req.password = "short".into();
        assert!(req.validate().is_err());
    }
}
