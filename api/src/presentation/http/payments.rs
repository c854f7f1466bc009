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
use crate::domain::payments::{NewPayment, Payment};
use crate::presentation::http::bookings::UpdateStatusRequest;
use crate::presentation::http::error::ApiResult;
use crate::presentation::http::extract::{self, PathId, Validate, ValidatedJson};

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentResponse {
    pub id: i64,
    pub booking_id: i64,
    pub user_id: i64,
    pub amount: f64,
    pub status: String,
    pub transaction_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<Payment> for PaymentResponse {
    fn from(p: Payment) -> Self {
        PaymentResponse {
            id: p.id,
            booking_id: p.booking_id,
            user_id: p.user_id,
            amount: p.amount,
            status: p.status,
            transaction_id: p.transaction_id,
            created_at: p.created_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePaymentRequest {
    pub booking_id: i64,
    pub user_id: i64,
    pub amount: f64,
    pub status: String,
    // older clients send the misspelled key
    #[serde(alias = "transation_id")]
    pub transaction_id: String,
}

impl Validate for CreatePaymentRequest {
    fn validate(&self) -> Result<(), String> {
        extract::positive_id("booking_id", self.booking_id)?;
        extract::positive_id("user_id", self.user_id)?;
        extract::positive_amount("amount", self.amount)?;
        extract::required("status", &self.status, 50)?;
        extract::required("transaction_id", &self.transaction_id, 255)
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/payments", post(create_payment))
        .route("/payments/id/:id", get(get_payment).patch(update_payment))
        .route("/payments/userId/:id", get(list_payments_by_user))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/v1/payments", tag = "Payments", request_body = CreatePaymentRequest, responses(
    (status = 201, body = PaymentResponse),
    (status = 400, description = "Invalid payload")
))]
pub async fn create_payment(
    State(ctx): State<AppContext>,
    ValidatedJson(req): ValidatedJson<CreatePaymentRequest>,
) -> ApiResult<(StatusCode, Json<PaymentResponse>)> {
    let payment = ctx
        .payment_repo()
        .create(&NewPayment {
            booking_id: req.booking_id,
            user_id: req.user_id,
            amount: req.amount,
            status: req.status.trim().to_string(),
            transaction_id: req.transaction_id.trim().to_string(),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(payment.into())))
}

#[utoipa::path(get, path = "/v1/payments/id/{id}", tag = "Payments",
    params(("id" = i64, Path, description = "Payment id")),
    responses((status = 200, body = PaymentResponse), (status = 404, description = "Not found")))]
pub async fn get_payment(
    State(ctx): State<AppContext>,
    PathId(id): PathId,
) -> ApiResult<Json<PaymentResponse>> {
    let payment = ctx.payment_repo().get_by_id(id).await?;
    Ok(Json(payment.into()))
}

#[utoipa::path(patch, path = "/v1/payments/id/{id}", tag = "Payments",
    params(("id" = i64, Path, description = "Payment id")),
    request_body = UpdateStatusRequest,
    responses((status = 200, body = PaymentResponse), (status = 404, description = "Not found")))]
pub async fn update_payment(
    State(ctx): State<AppContext>,
    PathId(id): PathId,
    ValidatedJson(req): ValidatedJson<UpdateStatusRequest>,
) -> ApiResult<Json<PaymentResponse>> {
    let payment = ctx
        .payment_repo()
        .update_status(id, req.status.trim())
        .await?;
    Ok(Json(payment.into()))
}

#[utoipa::path(get, path = "/v1/payments/userId/{id}", tag = "Payments",
    params(("id" = i64, Path, description = "User id")),
    responses((status = 200, body = [PaymentResponse])))]
pub async fn list_payments_by_user(
    State(ctx): State<AppContext>,
    PathId(user_id): PathId,
) -> ApiResult<Json<Vec<PaymentResponse>>> {
    let payments = ctx.payment_repo().list_by_user(user_id).await?;
    Ok(Json(payments.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_legacy_transaction_key() {
        let req: CreatePaymentRequest = serde_json::from_value(serde_json::json!({
            "booking_id": 1,
            "user_id": 2,
            "amount": 120.0,
            "status": "paid",
            "transation_id": "tx-1"
        }))
        .unwrap();
        assert_eq!(req.transaction_id, "tx-1");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn zero_amount_is_rejected() {
        let req = CreatePaymentRequest {
            booking_id: 1,
            user_id: 2,
            amount: 0.0,
            status: "paid".into(),
            transaction_id: "tx-1".into(),
        };
        assert!(req.validate().is_err());
    }
}
