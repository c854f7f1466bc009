use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::bootstrap::app_context::AppContext;
use crate::domain::invoices::{Invoice, NewInvoice};
use crate::presentation::http::bookings::UpdateStatusRequest;
use crate::presentation::http::error::{ApiError, ApiResult};
use crate::presentation::http::extract::{self, PathId, PathText, Validate, ValidatedJson};

#[derive(Debug, Serialize, ToSchema)]
pub struct InvoiceResponse {
    pub id: i64,
    pub payment_id: i64,
    pub invoice_number: String,
    pub issued_at: DateTime<Utc>,
    pub due_date: NaiveDate,
    pub status: String,
}

impl From<Invoice> for InvoiceResponse {
    fn from(i: Invoice) -> Self {
        InvoiceResponse {
            id: i.id,
            payment_id: i.payment_id,
            invoice_number: i.invoice_number,
            issued_at: i.issued_at,
            due_date: i.due_date,
            status: i.status,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateInvoiceRequest {
    pub payment_id: i64,
    pub invoice_number: String,
    pub due_date: NaiveDate,
    pub status: String,
}

impl Validate for CreateInvoiceRequest {
    fn validate(&self) -> Result<(), String> {
        extract::positive_id("payment_id", self.payment_id)?;
        extract::required("invoice_number", &self.invoice_number, 100)?;
        extract::required("status", &self.status, 50)
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/invoices", post(create_invoice))
        .route(
            "/invoices/invoiceNumber/:number",
            get(get_invoice).patch(update_invoice),
        )
        .route("/invoices/paymentId/:id", get(list_invoices_by_payment))
        .with_state(ctx)
}

fn invoice_number(raw: String) -> Result<String, ApiError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(ApiError::BadRequest("invoice number is required".into()))
    } else {
        Ok(trimmed.to_string())
    }
}

#[utoipa::path(post, path = "/v1/invoices", tag = "Invoices", request_body = CreateInvoiceRequest, responses(
    (status = 201, body = InvoiceResponse),
    (status = 400, description = "Invalid payload"),
    (status = 409, description = "Invoice number already used")
))]
pub async fn create_invoice(
    State(ctx): State<AppContext>,
    ValidatedJson(req): ValidatedJson<CreateInvoiceRequest>,
) -> ApiResult<(StatusCode, Json<InvoiceResponse>)> {
    let invoice = ctx
        .invoice_repo()
        .create(&NewInvoice {
            payment_id: req.payment_id,
            invoice_number: req.invoice_number.trim().to_string(),
            due_date: req.due_date,
            status: req.status.trim().to_string(),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(invoice.into())))
}

#[utoipa::path(get, path = "/v1/invoices/invoiceNumber/{number}", tag = "Invoices",
    params(("number" = String, Path, description = "Invoice number")),
    responses((status = 200, body = InvoiceResponse), (status = 404, description = "Not found")))]
pub async fn get_invoice(
    State(ctx): State<AppContext>,
    PathText(number): PathText,
) -> ApiResult<Json<InvoiceResponse>> {
    let number = invoice_number(number)?;
    let invoice = ctx.invoice_repo().get_by_number(&number).await?;
    Ok(Json(invoice.into()))
}

#[utoipa::path(patch, path = "/v1/invoices/invoiceNumber/{number}", tag = "Invoices",
    params(("number" = String, Path, description = "Invoice number")),
    request_body = UpdateStatusRequest,
    responses((status = 200, body = InvoiceResponse), (status = 404, description = "Not found")))]
pub async fn update_invoice(
    State(ctx): State<AppContext>,
    PathText(number): PathText,
    ValidatedJson(req): ValidatedJson<UpdateStatusRequest>,
) -> ApiResult<Json<InvoiceResponse>> {
    let number = invoice_number(number)?;
    let invoice = ctx
        .invoice_repo()
        .update_status_by_number(&number, req.status.trim())
        .await?;
    Ok(Json(invoice.into()))
}

#[utoipa::path(get, path = "/v1/invoices/paymentId/{id}", tag = "Invoices",
    params(("id" = i64, Path, description = "Payment id")),
    responses((status = 200, body = [InvoiceResponse])))]
pub async fn list_invoices_by_payment(
    State(ctx): State<AppContext>,
    PathId(payment_id): PathId,
) -> ApiResult<Json<Vec<InvoiceResponse>>> {
    let invoices = ctx.invoice_repo().list_by_payment(payment_id).await?;
    Ok(Json(invoices.into_iter().map(Into::into).collect()))
}
