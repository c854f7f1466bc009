use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;

use crate::presentation::http::error::ApiError;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Field-level checks run after a payload has been decoded.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

/// `Json<T>` that also runs [`Validate`]; both failures become 400.
pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rej| ApiError::BadRequest(rej.body_text()))?;
        value.validate().map_err(ApiError::BadRequest)?;
        Ok(Self(value))
    }
}

/// Positive integer id taken from the single path segment.
pub struct PathId(pub i64);

#[axum::async_trait]
impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rej| ApiError::BadRequest(rej.body_text()))?;
        parse_id(&raw).map(PathId).map_err(ApiError::BadRequest)
    }
}

/// Free-text path segment (location, email, invoice number).
pub struct PathText(pub String);

#[axum::async_trait]
impl<S> FromRequestParts<S> for PathText
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rej| ApiError::BadRequest(rej.body_text()))?;
        Ok(Self(raw))
    }
}

pub fn parse_id(raw: &str) -> Result<i64, String> {
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(format!("invalid id `{raw}`: expected a positive integer")),
    }
}

pub fn required(field: &str, value: &str, max: usize) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} is required"));
    }
    max_len(field, value, max)
}

pub fn optional(field: &str, value: Option<&String>, max: usize) -> Result<(), String> {
    match value {
        Some(v) => required(field, v, max),
        None => Ok(()),
    }
}

pub fn max_len(field: &str, value: &str, max: usize) -> Result<(), String> {
    if value.chars().count() > max {
        Err(format!("{field} must be at most {max} characters"))
    } else {
        Ok(())
    }
}

pub fn email(field: &str, value: &str) -> Result<(), String> {
    required(field, value, 255)?;
    if EMAIL_RE.is_match(value.trim()) {
        Ok(())
    } else {
        Err(format!("{field} must be a valid email address"))
    }
}

pub fn password(value: &str) -> Result<(), String> {
    let len = value.chars().count();
    if (8..=24).contains(&len) {
        Ok(())
    } else {
        Err("password must be between 8 and 24 characters".into())
    }
}

pub fn positive_id(field: &str, value: i64) -> Result<(), String> {
    if value > 0 {
        Ok(())
    } else {
        Err(format!("{field} must be a positive id"))
    }
}

pub fn positive_amount(field: &str, value: f64) -> Result<(), String> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(format!("{field} must be greater than zero"))
    }
}

pub fn date_order(start: NaiveDate, end: NaiveDate) -> Result<(), String> {
    if end < start {
        Err("end_date must not be before start_date".into())
    } else {
        Ok(())
    }
}

pub fn rating(value: i32) -> Result<(), String> {
    if (1..=5).contains(&value) {
        Ok(())
    } else {
        Err("rating must be between 1 and 5".into())
    }
}

pub fn any_field(present: &[bool]) -> Result<(), String> {
    if present.iter().any(|p| *p) {
        Ok(())
    } else {
        Err("at least one field must be provided".into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_required_field_names_the_field() {
        assert_eq!(required("name", "   ", 100).unwrap_err(), "name is required");
        assert!(required("name", "Beach Trip", 100).is_ok());
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let s = "é".repeat(100);
        assert!(required("name", &s, 100).is_ok());
        assert!(required("name", &format!("{s}x"), 100).is_err());
    }

    #[test]
    fn email_shape() {
        assert!(email("email", "ana@example.com").is_ok());
        assert!(email("email", "ana.example.com").is_err());
        assert!(email("email", "ana@@example.com").is_err());
    }

    #[test]
    fn password_bounds() {
        assert!(password("short").is_err());
        assert!(password("12345678").is_ok());
        assert!(password(&"x".repeat(25)).is_err());
    }

    #[test]
    fn ids_must_be_positive_integers() {
        assert_eq!(parse_id("42"), Ok(42));
        assert!(parse_id("0").is_err());
        assert!(parse_id("abc").is_err());
        assert!(positive_id("trip_id", -1).is_err());
    }

    #[test]
    fn amounts_reject_nan_and_zero() {
        assert!(positive_amount("price", 0.0).is_err());
        assert!(positive_amount("price", f64::NAN).is_err());
        assert!(positive_amount("price", 12.5).is_ok());
    }

    #[test]
    fn dates_and_ratings() {
        let a = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        let b = NaiveDate::from_ymd_opt(2025, 12, 10).unwrap();
        assert!(date_order(a, b).is_ok());
        assert!(date_order(b, a).is_err());
        assert!(rating(0).is_err());
        assert!(rating(5).is_ok());
    }

    #[test]
    fn empty_update_is_rejected() {
        assert!(any_field(&[false, false]).is_err());
        assert!(any_field(&[false, true]).is_ok());
    }
}
