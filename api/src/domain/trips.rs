use chrono::{DateTime, NaiveDate, Utc};

#[derive(Debug, Clone)]
pub struct Trip {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub location: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub price: f64,
    pub seats: i32,
    pub available_seats: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewTrip {
    pub name: String,
    pub description: String,
    pub location: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub price: f64,
    pub seats: i32,
    pub available_seats: i32,
}

#[derive(Debug, Clone, Default)]
pub struct TripChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub price: Option<f64>,
    pub seats: Option<i32>,
    pub available_seats: Option<i32>,
}
