use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Accommodation {
    pub id: i64,
    pub trip_id: i64,
    pub name: String,
    pub description: String,
    pub price_per_night: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAccommodation {
    pub trip_id: i64,
    pub name: String,
    pub description: String,
    pub price_per_night: f64,
}

#[derive(Debug, Clone, Default)]
pub struct AccommodationChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price_per_night: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct AccommodationPhoto {
    pub id: i64,
    pub accommodation_id: i64,
    pub photo_url: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAccommodationPhoto {
    pub accommodation_id: i64,
    pub photo_url: String,
}
