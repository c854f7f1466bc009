//! In-memory repositories and router helpers shared by the HTTP tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use chrono::{NaiveDate, Utc};
use http::{Request, Response, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use tripbook_api::application::ports::accommodation_repository::{
    AccommodationPhotoRepository, AccommodationRepository,
};
use tripbook_api::application::ports::activity_repository::{
    ActivityPhotoRepository, ActivityRepository,
};
use tripbook_api::application::ports::booking_repository::BookingRepository;
use tripbook_api::application::ports::comment_repository::CommentRepository;
use tripbook_api::application::ports::invoice_repository::InvoiceRepository;
use tripbook_api::application::ports::payment_repository::PaymentRepository;
use tripbook_api::application::ports::photo_repository::PhotoRepository;
use tripbook_api::application::ports::subscription_repository::SubscriptionRepository;
use tripbook_api::application::ports::trip_repository::TripRepository;
use tripbook_api::application::ports::user_repository::UserRepository;
use tripbook_api::application::ports::{StoreError, StoreResult};
use tripbook_api::bootstrap::app_context::{AppContext, AppServices};
use tripbook_api::bootstrap::config::Config;
use tripbook_api::domain::accommodations::*;
use tripbook_api::domain::activities::*;
use tripbook_api::domain::bookings::*;
use tripbook_api::domain::comments::*;
use tripbook_api::domain::invoices::*;
use tripbook_api::domain::payments::*;
use tripbook_api::domain::photos::*;
use tripbook_api::domain::subscriptions::*;
use tripbook_api::domain::trips::*;
use tripbook_api::domain::users::*;
use tripbook_api::presentation::http::router;

struct Table<T> {
    next_id: i64,
    rows: Vec<T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: Vec::new(),
        }
    }
}

impl<T: Clone> Table<T> {
    fn insert(&mut self, build: impl FnOnce(i64) -> T) -> T {
        let row = build(self.next_id);
        self.next_id += 1;
        self.rows.push(row.clone());
        row
    }

    fn find(&self, pred: impl Fn(&T) -> bool) -> StoreResult<T> {
        self.rows
            .iter()
            .find(|r| pred(r))
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    fn filter(&self, pred: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows.iter().filter(|r| pred(r)).cloned().collect()
    }

    fn remove(&mut self, pred: impl Fn(&T) -> bool) -> StoreResult<()> {
        let before = self.rows.len();
        self.rows.retain(|r| !pred(r));
        if self.rows.len() == before {
            Err(StoreError::NotFound)
        } else {
            Ok(())
        }
    }

    fn update(&mut self, pred: impl Fn(&T) -> bool, apply: impl FnOnce(&mut T)) -> StoreResult<T> {
        let row = self
            .rows
            .iter_mut()
            .find(|r| pred(r))
            .ok_or(StoreError::NotFound)?;
        apply(row);
        Ok(row.clone())
    }
}

type Store<T> = Mutex<Table<T>>;

fn table<T>(store: &Store<T>) -> std::sync::MutexGuard<'_, Table<T>> {
    store.lock().unwrap_or_else(|p| p.into_inner())
}

#[derive(Default)]
pub struct MemUsers(Store<User>);

#[async_trait]
impl UserRepository for MemUsers {
    async fn create(&self, user: &NewUser) -> StoreResult<User> {
        let mut t = table(&self.0);
        if t.rows.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict("users_email_key".into()));
        }
        Ok(t.insert(|id| User {
            id,
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            phone: user.phone.clone(),
            created_at: Utc::now(),
        }))
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<User> {
        table(&self.0).find(|u| u.id == id)
    }

    async fn get_by_email(&self, email: &str) -> StoreResult<User> {
        table(&self.0).find(|u| u.email == email)
    }

    async fn update_by_id(&self, id: i64, changes: &UserChanges) -> StoreResult<User> {
        table(&self.0).update(
            |u| u.id == id,
            |u| {
                if let Some(email) = &changes.email {
                    u.email = email.clone();
                }
                if let Some(phone) = &changes.phone {
                    u.phone = phone.clone();
                }
            },
        )
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        table(&self.0).remove(|u| u.id == id)
    }
}

#[derive(Default)]
pub struct MemTrips(Store<Trip>);

#[async_trait]
impl TripRepository for MemTrips {
    async fn create(&self, trip: &NewTrip) -> StoreResult<Trip> {
        Ok(table(&self.0).insert(|id| Trip {
            id,
            name: trip.name.clone(),
            description: trip.description.clone(),
            location: trip.location.clone(),
            start_date: trip.start_date,
            end_date: trip.end_date,
            price: trip.price,
            seats: trip.seats,
            available_seats: trip.available_seats,
            created_at: Utc::now(),
        }))
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<Trip> {
        table(&self.0).find(|t| t.id == id)
    }

    async fn list_all(&self) -> StoreResult<Vec<Trip>> {
        Ok(table(&self.0).filter(|_| true))
    }

    async fn list_by_location(&self, location: &str) -> StoreResult<Vec<Trip>> {
        Ok(table(&self.0).filter(|t| t.location == location))
    }

    async fn list_upcoming(&self, from: NaiveDate) -> StoreResult<Vec<Trip>> {
        let mut trips = table(&self.0).filter(|t| t.start_date >= from);
        trips.sort_by_key(|t| t.start_date);
        Ok(trips)
    }

    async fn update_by_id(&self, id: i64, c: &TripChanges) -> StoreResult<Trip> {
        let mut trips = table(&self.0);
        let row = trips
            .rows
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound)?;
        let mut next = row.clone();
        if let Some(v) = &c.name {
            next.name = v.clone();
        }
        if let Some(v) = &c.description {
            next.description = v.clone();
        }
        if let Some(v) = &c.location {
            next.location = v.clone();
        }
        next.start_date = c.start_date.unwrap_or(next.start_date);
        next.end_date = c.end_date.unwrap_or(next.end_date);
        next.price = c.price.unwrap_or(next.price);
        next.seats = c.seats.unwrap_or(next.seats);
        next.available_seats = c.available_seats.unwrap_or(next.available_seats);
        check_trip_row(&next)?;
        *row = next.clone();
        Ok(next)
    }
}

/// Same row checks as the `trips` table constraints.
fn check_trip_row(t: &Trip) -> StoreResult<()> {
    if t.seats <= 0 || t.available_seats < 0 || t.available_seats > t.seats {
        return Err(StoreError::Invalid("trips_seats_check".into()));
    }
    if t.end_date < t.start_date {
        return Err(StoreError::Invalid("trips_dates_check".into()));
    }
    if t.price <= 0.0 {
        return Err(StoreError::Invalid("trips_price_check".into()));
    }
    Ok(())
}

/// Trip store whose single-row reads keep returning the row as first created,
/// like a reader that raced a concurrent writer. Writes hit the live table.
#[derive(Default)]
pub struct StaleReadTrips {
    live: MemTrips,
    first_seen: Mutex<Vec<Trip>>,
}

#[async_trait]
impl TripRepository for StaleReadTrips {
    async fn create(&self, trip: &NewTrip) -> StoreResult<Trip> {
        let created = self.live.create(trip).await?;
        self.first_seen.lock().unwrap_or_else(|p| p.into_inner()).push(created.clone());
        Ok(created)
    }
    async fn get_by_id(&self, id: i64) -> StoreResult<Trip> {
        self.first_seen
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }
    async fn list_all(&self) -> StoreResult<Vec<Trip>> {
        self.live.list_all().await
    }
    async fn list_by_location(&self, location: &str) -> StoreResult<Vec<Trip>> {
        self.live.list_by_location(location).await
    }
    async fn list_upcoming(&self, from: NaiveDate) -> StoreResult<Vec<Trip>> {
        self.live.list_upcoming(from).await
    }
    async fn update_by_id(&self, id: i64, c: &TripChanges) -> StoreResult<Trip> {
        self.live.update_by_id(id, c).await
    }
}

#[derive(Default)]
pub struct MemBookings(Store<Booking>);

#[async_trait]
impl BookingRepository for MemBookings {
    async fn create(&self, b: &NewBooking) -> StoreResult<Booking> {
        Ok(table(&self.0).insert(|id| Booking {
            id,
            user_id: b.user_id,
            trip_id: b.trip_id,
            status: b.status.clone(),
            created_at: Utc::now(),
        }))
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<Booking> {
        table(&self.0).find(|b| b.id == id)
    }

    async fn list_by_trip(&self, trip_id: i64) -> StoreResult<Vec<Booking>> {
        Ok(table(&self.0).filter(|b| b.trip_id == trip_id))
    }

    async fn list_by_user(&self, user_id: i64) -> StoreResult<Vec<Booking>> {
        Ok(table(&self.0).filter(|b| b.user_id == user_id))
    }

    async fn update_status(&self, id: i64, status: &str) -> StoreResult<Booking> {
        table(&self.0).update(|b| b.id == id, |b| b.status = status.to_string())
    }
}

#[derive(Default)]
pub struct MemPayments(Store<Payment>);

#[async_trait]
impl PaymentRepository for MemPayments {
    async fn create(&self, p: &NewPayment) -> StoreResult<Payment> {
        Ok(table(&self.0).insert(|id| Payment {
            id,
            booking_id: p.booking_id,
            user_id: p.user_id,
            amount: p.amount,
            status: p.status.clone(),
            transaction_id: p.transaction_id.clone(),
            created_at: Utc::now(),
        }))
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<Payment> {
        table(&self.0).find(|p| p.id == id)
    }

    async fn list_by_user(&self, user_id: i64) -> StoreResult<Vec<Payment>> {
        Ok(table(&self.0).filter(|p| p.user_id == user_id))
    }

    async fn update_status(&self, id: i64, status: &str) -> StoreResult<Payment> {
        table(&self.0).update(|p| p.id == id, |p| p.status = status.to_string())
    }
}

#[derive(Default)]
pub struct MemInvoices(Store<Invoice>);

#[async_trait]
impl InvoiceRepository for MemInvoices {
    async fn create(&self, i: &NewInvoice) -> StoreResult<Invoice> {
        let mut t = table(&self.0);
        if t.rows.iter().any(|r| r.invoice_number == i.invoice_number) {
            return Err(StoreError::Conflict("invoices_invoice_number_key".into()));
        }
        Ok(t.insert(|id| Invoice {
            id,
            payment_id: i.payment_id,
            invoice_number: i.invoice_number.clone(),
            issued_at: Utc::now(),
            due_date: i.due_date,
            status: i.status.clone(),
        }))
    }

    async fn get_by_number(&self, number: &str) -> StoreResult<Invoice> {
        table(&self.0).find(|i| i.invoice_number == number)
    }

    async fn list_by_payment(&self, payment_id: i64) -> StoreResult<Vec<Invoice>> {
        Ok(table(&self.0).filter(|i| i.payment_id == payment_id))
    }

    async fn update_status_by_number(&self, number: &str, status: &str) -> StoreResult<Invoice> {
        table(&self.0).update(
            |i| i.invoice_number == number,
            |i| i.status = status.to_string(),
        )
    }
}

#[derive(Default)]
pub struct MemSubscriptions(Store<Subscription>);

#[async_trait]
impl SubscriptionRepository for MemSubscriptions {
    async fn create(&self, s: &NewSubscription) -> StoreResult<Subscription> {
        let mut t = table(&self.0);
        if t.rows.iter().any(|r| r.email == s.email) {
            return Err(StoreError::Conflict("subscriptions_email_key".into()));
        }
        Ok(t.insert(|id| Subscription {
            id,
            user_id: s.user_id,
            email: s.email.clone(),
            created_at: Utc::now(),
        }))
    }

    async fn list_all(&self) -> StoreResult<Vec<Subscription>> {
        Ok(table(&self.0).filter(|_| true))
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        table(&self.0).remove(|s| s.id == id)
    }

    async fn delete_by_user(&self, user_id: i64) -> StoreResult<()> {
        table(&self.0).remove(|s| s.user_id == user_id)
    }

    async fn delete_by_email(&self, email: &str) -> StoreResult<()> {
        table(&self.0).remove(|s| s.email == email)
    }
}

#[derive(Default)]
pub struct MemComments(Store<Comment>);

#[async_trait]
impl CommentRepository for MemComments {
    async fn create(&self, c: &NewComment) -> StoreResult<Comment> {
        Ok(table(&self.0).insert(|id| Comment {
            id,
            user_id: c.user_id,
            trip_id: c.trip_id,
            comment: c.comment.clone(),
            rating: c.rating,
            created_at: Utc::now(),
        }))
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<Comment> {
        table(&self.0).find(|c| c.id == id)
    }

    async fn list_by_trip(&self, trip_id: i64) -> StoreResult<Vec<Comment>> {
        Ok(table(&self.0).filter(|c| c.trip_id == trip_id))
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        table(&self.0).remove(|c| c.id == id)
    }

    async fn delete_by_trip(&self, trip_id: i64) -> StoreResult<()> {
        table(&self.0).remove(|c| c.trip_id == trip_id)
    }
}

#[derive(Default)]
pub struct MemPhotos(Store<Photo>);

#[async_trait]
impl PhotoRepository for MemPhotos {
    async fn create(&self, p: &NewPhoto) -> StoreResult<Photo> {
        Ok(table(&self.0).insert(|id| Photo {
            id,
            trip_id: p.trip_id,
            photo_url: p.photo_url.clone(),
            uploaded_at: Utc::now(),
        }))
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<Photo> {
        table(&self.0).find(|p| p.id == id)
    }

    async fn list_by_trip(&self, trip_id: i64) -> StoreResult<Vec<Photo>> {
        Ok(table(&self.0).filter(|p| p.trip_id == trip_id))
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        table(&self.0).remove(|p| p.id == id)
    }

    async fn delete_by_trip(&self, trip_id: i64) -> StoreResult<()> {
        table(&self.0).remove(|p| p.trip_id == trip_id)
    }
}

#[derive(Default)]
pub struct MemAccommodations(Store<Accommodation>);

#[async_trait]
impl AccommodationRepository for MemAccommodations {
    async fn create(&self, a: &NewAccommodation) -> StoreResult<Accommodation> {
        Ok(table(&self.0).insert(|id| Accommodation {
            id,
            trip_id: a.trip_id,
            name: a.name.clone(),
            description: a.description.clone(),
            price_per_night: a.price_per_night,
            created_at: Utc::now(),
        }))
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<Accommodation> {
        table(&self.0).find(|a| a.id == id)
    }

    async fn list_by_trip(&self, trip_id: i64) -> StoreResult<Vec<Accommodation>> {
        Ok(table(&self.0).filter(|a| a.trip_id == trip_id))
    }

    async fn update_by_id(&self, id: i64, c: &AccommodationChanges) -> StoreResult<Accommodation> {
        table(&self.0).update(
            |a| a.id == id,
            |a| {
                if let Some(v) = &c.name {
                    a.name = v.clone();
                }
                if let Some(v) = &c.description {
                    a.description = v.clone();
                }
                a.price_per_night = c.price_per_night.unwrap_or(a.price_per_night);
            },
        )
    }
}

#[derive(Default)]
pub struct MemAccommodationPhotos(Store<AccommodationPhoto>);

#[async_trait]
impl AccommodationPhotoRepository for MemAccommodationPhotos {
    async fn create(&self, p: &NewAccommodationPhoto) -> StoreResult<AccommodationPhoto> {
        Ok(table(&self.0).insert(|id| AccommodationPhoto {
            id,
            accommodation_id: p.accommodation_id,
            photo_url: p.photo_url.clone(),
            created_at: Utc::now(),
        }))
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<AccommodationPhoto> {
        table(&self.0).find(|p| p.id == id)
    }

    async fn list_by_accommodation(&self, accommodation_id: i64) -> StoreResult<Vec<AccommodationPhoto>> {
        Ok(table(&self.0).filter(|p| p.accommodation_id == accommodation_id))
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        table(&self.0).remove(|p| p.id == id)
    }

    async fn delete_by_accommodation(&self, accommodation_id: i64) -> StoreResult<()> {
        table(&self.0).remove(|p| p.accommodation_id == accommodation_id)
    }
}

#[derive(Default)]
pub struct MemActivities(Store<Activity>);

#[async_trait]
impl ActivityRepository for MemActivities {
    async fn create(&self, a: &NewActivity) -> StoreResult<Activity> {
        Ok(table(&self.0).insert(|id| Activity {
            id,
            trip_id: a.trip_id,
            name: a.name.clone(),
            description: a.description.clone(),
            price: a.price,
            created_at: Utc::now(),
        }))
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<Activity> {
        table(&self.0).find(|a| a.id == id)
    }

    async fn list_by_trip(&self, trip_id: i64) -> StoreResult<Vec<Activity>> {
        Ok(table(&self.0).filter(|a| a.trip_id == trip_id))
    }

    async fn update_by_id(&self, id: i64, c: &ActivityChanges) -> StoreResult<Activity> {
        table(&self.0).update(
            |a| a.id == id,
            |a| {
                if let Some(v) = &c.name {
                    a.name = v.clone();
                }
                if let Some(v) = &c.description {
                    a.description = v.clone();
                }
                a.price = c.price.unwrap_or(a.price);
            },
        )
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        table(&self.0).remove(|a| a.id == id)
    }
}

#[derive(Default)]
pub struct MemActivityPhotos(Store<ActivityPhoto>);

#[async_trait]
impl ActivityPhotoRepository for MemActivityPhotos {
    async fn create(&self, p: &NewActivityPhoto) -> StoreResult<ActivityPhoto> {
        Ok(table(&self.0).insert(|id| ActivityPhoto {
            id,
            activity_id: p.activity_id,
            photo_url: p.photo_url.clone(),
            uploaded_at: Utc::now(),
        }))
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<ActivityPhoto> {
        table(&self.0).find(|p| p.id == id)
    }

    async fn list_by_activity(&self, activity_id: i64) -> StoreResult<Vec<ActivityPhoto>> {
        Ok(table(&self.0).filter(|p| p.activity_id == activity_id))
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        table(&self.0).remove(|p| p.id == id)
    }

    async fn delete_by_activity(&self, activity_id: i64) -> StoreResult<()> {
        table(&self.0).remove(|p| p.activity_id == activity_id)
    }
}

/// A trip store whose every call fails like an unreachable database.
pub struct BrokenTrips;

#[async_trait]
impl TripRepository for BrokenTrips {
    async fn create(&self, _: &NewTrip) -> StoreResult<Trip> {
        Err(StoreError::Other(anyhow::anyhow!("connection refused (db.internal:5432)")))
    }
    async fn get_by_id(&self, _: i64) -> StoreResult<Trip> {
        Err(StoreError::Timeout)
    }
    async fn list_all(&self) -> StoreResult<Vec<Trip>> {
        Err(StoreError::Other(anyhow::anyhow!("connection refused (db.internal:5432)")))
    }
    async fn list_by_location(&self, _: &str) -> StoreResult<Vec<Trip>> {
        Err(StoreError::Timeout)
    }
    async fn list_upcoming(&self, _: NaiveDate) -> StoreResult<Vec<Trip>> {
        Err(StoreError::Timeout)
    }
    async fn update_by_id(&self, _: i64, _: &TripChanges) -> StoreResult<Trip> {
        Err(StoreError::Timeout)
    }
}

pub fn test_config() -> Config {
    Config::from_lookup(|_| None).expect("default config")
}

fn services_with_trips(trips: Arc<dyn TripRepository>) -> AppServices {
    AppServices::new(
        Arc::new(MemUsers::default()),
        trips,
        Arc::new(MemBookings::default()),
        Arc::new(MemPayments::default()),
        Arc::new(MemInvoices::default()),
        Arc::new(MemSubscriptions::default()),
        Arc::new(MemComments::default()),
        Arc::new(MemPhotos::default()),
        Arc::new(MemAccommodations::default()),
        Arc::new(MemAccommodationPhotos::default()),
        Arc::new(MemActivities::default()),
        Arc::new(MemActivityPhotos::default()),
    )
}

/// Full router over fresh in-memory stores.
pub fn app() -> Router {
    router(AppContext::new(
        test_config(),
        services_with_trips(Arc::new(MemTrips::default())),
    ))
}

/// Router whose trip reads lag behind its writes.
pub fn stale_read_app() -> Router {
    router(AppContext::new(
        test_config(),
        services_with_trips(Arc::new(StaleReadTrips::default())),
    ))
}

/// Router whose trip store always fails.
pub fn broken_app() -> Router {
    router(AppContext::new(
        test_config(),
        services_with_trips(Arc::new(BrokenTrips)),
    ))
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp: Response<Body> = app.clone().oneshot(req).await.expect("router is infallible");
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("body readable");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, body)
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("valid request")
}
