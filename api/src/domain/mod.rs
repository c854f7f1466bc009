pub mod accommodations;
pub mod activities;
pub mod bookings;
pub mod comments;
pub mod invoices;
pub mod payments;
pub mod photos;
pub mod subscriptions;
pub mod trips;
pub mod users;
