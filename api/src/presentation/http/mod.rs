use axum::Router;

use crate::bootstrap::app_context::AppContext;

pub mod accommodation_photos;
pub mod accommodations;
pub mod activities;
pub mod activity_photos;
pub mod auth;
pub mod bookings;
pub mod comments;
pub mod error;
pub mod extract;
pub mod health;
pub mod invoices;
pub mod middleware;
pub mod payments;
pub mod photos;
pub mod subscriptions;
pub mod trips;
pub mod users;

/// Every `/v1` resource route, without middleware.
pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .nest("/v1", auth::routes(ctx.clone()))
        .nest("/v1", users::routes(ctx.clone()))
        .nest("/v1", trips::routes(ctx.clone()))
        .nest("/v1", bookings::routes(ctx.clone()))
        .nest("/v1", payments::routes(ctx.clone()))
        .nest("/v1", invoices::routes(ctx.clone()))
        .nest("/v1", subscriptions::routes(ctx.clone()))
        .nest("/v1", comments::routes(ctx.clone()))
        .nest("/v1", photos::routes(ctx.clone()))
        .nest("/v1", accommodations::routes(ctx.clone()))
        .nest("/v1", accommodation_photos::routes(ctx.clone()))
        .nest("/v1", activities::routes(ctx.clone()))
        .nest("/v1", activity_photos::routes(ctx))
}

/// Resource routes wrapped in the full middleware stack.
pub fn router(ctx: AppContext) -> Router {
    let cfg = ctx.cfg.clone();
    middleware::with_middleware(routes(ctx), &cfg)
}
