use std::net::SocketAddr;

use axum::Router;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use tripbook_api::bootstrap::app_context::{AppContext, AppServices};
use tripbook_api::bootstrap::config::Config;
use tripbook_api::presentation::http as api_http;

#[derive(OpenApi)]
#[openapi(
        paths(
            api_http::auth::register,
            api_http::auth::login,
            api_http::auth::me,
            api_http::users::create_user,
            api_http::users::get_user,
            api_http::users::get_user_by_email,
            api_http::users::update_user,
            api_http::users::delete_user,
            api_http::trips::create_trip,
            api_http::trips::list_trips,
            api_http::trips::get_trip,
            api_http::trips::list_trips_by_location,
            api_http::trips::list_upcoming_trips,
            api_http::trips::update_trip,
            api_http::bookings::create_booking,
            api_http::bookings::get_booking,
            api_http::bookings::update_booking,
            api_http::bookings::list_bookings_by_trip,
            api_http::bookings::list_bookings_by_user,
            api_http::payments::create_payment,
            api_http::payments::get_payment,
            api_http::payments::update_payment,
            api_http::payments::list_payments_by_user,
            api_http::invoices::create_invoice,
            api_http::invoices::get_invoice,
            api_http::invoices::update_invoice,
            api_http::invoices::list_invoices_by_payment,
            api_http::subscriptions::create_subscription,
            api_http::subscriptions::list_subscriptions,
            api_http::subscriptions::delete_subscription,
            api_http::subscriptions::delete_subscriptions_by_user,
            api_http::subscriptions::delete_subscription_by_email,
            api_http::comments::create_comment,
            api_http::comments::get_comment,
            api_http::comments::delete_comment,
            api_http::comments::list_comments_by_trip,
            api_http::comments::delete_comments_by_trip,
            api_http::photos::create_photo,
            api_http::photos::get_photo,
            api_http::photos::delete_photo,
            api_http::photos::list_photos_by_trip,
            api_http::photos::delete_photos_by_trip,
            api_http::accommodations::create_accommodation,
            api_http::accommodations::get_accommodation,
            api_http::accommodations::update_accommodation,
            api_http::accommodations::list_accommodations_by_trip,
            api_http::accommodation_photos::create_accommodation_photo,
            api_http::accommodation_photos::get_accommodation_photo,
            api_http::accommodation_photos::delete_accommodation_photo,
            api_http::accommodation_photos::list_photos_by_accommodation,
            api_http::accommodation_photos::delete_photos_by_accommodation,
            api_http::activities::create_activity,
            api_http::activities::get_activity,
            api_http::activities::update_activity,
            api_http::activities::delete_activity,
            api_http::activities::list_activities_by_trip,
            api_http::activity_photos::create_activity_photo,
            api_http::activity_photos::get_activity_photo,
            api_http::activity_photos::delete_activity_photo,
            api_http::activity_photos::list_photos_by_activity,
            api_http::activity_photos::delete_photos_by_activity,
            api_http::health::health,
        ),
        components(schemas(
            api_http::auth::RegisterRequest,
            api_http::auth::LoginRequest,
            api_http::auth::AuthResponse,
            api_http::users::UserResponse,
            api_http::users::UpdateUserRequest,
            api_http::trips::TripResponse,
            api_http::trips::CreateTripRequest,
            api_http::trips::UpdateTripRequest,
            api_http::bookings::BookingResponse,
            api_http::bookings::CreateBookingRequest,
            api_http::bookings::UpdateStatusRequest,
            api_http::payments::PaymentResponse,
            api_http::payments::CreatePaymentRequest,
            api_http::invoices::InvoiceResponse,
            api_http::invoices::CreateInvoiceRequest,
            api_http::subscriptions::SubscriptionResponse,
            api_http::subscriptions::CreateSubscriptionRequest,
            api_http::comments::CommentResponse,
            api_http::comments::CreateCommentRequest,
            api_http::photos::PhotoResponse,
            api_http::photos::CreatePhotoRequest,
            api_http::accommodations::AccommodationResponse,
            api_http::accommodations::CreateAccommodationRequest,
            api_http::accommodations::UpdateAccommodationRequest,
            api_http::accommodation_photos::AccommodationPhotoResponse,
            api_http::accommodation_photos::CreateAccommodationPhotoRequest,
            api_http::activities::ActivityResponse,
            api_http::activities::CreateActivityRequest,
            api_http::activities::UpdateActivityRequest,
            api_http::activity_photos::ActivityPhotoResponse,
            api_http::activity_photos::CreateActivityPhotoRequest,
            api_http::health::HealthResp,
        )),
        modifiers(&BearerAuth),
        tags(
            (name = "Auth", description = "Registration, login and the current user"),
            (name = "Users", description = "User accounts"),
            (name = "Trips", description = "Trip catalogue"),
            (name = "Bookings", description = "Seat bookings"),
            (name = "Payments", description = "Booking payments"),
            (name = "Invoices", description = "Payment invoices"),
            (name = "Subscriptions", description = "Newsletter subscriptions"),
            (name = "Comments", description = "Trip reviews"),
            (name = "Photos", description = "Trip photos"),
            (name = "Accommodations", description = "Lodging offered on a trip"),
            (name = "Activities", description = "Activities offered on a trip"),
            (name = "Health", description = "System health checks")
        )
    )]
struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "tripbook_api=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(?cfg, "Starting tripbook backend");

    // Database
    let pool = tripbook_api::infrastructure::db::connect_pool(&cfg).await?;
    tripbook_api::infrastructure::db::migrate(&pool).await?;

    let ctx = AppContext::new(cfg.clone(), AppServices::postgres(pool.clone()));

    let app = Router::new()
        .merge(api_http::routes(ctx))
        .merge(api_http::health::routes(pool.clone()))
        .nest("/v1", api_http::health::routes(pool))
        .merge(SwaggerUi::new("/v1/docs").url("/v1/openapi.json", ApiDoc::openapi()));
    let app = api_http::middleware::with_middleware(app, &cfg);

    let listener = tokio::net::TcpListener::bind(cfg.addr.as_str()).await?;
    info!(addr = %listener.local_addr()?, "HTTP API listening");

    let served = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await;

    match served {
        Ok(()) => info!("Server shutdown complete"),
        Err(e) => {
            error!(?e, "API server failed");
            return Err(e.into());
        }
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(?e, "ctrl_c_handler_failed");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(?e, "sigterm_handler_failed");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => warn!("Received Ctrl+C, shutting down"),
        _ = terminate => warn!("Received SIGTERM, shutting down"),
    }
}
