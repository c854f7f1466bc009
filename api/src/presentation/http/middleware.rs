use std::any::Any;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use axum::extract::{ConnectInfo, DefaultBodyLimit, MatchedPath, Request};
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::{RequestBodyTimeoutLayer, TimeoutLayer};
use tower_http::trace::TraceLayer;

use crate::bootstrap::config::Config;
use crate::presentation::http::error::json_error;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Address of the caller after proxy headers have been considered.
#[derive(Debug, Clone)]
pub struct ClientIp(pub String);

/// Stack applied to every route, outermost layer first.
pub fn with_middleware(app: Router, cfg: &Config) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    app.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
            .layer(PropagateRequestIdLayer::new(request_id))
            .layer(middleware::from_fn(client_ip))
            .layer(
                TraceLayer::new_for_http().make_span_with(|req: &Request| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    let matched = req
                        .extensions()
                        .get::<MatchedPath>()
                        .map(|p| p.as_str().to_string())
                        .unwrap_or_default();
                    let request_id = req
                        .headers()
                        .get(REQUEST_ID_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    let client_ip = req
                        .extensions()
                        .get::<ClientIp>()
                        .map(|ip| ip.0.clone())
                        .unwrap_or_default();
                    tracing::info_span!(
                        "http",
                        %method,
                        %uri,
                        matched_path = %matched,
                        %request_id,
                        %client_ip
                    )
                }),
            )
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_secs(cfg.request_timeout_secs),
            ))
            .layer(RequestBodyTimeoutLayer::new(Duration::from_secs(
                cfg.read_timeout_secs,
            )))
            .layer(build_cors(cfg))
            .layer(DefaultBodyLimit::max(cfg.body_limit_bytes)),
    )
}

async fn client_ip(mut req: Request, next: Next) -> Response {
    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());
    let ip = resolve_client_ip(req.headers(), peer);
    req.extensions_mut().insert(ClientIp(ip));
    next.run(req).await
}

/// `True-Client-IP`, then `X-Real-IP`, then the first `X-Forwarded-For` hop, then the peer.
pub fn resolve_client_ip(headers: &HeaderMap, peer: Option<IpAddr>) -> String {
    let from_header = |name: &str| -> Option<IpAddr> {
        let raw = headers.get(name)?.to_str().ok()?;
        raw.split(',').next()?.trim().parse().ok()
    };
    from_header("true-client-ip")
        .or_else(|| from_header("x-real-ip"))
        .or_else(|| from_header("x-forwarded-for"))
        .or(peer)
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| "unknown".into())
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "non-string panic payload"
    };
    tracing::error!(panic = %detail, "handler_panicked");
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal_error",
        "an internal error occurred",
    )
}

fn build_cors(cfg: &Config) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);
    match cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => base.allow_origin(origin).allow_credentials(true),
        // Production without a usable origin denies cross-site requests
        _ if cfg.is_production => {
            base.allow_origin(AllowOrigin::exact(HeaderValue::from_static("http://invalid")))
        }
        _ => base
            .allow_origin(AllowOrigin::mirror_request())
            .allow_credentials(true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (k, v) in pairs {
            map.insert(*k, HeaderValue::from_static(v));
        }
        map
    }

    #[test]
    fn true_client_ip_wins() {
        let h = headers(&[
            ("true-client-ip", "203.0.113.9"),
            ("x-real-ip", "198.51.100.1"),
            ("x-forwarded-for", "192.0.2.1"),
        ]);
        assert_eq!(resolve_client_ip(&h, None), "203.0.113.9");
    }

    #[test]
    fn forwarded_for_uses_first_hop() {
        let h = headers(&[("x-forwarded-for", "192.0.2.1, 10.0.0.2, 10.0.0.3")]);
        assert_eq!(resolve_client_ip(&h, None), "192.0.2.1");
    }

    #[test]
    fn garbage_headers_fall_back_to_peer() {
        let h = headers(&[("x-real-ip", "not-an-ip")]);
        let peer: IpAddr = "127.0.0.1".parse().unwrap();
        assert_eq!(resolve_client_ip(&h, Some(peer)), "127.0.0.1");
        assert_eq!(resolve_client_ip(&HeaderMap::new(), None), "unknown");
    }

    #[tokio::test]
    async fn panic_becomes_json_500() {
        let resp = panic_response(Box::new("boom"));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
