//! Per-request context for the access-log middleware in `main`.
use actix_web::dev::ServiceRequest;
use actix_web::http::header::{self, HeaderName, HeaderValue};
use tracing::Span;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

const MAX_REQUEST_ID_LEN: usize = 128;

/// What the access log records about a request before it is handled.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: String,
    pub method: String,
    pub path: String,
    pub client_ip: String,
    pub user_agent: String,
}

impl RequestContext {
    pub fn from_request(req: &ServiceRequest) -> Self {
        Self {
            request_id: request_id(req),
            method: req.method().to_string(),
            path: req.path().to_string(),
            client_ip: client_ip(req),
            user_agent: user_agent(req),
        }
    }

    pub fn span(&self) -> Span {
        tracing::info_span!(
            "request",
            request_id = %self.request_id,
            method = %self.method,
            path = %self.path,
            client_ip = %self.client_ip,
            user_agent = %self.user_agent,
        )
    }

    /// Header echoing the request id back to the caller.
    pub fn response_header(&self) -> (HeaderName, HeaderValue) {
        let value = HeaderValue::from_str(&self.request_id)
            .unwrap_or_else(|_| HeaderValue::from_static("invalid-request-id"));
        (HeaderName::from_static(REQUEST_ID_HEADER), value)
    }
}

/// Caller-supplied `x-request-id` when it is a short token of `[A-Za-z0-9._-]`, else a new UUID.
fn request_id(req: &ServiceRequest) -> String {
    req.headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| {
            !value.is_empty()
                && value.len() <= MAX_REQUEST_ID_LEN
                && value
                    .bytes()
                    .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'))
        })
        .map_or_else(|| Uuid::new_v4().to_string(), str::to_string)
}

/// Peer address, or the forwarded one when actix is configured to trust proxies.
/// X-Forwarded-For is never parsed directly.
fn client_ip(req: &ServiceRequest) -> String {
    req.connection_info()
        .realip_remote_addr()
        .unwrap_or("unknown")
        .to_string()
}

fn user_agent(req: &ServiceRequest) -> String {
    req.headers()
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

pub fn status_class(status: u16) -> &'static str {
    match status {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "unknown",
    }
}
