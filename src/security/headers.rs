use actix_web::middleware::DefaultHeaders;

/// Every response is JSON, so nothing may be framed, sniffed, cached or used as a script source.
const API_RESPONSE_HEADERS: &[(&str, &str)] = &[
    ("Strict-Transport-Security", "max-age=31536000; includeSubDomains"),
    ("X-Content-Type-Options", "nosniff"),
    ("X-Frame-Options", "DENY"),
    ("Referrer-Policy", "no-referrer"),
    ("Cache-Control", "no-store"),
    ("Content-Security-Policy", "default-src 'none'; frame-ancestors 'none'"),
];

pub fn security_headers() -> DefaultHeaders {
    API_RESPONSE_HEADERS
        .iter()
        .fold(DefaultHeaders::new(), |headers, &header| headers.add(header))
}
