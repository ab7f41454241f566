mod cors;
mod headers;

pub use cors::{cors_middleware, is_allowed_origin};
pub use headers::security_headers;
