//! Security header module
//!
//! Fixed header set attached to every response, success or error, so the
//! local preview carries the same hardening the deployed site does.

use hyper::http::response::Builder;

pub const SECURITY_HEADERS: &[(&str, &str)] = &[
    (
        "Content-Security-Policy",
        "default-src 'self'; script-src 'self' 'unsafe-inline'; style-src 'self' 'unsafe-inline'; \
         font-src 'self'; img-src 'self' data: blob:; connect-src 'self'; frame-ancestors 'none'; \
         base-uri 'self'; form-action 'self'",
    ),
    (
        "Strict-Transport-Security",
        "max-age=63072000; includeSubDomains; preload",
    ),
    ("X-Frame-Options", "DENY"),
    ("X-Content-Type-Options", "nosniff"),
    ("Referrer-Policy", "strict-origin-when-cross-origin"),
    ("Permissions-Policy", "camera=(), microphone=(), geolocation=()"),
];

/// Attach the security header set to a response under construction.
pub fn with_security_headers(builder: Builder) -> Builder {
    SECURITY_HEADERS
        .iter()
        .fold(builder, |b, (name, value)| b.header(*name, *value))
}
