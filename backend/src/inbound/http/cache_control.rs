//! Shared cache-control policy for per-user responses.

/// Per-user payloads must never be served from a shared cache.
pub const PRIVATE_NO_STORE: &str = "private, no-store";

/// Header tuple applied to every authenticated response body.
pub const fn private_no_store_header() -> (&'static str, &'static str) {
    ("Cache-Control", PRIVATE_NO_STORE)
}
