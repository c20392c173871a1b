//! HTTP middleware for the dashboard API.
//!
//! # Layer Order (outermost first)
//!
//! 1. Sentry layers (hub per request, transaction capture)
//! 2. `TraceLayer` (request span with status and latency)
//! 3. [`RequireSession`] extractor on protected handlers

pub mod auth;

pub use auth::RequireSession;
