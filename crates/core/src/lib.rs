//! MSME Core - Shared types library.
//!
//! This crate provides common types used across all MSME dashboard components:
//! - `dashboard` - Data layer, mock services and JSON API server
//! - `cli` - Command-line tools for seeding and inspecting the data directory
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no storage access,
//! no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
