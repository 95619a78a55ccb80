//! Fake Store Core - Shared types library.
//!
//! This crate provides the common types the Fake Store admin panel is
//! built on.
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O and no
//! HTTP clients. Everything here round-trips the JSON shapes of the
//! upstream Fake Store API.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and money formatting
//! - [`models`] - Entity records (products, carts, users) and their drafts
//! - [`totals`] - Cart total aggregation over a fetched product collection

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod models;
pub mod totals;
pub mod types;

pub use models::*;
pub use types::*;
