//! # Domain Module
//!
//! Business logic for guide and package availability, independent of the
//! HTTP layer and of the storage backend.
//!
//! ## Module Organization
//!
//! - **availability**: pure reducers (resolve, toggle, bookings, partition)
//! - **availability_service**: per-owner working sets and the explicit save
//! - **calendar**: month grid generation and navigation
//! - **commands**: internal command/query types
//! - **models**: domain entities and errors
//!
//! ## Business Rules
//!
//! - One record per calendar day per owner
//! - Dates without a record are unavailable
//! - Opening a date drops its booking reference
//! - Changes are only persisted on an explicit save

pub mod availability;
pub mod availability_service;
pub mod calendar;
pub mod commands;
pub mod models;

pub use availability_service::*;
pub use calendar::*;
