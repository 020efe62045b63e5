//! # IO Module
//!
//! The adapter layer between HTTP clients and the domain logic. It turns
//! requests into domain commands and domain results into shared DTOs, and
//! maps domain errors onto status codes.
//!
//! ## Supported Operations
//!
//! - **GET /api/availability/:kind/:id**: current working set
//! - **GET .../status?date=**: status of one date
//! - **POST .../toggle**: flip a date's availability
//! - **POST .../bookings**, **DELETE .../bookings/:date**: booking reconciliation
//! - **GET .../buckets**, **GET .../month**: calendar rendering data
//! - **POST .../save**, **POST .../discard**: persist or drop the working set

pub mod rest;

pub use rest::*;
