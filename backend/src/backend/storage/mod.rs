//! # Storage Module
//!
//! Handles all data persistence for guide and package availability.
//!
//! The domain layer only sees the [`AvailabilityStorage`] trait, so the CSV
//! implementation can be swapped without touching services or handlers.
//!
//! ## Current Implementation
//!
//! - **Primary Storage**: per-owner CSV files under the data directory
//! - **Writes**: whole-file replace via temp file and rename
//! - **Tests**: temporary directories cleaned up on drop

pub mod traits;
pub mod csv;

pub use traits::AvailabilityStorage;
pub use self::csv::{AvailabilityRepository, CsvConnection};
