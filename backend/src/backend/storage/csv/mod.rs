//! # CSV Storage
//!
//! Flat-file storage: one directory per guide or package under the
//! configured data directory.

pub mod connection;
pub mod availability_repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::CsvConnection;
pub use availability_repository::AvailabilityRepository;
