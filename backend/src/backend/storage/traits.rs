//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.

use anyhow::Result;
use async_trait::async_trait;

use crate::backend::domain::models::availability::{AvailabilityOwner, AvailabilityRecord};

/// Trait defining the interface for availability storage operations
///
/// This is the persistence hook behind an explicit save: the domain layer
/// hands over the complete record set and never writes partial updates.
#[async_trait]
pub trait AvailabilityStorage: Send + Sync {
    /// Load the persisted record set for an owner
    /// Returns an empty set when nothing has been saved yet
    async fn load_availability(&self, owner: &AvailabilityOwner) -> Result<Vec<AvailabilityRecord>>;

    /// Replace the persisted record set for an owner
    async fn save_availability(&self, owner: &AvailabilityOwner, records: &[AvailabilityRecord]) -> Result<()>;
}
