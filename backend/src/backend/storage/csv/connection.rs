use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::backend::domain::models::availability::AvailabilityOwner;

/// CsvConnection manages the data directory and per-owner file paths
#[derive(Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
}

impl CsvConnection {
    /// Create a new CSV connection with a base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Directory holding one owner's files, e.g. `{base}/guides/g-17`
    pub fn get_owner_directory(&self, owner: &AvailabilityOwner) -> PathBuf {
        self.base_directory
            .join(owner.kind.as_path_segment())
            .join(&owner.id)
    }

    pub fn get_availability_file_path(&self, owner: &AvailabilityOwner) -> PathBuf {
        self.get_owner_directory(owner).join("availability.csv")
    }

    /// Create the owner's directory if it does not exist yet
    pub fn ensure_owner_directory_exists(&self, owner: &AvailabilityOwner) -> Result<PathBuf> {
        let owner_dir = self.get_owner_directory(owner);
        if !owner_dir.exists() {
            fs::create_dir_all(&owner_dir)?;
        }
        Ok(owner_dir)
    }
}
