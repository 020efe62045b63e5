//! # CSV Availability Repository
//!
//! File-based availability storage. Each guide or package keeps its record
//! set in `{owner_directory}/availability.csv`.
//!
//! ## File Structure
//!
//! ```text
//! data/
//! ├── guides/
//! │   └── {guide_id}/
//! │       └── availability.csv
//! └── packages/
//!     └── {package_id}/
//!         └── availability.csv
//! ```
//!
//! ## CSV Format
//!
//! ```csv
//! date,is_available,booking_id,label
//! 2024-02-14,true,,
//! 2024-02-15,false,BK001,Desert Safari
//! ```
//!
//! Empty optional columns mean the value is absent. Saves replace the whole
//! file through a temp file and rename.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use csv::{ReaderBuilder, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use tracing::{debug, info, warn};

use super::connection::CsvConnection;
use crate::backend::domain::models::availability::{AvailabilityOwner, AvailabilityRecord};
use crate::backend::storage::AvailabilityStorage;

const HEADER: [&str; 4] = ["date", "is_available", "booking_id", "label"];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// CSV record structure for availability rows
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AvailabilityCsvRecord {
    date: String,
    is_available: bool,
    booking_id: Option<String>,
    label: Option<String>,
}

impl From<&AvailabilityRecord> for AvailabilityCsvRecord {
    fn from(record: &AvailabilityRecord) -> Self {
        AvailabilityCsvRecord {
            date: record.date.format(DATE_FORMAT).to_string(),
            is_available: record.is_available,
            booking_id: record.booking_id.clone(),
            label: record.label.clone(),
        }
    }
}

impl TryFrom<AvailabilityCsvRecord> for AvailabilityRecord {
    type Error = anyhow::Error;

    fn try_from(record: AvailabilityCsvRecord) -> Result<Self> {
        let date = NaiveDate::parse_from_str(record.date.trim(), DATE_FORMAT)
            .map_err(|e| anyhow::anyhow!("Failed to parse date '{}': {}", record.date, e))?;

        Ok(AvailabilityRecord {
            date,
            is_available: record.is_available,
            booking_id: record.booking_id.filter(|id| !id.trim().is_empty()),
            label: record.label.filter(|label| !label.is_empty()),
        })
    }
}

/// CSV-based availability repository using per-owner files
#[derive(Clone)]
pub struct AvailabilityRepository {
    connection: CsvConnection,
}

impl AvailabilityRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn read_records(&self, owner: &AvailabilityOwner) -> Result<Vec<AvailabilityRecord>> {
        let file_path = self.connection.get_availability_file_path(owner);
        if !file_path.exists() {
            debug!("No availability file for {}, starting empty", owner);
            return Ok(Vec::new());
        }

        let file = File::open(&file_path)?;
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(BufReader::new(file));

        let mut records = Vec::new();
        for result in csv_reader.deserialize::<AvailabilityCsvRecord>() {
            let row = match result {
                Ok(row) => row,
                Err(e) => {
                    warn!("Skipping malformed availability row in {:?}: {}", file_path, e);
                    continue;
                }
            };

            match AvailabilityRecord::try_from(row) {
                Ok(record) => records.push(record),
                Err(e) => warn!("Skipping availability row in {:?}: {}", file_path, e),
            }
        }

        Ok(records)
    }

    fn write_records(&self, owner: &AvailabilityOwner, records: &[AvailabilityRecord]) -> Result<()> {
        self.connection.ensure_owner_directory_exists(owner)?;

        let file_path = self.connection.get_availability_file_path(owner);
        let temp_file_path = file_path.with_extension("csv.tmp");

        {
            let temp_file = File::create(&temp_file_path)?;
            let mut csv_writer = WriterBuilder::new()
                .has_headers(false)
                .from_writer(BufWriter::new(temp_file));

            csv_writer.write_record(HEADER)?;
            for record in records {
                csv_writer.serialize(AvailabilityCsvRecord::from(record))?;
            }
            csv_writer.flush()?;
        }

        std::fs::rename(&temp_file_path, &file_path)?;

        debug!("Wrote {} availability records to {:?}", records.len(), file_path);
        Ok(())
    }
}

#[async_trait]
impl AvailabilityStorage for AvailabilityRepository {
    async fn load_availability(&self, owner: &AvailabilityOwner) -> Result<Vec<AvailabilityRecord>> {
        let records = self.read_records(owner)?;
        info!("Loaded {} availability records for {}", records.len(), owner);
        Ok(records)
    }

    async fn save_availability(&self, owner: &AvailabilityOwner, records: &[AvailabilityRecord]) -> Result<()> {
        self.write_records(owner, records)?;
        info!("Saved {} availability records for {}", records.len(), owner);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::csv::test_utils::TestEnvironment;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_load_missing_file_is_empty() -> Result<()> {
        let env = TestEnvironment::new().await?;
        let repo = AvailabilityRepository::new(env.connection.clone());

        let owner = AvailabilityOwner::guide("nobody")?;
        assert!(repo.load_availability(&owner).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_save_then_load_preserves_order_and_optionals() -> Result<()> {
        let env = TestEnvironment::new().await?;
        let repo = AvailabilityRepository::new(env.connection.clone());
        let owner = AvailabilityOwner::package("p-1")?;

        let records = vec![
            AvailabilityRecord::open(day(2024, 2, 14)),
            AvailabilityRecord::booked(day(2024, 2, 15), "BK001", Some("Desert Safari, 3 days".to_string())),
            AvailabilityRecord {
                date: day(2024, 2, 1),
                is_available: false,
                booking_id: None,
                label: None,
            },
        ];

        repo.save_availability(&owner, &records).await?;
        let loaded = repo.load_availability(&owner).await?;
        assert_eq!(loaded, records);

        let contents = std::fs::read_to_string(env.connection.get_availability_file_path(&owner))?;
        assert!(contents.starts_with("date,is_available,booking_id,label\n"));
        assert!(contents.contains("2024-02-14,true,,\n"));
        Ok(())
    }

    #[tokio::test]
    async fn test_save_replaces_previous_contents() -> Result<()> {
        let env = TestEnvironment::new().await?;
        let repo = AvailabilityRepository::new(env.connection.clone());
        let owner = AvailabilityOwner::guide("g-2")?;

        repo.save_availability(&owner, &[AvailabilityRecord::open(day(2024, 1, 1))]).await?;
        repo.save_availability(&owner, &[]).await?;

        assert!(repo.load_availability(&owner).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_owners_are_isolated() -> Result<()> {
        let env = TestEnvironment::new().await?;
        let repo = AvailabilityRepository::new(env.connection.clone());

        let guide = AvailabilityOwner::guide("same-id")?;
        let package = AvailabilityOwner::package("same-id")?;
        repo.save_availability(&guide, &[AvailabilityRecord::open(day(2024, 6, 1))]).await?;

        assert_eq!(repo.load_availability(&guide).await?.len(), 1);
        assert!(repo.load_availability(&package).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_rows_are_skipped() -> Result<()> {
        let env = TestEnvironment::new().await?;
        let repo = AvailabilityRepository::new(env.connection.clone());
        let owner = AvailabilityOwner::guide("g-3")?;

        let dir = env.connection.ensure_owner_directory_exists(&owner)?;
        std::fs::write(
            dir.join("availability.csv"),
            "date,is_available,booking_id,label\n\
             2024-02-10,true,,\n\
             not-a-date,true,,\n\
             2024-02-11,maybe,,\n\
             2024-02-12,false,BK9,\n",
        )?;

        let loaded = repo.load_availability(&owner).await?;
        assert_eq!(
            loaded,
            vec![
                AvailabilityRecord::open(day(2024, 2, 10)),
                AvailabilityRecord::booked(day(2024, 2, 12), "BK9", None),
            ]
        );
        Ok(())
    }
}
