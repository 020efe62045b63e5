//! Availability service for guides and packages.
//!
//! Owns one in-memory working set per owner. Reads lazily load the persisted
//! set; every change runs through the pure reducers in
//! [`crate::backend::domain::availability`] and swaps the working set for the
//! returned one. Nothing reaches storage until [`AvailabilityService::save`].

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use shared::AvailabilityCalendarMonth;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::backend::domain::availability::{self as reducers, AvailabilityBuckets};
use crate::backend::domain::calendar::CalendarService;
use crate::backend::domain::commands::availability::{
    CalendarMonthQuery, DateStatusResult, RecordBookingCommand, ReleaseBookingCommand,
    SaveAvailabilityResult, ToggleDateCommand, ToggleDateResult,
};
use crate::backend::domain::models::availability::{
    AvailabilityError, AvailabilityOwner, AvailabilityRecord,
};
use crate::backend::storage::AvailabilityStorage;

type WorkingSets = HashMap<AvailabilityOwner, Vec<AvailabilityRecord>>;

#[derive(Clone)]
pub struct AvailabilityService {
    storage: Arc<dyn AvailabilityStorage>,
    calendar_service: CalendarService,
    working_sets: Arc<Mutex<WorkingSets>>,
}

impl AvailabilityService {
    pub fn new(storage: Arc<dyn AvailabilityStorage>, calendar_service: CalendarService) -> Self {
        Self {
            storage,
            calendar_service,
            working_sets: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Read the persisted set, warning about duplicated days
    async fn load_records(&self, owner: &AvailabilityOwner) -> Result<Vec<AvailabilityRecord>, AvailabilityError> {
        let records = self.storage.load_availability(owner).await?;
        let duplicates = reducers::duplicate_dates(&records);
        if !duplicates.is_empty() {
            warn!(
                "Availability for {} has {} duplicated dates; first entry wins: {:?}",
                owner,
                duplicates.len(),
                duplicates
            );
        }
        Ok(records)
    }

    /// Working set to mutate, loaded on first change
    async fn ensure_loaded<'a>(
        &self,
        sets: &'a mut WorkingSets,
        owner: &AvailabilityOwner,
    ) -> Result<&'a mut Vec<AvailabilityRecord>, AvailabilityError> {
        if !sets.contains_key(owner) {
            let records = self.load_records(owner).await?;
            sets.insert(owner.clone(), records);
        }
        // Inserted above when missing
        Ok(sets.entry(owner.clone()).or_default())
    }

    /// Records to read from. Owners without a working set are served
    /// straight from storage and stay unloaded.
    async fn current_records(
        &self,
        sets: &WorkingSets,
        owner: &AvailabilityOwner,
    ) -> Result<Vec<AvailabilityRecord>, AvailabilityError> {
        match sets.get(owner) {
            Some(records) => Ok(records.clone()),
            None => self.load_records(owner).await,
        }
    }

    /// Current working set for an owner
    pub async fn get_availability(
        &self,
        owner: &AvailabilityOwner,
    ) -> Result<Vec<AvailabilityRecord>, AvailabilityError> {
        let sets = self.working_sets.lock().await;
        self.current_records(&sets, owner).await
    }

    /// Resolve one date against the working set
    pub async fn get_date_status(
        &self,
        owner: &AvailabilityOwner,
        date: NaiveDate,
    ) -> Result<DateStatusResult, AvailabilityError> {
        let sets = self.working_sets.lock().await;
        let records = self.current_records(&sets, owner).await?;

        Ok(DateStatusResult {
            date,
            status: reducers::date_status(&records, date),
            record: reducers::find_record(&records, date).cloned(),
        })
    }

    pub async fn toggle_date(&self, command: ToggleDateCommand) -> Result<ToggleDateResult, AvailabilityError> {
        let mut sets = self.working_sets.lock().await;
        let records = self.ensure_loaded(&mut sets, &command.owner).await?;

        let next = reducers::toggle(records, command.date);
        let record = reducers::find_record(&next, command.date)
            .cloned()
            .unwrap_or_else(|| AvailabilityRecord::open(command.date));
        *records = next.clone();

        info!(
            "Toggled {} for {}: now {}",
            command.date,
            command.owner,
            reducers::record_status(&record)
        );

        Ok(ToggleDateResult { record, records: next })
    }

    pub async fn record_booking(
        &self,
        command: RecordBookingCommand,
    ) -> Result<AvailabilityRecord, AvailabilityError> {
        let booking_id = command.booking_id.trim();
        if booking_id.is_empty() {
            return Err(AvailabilityError::EmptyBookingId);
        }
        let label = command
            .label
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty());

        let mut sets = self.working_sets.lock().await;
        let records = self.ensure_loaded(&mut sets, &command.owner).await?;

        if let Some(existing) = reducers::find_record(records, command.date) {
            if let Some(previous) = existing.booking_id.as_deref().filter(|id| *id != booking_id) {
                warn!(
                    "Booking {} replaces {} on {} for {}",
                    booking_id, previous, command.date, command.owner
                );
            }
        }

        *records = reducers::apply_booking(records, command.date, booking_id, label);
        let record = reducers::find_record(records, command.date)
            .cloned()
            .unwrap_or_else(|| AvailabilityRecord::booked(command.date, booking_id, None));

        info!("Recorded booking {} on {} for {}", booking_id, command.date, command.owner);
        Ok(record)
    }

    pub async fn release_booking(
        &self,
        command: ReleaseBookingCommand,
    ) -> Result<AvailabilityRecord, AvailabilityError> {
        let mut sets = self.working_sets.lock().await;
        let records = self.ensure_loaded(&mut sets, &command.owner).await?;

        let next = reducers::release_booking(records, command.date)
            .ok_or(AvailabilityError::NoBookingOnDate(command.date))?;
        *records = next;

        info!("Released booking on {} for {}", command.date, command.owner);
        Ok(reducers::find_record(records, command.date)
            .cloned()
            .unwrap_or_else(|| AvailabilityRecord {
                date: command.date,
                is_available: false,
                booking_id: None,
                label: None,
            }))
    }

    /// Calendar buckets, recomputed on every call
    pub async fn get_buckets(&self, owner: &AvailabilityOwner) -> Result<AvailabilityBuckets, AvailabilityError> {
        let sets = self.working_sets.lock().await;
        let records = self.current_records(&sets, owner).await?;
        Ok(reducers::partition(&records))
    }

    pub async fn get_calendar_month(
        &self,
        query: CalendarMonthQuery,
    ) -> Result<AvailabilityCalendarMonth, AvailabilityError> {
        let sets = self.working_sets.lock().await;
        let records = self.current_records(&sets, &query.owner).await?;
        self.calendar_service
            .generate_availability_month(query.month, query.year, &records)
    }

    /// Hand the full working set to storage.
    ///
    /// The lock is held until the write finishes, so overlapping saves land
    /// in order and no change slips in between snapshot and write.
    pub async fn save(&self, owner: &AvailabilityOwner) -> Result<SaveAvailabilityResult, AvailabilityError> {
        let sets = self.working_sets.lock().await;
        let snapshot = self.current_records(&sets, owner).await?;

        if let Err(e) = self.storage.save_availability(owner, &snapshot).await {
            warn!("Saving availability for {} failed: {}", owner, e);
            return Err(AvailabilityError::Storage(e));
        }

        Ok(SaveAvailabilityResult {
            saved_count: snapshot.len(),
            success_message: format!("Saved {} dates for {} {}", snapshot.len(), owner.kind, owner.id),
        })
    }

    /// Forget unsaved changes; the next read reloads from storage
    pub async fn discard_changes(&self, owner: &AvailabilityOwner) -> bool {
        let discarded = self.working_sets.lock().await.remove(owner).is_some();
        if discarded {
            info!("Discarded working set for {}", owner);
        }
        discarded
    }
}
