//! Availability reducers for guides and packages.
//!
//! These are pure functions over an owner's record set. They never mutate
//! the caller's slice; every change returns a new set so the service layer
//! can swap its working set in one step.
//!
//! ## Business Rules
//!
//! - One record per calendar day, matched by day equality
//! - A date with no record is unavailable
//! - Opening a date drops any booking reference it carried
//! - Closing a date keeps whatever booking reference it already had

use chrono::NaiveDate;
use tracing::debug;

use crate::backend::domain::models::availability::{AvailabilityRecord, DateStatus};

/// Calendar modifiers derived from a record set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilityBuckets {
    pub available: Vec<NaiveDate>,
    pub booked: Vec<NaiveDate>,
    pub unavailable: Vec<NaiveDate>,
}

/// Find the record for `date`. The first match wins if the set holds duplicates.
pub fn find_record(records: &[AvailabilityRecord], date: NaiveDate) -> Option<&AvailabilityRecord> {
    records.iter().find(|r| r.date == date)
}

fn find_index(records: &[AvailabilityRecord], date: NaiveDate) -> Option<usize> {
    records.iter().position(|r| r.date == date)
}

/// Classify a single record
pub fn record_status(record: &AvailabilityRecord) -> DateStatus {
    if record.is_available {
        DateStatus::Available
    } else if record.is_booked() {
        DateStatus::Booked
    } else {
        DateStatus::Unavailable
    }
}

/// Status of `date`, falling back to unavailable when no record exists
pub fn date_status(records: &[AvailabilityRecord], date: NaiveDate) -> DateStatus {
    find_record(records, date)
        .map(record_status)
        .unwrap_or(DateStatus::Unavailable)
}

/// Flip the availability of `date`.
///
/// An unseen date is appended as available. An existing date flips; going
/// to available clears its booking, going to unavailable keeps it.
pub fn toggle(records: &[AvailabilityRecord], date: NaiveDate) -> Vec<AvailabilityRecord> {
    let mut next = records.to_vec();

    match find_index(&next, date) {
        Some(index) => {
            let record = &mut next[index];
            record.is_available = !record.is_available;
            if record.is_available {
                record.booking_id = None;
            }
            debug!(
                "Toggled {} to {}",
                date,
                if record.is_available { "available" } else { "unavailable" }
            );
        }
        None => {
            debug!("Opened previously unseen date {}", date);
            next.push(AvailabilityRecord::open(date));
        }
    }

    next
}

/// Mark `date` as consumed by a confirmed booking.
///
/// The label is only replaced when a new one is supplied.
pub fn apply_booking(
    records: &[AvailabilityRecord],
    date: NaiveDate,
    booking_id: &str,
    label: Option<String>,
) -> Vec<AvailabilityRecord> {
    let mut next = records.to_vec();

    match find_index(&next, date) {
        Some(index) => {
            let record = &mut next[index];
            record.is_available = false;
            record.booking_id = Some(booking_id.to_string());
            if label.is_some() {
                record.label = label;
            }
        }
        None => next.push(AvailabilityRecord::booked(date, booking_id, label)),
    }

    next
}

/// Drop the booking on `date`, leaving the date explicitly closed.
///
/// Returns None when the date carries no booking.
pub fn release_booking(records: &[AvailabilityRecord], date: NaiveDate) -> Option<Vec<AvailabilityRecord>> {
    let index = find_index(records, date)?;
    records[index].booking_id.as_ref()?;

    let mut next = records.to_vec();
    let record = &mut next[index];
    record.is_available = false;
    record.booking_id = None;
    Some(next)
}

/// Split the set into the three disjoint calendar buckets, keeping input order
pub fn partition(records: &[AvailabilityRecord]) -> AvailabilityBuckets {
    let mut buckets = AvailabilityBuckets::default();

    for record in records {
        match record_status(record) {
            DateStatus::Available => buckets.available.push(record.date),
            DateStatus::Booked => buckets.booked.push(record.date),
            DateStatus::Unavailable => buckets.unavailable.push(record.date),
        }
    }

    buckets
}

/// Dates that occur more than once, in first-seen order
pub fn duplicate_dates(records: &[AvailabilityRecord]) -> Vec<NaiveDate> {
    let mut seen = std::collections::HashSet::new();
    let mut duplicates = Vec::new();
    for record in records {
        if !seen.insert(record.date) && !duplicates.contains(&record.date) {
            duplicates.push(record.date);
        }
    }
    duplicates
}
