//! Domain models for guide and package availability.
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use shared::DateStatus;

/// One date's availability within an owner's set.
///
/// At most one record exists per calendar day, and `booking_id` is only
/// ever set while `is_available` is false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityRecord {
    pub date: NaiveDate,
    pub is_available: bool,
    pub booking_id: Option<String>,
    pub label: Option<String>,
}

impl AvailabilityRecord {
    /// A freshly opened date with no booking attached
    pub fn open(date: NaiveDate) -> Self {
        Self {
            date,
            is_available: true,
            booking_id: None,
            label: None,
        }
    }

    /// A date consumed by a confirmed booking
    pub fn booked(date: NaiveDate, booking_id: impl Into<String>, label: Option<String>) -> Self {
        Self {
            date,
            is_available: false,
            booking_id: Some(booking_id.into()),
            label,
        }
    }

    pub fn is_booked(&self) -> bool {
        !self.is_available && self.booking_id.is_some()
    }
}

/// Kind of entity that owns an availability set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OwnerKind {
    Guide,
    Package,
}

impl OwnerKind {
    /// Plural path segment, also used as the storage directory name
    pub fn as_path_segment(&self) -> &'static str {
        match self {
            OwnerKind::Guide => "guides",
            OwnerKind::Package => "packages",
        }
    }
}

impl fmt::Display for OwnerKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OwnerKind::Guide => write!(f, "guide"),
            OwnerKind::Package => write!(f, "package"),
        }
    }
}

impl FromStr for OwnerKind {
    type Err = AvailabilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "guide" | "guides" => Ok(OwnerKind::Guide),
            "package" | "packages" => Ok(OwnerKind::Package),
            _ => Err(AvailabilityError::UnknownOwnerKind(s.to_string())),
        }
    }
}

/// The guide or package an availability set belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AvailabilityOwner {
    pub kind: OwnerKind,
    pub id: String,
}

impl AvailabilityOwner {
    /// Build an owner, rejecting ids that are unsafe as directory names
    pub fn new(kind: OwnerKind, id: &str) -> Result<Self, AvailabilityError> {
        let id = id.trim();
        let valid = !id.is_empty()
            && id.len() <= 128
            && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(AvailabilityError::InvalidOwnerId(id.to_string()));
        }
        Ok(Self {
            kind,
            id: id.to_string(),
        })
    }

    pub fn guide(id: &str) -> Result<Self, AvailabilityError> {
        Self::new(OwnerKind::Guide, id)
    }

    pub fn package(id: &str) -> Result<Self, AvailabilityError> {
        Self::new(OwnerKind::Package, id)
    }
}

impl fmt::Display for AvailabilityOwner {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}::{}", self.kind, self.id)
    }
}

/// Reduce a `YYYY-MM-DD` date or an RFC 3339 timestamp to its calendar day
pub fn parse_calendar_day(input: &str) -> Result<NaiveDate, AvailabilityError> {
    let trimmed = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    // The day as written by the client, not shifted into UTC
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.date_naive())
        .map_err(|_| AvailabilityError::InvalidDate(input.to_string()))
}

#[derive(Debug, thiserror::Error)]
pub enum AvailabilityError {
    #[error("Invalid date '{0}': expected YYYY-MM-DD or an RFC 3339 timestamp")]
    InvalidDate(String),
    #[error("Unknown owner kind '{0}': expected guide or package")]
    UnknownOwnerKind(String),
    #[error("Invalid owner id '{0}'")]
    InvalidOwnerId(String),
    #[error("Invalid month: {0}. Must be between 1 and 12")]
    InvalidMonth(u32),
    #[error("Invalid year: {0}. Must be between 1 and 9999")]
    InvalidYear(u32),
    #[error("Booking id cannot be empty")]
    EmptyBookingId,
    #[error("No booking recorded on {0}")]
    NoBookingOnDate(NaiveDate),
    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl AvailabilityError {
    /// True for errors caused by bad caller input rather than storage
    pub fn is_client_error(&self) -> bool {
        !matches!(self, AvailabilityError::Storage(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_calendar_day_plain_date() {
        assert_eq!(
            parse_calendar_day("2024-02-15").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 15).unwrap()
        );
    }

    #[test]
    fn test_parse_calendar_day_keeps_local_day_of_timestamp() {
        // 23:30 at -05:00 is already the next day in UTC
        assert_eq!(
            parse_calendar_day("2024-02-15T23:30:00-05:00").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 15).unwrap()
        );
    }

    #[test]
    fn test_parse_calendar_day_rejects_garbage() {
        assert!(matches!(
            parse_calendar_day("15/02/2024"),
            Err(AvailabilityError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_owner_kind_from_path_segment() {
        assert_eq!("guides".parse::<OwnerKind>().unwrap(), OwnerKind::Guide);
        assert_eq!("Package".parse::<OwnerKind>().unwrap(), OwnerKind::Package);
        assert!("hotels".parse::<OwnerKind>().is_err());
    }

    #[test]
    fn test_owner_id_validation() {
        assert!(AvailabilityOwner::guide("guide-42_a").is_ok());
        assert!(AvailabilityOwner::guide("").is_err());
        assert!(AvailabilityOwner::package("../etc").is_err());
        assert!(AvailabilityOwner::package("a b").is_err());
    }

    #[test]
    fn test_booked_record_is_booked() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert!(AvailabilityRecord::booked(date, "BK001", None).is_booked());
        assert!(!AvailabilityRecord::open(date).is_booked());
    }
}
