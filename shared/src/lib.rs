use serde::{Deserialize, Serialize};
use std::fmt;

/// A single date's open/closed/booked state for a guide or package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityRecord {
    /// Calendar day in `YYYY-MM-DD` format
    pub date: String,
    pub is_available: bool,
    /// Present only while the date is consumed by a confirmed booking
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<String>,
    /// Optional context label, e.g. the package name of the booking
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Resolved status of a calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateStatus {
    Available,
    Booked,
    /// Explicitly closed, or never recorded
    Unavailable,
}

impl fmt::Display for DateStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DateStatus::Available => write!(f, "available"),
            DateStatus::Booked => write!(f, "booked"),
            DateStatus::Unavailable => write!(f, "unavailable"),
        }
    }
}

/// The kind of entity an availability set belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnerKind {
    Guide,
    Package,
}

/// Full working set for one guide or package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub owner_kind: OwnerKind,
    pub owner_id: String,
    pub records: Vec<AvailabilityRecord>,
}

/// Query for the status of a single date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateStatusQuery {
    /// `YYYY-MM-DD` or an RFC 3339 timestamp
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateStatusResponse {
    pub date: String,
    pub status: DateStatus,
    /// The matching record, or None when the date falls back to the default
    pub record: Option<AvailabilityRecord>,
}

/// Request to flip a date's availability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToggleDateRequest {
    /// `YYYY-MM-DD` or an RFC 3339 timestamp
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToggleDateResponse {
    /// The record for the toggled date after the change
    pub record: AvailabilityRecord,
    pub records: Vec<AvailabilityRecord>,
}

/// Request to mark a date as consumed by a confirmed booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordBookingRequest {
    pub date: String,
    pub booking_id: String,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingResponse {
    pub record: AvailabilityRecord,
    pub success_message: String,
}

/// Three disjoint date buckets used for calendar modifiers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityBuckets {
    pub available: Vec<String>,
    pub booked: Vec<String>,
    pub unavailable: Vec<String>,
}

/// Query for a calendar month view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarMonthQuery {
    pub month: u32,
    pub year: u32,
}

/// Type of calendar cell for explicit rendering logic
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum CalendarDayType {
    /// Empty padding cell before the start of the month
    PaddingBefore,
    /// Actual day within the month
    MonthDay,
}

/// A single cell of the availability calendar
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AvailabilityCalendarDay {
    /// Day of month, 0 for padding cells
    pub day: u32,
    pub day_type: CalendarDayType,
    pub status: DateStatus,
    pub booking_id: Option<String>,
    pub label: Option<String>,
    /// False when the status is the implicit default for an unrecorded date
    pub is_recorded: bool,
}

/// A month of availability laid out for a calendar grid
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AvailabilityCalendarMonth {
    pub month: u32,
    pub year: u32,
    pub month_name: String,
    pub first_day_of_week: u32, // 0 = Sunday, 1 = Monday, etc.
    pub days: Vec<AvailabilityCalendarDay>,
    /// None at the edge of the supported year range
    pub previous: Option<CalendarMonthQuery>,
    pub next: Option<CalendarMonthQuery>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveAvailabilityResponse {
    pub saved_count: usize,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscardChangesResponse {
    /// False when there was no working set to drop
    pub discarded: bool,
    pub success_message: String,
}

/// Error body returned by the REST API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
