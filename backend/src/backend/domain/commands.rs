//! Domain-level command and query types
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer maps the public DTOs defined
//! in the `shared` crate to these internal types.

pub mod availability {
    use chrono::NaiveDate;

    use crate::backend::domain::models::availability::{AvailabilityOwner, AvailabilityRecord};

    /// Input for flipping a date's availability.
    #[derive(Debug, Clone)]
    pub struct ToggleDateCommand {
        pub owner: AvailabilityOwner,
        pub date: NaiveDate,
    }

    /// Input for attaching a confirmed booking to a date.
    #[derive(Debug, Clone)]
    pub struct RecordBookingCommand {
        pub owner: AvailabilityOwner,
        pub date: NaiveDate,
        pub booking_id: String,
        pub label: Option<String>,
    }

    /// Input for removing a cancelled booking from a date.
    #[derive(Debug, Clone)]
    pub struct ReleaseBookingCommand {
        pub owner: AvailabilityOwner,
        pub date: NaiveDate,
    }

    /// Query for a month of availability.
    #[derive(Debug, Clone)]
    pub struct CalendarMonthQuery {
        pub owner: AvailabilityOwner,
        pub month: u32,
        pub year: u32,
    }

    /// Result of a toggle: the touched record plus the full new set.
    #[derive(Debug, Clone)]
    pub struct ToggleDateResult {
        pub record: AvailabilityRecord,
        pub records: Vec<AvailabilityRecord>,
    }

    /// Result of resolving a single date.
    #[derive(Debug, Clone)]
    pub struct DateStatusResult {
        pub date: NaiveDate,
        pub status: crate::backend::domain::models::availability::DateStatus,
        pub record: Option<AvailabilityRecord>,
    }

    /// Result of an explicit save.
    #[derive(Debug, Clone)]
    pub struct SaveAvailabilityResult {
        pub saved_count: usize,
        pub success_message: String,
    }
}
