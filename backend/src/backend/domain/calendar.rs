//! Calendar domain logic for availability views.
//!
//! Lays an owner's availability out as a month grid. The UI only paints
//! cells; padding, day counts, statuses, and month navigation are all
//! computed here.

use chrono::{Datelike, NaiveDate};
use shared::{AvailabilityCalendarDay, AvailabilityCalendarMonth, CalendarDayType, CalendarMonthQuery};
use tracing::debug;

use crate::backend::domain::availability::{find_record, record_status};
use crate::backend::domain::models::availability::{AvailabilityError, AvailabilityRecord, DateStatus};

/// Years a month view may be requested for
pub const MIN_YEAR: u32 = 1;
pub const MAX_YEAR: u32 = 9999;

/// Calendar service that handles all calendar-related business logic
#[derive(Clone, Default)]
pub struct CalendarService;

impl CalendarService {
    pub fn new() -> Self {
        Self
    }

    /// Generate a month grid with the status of every day
    pub fn generate_availability_month(
        &self,
        month: u32,
        year: u32,
        records: &[AvailabilityRecord],
    ) -> Result<AvailabilityCalendarMonth, AvailabilityError> {
        if !(1..=12).contains(&month) {
            return Err(AvailabilityError::InvalidMonth(month));
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(AvailabilityError::InvalidYear(year));
        }

        let days_in_month = self.days_in_month(month, year);
        let first_day = self.first_day_of_month(month, year);

        debug!(
            "Generating availability calendar for {}/{}: {} days, first weekday {}",
            month, year, days_in_month, first_day
        );

        let mut days = Vec::with_capacity((first_day + days_in_month) as usize);

        for _ in 0..first_day {
            days.push(AvailabilityCalendarDay {
                day: 0,
                day_type: CalendarDayType::PaddingBefore,
                status: DateStatus::Unavailable,
                booking_id: None,
                label: None,
                is_recorded: false,
            });
        }

        for day in 1..=days_in_month {
            let record = NaiveDate::from_ymd_opt(year as i32, month, day)
                .and_then(|date| find_record(records, date));

            days.push(match record {
                Some(record) => AvailabilityCalendarDay {
                    day,
                    day_type: CalendarDayType::MonthDay,
                    status: record_status(record),
                    booking_id: record.booking_id.clone(),
                    label: record.label.clone(),
                    is_recorded: true,
                },
                None => AvailabilityCalendarDay {
                    day,
                    day_type: CalendarDayType::MonthDay,
                    status: DateStatus::Unavailable,
                    booking_id: None,
                    label: None,
                    is_recorded: false,
                },
            });
        }

        Ok(AvailabilityCalendarMonth {
            month,
            year,
            month_name: self.month_name(month).to_string(),
            first_day_of_week: first_day,
            days,
            previous: self.previous_month(month, year).map(|(month, year)| CalendarMonthQuery { month, year }),
            next: self.next_month(month, year).map(|(month, year)| CalendarMonthQuery { month, year }),
        })
    }

    /// Get the number of days in a given month and year
    pub fn days_in_month(&self, month: u32, year: u32) -> u32 {
        match month {
            2 => {
                if self.is_leap_year(year) {
                    29
                } else {
                    28
                }
            }
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        }
    }

    pub fn is_leap_year(&self, year: u32) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    /// Get the first day of month (0 = Sunday, 1 = Monday, etc.)
    pub fn first_day_of_month(&self, month: u32, year: u32) -> u32 {
        NaiveDate::from_ymd_opt(year as i32, month, 1)
            .map(|date| date.weekday().num_days_from_sunday())
            .unwrap_or(0)
    }

    pub fn month_name(&self, month: u32) -> &'static str {
        match month {
            1 => "January", 2 => "February", 3 => "March", 4 => "April",
            5 => "May", 6 => "June", 7 => "July", 8 => "August",
            9 => "September", 10 => "October", 11 => "November", 12 => "December",
            _ => "Invalid Month",
        }
    }

    /// None when the previous month falls before `MIN_YEAR`
    pub fn previous_month(&self, current_month: u32, current_year: u32) -> Option<(u32, u32)> {
        let previous = if current_month == 1 {
            (12, current_year.checked_sub(1)?)
        } else {
            (current_month.checked_sub(1)?, current_year)
        };
        (previous.1 >= MIN_YEAR).then_some(previous)
    }

    /// None when the next month falls after `MAX_YEAR`
    pub fn next_month(&self, current_month: u32, current_year: u32) -> Option<(u32, u32)> {
        let next = if current_month == 12 {
            (1, current_year.checked_add(1)?)
        } else {
            (current_month + 1, current_year)
        };
        (next.1 <= MAX_YEAR).then_some(next)
    }
}
