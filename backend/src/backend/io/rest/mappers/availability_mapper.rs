use shared::{
    AvailabilityBuckets as BucketsDto, AvailabilityRecord as RecordDto, DateStatusResponse,
    OwnerKind as OwnerKindDto, ToggleDateResponse,
};

use crate::backend::domain::availability::AvailabilityBuckets;
use crate::backend::domain::commands::availability::{DateStatusResult, ToggleDateResult};
use crate::backend::domain::models::availability::{AvailabilityRecord, OwnerKind};

const DATE_FORMAT: &str = "%Y-%m-%d";

pub struct AvailabilityMapper;

impl AvailabilityMapper {
    pub fn owner_kind_to_dto(kind: OwnerKind) -> OwnerKindDto {
        match kind {
            OwnerKind::Guide => OwnerKindDto::Guide,
            OwnerKind::Package => OwnerKindDto::Package,
        }
    }

    /// Convert domain record to shared DTO
    pub fn to_dto(domain: AvailabilityRecord) -> RecordDto {
        RecordDto {
            date: domain.date.format(DATE_FORMAT).to_string(),
            is_available: domain.is_available,
            booking_id: domain.booking_id,
            label: domain.label,
        }
    }

    pub fn to_dto_list(records: Vec<AvailabilityRecord>) -> Vec<RecordDto> {
        records.into_iter().map(Self::to_dto).collect()
    }

    pub fn buckets_to_dto(buckets: AvailabilityBuckets) -> BucketsDto {
        let format = |dates: Vec<chrono::NaiveDate>| -> Vec<String> {
            dates
                .into_iter()
                .map(|d| d.format(DATE_FORMAT).to_string())
                .collect()
        };
        BucketsDto {
            available: format(buckets.available),
            booked: format(buckets.booked),
            unavailable: format(buckets.unavailable),
        }
    }

    pub fn to_date_status_response(result: DateStatusResult) -> DateStatusResponse {
        DateStatusResponse {
            date: result.date.format(DATE_FORMAT).to_string(),
            status: result.status,
            record: result.record.map(Self::to_dto),
        }
    }

    pub fn to_toggle_response(result: ToggleDateResult) -> ToggleDateResponse {
        ToggleDateResponse {
            record: Self::to_dto(result.record),
            records: Self::to_dto_list(result.records),
        }
    }
}
