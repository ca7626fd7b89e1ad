use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::ids::{SchoolId, TimeslotId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Timeslot {
    pub id: TimeslotId,
    #[schema(value_type = String, example = "09:00:00")]
    pub start_time: NaiveTime,
    #[schema(value_type = String, example = "10:00:00")]
    pub end_time: NaiveTime,
    pub school_id: SchoolId,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_create_timeslot"))]
pub struct CreateTimeslotDto {
    #[schema(value_type = String, example = "09:00:00")]
    pub start_time: NaiveTime,
    #[schema(value_type = String, example = "10:00:00")]
    pub end_time: NaiveTime,
    pub school_id: SchoolId,
}

fn validate_create_timeslot(dto: &CreateTimeslotDto) -> Result<(), ValidationError> {
    check_timeslot_order(dto.start_time, dto.end_time)
}

/// A timeslot must end strictly after it starts.
pub fn check_timeslot_order(start: NaiveTime, end: NaiveTime) -> Result<(), ValidationError> {
    if start >= end {
        return Err(ValidationError::new("timeslot_order")
            .with_message("A timeslot cannot end before it begins!".into()));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_update_timeslot"))]
pub struct UpdateTimeslotDto {
    #[schema(value_type = Option<String>, example = "09:00:00")]
    pub start_time: Option<NaiveTime>,
    #[schema(value_type = Option<String>, example = "10:00:00")]
    pub end_time: Option<NaiveTime>,
}

fn validate_update_timeslot(dto: &UpdateTimeslotDto) -> Result<(), ValidationError> {
    match (dto.start_time, dto.end_time) {
        (None, None) => Err(ValidationError::new("timeslot_empty")
            .with_message("You need to pass one of start time or end time".into())),
        (Some(start), Some(end)) => check_timeslot_order(start, end),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_create_requires_end_after_start() {
        let dto = CreateTimeslotDto {
            start_time: time(10, 0),
            end_time: time(9, 0),
            school_id: SchoolId::new(),
        };
        assert!(dto.validate().is_err());

        let dto = CreateTimeslotDto {
            start_time: time(10, 0),
            end_time: time(10, 0),
            school_id: SchoolId::new(),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_update_needs_a_field() {
        let dto = UpdateTimeslotDto {
            start_time: None,
            end_time: None,
        };
        assert!(dto.validate().is_err());

        let dto = UpdateTimeslotDto {
            start_time: None,
            end_time: Some(time(11, 0)),
        };
        assert!(dto.validate().is_ok());
    }
}
