use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::ids::{DivisionId, LectureId, TimeslotId};

/// Days a lecture can be scheduled on, in week order.
pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// A day of the week. Ordering follows [`WEEKDAYS`], so a timetable keyed on it
/// serializes Monday first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn as_str(self) -> &'static str {
        WEEKDAYS[self as usize]
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WEEKDAYS
            .iter()
            .position(|day| *day == s)
            .map(|index| Self::ALL[index])
            .ok_or_else(|| format!("Invalid day {}", s))
    }
}

pub const LECTURE_TYPES: [&str; 3] = ["theory", "practical", "tutorial"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Lecture {
    pub id: LectureId,
    pub day: String,
    pub time_slot_id: TimeslotId,
    pub division_id: DivisionId,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub lecture_type: String,
    pub room_number: String,
}

/// Lectures grouped by weekday, Monday first. Days without lectures are absent.
pub type Timetable = BTreeMap<Weekday, Vec<Lecture>>;

pub fn validate_weekday(day: &str) -> Result<(), ValidationError> {
    day.parse::<Weekday>()
        .map(|_| ())
        .map_err(|msg| ValidationError::new("weekday").with_message(msg.into()))
}

pub fn validate_lecture_type(lecture_type: &str) -> Result<(), ValidationError> {
    if !LECTURE_TYPES.contains(&lecture_type) {
        return Err(ValidationError::new("lecture_type")
            .with_message(format!("Invalid lecture type {}", lecture_type).into()));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateLectureDto {
    #[validate(custom(function = "validate_weekday"))]
    pub day: String,
    pub time_slot_id: TimeslotId,
    pub division_id: DivisionId,
    #[serde(rename = "type")]
    #[validate(custom(function = "validate_lecture_type"))]
    pub lecture_type: String,
    #[validate(length(min = 1, max = 20))]
    pub room_number: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateLectureDto {
    #[validate(custom(function = "validate_weekday"))]
    pub day: Option<String>,
    pub time_slot_id: Option<TimeslotId>,
    pub division_id: Option<DivisionId>,
    #[serde(rename = "type")]
    #[validate(custom(function = "validate_lecture_type"))]
    pub lecture_type: Option<String>,
    #[validate(length(min = 1, max = 20))]
    pub room_number: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_names_are_case_sensitive() {
        assert!(validate_weekday("Monday").is_ok());
        assert!(validate_weekday("Sunday").is_ok());
        assert!(validate_weekday("monday").is_err());
        assert!(validate_weekday("").is_err());
    }

    #[test]
    fn test_weekday_round_trips_names() {
        for (day, name) in Weekday::ALL.iter().zip(WEEKDAYS) {
            assert_eq!(day.as_str(), name);
            assert_eq!(name.parse::<Weekday>().unwrap(), *day);
        }
        assert!("Funday".parse::<Weekday>().is_err());
    }

    #[test]
    fn test_timetable_serializes_in_week_order() {
        let mut timetable = Timetable::new();
        for day in [Weekday::Sunday, Weekday::Friday, Weekday::Tuesday, Weekday::Monday] {
            timetable.insert(day, Vec::new());
        }

        let json = serde_json::to_string(&timetable).unwrap();
        assert_eq!(
            json,
            r#"{"Monday":[],"Tuesday":[],"Friday":[],"Sunday":[]}"#
        );
    }

    #[test]
    fn test_lecture_types() {
        for lecture_type in LECTURE_TYPES {
            assert!(validate_lecture_type(lecture_type).is_ok());
        }
        assert!(validate_lecture_type("seminar").is_err());
    }

    #[test]
    fn test_create_dto_reads_type_field() {
        let dto: CreateLectureDto = serde_json::from_value(serde_json::json!({
            "day": "Friday",
            "time_slot_id": TimeslotId::new(),
            "division_id": DivisionId::new(),
            "type": "lab",
            "room_number": "B-204"
        }))
        .unwrap();
        assert_eq!(dto.lecture_type, "lab");
        assert!(dto.validate().is_err());
    }
}
