use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::ids::{SchoolId, YearId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Year {
    pub id: YearId,
    pub name: String,
    pub school_id: SchoolId,
    pub start_year: i32,
    pub end_year: i32,
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_year_span"))]
pub struct CreateYearDto {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub school_id: SchoolId,
    #[validate(range(min = 1900, max = 9999))]
    pub start_year: i32,
    #[validate(range(min = 1900, max = 9999))]
    pub end_year: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn validate_year_span(dto: &CreateYearDto) -> Result<(), ValidationError> {
    check_year_span(dto.start_year, dto.end_year)
}

/// A year may not end before it starts.
pub fn check_year_span(start_year: i32, end_year: i32) -> Result<(), ValidationError> {
    if end_year < start_year {
        return Err(ValidationError::new("year_span")
            .with_message("You can't end the year before it starts".into()));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateYearDto {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(range(min = 1900, max = 9999))]
    pub start_year: Option<i32>,
    #[validate(range(min = 1900, max = 9999))]
    pub end_year: Option<i32>,
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(start_year: i32, end_year: i32) -> CreateYearDto {
        CreateYearDto {
            name: "2024-25".to_string(),
            school_id: SchoolId::new(),
            start_year,
            end_year,
            is_active: true,
        }
    }

    #[test]
    fn test_year_may_span_one_calendar_year() {
        assert!(dto(2024, 2024).validate().is_ok());
        assert!(dto(2024, 2025).validate().is_ok());
    }

    #[test]
    fn test_year_cannot_end_before_start() {
        assert!(dto(2025, 2024).validate().is_err());
    }
}
