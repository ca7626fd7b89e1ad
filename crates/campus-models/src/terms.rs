use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::ids::{TermId, YearId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Term {
    pub id: TermId,
    pub name: String,
    pub year_id: YearId,
    /// Position of the term within its year, starting at 1
    pub current_year_term: i32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub has_electives: bool,
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_term_dates"))]
pub struct CreateTermDto {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub year_id: YearId,
    #[validate(range(min = 1, message = "Term number must be at least 1"))]
    pub current_year_term: i32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub has_electives: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn validate_term_dates(dto: &CreateTermDto) -> Result<(), ValidationError> {
    check_term_dates(dto.start_date, dto.end_date)
}

pub fn check_term_dates(
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
) -> Result<(), ValidationError> {
    if end_date.is_some_and(|end| end < start_date) {
        return Err(ValidationError::new("term_dates")
            .with_message("A term cannot end before it begins".into()));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateTermDto {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub year_id: Option<YearId>,
    #[validate(range(min = 1, message = "Term number must be at least 1"))]
    pub current_year_term: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub has_electives: Option<bool>,
    pub is_active: Option<bool>,
}
