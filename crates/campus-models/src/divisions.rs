use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{CourseId, DivisionId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Division {
    pub id: DivisionId,
    pub course_id: CourseId,
    pub division_code: i32,
    pub professor_id: UserId,
    pub number_of_batches: i32,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateDivisionDto {
    pub course_id: CourseId,
    #[validate(range(min = 1))]
    pub division_code: i32,
    pub professor_id: UserId,
    #[validate(range(min = 1, message = "A division needs at least one batch"))]
    pub number_of_batches: i32,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateDivisionDto {
    #[validate(range(min = 1))]
    pub division_code: Option<i32>,
    pub professor_id: Option<UserId>,
    #[validate(range(min = 1, message = "A division needs at least one batch"))]
    pub number_of_batches: Option<i32>,
}

/// Row of the division/student join table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct StudentDivision {
    pub student_id: UserId,
    pub division_id: DivisionId,
    pub batch_number: i32,
}

/// Why a user could not be enrolled into a division.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EnrolmentRejection {
    NotAUser,
    NotAStudent,
    DifferentSchools,
    NoStudentObject,
    DifferentTerms,
}

impl EnrolmentRejection {
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::NotAUser => "not a user",
            Self::NotAStudent => "not a student",
            Self::DifferentSchools => "different schools",
            Self::NoStudentObject => "no student object",
            Self::DifferentTerms => "different terms",
        }
    }
}

/// Multi-status result of a bulk enrolment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BulkEnrolmentResponse {
    /// Users enrolled, in request order.
    pub success: Vec<UserId>,
    /// Rejected users grouped by reason. Omitted when every user was enrolled.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<String, Vec<UserId>>,
}

impl BulkEnrolmentResponse {
    pub fn reject(&mut self, user_id: UserId, rejection: EnrolmentRejection) {
        self.errors
            .entry(rejection.reason().to_string())
            .or_default()
            .push(user_id);
    }
}

/// Batch numbers handed out round-robin: 1, 2, ..., `number_of_batches`, 1, ...
#[derive(Debug, Clone)]
pub struct BatchAssigner {
    counter: i32,
    number_of_batches: i32,
}

impl BatchAssigner {
    pub fn new(number_of_batches: i32) -> Self {
        Self {
            counter: 0,
            number_of_batches: number_of_batches.max(1),
        }
    }

    pub fn next_batch(&mut self) -> i32 {
        let batch = self.counter + 1;
        self.counter = (self.counter + 1) % self.number_of_batches;
        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batches_cycle() {
        let mut assigner = BatchAssigner::new(3);
        let batches: Vec<i32> = (0..7).map(|_| assigner.next_batch()).collect();
        assert_eq!(batches, vec![1, 2, 3, 1, 2, 3, 1]);
    }

    #[test]
    fn test_single_batch() {
        let mut assigner = BatchAssigner::new(1);
        assert_eq!(assigner.next_batch(), 1);
        assert_eq!(assigner.next_batch(), 1);
    }

    #[test]
    fn test_errors_omitted_when_empty() {
        let response = BulkEnrolmentResponse {
            success: vec![UserId::new()],
            errors: BTreeMap::new(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("errors").is_none());
    }

    #[test]
    fn test_reject_groups_by_reason() {
        let mut response = BulkEnrolmentResponse::default();
        let a = UserId::new();
        let b = UserId::new();
        response.reject(a, EnrolmentRejection::NotAStudent);
        response.reject(b, EnrolmentRejection::NotAStudent);
        response.reject(a, EnrolmentRejection::DifferentTerms);

        assert_eq!(response.errors["not a student"], vec![a, b]);
        assert_eq!(response.errors["different terms"], vec![a]);
    }
}
