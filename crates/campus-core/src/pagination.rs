//! `skip`/`limit` list parameters shared by every collection endpoint.
//!
//! ```ignore
//! async fn list_years(Query(params): Query<ListParams>) -> Result<Json<Vec<Year>>, AppError> {
//!     let years = YearService::list(&db, params.skip(), params.limit()).await?;
//!     Ok(Json(years))
//! }
//! ```

use serde::{Deserialize, Deserializer};
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_LIMIT: i64 = 100;
pub const MAX_LIMIT: i64 = 1000;

/// Deserializes an optional string into an optional i64.
///
/// Query strings like `?skip=` arrive as empty strings and are treated as `None`.
fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Number of rows to skip (default: 0)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub skip: Option<i64>,
    /// Maximum number of rows to return (1-1000, default: 100)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
}

impl ListParams {
    #[must_use]
    pub fn skip(&self) -> i64 {
        self.skip.unwrap_or(0).max(0)
    }

    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = ListParams::default();
        assert_eq!(params.skip(), 0);
        assert_eq!(params.limit(), 100);
    }

    #[test]
    fn test_clamping() {
        let params = ListParams {
            skip: Some(-5),
            limit: Some(50_000),
        };
        assert_eq!(params.skip(), 0);
        assert_eq!(params.limit(), MAX_LIMIT);

        let params = ListParams {
            skip: Some(20),
            limit: Some(0),
        };
        assert_eq!(params.skip(), 20);
        assert_eq!(params.limit(), 1);
    }

    #[test]
    fn test_deserialize_empty_strings() {
        let params: ListParams = serde_json::from_str(r#"{"skip": "", "limit": "25"}"#).unwrap();
        assert_eq!(params.skip, None);
        assert_eq!(params.limit, Some(25));
    }
}
