//! Row types and request parameters shared across dataset commands and queries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tgd_common::filter::{LengthBucket, LineFilter};
use tgd_common::TgdError;

use crate::error::AppError;

/// Dataset with its owner's username
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DatasetRecord {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub user_id: i64,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// One line with its contributor's username
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct LineRecord {
    pub id: i64,
    pub content: String,
    pub added_at: DateTime<Utc>,
    pub user_id: i64,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct TagRecord {
    pub id: i64,
    pub name: String,
}

/// Aggregate statistics over every line of a dataset
///
/// Length figures are in characters and absent for an empty dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DatasetStats {
    pub line_count: i64,
    pub avg_length: Option<f64>,
    pub min_length: Option<i32>,
    pub max_length: Option<i32>,
    pub alphanumeric_count: i64,
    pub short_count: i64,
    pub medium_count: i64,
    pub long_count: i64,
}

impl DatasetStats {
    pub fn bucket_count(&self, bucket: LengthBucket) -> i64 {
        match bucket {
            LengthBucket::Short => self.short_count,
            LengthBucket::Medium => self.medium_count,
            LengthBucket::Long => self.long_count,
        }
    }
}

/// Query-string form of a [`LineFilter`]
///
/// Flags are on when their value is `1` or `true`. An empty `length_filter`
/// or `limit` counts as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterParams {
    #[serde(default)]
    pub alphanumeric_only: Option<String>,
    #[serde(default)]
    pub no_special_chars: Option<String>,
    #[serde(default)]
    pub length_filter: Option<String>,
    #[serde(default)]
    pub random: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FilterParamsError {
    #[error("Invalid limit '{0}': expected an integer")]
    LimitNotANumber(String),

    #[error(transparent)]
    Filter(#[from] TgdError),
}

impl From<FilterParamsError> for AppError {
    fn from(err: FilterParamsError) -> Self {
        AppError::Validation(err.to_string())
    }
}

fn flag(value: &Option<String>) -> bool {
    matches!(
        value.as_deref().map(str::trim),
        Some("1") | Some("true")
    )
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl FilterParams {
    /// Build the filter; `default_limit` applies when no limit was given
    pub fn into_filter(self, default_limit: Option<i64>) -> Result<LineFilter, FilterParamsError> {
        let length = non_empty(&self.length_filter)
            .map(str::parse::<LengthBucket>)
            .transpose()?;

        let limit = match non_empty(&self.limit) {
            Some(raw) => Some(
                raw.parse::<i64>()
                    .map_err(|_| FilterParamsError::LimitNotANumber(raw.to_string()))?,
            ),
            None => default_limit,
        };

        Ok(LineFilter::default()
            .with_alphanumeric_only(flag(&self.alphanumeric_only))
            .with_no_special_chars(flag(&self.no_special_chars))
            .with_length(length)
            .with_random(flag(&self.random))
            .with_limit(limit)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> FilterParams {
        let mut params = FilterParams::default();
        for (key, value) in pairs {
            let value = Some(value.to_string());
            match *key {
                "alphanumeric_only" => params.alphanumeric_only = value,
                "no_special_chars" => params.no_special_chars = value,
                "length_filter" => params.length_filter = value,
                "random" => params.random = value,
                "limit" => params.limit = value,
                other => panic!("unknown key {other}"),
            }
        }
        params
    }

    #[test]
    fn test_empty_params_mean_no_filters() {
        let filter = FilterParams::default().into_filter(None).unwrap();
        assert_eq!(filter, LineFilter::default());
        assert_eq!(filter.describe(), "no filters");
    }

    #[test]
    fn test_flags_require_one_or_true() {
        let filter = params(&[("alphanumeric_only", "1"), ("random", "true"), ("no_special_chars", "0")])
            .into_filter(None)
            .unwrap();
        assert!(filter.alphanumeric_only);
        assert!(filter.random);
        assert!(!filter.no_special_chars);

        let filter = params(&[("alphanumeric_only", "yes")]).into_filter(None).unwrap();
        assert!(!filter.alphanumeric_only);
    }

    #[test]
    fn test_length_filter() {
        let filter = params(&[("length_filter", "medium")]).into_filter(None).unwrap();
        assert_eq!(filter.length_filter, Some(LengthBucket::Medium));

        let filter = params(&[("length_filter", "")]).into_filter(None).unwrap();
        assert_eq!(filter.length_filter, None);

        assert!(matches!(
            params(&[("length_filter", "huge")]).into_filter(None),
            Err(FilterParamsError::Filter(TgdError::InvalidLengthFilter(_)))
        ));
    }

    #[test]
    fn test_limit_defaults_and_validation() {
        assert_eq!(FilterParams::default().into_filter(Some(100)).unwrap().limit, Some(100));
        assert_eq!(params(&[("limit", "")]).into_filter(Some(100)).unwrap().limit, Some(100));
        assert_eq!(params(&[("limit", "5")]).into_filter(Some(100)).unwrap().limit, Some(5));
        assert_eq!(params(&[("limit", "0")]).into_filter(Some(100)).unwrap().limit, None);
        assert_eq!(
            params(&[("limit", "-1")]).into_filter(None),
            Err(FilterParamsError::Filter(TgdError::InvalidLimit(-1)))
        );
        assert_eq!(
            params(&[("limit", "ten")]).into_filter(None),
            Err(FilterParamsError::LimitNotANumber("ten".to_string()))
        );
    }

    #[test]
    fn test_bucket_count() {
        let stats = DatasetStats {
            short_count: 1,
            medium_count: 2,
            long_count: 3,
            ..DatasetStats::default()
        };
        assert_eq!(stats.bucket_count(LengthBucket::Short), 1);
        assert_eq!(stats.bucket_count(LengthBucket::Medium), 2);
        assert_eq!(stats.bucket_count(LengthBucket::Long), 3);
    }
}
