//! SQL compilation of line filters and statistics
//!
//! Predicates are built from the definitions in `tgd_common::filter`, so the
//! filtered-lines query and the statistics query always agree on what
//! "alphanumeric" or "short" means. Only constant fragments are inlined;
//! the dataset id and the limit are bound parameters.

use sqlx::{Postgres, QueryBuilder};
use tgd_common::filter::{CharacterClass, LengthBucket, LineFilter};

/// Columns of [`super::types::DatasetRecord`], for `datasets d JOIN users u`
pub const DATASET_COLUMNS: &str = "d.id, d.title, d.description, d.user_id, u.username, d.created_at";

/// Columns of [`super::types::LineRecord`], for `dataset_lines l JOIN users u`
pub const LINE_COLUMNS: &str = "l.id, l.content, l.added_at, l.user_id, u.username";

/// Predicate on `l.content` for a character class
pub fn class_predicate(class: CharacterClass) -> String {
    format!("l.content ~ '{}'", class.pattern())
}

/// Predicate on `l.content` for a length bucket
pub fn length_predicate(bucket: LengthBucket) -> String {
    match bucket.bounds() {
        (None, Some(max)) => format!("LENGTH(l.content) <= {}", max),
        (Some(min), Some(max)) => format!("LENGTH(l.content) BETWEEN {} AND {}", min, max),
        (Some(min), None) => format!("LENGTH(l.content) >= {}", min),
        (None, None) => "TRUE".to_string(),
    }
}

/// Lines of one dataset matching `filter`, with contributor usernames
pub fn filtered_lines_query(dataset_id: i64, filter: &LineFilter) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(format!(
        "SELECT {} FROM dataset_lines l JOIN users u ON u.id = l.user_id WHERE l.dataset_id = ",
        LINE_COLUMNS
    ));
    query.push_bind(dataset_id);

    for class in filter.character_classes() {
        query.push(" AND ");
        query.push(class_predicate(class));
    }

    if let Some(bucket) = filter.length_filter {
        query.push(" AND ");
        query.push(length_predicate(bucket));
    }

    if filter.random {
        query.push(" ORDER BY RANDOM()");
    } else {
        query.push(" ORDER BY l.id");
    }

    if let Some(limit) = filter.limit {
        query.push(" LIMIT ");
        query.push_bind(limit);
    }

    query
}

/// Aggregate statistics for the dataset bound to `$1`
pub fn stats_sql() -> String {
    format!(
        r#"
        SELECT
            COUNT(*) AS line_count,
            AVG(LENGTH(l.content))::float8 AS avg_length,
            MIN(LENGTH(l.content)) AS min_length,
            MAX(LENGTH(l.content)) AS max_length,
            COUNT(*) FILTER (WHERE {alphanumeric}) AS alphanumeric_count,
            COUNT(*) FILTER (WHERE {short}) AS short_count,
            COUNT(*) FILTER (WHERE {medium}) AS medium_count,
            COUNT(*) FILTER (WHERE {long}) AS long_count
        FROM dataset_lines l
        WHERE l.dataset_id = $1
        "#,
        alphanumeric = class_predicate(CharacterClass::Alphanumeric),
        short = length_predicate(LengthBucket::Short),
        medium = length_predicate(LengthBucket::Medium),
        long = length_predicate(LengthBucket::Long),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_predicates() {
        assert_eq!(length_predicate(LengthBucket::Short), "LENGTH(l.content) <= 19");
        assert_eq!(
            length_predicate(LengthBucket::Medium),
            "LENGTH(l.content) BETWEEN 20 AND 50"
        );
        assert_eq!(length_predicate(LengthBucket::Long), "LENGTH(l.content) >= 51");
    }

    #[test]
    fn test_unfiltered_query() {
        let query = filtered_lines_query(1, &LineFilter::default());
        let sql = query.sql();
        assert!(sql.contains("WHERE l.dataset_id = $1"));
        assert!(sql.ends_with(" ORDER BY l.id"));
        assert!(!sql.contains("LIMIT"));
    }

    #[test]
    fn test_full_filter_query() {
        let filter = LineFilter::default()
            .with_alphanumeric_only(true)
            .with_no_special_chars(true)
            .with_length(Some(LengthBucket::Short))
            .with_random(true)
            .with_limit(Some(5))
            .unwrap();
        let query = filtered_lines_query(1, &filter);
        let sql = query.sql();

        assert!(sql.contains("l.content ~ '^[A-Za-z0-9 ]*$'"));
        assert!(sql.contains("l.content ~ '^[A-Za-z0-9_-]*$'"));
        assert!(sql.contains("LENGTH(l.content) <= 19"));
        assert!(sql.contains("ORDER BY RANDOM()"));
        assert!(sql.ends_with(" LIMIT $2"));
    }

    #[test]
    fn test_stats_sql_uses_shared_bucket_predicates() {
        let sql = stats_sql();
        for bucket in LengthBucket::ALL {
            assert!(sql.contains(&length_predicate(bucket)));
        }
        assert!(sql.contains(&class_predicate(CharacterClass::Alphanumeric)));
    }
}
