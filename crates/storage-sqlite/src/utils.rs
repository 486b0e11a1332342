//! Utility functions for SQLite storage operations.
//!
//! This module provides helpers for working with SQLite: chunking to avoid
//! parameter limits and timestamp handling for `updated_at` columns.

use chrono::{DurationRound, NaiveDateTime, TimeDelta, Utc};

/// Maximum number of parameters for SQLite IN (...) queries.
///
/// SQLite has a compile-time limit on the number of parameters in a SQL statement,
/// typically around 999 (SQLITE_MAX_VARIABLE_NUMBER). 500 leaves room for the
/// other parameters in the query.
pub const SQLITE_MAX_PARAMS_CHUNK: usize = 500;

/// Chunk a slice into smaller slices for batch SQLite queries.
///
/// ```ignore
/// for chunk in chunk_for_sqlite(&wallet_ids) {
///     let rows = query_with_in_clause(chunk)?;
/// }
/// ```
pub fn chunk_for_sqlite<T>(items: &[T]) -> impl Iterator<Item = &[T]> {
    items.chunks(SQLITE_MAX_PARAMS_CHUNK)
}

/// Current UTC time truncated to microseconds.
pub fn now_utc() -> NaiveDateTime {
    let now = Utc::now().naive_utc();
    now.duration_trunc(TimeDelta::microseconds(1)).unwrap_or(now)
}

/// The value to write into `updated_at` when a row changes: now, or one
/// microsecond past `previous` if the clock has not moved past it.
pub fn next_updated_at(previous: NaiveDateTime) -> NaiveDateTime {
    let now = now_utc();
    if now > previous {
        now
    } else {
        previous + TimeDelta::microseconds(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_for_sqlite_empty() {
        let items: Vec<i32> = vec![];
        let chunks: Vec<_> = chunk_for_sqlite(&items).collect();
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_chunk_for_sqlite_over_limit() {
        let items: Vec<i32> = (0..1200).collect();
        let chunks: Vec<_> = chunk_for_sqlite(&items).collect();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), SQLITE_MAX_PARAMS_CHUNK);
        assert_eq!(chunks[1].len(), SQLITE_MAX_PARAMS_CHUNK);
        assert_eq!(chunks[2].len(), 200);
    }

    #[test]
    fn test_next_updated_at_moves_forward() {
        let previous = now_utc();
        assert!(next_updated_at(previous) > previous);
    }

    #[test]
    fn test_next_updated_at_with_future_previous() {
        let previous = now_utc() + TimeDelta::hours(1);
        assert_eq!(
            next_updated_at(previous),
            previous + TimeDelta::microseconds(1)
        );
    }
}
