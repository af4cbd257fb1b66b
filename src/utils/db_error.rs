//! Mapping of SQLx errors onto repository errors.

use crate::domain::repositories::{StoreError, UniqueKey};

/// Returns the unique key behind a PostgreSQL unique violation, if any.
pub fn unique_violation_key(e: &sqlx::Error) -> Option<UniqueKey> {
    let db_err = e.as_database_error()?;

    if !db_err.is_unique_violation() {
        return None;
    }

    db_err.constraint().and_then(UniqueKey::from_constraint)
}

/// Converts a SQLx error into a [`StoreError`].
///
/// Unique violations on a known constraint become [`StoreError::Duplicate`];
/// everything else is reported as unavailable.
pub fn store_error(e: sqlx::Error) -> StoreError {
    match unique_violation_key(&e) {
        Some(key) => StoreError::Duplicate(key),
        None => StoreError::Unavailable(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_errors_are_unavailable() {
        assert_eq!(unique_violation_key(&sqlx::Error::PoolTimedOut), None);
        assert!(matches!(
            store_error(sqlx::Error::PoolTimedOut),
            StoreError::Unavailable(_)
        ));
        assert!(matches!(
            store_error(sqlx::Error::RowNotFound),
            StoreError::Unavailable(_)
        ));
    }
}
