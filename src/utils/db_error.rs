//! Classification of database errors.

/// Returns true if `e` is a uniqueness violation on `links.short_code`.
///
/// SQLite reports these as `UNIQUE constraint failed: links.short_code`.
pub fn is_unique_violation_on_short_code(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    db_err.message().contains("links.short_code")
}
