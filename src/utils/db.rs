use anyhow::anyhow;
use pei_core::AppError;

/// Maps a failed INSERT/UPDATE to the matching HTTP error.
///
/// Unique violations become 409, broken foreign keys and CHECK constraints
/// 422. Anything else is a 500.
pub fn map_write_error(err: sqlx::Error, entity: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return AppError::conflict(anyhow!("{entity} already exists"));
        }
        if db_err.is_foreign_key_violation() {
            return AppError::unprocessable(anyhow!(
                "{entity} references a record that does not exist"
            ));
        }
        if db_err.is_check_violation() {
            return AppError::unprocessable(anyhow!("{entity} has an invalid value"));
        }
    }
    AppError::database(anyhow::Error::from(err).context(format!("Failed to write {entity}")))
}

pub fn not_found(entity: &str) -> AppError {
    AppError::not_found(anyhow!("{entity} not found"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_error_is_internal() {
        let err = map_write_error(sqlx::Error::RowNotFound, "Student");
        assert_eq!(err.status.as_u16(), 500);
    }

    #[test]
    fn test_not_found_message() {
        let err = not_found("PEI");
        assert_eq!(err.status.as_u16(), 404);
        assert_eq!(err.error.to_string(), "PEI not found");
    }
}
