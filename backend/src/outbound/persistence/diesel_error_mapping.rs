//! Translation of pool and Diesel failures into `RepositoryError`.
//!
//! Every adapter funnels its errors through these helpers so that the HTTP
//! layer sees one vocabulary: missing rows, uniqueness clashes, unusable
//! connections and everything else.

use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::RepositoryError;

use super::pool::PoolError;

/// Map a pool failure into a connection error.
pub fn map_pool_error(error: PoolError) -> RepositoryError {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    debug!(%message, "database pool unavailable");
    RepositoryError::connection(message)
}

/// Map a Diesel failure for `entity` into a repository error.
///
/// Foreign key violations name the referenced record, derived from the
/// constraint name (`bills_household_id_fkey` becomes `household`).
pub fn map_diesel_error(error: DieselError, entity: &str) -> RepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => debug!(
            ?kind,
            entity,
            message = info.message(),
            constraint = info.constraint_name(),
            "diesel operation failed"
        ),
        other => debug!(entity, error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => RepositoryError::not_found(entity),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            RepositoryError::already_exists(entity)
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            RepositoryError::not_found(referenced_entity(info.as_ref()))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            RepositoryError::connection("database connection closed")
        }
        DieselError::DatabaseError(_, info) => RepositoryError::query(info.message()),
        other => RepositoryError::query(other.to_string()),
    }
}

fn referenced_entity(info: &dyn DatabaseErrorInformation) -> String {
    let Some(constraint) = info.constraint_name() else {
        return "referenced record".to_owned();
    };
    let unprefixed = info
        .table_name()
        .and_then(|table| constraint.strip_prefix(table))
        .map_or(constraint, |rest| rest.trim_start_matches('_'));
    match unprefixed.strip_suffix("_id_fkey") {
        Some(column) if !column.is_empty() => column.replace('_', " "),
        _ => "referenced record".to_owned(),
    }
}

impl From<DieselError> for RepositoryError {
    fn from(value: DieselError) -> Self {
        map_diesel_error(value, "record")
    }
}
