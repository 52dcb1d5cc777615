//! Error type shared by every owner-scoped repository port.

use crate::domain::Error;

use super::define_port_error;

define_port_error! {
    /// Persistence failures surfaced by repository adapters.
    ///
    /// Missing rows, uniqueness clashes and stale conditional writes are
    /// distinguished; every other database failure collapses into
    /// `Connection` or `Query`.
    pub enum RepositoryError {
        /// The pool or connection could not be used.
        Connection { message: String } => "repository connection failed: {message}",
        /// A statement failed during execution.
        Query { message: String } => "repository query failed: {message}",
        /// No row matched the id and owner.
        NotFound { entity: String } => "{entity} not found",
        /// A unique constraint rejected the write.
        AlreadyExists { entity: String } => "{entity} already exists",
        /// The row changed between the read and a conditional write.
        Stale { entity: String } => "{entity} was changed by another request",
    }
}

impl From<RepositoryError> for Error {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::Connection { message } => {
                Error::service_unavailable(format!("database unavailable: {message}"))
            }
            RepositoryError::Query { message } => {
                Error::internal(format!("database query failed: {message}"))
            }
            RepositoryError::NotFound { entity } => Error::not_found(format!("{entity} not found")),
            RepositoryError::AlreadyExists { entity } => {
                Error::conflict(format!("{entity} already exists"))
            }
            RepositoryError::Stale { entity } => {
                Error::conflict(format!("{entity} was changed by another request; retry"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(RepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(RepositoryError::query("syntax"), ErrorCode::InternalError)]
    #[case(RepositoryError::not_found("bill"), ErrorCode::NotFound)]
    #[case(RepositoryError::already_exists("book"), ErrorCode::Conflict)]
    #[case(RepositoryError::stale("reminder"), ErrorCode::Conflict)]
    fn repository_errors_map_to_domain_codes(
        #[case] error: RepositoryError,
        #[case] expected: ErrorCode,
    ) {
        assert_eq!(Error::from(error).code(), expected);
    }

    #[test]
    fn not_found_message_names_the_entity() {
        let error = Error::from(RepositoryError::not_found("plant"));
        assert_eq!(error.message(), "plant not found");
    }
}
