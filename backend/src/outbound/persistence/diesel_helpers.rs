//! Shared helpers and macros for the owner-scoped Diesel repositories.
//!
//! Every user-owned table has `id` and `user_id` columns, so the common
//! "does this row belong to the caller" and "delete exactly one owned row"
//! statements are expressed once here as declarative macros.

use uuid::Uuid;

use crate::domain::UserId;

/// Raw owner id for `user_id` filters.
pub(crate) fn owner_id(owner: &UserId) -> Uuid {
    *owner.as_uuid()
}

/// Case-insensitive substring pattern for `ILIKE`, with wildcards in
/// `needle` escaped.
pub(crate) fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Fail with `NotFound(entity)` unless `$table` has a row `$id` owned by
/// `$owner`.
///
/// Expands to a statement using `?`, so it must sit inside a function or
/// async block returning `Result<_, RepositoryError>`.
macro_rules! require_owned {
    ($conn:expr, $table:ident, $id:expr, $owner:expr, $entity:expr) => {
        $table::table
            .find($id)
            .filter($table::user_id.eq($owner))
            .select($table::id)
            .first::<::uuid::Uuid>($conn)
            .await
            .map_err(|err| {
                $crate::outbound::persistence::diesel_error_mapping::map_diesel_error(err, $entity)
            })?
    };
}

/// Delete row `$id` of `$table` owned by `$owner`; no match is
/// `NotFound(entity)`.
///
/// Evaluates to `Result<(), RepositoryError>`.
macro_rules! delete_owned {
    ($conn:expr, $table:ident, $id:expr, $owner:expr, $entity:expr) => {
        match ::diesel::delete($table::table.find($id).filter($table::user_id.eq($owner)))
            .execute($conn)
            .await
        {
            Ok(0) => Err($crate::domain::ports::RepositoryError::not_found($entity)),
            Ok(_) => Ok(()),
            Err(err) => Err(
                $crate::outbound::persistence::diesel_error_mapping::map_diesel_error(err, $entity),
            ),
        }
    };
}

pub(crate) use delete_owned;
pub(crate) use require_owned;
