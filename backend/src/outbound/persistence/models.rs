//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Rows are read with `Selectable` and turned
//! into domain values through `TryFrom`, failing when a stored label no longer
//! parses. `*Fields` structs carry the writable columns of a draft and serve
//! both inserts and updates, so they treat `None` as `NULL`.

use std::str::FromStr;

use crate::domain::UnknownLabel;
use crate::domain::ports::RepositoryError;

mod accounts;
mod admin;
mod documents;
mod finance;
mod households;
mod meals;
mod reading;
mod routines;

pub(crate) use accounts::{NewUserRow, UserRow};
pub(crate) use admin::{
    BillFields, BillPaymentFields, BillPaymentRow, BillRow, InsurancePolicyFields,
    InsurancePolicyRow, MaintenanceLogFields, MaintenanceLogRow, MaintenanceTaskFields,
    MaintenanceTaskRow, ServiceRecordFields, ServiceRecordRow, SubscriptionFields,
    SubscriptionRow, VehicleFields, VehicleRow,
};
pub(crate) use documents::{DocumentFields, DocumentLinkRow, DocumentRow};
pub(crate) use finance::{
    CashAccountFields, CashAccountRow, FixedAssetFields, FixedAssetRow, HoldingFields,
    HoldingRow, PortfolioFields, PortfolioRow, TransactionFields, TransactionRow,
};
pub(crate) use households::{HouseholdRow, PersonFields, PersonRow, RelationshipRow};
pub(crate) use meals::{
    CollectionFields, CollectionRow, MealPlanFields, MealPlanRow, RecipeFields, RecipeRow,
    ShoppingItemFields, ShoppingItemRow,
};
pub(crate) use reading::{
    BookFields, BookRow, EntryProgressFields, EntryRow, GoalRow, ListFields, ListRow,
};
pub(crate) use routines::{
    CareDateFields, CareLogFields, CareLogRow, PlantFields, PlantRow, ReminderFields, ReminderRow,
    ReminderScheduleFields, SnippetFields, SnippetRow,
};

/// Parse a stored label column back into its domain enum.
pub(crate) fn parse_label<T>(value: &str) -> Result<T, RepositoryError>
where
    T: FromStr<Err = UnknownLabel>,
{
    value
        .parse()
        .map_err(|err: UnknownLabel| RepositoryError::query(format!("stored {err}")))
}

/// Convert a batch of rows, stopping at the first unreadable one.
pub(crate) fn convert_rows<R, T>(rows: Vec<R>) -> Result<Vec<T>, RepositoryError>
where
    T: TryFrom<R, Error = RepositoryError>,
{
    rows.into_iter().map(T::try_from).collect()
}
