//! Domain primitives, aggregates and services.
//!
//! Purpose: define the household records the API manages, the schedule and
//! ingredient arithmetic behind their computed fields, and the ports that
//! adapters implement. Nothing here knows about HTTP or SQL.
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport-agnostic error payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - One module per area (households, bills, finance, reading, ...) holding
//!   its entities, drafts and read-time computations.
//! - `UserAccountService` and `ScheduleService`, the driving port
//!   implementations.

mod account_service;
pub mod auth;
pub mod bills;
pub mod documents;
pub mod error;
pub mod finance;
pub mod households;
pub mod ingredients;
pub mod insurance;
pub mod labels;
pub mod maintenance;
pub mod meals;
pub mod password;
pub mod plants;
pub mod ports;
pub mod reading;
pub mod reminders;
pub mod schedule;
mod schedule_service;
pub mod snippets;
pub mod trace_id;
pub mod user;
pub mod validation;
pub mod vehicles;

pub use self::account_service::UserAccountService;
pub use self::auth::{
    AuthValidationError, LoginCredentials, PASSWORD_MAX, PASSWORD_MIN, Registration,
};
pub use self::bills::{
    Bill, BillDraft, BillFilter, BillPayment, BillPaymentOutcome, NewBillPayment, Subscription,
    SubscriptionDraft, SubscriptionSummary,
};
pub use self::documents::{Document, DocumentDraft, DocumentLink, LinkedEntity};
pub use self::error::{Error, ErrorCode};
pub use self::finance::{
    AssetClass, CashAccount, CashAccountDraft, CashAccountType, FixedAsset, FixedAssetDraft,
    Holding, HoldingDraft, NetWorth, Portfolio, PortfolioDraft, PortfolioSummary,
    PortfolioTransaction, TransactionDraft, TransactionFilter, TransactionKind,
};
pub use self::households::{
    Household, HouseholdDraft, Person, PersonDraft, Relationship, RelationshipDraft,
    RelationshipKind,
};
pub use self::ingredients::{format_quantity, scale_amount, servings_multiplier};
pub use self::insurance::{InsurancePolicy, InsurancePolicyDraft, PolicyType};
pub use self::labels::UnknownLabel;
pub use self::maintenance::{
    MaintenanceCompletion, MaintenanceLog, MaintenanceTask, MaintenanceTaskDraft,
    NewMaintenanceLog,
};
pub use self::meals::{
    DateRange, Ingredient, MealPlanDraft, MealPlanEntry, MealType, Recipe, RecipeCollection,
    RecipeCollectionDraft, RecipeDraft, RecipeFilter, ShoppingItemDraft, ShoppingListItem,
    normalise_tags, shopping_items_from_plan,
};
pub use self::password::PasswordHash;
pub use self::plants::{
    CareDates, CareKind, CareLog, NewCareLog, Plant, PlantCareOutcome, PlantDraft,
};
pub use self::reading::{
    Book, BookDraft, EntryProgress, ProgressUpdate, ReadingGoal, ReadingGoalDraft,
    ReadingGoalProgress, ReadingList, ReadingListDraft, ReadingListEntry, ReadingStatus,
    validate_target, year_bounds,
};
pub use self::reminders::{Reminder, ReminderDraft, ReminderSchedule, SNOOZE_DAYS};
pub use self::schedule::{
    DueState, Frequency, Transition, annual_cost, days_overdue, days_until, monthly_cost,
    next_occurrence, next_occurrence_after,
};
pub use self::schedule_service::ScheduleService;
pub use self::snippets::{CodeSnippet, SnippetDraft, SnippetFilter};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{DisplayName, Email, User, UserId, UserValidationError};
pub use self::validation::FieldViolation;
pub use self::vehicles::{
    ServiceRecord, ServiceRecordDraft, Vehicle, VehicleDraft, VehicleDue, VehicleDueKind,
    raised_mileage,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use wellf::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
