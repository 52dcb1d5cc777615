//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of domain repository ports
//! backed by PostgreSQL via the Diesel ORM with async support through
//! `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! The persistence layer follows these principles:
//!
//! - **Thin adapters**: Repository implementations only translate between
//!   Diesel models and domain types. Schedule arithmetic stays in the domain.
//! - **Internal models**: Diesel row structs (`models`) and schema
//!   definitions (`schema.rs`) are internal implementation details, never
//!   exposed to the domain layer.
//! - **Owner scoping**: every statement filters on the caller's `user_id`,
//!   so another user's rows read as missing.
//! - **Strongly typed errors**: All database errors are mapped to
//!   `RepositoryError` in `diesel_error_mapping`.
//!
//! # Example
//!
//! ```ignore
//! use wellf::outbound::persistence::{DbPool, PoolConfig, DieselBillRepository};
//!
//! let config = PoolConfig::new("postgres://localhost/wellf");
//! let pool = DbPool::new(config).await?;
//! let bills = DieselBillRepository::new(pool);
//! ```

mod diesel_bill_repository;
mod diesel_document_repository;
pub(crate) mod diesel_error_mapping;
mod diesel_finance_repository;
pub(crate) mod diesel_helpers;
mod diesel_household_repository;
mod diesel_insurance_repository;
mod diesel_maintenance_repository;
mod diesel_meal_repository;
mod diesel_plant_repository;
mod diesel_reading_repository;
mod diesel_reminder_repository;
mod diesel_snippet_repository;
mod diesel_user_repository;
mod diesel_vehicle_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_bill_repository::{DieselBillRepository, DieselSubscriptionRepository};
pub use diesel_document_repository::DieselDocumentRepository;
pub use diesel_finance_repository::{DieselAssetRepository, DieselPortfolioRepository};
pub use diesel_household_repository::DieselHouseholdRepository;
pub use diesel_insurance_repository::DieselInsuranceRepository;
pub use diesel_maintenance_repository::DieselMaintenanceRepository;
pub use diesel_meal_repository::DieselMealRepository;
pub use diesel_plant_repository::DieselPlantRepository;
pub use diesel_reading_repository::DieselReadingRepository;
pub use diesel_reminder_repository::DieselReminderRepository;
pub use diesel_snippet_repository::DieselSnippetRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use diesel_vehicle_repository::DieselVehicleRepository;
pub use migrations::{MIGRATIONS, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
