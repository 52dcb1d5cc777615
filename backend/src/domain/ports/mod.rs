//! Domain ports: the traits inbound adapters drive and outbound adapters
//! implement.
//!
//! Repository ports share [`RepositoryError`]; driving ports return the
//! domain [`Error`](crate::domain::Error) directly.

mod macros;
pub(crate) use macros::define_port_error;

mod account_service;
mod bill_repository;
mod document_repository;
mod finance_repository;
mod household_repository;
mod insurance_repository;
mod maintenance_repository;
mod meal_repository;
mod plant_repository;
mod reading_repository;
mod reminder_repository;
mod repository_error;
mod schedule_command;
mod snippet_repository;
mod user_repository;
mod vehicle_repository;

pub use account_service::AccountService;
#[cfg(test)]
pub use account_service::MockAccountService;
pub use bill_repository::{BillRepository, SubscriptionRepository};
#[cfg(test)]
pub use bill_repository::{MockBillRepository, MockSubscriptionRepository};
pub use document_repository::DocumentRepository;
#[cfg(test)]
pub use document_repository::MockDocumentRepository;
pub use finance_repository::{AssetRepository, PortfolioRepository};
#[cfg(test)]
pub use finance_repository::{MockAssetRepository, MockPortfolioRepository};
pub use household_repository::HouseholdRepository;
#[cfg(test)]
pub use household_repository::MockHouseholdRepository;
pub use insurance_repository::InsuranceRepository;
#[cfg(test)]
pub use insurance_repository::MockInsuranceRepository;
pub use maintenance_repository::MaintenanceRepository;
#[cfg(test)]
pub use maintenance_repository::MockMaintenanceRepository;
pub use meal_repository::MealRepository;
#[cfg(test)]
pub use meal_repository::MockMealRepository;
#[cfg(test)]
pub use plant_repository::MockPlantRepository;
pub use plant_repository::PlantRepository;
#[cfg(test)]
pub use reading_repository::MockReadingRepository;
pub use reading_repository::ReadingRepository;
#[cfg(test)]
pub use reminder_repository::MockReminderRepository;
pub use reminder_repository::ReminderRepository;
pub use repository_error::RepositoryError;
#[cfg(test)]
pub use schedule_command::MockScheduleCommand;
pub use schedule_command::{CareRequest, CompletionRequest, PaymentRequest, ScheduleCommand};
#[cfg(test)]
pub use snippet_repository::MockSnippetRepository;
pub use snippet_repository::SnippetRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{NewUser, StoredCredentials, UserRepository};
#[cfg(test)]
pub use vehicle_repository::MockVehicleRepository;
pub use vehicle_repository::VehicleRepository;
