//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use chrono::NaiveDate;
use mockable::Clock;

use crate::domain::ports::{
    AccountService, AssetRepository, BillRepository, DocumentRepository, HouseholdRepository,
    InsuranceRepository, MaintenanceRepository, MealRepository, PlantRepository,
    PortfolioRepository, ReadingRepository, ReminderRepository, ScheduleCommand,
    SnippetRepository, SubscriptionRepository, VehicleRepository,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub accounts: Arc<dyn AccountService>,
    pub schedule: Arc<dyn ScheduleCommand>,
    pub households: Arc<dyn HouseholdRepository>,
    pub bills: Arc<dyn BillRepository>,
    pub subscriptions: Arc<dyn SubscriptionRepository>,
    pub insurance: Arc<dyn InsuranceRepository>,
    pub maintenance: Arc<dyn MaintenanceRepository>,
    pub vehicles: Arc<dyn VehicleRepository>,
    pub portfolios: Arc<dyn PortfolioRepository>,
    pub assets: Arc<dyn AssetRepository>,
    pub reading: Arc<dyn ReadingRepository>,
    pub meals: Arc<dyn MealRepository>,
    pub plants: Arc<dyn PlantRepository>,
    pub reminders: Arc<dyn ReminderRepository>,
    pub documents: Arc<dyn DocumentRepository>,
    pub snippets: Arc<dyn SnippetRepository>,
}

/// Dependency bundle for HTTP handlers.
///
/// The clock supplies "today" for computed response fields such as
/// `daysUntilDue`, so handler tests can pin the date.
#[derive(Clone)]
pub struct HttpState {
    pub ports: HttpStatePorts,
    clock: Arc<dyn Clock>,
}

impl HttpState {
    /// Construct state from a ports bundle and the clock used for computed
    /// fields.
    pub fn new(ports: HttpStatePorts, clock: Arc<dyn Clock>) -> Self {
        Self { ports, clock }
    }

    /// Current UTC calendar date.
    pub fn today(&self) -> NaiveDate {
        self.clock.utc().date_naive()
    }
}

impl std::ops::Deref for HttpState {
    type Target = HttpStatePorts;

    fn deref(&self) -> &Self::Target {
        &self.ports
    }
}
