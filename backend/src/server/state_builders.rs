//! Builders wiring Diesel repositories and domain services into HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use wellf::domain::{ScheduleService, UserAccountService};
use wellf::inbound::http::state::{HttpState, HttpStatePorts};
use wellf::outbound::persistence::{
    DbPool, DieselAssetRepository, DieselBillRepository, DieselDocumentRepository,
    DieselHouseholdRepository, DieselInsuranceRepository, DieselMaintenanceRepository,
    DieselMealRepository, DieselPlantRepository, DieselPortfolioRepository,
    DieselReadingRepository, DieselReminderRepository, DieselSnippetRepository,
    DieselSubscriptionRepository, DieselUserRepository, DieselVehicleRepository,
};

/// Build the port bundle over `pool`, sharing one repository instance
/// between the schedule service and the plain CRUD handlers.
pub(crate) fn build_ports(pool: &DbPool, clock: Arc<dyn Clock>) -> HttpStatePorts {
    let bills = Arc::new(DieselBillRepository::new(pool.clone()));
    let maintenance = Arc::new(DieselMaintenanceRepository::new(pool.clone()));
    let plants = Arc::new(DieselPlantRepository::new(pool.clone()));
    let reminders = Arc::new(DieselReminderRepository::new(pool.clone()));
    let schedule = ScheduleService::new(
        bills.clone(),
        maintenance.clone(),
        plants.clone(),
        reminders.clone(),
        clock,
    );
    let users = Arc::new(DieselUserRepository::new(pool.clone()));

    HttpStatePorts {
        accounts: Arc::new(UserAccountService::new(users)),
        schedule: Arc::new(schedule),
        households: Arc::new(DieselHouseholdRepository::new(pool.clone())),
        bills,
        subscriptions: Arc::new(DieselSubscriptionRepository::new(pool.clone())),
        insurance: Arc::new(DieselInsuranceRepository::new(pool.clone())),
        maintenance,
        vehicles: Arc::new(DieselVehicleRepository::new(pool.clone())),
        portfolios: Arc::new(DieselPortfolioRepository::new(pool.clone())),
        assets: Arc::new(DieselAssetRepository::new(pool.clone())),
        reading: Arc::new(DieselReadingRepository::new(pool.clone())),
        meals: Arc::new(DieselMealRepository::new(pool.clone())),
        plants,
        reminders,
        documents: Arc::new(DieselDocumentRepository::new(pool.clone())),
        snippets: Arc::new(DieselSnippetRepository::new(pool.clone())),
    }
}

/// Shared HTTP state over `pool` using the system clock.
pub(crate) fn build_http_state(pool: &DbPool) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    web::Data::new(HttpState::new(build_ports(pool, clock.clone()), clock))
}
