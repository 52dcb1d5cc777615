//! Test helpers for inbound HTTP components.
//!
//! Handler tests build a [`MockPorts`] bundle, set expectations on the ports
//! they exercise, and mount one handler module with [`test_app`]. The app
//! carries a `/test-login` route that stores [`TEST_USER_ID`] in the session
//! so [`login_cookie`] can authenticate follow-up requests.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpResponse, test as actix_test, web};
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;

use crate::domain::ports::{
    MockAccountService, MockAssetRepository, MockBillRepository, MockDocumentRepository,
    MockHouseholdRepository, MockInsuranceRepository, MockMaintenanceRepository,
    MockMealRepository, MockPlantRepository, MockPortfolioRepository, MockReadingRepository,
    MockReminderRepository, MockScheduleCommand, MockSnippetRepository,
    MockSubscriptionRepository, MockVehicleRepository,
};
use crate::domain::{Error, UserId};
use crate::inbound::http::error::{json_config, query_config};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// User stored in the session by the `/test-login` route.
pub const TEST_USER_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

/// The authenticated test user.
pub fn test_user() -> UserId {
    UserId::new(TEST_USER_ID).expect("fixture user id")
}

/// Calendar date reported by the test clock.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 15).expect("valid fixture date")
}

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

struct FixtureClock;

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&today().and_hms_opt(9, 0, 0).expect("valid fixture time"))
    }
}

/// Mock implementations of every port; unused mocks panic when called.
#[derive(Default)]
pub struct MockPorts {
    pub accounts: MockAccountService,
    pub schedule: MockScheduleCommand,
    pub households: MockHouseholdRepository,
    pub bills: MockBillRepository,
    pub subscriptions: MockSubscriptionRepository,
    pub insurance: MockInsuranceRepository,
    pub maintenance: MockMaintenanceRepository,
    pub vehicles: MockVehicleRepository,
    pub portfolios: MockPortfolioRepository,
    pub assets: MockAssetRepository,
    pub reading: MockReadingRepository,
    pub meals: MockMealRepository,
    pub plants: MockPlantRepository,
    pub reminders: MockReminderRepository,
    pub documents: MockDocumentRepository,
    pub snippets: MockSnippetRepository,
}

impl MockPorts {
    /// Freeze the mocks into handler state with the fixture clock.
    pub fn into_state(self) -> HttpState {
        let ports = HttpStatePorts {
            accounts: Arc::new(self.accounts),
            schedule: Arc::new(self.schedule),
            households: Arc::new(self.households),
            bills: Arc::new(self.bills),
            subscriptions: Arc::new(self.subscriptions),
            insurance: Arc::new(self.insurance),
            maintenance: Arc::new(self.maintenance),
            vehicles: Arc::new(self.vehicles),
            portfolios: Arc::new(self.portfolios),
            assets: Arc::new(self.assets),
            reading: Arc::new(self.reading),
            meals: Arc::new(self.meals),
            plants: Arc::new(self.plants),
            reminders: Arc::new(self.reminders),
            documents: Arc::new(self.documents),
            snippets: Arc::new(self.snippets),
        };
        HttpState::new(ports, Arc::new(FixtureClock))
    }
}

async fn test_login(session: SessionContext) -> Result<HttpResponse, Error> {
    session.persist_user(&test_user())?;
    Ok(HttpResponse::NoContent().finish())
}

/// App mounting one handler module over mocked ports.
pub fn test_app(
    ports: MockPorts,
    configure: fn(&mut web::ServiceConfig),
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(ports.into_state()))
        .app_data(json_config())
        .app_data(query_config())
        .wrap(test_session_middleware())
        .route("/test-login", web::post().to(test_login))
        .configure(configure)
}

/// Session cookie set by `response`.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// Log in as [`TEST_USER_ID`] and return the session cookie.
pub async fn login_cookie<S, B>(app: &S) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
{
    let response = actix_test::call_service(
        app,
        actix_test::TestRequest::post().uri("/test-login").to_request(),
    )
    .await;
    session_cookie(&response)
}
