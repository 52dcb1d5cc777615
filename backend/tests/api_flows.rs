//! End-to-end API flows against embedded PostgreSQL.
//!
//! Requests go through the same scope, session middleware and extractor
//! configuration as the server, with every port backed by its Diesel
//! adapter. Set `SKIP_TEST_CLUSTER=1` where the cluster cannot start.

mod support;

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::rstest;
use serde_json::{Value, json};

use wellf::Trace;
use wellf::domain::{ScheduleService, UserAccountService};
use wellf::inbound::http::error::{json_config, query_config};
use wellf::inbound::http::state::{HttpState, HttpStatePorts};
use wellf::inbound::http::{
    bills, documents, finance, households, insurance, maintenance, meals, plants, reading,
    reminders, snippets, users, vehicles,
};
use wellf::outbound::persistence::{
    DbPool, DieselAssetRepository, DieselBillRepository, DieselDocumentRepository,
    DieselHouseholdRepository, DieselInsuranceRepository, DieselMaintenanceRepository,
    DieselMealRepository, DieselPlantRepository, DieselPortfolioRepository,
    DieselReadingRepository, DieselReminderRepository, DieselSnippetRepository,
    DieselSubscriptionRepository, DieselUserRepository, DieselVehicleRepository, PoolConfig,
};

use support::provision;

fn ports(pool: &DbPool, clock: Arc<dyn Clock>) -> HttpStatePorts {
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
    HttpStatePorts {
        accounts: Arc::new(UserAccountService::new(Arc::new(DieselUserRepository::new(
            pool.clone(),
        )))),
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

/// Clock pinned to 2026-03-15 so date-derived fields are predictable.
struct FixedClock;

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 15, 10, 30, 0)
            .single()
            .expect("valid fixed timestamp")
    }
}

fn configure_api(cfg: &mut web::ServiceConfig) {
    users::configure(cfg);
    households::configure(cfg);
    bills::configure(cfg);
    insurance::configure(cfg);
    maintenance::configure(cfg);
    vehicles::configure(cfg);
    finance::configure(cfg);
    reading::configure(cfg);
    meals::configure(cfg);
    plants::configure(cfg);
    reminders::configure(cfg);
    documents::configure(cfg);
    snippets::configure(cfg);
}

/// Run `flow` against a freshly migrated database.
fn with_database<F, Fut>(flow: F)
where
    F: FnOnce(web::Data<HttpState>) -> Fut,
    Fut: std::future::Future<Output = ()>,
{
    let Some(database) = provision() else {
        return;
    };
    actix_web::rt::System::new().block_on(async move {
        let pool = DbPool::new(
            PoolConfig::new(database.url.clone())
                .with_max_size(4)
                .with_min_idle(Some(1)),
        )
        .await
        .expect("pool");
        let clock: Arc<dyn Clock> = Arc::new(FixedClock);
        let state = web::Data::new(HttpState::new(ports(&pool, clock.clone()), clock));
        flow(state).await;
    });
}

macro_rules! api_app {
    ($state:expr) => {
        actix_test::init_service(
            App::new().app_data($state.clone()).wrap(Trace).service(
                web::scope("/api/v1")
                    .wrap(
                        SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                            .cookie_name("session".to_owned())
                            .cookie_secure(false)
                            .build(),
                    )
                    .app_data(json_config())
                    .app_data(query_config())
                    .configure(configure_api),
            ),
        )
        .await
    };
}

async fn send<S, B>(app: &S, req: actix_http::Request) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = actix_test::call_service(app, req).await;
    let status = res.status();
    let bytes = actix_test::read_body(res).await;
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn register<S, B>(app: &S, email: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/register")
            .set_json(json!({
                "email": email,
                "displayName": "Test User",
                "password": "correct horse battery",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED, "register {email}");
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie")
}

fn post(uri: &str, cookie: &Cookie<'static>, body: Value) -> actix_http::Request {
    actix_test::TestRequest::post()
        .uri(uri)
        .cookie(cookie.clone())
        .set_json(body)
        .to_request()
}

fn get(uri: &str, cookie: &Cookie<'static>) -> actix_http::Request {
    actix_test::TestRequest::get()
        .uri(uri)
        .cookie(cookie.clone())
        .to_request()
}

fn delete(uri: &str, cookie: &Cookie<'static>) -> actix_http::Request {
    actix_test::TestRequest::delete()
        .uri(uri)
        .cookie(cookie.clone())
        .to_request()
}

fn id_of(body: &Value) -> String {
    body["id"].as_str().expect("id").to_owned()
}

#[rstest]
fn accounts_register_login_and_reject_duplicates() {
    with_database(|state| async move {
        let app = api_app!(state);
        let cookie = register(&app, "ada@example.com").await;

        let (status, me) = send(&app, get("/api/v1/users/me", &cookie)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(me["email"], "ada@example.com");

        let (status, body) = send(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/register")
                .set_json(json!({
                    "email": "ADA@example.com",
                    "displayName": "Someone Else",
                    "password": "another password",
                }))
                .to_request(),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "conflict");

        let (status, _) = send(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(json!({"email": "ada@example.com", "password": "wrong password"}))
                .to_request(),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(json!({"email": "ada@example.com", "password": "correct horse battery"}))
                .to_request(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    });
}

#[rstest]
fn bill_payments_advance_the_due_date_and_stay_private() {
    with_database(|state| async move {
        let app = api_app!(state);
        let owner = register(&app, "owner@example.com").await;
        let stranger = register(&app, "stranger@example.com").await;

        let (status, household) =
            send(&app, post("/api/v1/households", &owner, json!({"name": "Home"}))).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, bill) = send(
            &app,
            post(
                "/api/v1/bills",
                &owner,
                json!({
                    "householdId": household["id"],
                    "name": "Broadband",
                    "amountCents": 3_500,
                    "frequency": "weekly",
                    "nextDueDate": "2026-01-05",
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let bill_id = id_of(&bill);

        let (status, outcome) = send(
            &app,
            post(
                &format!("/api/v1/bills/{bill_id}/payments"),
                &owner,
                json!({"paidOn": "2026-01-06"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(outcome["payment"]["amountCents"], 3_500);
        assert_eq!(outcome["bill"]["nextDueDate"], "2026-01-12");

        let (_, payments) =
            send(&app, get(&format!("/api/v1/bills/{bill_id}/payments"), &owner)).await;
        assert_eq!(payments.as_array().map(Vec::len), Some(1));

        let (status, _) = send(&app, get(&format!("/api/v1/bills/{bill_id}"), &stranger)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (_, listed) = send(&app, get("/api/v1/bills", &stranger)).await;
        assert_eq!(listed, json!([]));
    });
}

#[rstest]
fn referencing_a_missing_household_is_not_found() {
    with_database(|state| async move {
        let app = api_app!(state);
        let owner = register(&app, "fk@example.com").await;
        let (status, body) = send(
            &app,
            post(
                "/api/v1/bills",
                &owner,
                json!({
                    "householdId": "00000000-0000-4000-8000-000000000000",
                    "name": "Water",
                    "amountCents": 1_000,
                    "frequency": "monthly",
                    "nextDueDate": "2026-02-01",
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "not_found");
    });
}

#[rstest]
fn reading_entries_move_between_lists() {
    with_database(|state| async move {
        let app = api_app!(state);
        let owner = register(&app, "reader@example.com").await;

        let (_, book) = send(
            &app,
            post(
                "/api/v1/books",
                &owner,
                json!({"title": "The Dispossessed", "pageCount": 387}),
            ),
        )
        .await;
        let (_, shelf) =
            send(&app, post("/api/v1/reading-lists", &owner, json!({"name": "Shelf"}))).await;
        let (_, summer) =
            send(&app, post("/api/v1/reading-lists", &owner, json!({"name": "Summer"}))).await;
        let (book_id, shelf_id, summer_id) = (id_of(&book), id_of(&shelf), id_of(&summer));

        let (status, _) = send(
            &app,
            post(
                &format!("/api/v1/reading-lists/{shelf_id}/books"),
                &owner,
                json!({"bookId": book_id}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, moved) = send(
            &app,
            post(
                &format!("/api/v1/reading-lists/{shelf_id}/books/{book_id}/move"),
                &owner,
                json!({"targetListId": summer_id}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(moved["listId"], summer_id.as_str());

        let (_, shelf_entries) =
            send(&app, get(&format!("/api/v1/reading-lists/{shelf_id}/books"), &owner)).await;
        assert_eq!(shelf_entries, json!([]));
        let (_, summer_entries) =
            send(&app, get(&format!("/api/v1/reading-lists/{summer_id}/books"), &owner)).await;
        assert_eq!(summer_entries.as_array().map(Vec::len), Some(1));
    });
}

#[rstest]
fn net_worth_sums_cash_and_fixed_assets() {
    with_database(|state| async move {
        let app = api_app!(state);
        let owner = register(&app, "saver@example.com").await;

        let (status, _) = send(
            &app,
            post(
                "/api/v1/cash-accounts",
                &owner,
                json!({"name": "Saver", "accountType": "savings", "balanceCents": 250_000}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, _) = send(
            &app,
            post(
                "/api/v1/fixed-assets",
                &owner,
                json!({
                    "name": "Car",
                    "purchasePriceCents": 1_500_000,
                    "currentValueCents": 900_000,
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, worth) = send(&app, get("/api/v1/net-worth", &owner)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(worth["cashCents"], 250_000);
        assert_eq!(worth["fixedAssetsCents"], 900_000);
        assert_eq!(worth["totalCents"], 1_150_000);
    });
}

#[rstest]
fn snippet_languages_are_distinct_and_sorted() {
    with_database(|state| async move {
        let app = api_app!(state);
        let owner = register(&app, "coder@example.com").await;
        for (title, language) in [("b", "Rust"), ("a", "python"), ("c", "rust")] {
            let (status, _) = send(
                &app,
                post(
                    "/api/v1/snippets",
                    &owner,
                    json!({"title": title, "language": language, "code": "x", "tags": ["Util"]}),
                ),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (_, languages) = send(&app, get("/api/v1/snippets/languages", &owner)).await;
        assert_eq!(languages, json!(["python", "rust"]));
        let (_, rust) = send(&app, get("/api/v1/snippets?language=RUST&tag=util", &owner)).await;
        assert_eq!(rust.as_array().map(Vec::len), Some(2));
    });
}

#[rstest]
fn relationships_are_written_and_removed_in_both_directions() {
    with_database(|state| async move {
        let app = api_app!(state);
        let owner = register(&app, "family@example.com").await;
        let stranger = register(&app, "nosy@example.com").await;

        let (_, household) =
            send(&app, post("/api/v1/households", &owner, json!({"name": "Home"}))).await;
        let people_uri = format!("/api/v1/households/{}/people", id_of(&household));
        let (status, parent) = send(
            &app,
            post(&people_uri, &owner, json!({"firstName": "Ada", "lastName": "Byron"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let (_, child) = send(
            &app,
            post(&people_uri, &owner, json!({"firstName": "Anne", "lastName": "Byron"})),
        )
        .await;
        let (parent_id, child_id) = (id_of(&parent), id_of(&child));

        let (status, relationship) = send(
            &app,
            post(
                &format!("/api/v1/people/{parent_id}/relationships"),
                &owner,
                json!({"relatedPersonId": child_id, "kind": "parent"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(relationship["kind"], "parent");

        let (_, inverse) =
            send(&app, get(&format!("/api/v1/people/{child_id}/relationships"), &owner)).await;
        assert_eq!(inverse[0]["kind"], "child");
        assert_eq!(inverse[0]["relatedPersonId"], parent_id.as_str());

        let (status, _) = send(
            &app,
            get(&format!("/api/v1/people/{parent_id}/relationships"), &stranger),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(
            &app,
            delete(&format!("/api/v1/relationships/{}", id_of(&relationship)), &stranger),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &app,
            delete(&format!("/api/v1/relationships/{}", id_of(&relationship)), &owner),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        for person_id in [&parent_id, &child_id] {
            let (_, remaining) = send(
                &app,
                get(&format!("/api/v1/people/{person_id}/relationships"), &owner),
            )
            .await;
            assert_eq!(remaining, json!([]));
        }
    });
}

#[rstest]
fn completing_maintenance_reschedules_from_the_completion_date() {
    with_database(|state| async move {
        let app = api_app!(state);
        let owner = register(&app, "handy@example.com").await;
        let stranger = register(&app, "idle@example.com").await;

        let (status, task) = send(
            &app,
            post(
                "/api/v1/maintenance-tasks",
                &owner,
                json!({
                    "name": "Clean gutters",
                    "frequency": "monthly",
                    "nextDueDate": "2026-03-01",
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(task["isOverdue"], true);
        let task_id = id_of(&task);
        let complete_uri = format!("/api/v1/maintenance-tasks/{task_id}/complete");

        let (status, _) = send(&app, post(&complete_uri, &stranger, json!({}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, completion) = send(
            &app,
            post(
                &complete_uri,
                &owner,
                json!({"completedOn": "2026-03-10", "costCents": 4_000}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(completion["task"]["lastCompletedOn"], "2026-03-10");
        assert_eq!(completion["task"]["nextDueDate"], "2026-04-10");
        assert_eq!(completion["task"]["isOverdue"], false);
        assert_eq!(completion["log"]["costCents"], 4_000);

        let (_, logs) = send(
            &app,
            get(&format!("/api/v1/maintenance-tasks/{task_id}/logs"), &owner),
        )
        .await;
        assert_eq!(logs.as_array().map(Vec::len), Some(1));
    });
}

#[rstest]
fn plant_care_never_moves_dates_backwards_and_delete_retires() {
    with_database(|state| async move {
        let app = api_app!(state);
        let owner = register(&app, "green@example.com").await;
        let stranger = register(&app, "brown@example.com").await;

        let (status, plant) = send(
            &app,
            post(
                "/api/v1/plants",
                &owner,
                json!({
                    "name": "Fern",
                    "wateringFrequency": 3,
                    "lastWateredOn": "2026-03-10",
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(plant["needsWater"], true);
        let plant_id = id_of(&plant);
        let care_uri = format!("/api/v1/plants/{plant_id}/care");

        let (status, outcome) = send(
            &app,
            post(&care_uri, &owner, json!({"kind": "water", "performedOn": "2026-03-14"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(outcome["plant"]["lastWateredOn"], "2026-03-14");
        assert_eq!(outcome["plant"]["needsWater"], false);

        let (status, outcome) = send(
            &app,
            post(&care_uri, &owner, json!({"kind": "water", "performedOn": "2026-03-01"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(outcome["plant"]["lastWateredOn"], "2026-03-14");

        let (status, _) = send(&app, post(&care_uri, &stranger, json!({"kind": "water"}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (_, history) = send(&app, get(&care_uri, &owner)).await;
        assert_eq!(history.as_array().map(Vec::len), Some(2));

        let (status, _) = send(&app, delete(&format!("/api/v1/plants/{plant_id}"), &owner)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (_, active) = send(&app, get("/api/v1/plants", &owner)).await;
        assert_eq!(active, json!([]));
        let (_, all) = send(&app, get("/api/v1/plants?includeInactive=true", &owner)).await;
        assert_eq!(all[0]["isActive"], false);
    });
}

#[rstest]
fn reminders_snooze_then_complete_once() {
    with_database(|state| async move {
        let app = api_app!(state);
        let owner = register(&app, "forgetful@example.com").await;
        let stranger = register(&app, "helpful@example.com").await;

        let (status, reminder) = send(
            &app,
            post(
                "/api/v1/reminders",
                &owner,
                json!({"title": "Renew passport", "dueDate": "2026-03-10"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(reminder["dueState"], "overdue");
        let reminder_id = id_of(&reminder);
        let snooze_uri = format!("/api/v1/reminders/{reminder_id}/snooze");
        let complete_uri = format!("/api/v1/reminders/{reminder_id}/complete");

        let (status, _) = send(&app, post(&snooze_uri, &stranger, json!({"days": 7}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, snoozed) = send(&app, post(&snooze_uri, &owner, json!({"days": 7}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(snoozed["snoozedUntil"], "2026-03-22");
        assert_eq!(snoozed["dueState"], "snoozed");

        let (status, completed) = send(&app, post(&complete_uri, &owner, json!({}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(completed["dueState"], "completed");
        assert!(completed["completedAt"].is_string());

        let (status, body) = send(&app, post(&complete_uri, &owner, json!({}))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "conflict");
    });
}

#[rstest]
fn service_records_only_raise_vehicle_mileage() {
    with_database(|state| async move {
        let app = api_app!(state);
        let owner = register(&app, "driver@example.com").await;
        let stranger = register(&app, "passenger@example.com").await;

        let (status, vehicle) = send(
            &app,
            post(
                "/api/v1/vehicles",
                &owner,
                json!({"make": "Volvo", "model": "V70", "mileage": 40_000}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let vehicle_id = id_of(&vehicle);
        let records_uri = format!("/api/v1/vehicles/{vehicle_id}/service-records");

        for (serviced_on, mileage) in [("2026-02-01", 42_000), ("2025-08-01", 41_000)] {
            let (status, _) = send(
                &app,
                post(
                    &records_uri,
                    &owner,
                    json!({
                        "servicedOn": serviced_on,
                        "mileage": mileage,
                        "description": "Annual service",
                    }),
                ),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (_, current) = send(&app, get(&format!("/api/v1/vehicles/{vehicle_id}"), &owner)).await;
        assert_eq!(current["mileage"], 42_000);
        let (_, history) = send(&app, get(&records_uri, &owner)).await;
        assert_eq!(history[0]["servicedOn"], "2026-02-01");

        let (status, _) = send(
            &app,
            post(
                &records_uri,
                &stranger,
                json!({"servicedOn": "2026-03-01", "mileage": 99_000, "description": "Odometer"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (_, unchanged) =
            send(&app, get(&format!("/api/v1/vehicles/{vehicle_id}"), &owner)).await;
        assert_eq!(unchanged["mileage"], 42_000);
    });
}

#[rstest]
fn documents_link_only_to_records_the_caller_owns() {
    with_database(|state| async move {
        let app = api_app!(state);
        let owner = register(&app, "archivist@example.com").await;
        let stranger = register(&app, "borrower@example.com").await;

        let (_, vehicle) = send(
            &app,
            post("/api/v1/vehicles", &owner, json!({"make": "Ford", "model": "Fiesta"})),
        )
        .await;
        let (_, foreign_vehicle) = send(
            &app,
            post("/api/v1/vehicles", &stranger, json!({"make": "Fiat", "model": "Panda"})),
        )
        .await;
        let (status, document) = send(
            &app,
            post("/api/v1/documents", &owner, json!({"title": "V5C logbook"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let links_uri = format!("/api/v1/documents/{}/links", id_of(&document));
        let vehicle_id = id_of(&vehicle);

        let (status, _) = send(
            &app,
            post(
                &links_uri,
                &owner,
                json!({"entityType": "vehicle", "entityId": id_of(&foreign_vehicle)}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(
            &app,
            post(
                &links_uri,
                &owner,
                json!({"entityType": "bill", "entityId": "00000000-0000-4000-8000-000000000000"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(
            &app,
            post(
                &links_uri,
                &stranger,
                json!({"entityType": "vehicle", "entityId": id_of(&foreign_vehicle)}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, link) = send(
            &app,
            post(&links_uri, &owner, json!({"entityType": "vehicle", "entityId": vehicle_id})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(link["entityType"], "vehicle");

        let linked_uri =
            format!("/api/v1/linked-documents?entityType=vehicle&entityId={vehicle_id}");
        let (status, linked) = send(&app, get(&linked_uri, &owner)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(linked[0]["title"], "V5C logbook");
        let (_, hidden) = send(&app, get(&linked_uri, &stranger)).await;
        assert_eq!(hidden, json!([]));
        let (_, links) = send(&app, get(&links_uri, &owner)).await;
        assert_eq!(links.as_array().map(Vec::len), Some(1));
    });
}

#[rstest]
fn shopping_list_is_built_from_the_planned_recipes() {
    with_database(|state| async move {
        let app = api_app!(state);
        let owner = register(&app, "cook@example.com").await;
        let stranger = register(&app, "guest@example.com").await;

        let (status, recipe) = send(
            &app,
            post(
                "/api/v1/recipes",
                &owner,
                json!({
                    "title": "Pancakes",
                    "servings": 2,
                    "ingredients": [
                        {"name": "flour", "amount": "200g"},
                        {"name": "eggs", "amount": "2"},
                    ],
                    "tags": ["breakfast"],
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let recipe_id = id_of(&recipe);

        let (status, _) = send(
            &app,
            post(
                "/api/v1/meal-plan",
                &stranger,
                json!({"plannedOn": "2026-03-16", "mealType": "breakfast", "recipeId": recipe_id}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(
            &app,
            post(
                "/api/v1/meal-plan",
                &owner,
                json!({
                    "plannedOn": "2026-03-16",
                    "mealType": "breakfast",
                    "recipeId": recipe_id,
                    "servings": 4,
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let window = json!({"from": "2026-03-15", "to": "2026-03-21"});
        let (status, items) = send(
            &app,
            post("/api/v1/shopping-list/from-meal-plan", &owner, window.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let mut quantities: Vec<(String, String)> = items
            .as_array()
            .expect("items")
            .iter()
            .map(|item| {
                (
                    item["name"].as_str().unwrap_or_default().to_owned(),
                    item["quantity"].as_str().unwrap_or_default().to_owned(),
                )
            })
            .collect();
        quantities.sort();
        assert_eq!(
            quantities,
            vec![
                ("eggs".to_owned(), "4".to_owned()),
                ("flour".to_owned(), "400g".to_owned()),
            ]
        );
        assert_eq!(items[0]["recipeId"], recipe_id.as_str());

        let (status, empty) = send(
            &app,
            post("/api/v1/shopping-list/from-meal-plan", &stranger, window),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(empty, json!([]));
        let (_, list) = send(&app, get("/api/v1/shopping-list", &owner)).await;
        assert_eq!(list.as_array().map(Vec::len), Some(2));
    });
}
