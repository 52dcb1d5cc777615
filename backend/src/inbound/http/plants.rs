//! Plant handlers. Deleting a plant retires it; its care history stays.

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::ports::CareRequest;
use crate::domain::{ApiResult, CareKind, CareLog, Plant, PlantCareOutcome, PlantDraft};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, ID_FIELD, parse_label, parse_uuid};

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlantRequest {
    #[schema(example = "Monstera")]
    pub name: String,
    pub species: Option<String>,
    pub location: Option<String>,
    pub acquired_on: Option<NaiveDate>,
    /// Days between waterings.
    #[schema(example = 7)]
    pub watering_frequency: i32,
    /// Days between feeds; absent for plants that are never fertilised.
    pub fertilising_frequency: Option<i32>,
    pub last_watered_on: Option<NaiveDate>,
    pub last_fertilised_on: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl From<PlantRequest> for PlantDraft {
    fn from(value: PlantRequest) -> Self {
        Self {
            name: value.name,
            species: value.species,
            location: value.location,
            acquired_on: value.acquired_on,
            watering_frequency: value.watering_frequency,
            fertilising_frequency: value.fertilising_frequency,
            last_watered_on: value.last_watered_on,
            last_fertilised_on: value.last_fertilised_on,
            notes: value.notes,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlantResponse {
    pub id: Uuid,
    pub name: String,
    pub species: Option<String>,
    pub location: Option<String>,
    pub acquired_on: Option<NaiveDate>,
    pub watering_frequency: i32,
    pub fertilising_frequency: Option<i32>,
    pub last_watered_on: Option<NaiveDate>,
    pub last_fertilised_on: Option<NaiveDate>,
    pub next_watering_on: Option<NaiveDate>,
    pub next_fertilising_on: Option<NaiveDate>,
    pub needs_water: bool,
    pub needs_fertiliser: bool,
    pub is_active: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl PlantResponse {
    fn new(plant: Plant, today: NaiveDate) -> Self {
        Self {
            next_watering_on: plant.next_watering_on(),
            next_fertilising_on: plant.next_fertilising_on(),
            needs_water: plant.needs_water(today),
            needs_fertiliser: plant.needs_fertiliser(today),
            id: plant.id,
            name: plant.name,
            species: plant.species,
            location: plant.location,
            acquired_on: plant.acquired_on,
            watering_frequency: plant.watering_frequency,
            fertilising_frequency: plant.fertilising_frequency,
            last_watered_on: plant.last_watered_on,
            last_fertilised_on: plant.last_fertilised_on,
            is_active: plant.is_active,
            notes: plant.notes,
            created_at: plant.created_at,
        }
    }
}

fn respond(plants: Vec<Plant>, today: NaiveDate) -> web::Json<Vec<PlantResponse>> {
    web::Json(
        plants
            .into_iter()
            .map(|plant| PlantResponse::new(plant, today))
            .collect(),
    )
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct PlantListQuery {
    /// Include retired plants.
    #[serde(default)]
    pub include_inactive: bool,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CareBody {
    #[schema(example = "water")]
    pub kind: String,
    /// Defaults to today.
    pub performed_on: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CareLogResponse {
    pub id: Uuid,
    pub plant_id: Uuid,
    pub kind: String,
    pub performed_on: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<CareLog> for CareLogResponse {
    fn from(value: CareLog) -> Self {
        Self {
            id: value.id,
            plant_id: value.plant_id,
            kind: value.kind.as_str().to_owned(),
            performed_on: value.performed_on,
            notes: value.notes,
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CareOutcomeResponse {
    pub log: CareLogResponse,
    pub plant: PlantResponse,
}

#[utoipa::path(
    post,
    path = "/api/v1/plants",
    request_body = PlantRequest,
    responses(
        (status = 201, description = "Plant created", body = PlantResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["plants"],
    operation_id = "createPlant"
)]
#[post("/plants")]
pub async fn create_plant(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<PlantRequest>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let draft = PlantDraft::from(payload.into_inner()).validated()?;
    let plant = state.plants.create(&owner, &draft).await?;
    Ok(HttpResponse::Created().json(PlantResponse::new(plant, state.today())))
}

#[utoipa::path(
    get,
    path = "/api/v1/plants",
    params(PlantListQuery),
    responses((status = 200, description = "Plants by name", body = [PlantResponse])),
    tags = ["plants"],
    operation_id = "listPlants"
)]
#[get("/plants")]
pub async fn list_plants(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<PlantListQuery>,
) -> ApiResult<web::Json<Vec<PlantResponse>>> {
    let owner = session.require_user_id()?;
    let plants = state.plants.list(&owner, query.include_inactive).await?;
    Ok(respond(plants, state.today()))
}

/// Active plants needing water or fertiliser today or earlier.
#[utoipa::path(
    get,
    path = "/api/v1/plants/due",
    responses((status = 200, description = "Plants needing care", body = [PlantResponse])),
    tags = ["plants"],
    operation_id = "plantsDue"
)]
#[get("/plants/due")]
pub async fn plants_due(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<PlantResponse>>> {
    let owner = session.require_user_id()?;
    let today = state.today();
    let plants = state.plants.list(&owner, false).await?;
    let due = plants
        .into_iter()
        .filter(|plant| plant.needs_care(today))
        .collect();
    Ok(respond(due, today))
}

#[utoipa::path(
    get,
    path = "/api/v1/plants/{id}",
    params(("id" = Uuid, Path, description = "Plant id")),
    responses(
        (status = 200, description = "Plant", body = PlantResponse),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["plants"],
    operation_id = "getPlant"
)]
#[get("/plants/{id}")]
pub async fn get_plant(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<PlantResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    let plant = state.plants.find(&owner, id).await?;
    Ok(web::Json(PlantResponse::new(plant, state.today())))
}

#[utoipa::path(
    put,
    path = "/api/v1/plants/{id}",
    params(("id" = Uuid, Path, description = "Plant id")),
    request_body = PlantRequest,
    responses(
        (status = 200, description = "Plant updated", body = PlantResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["plants"],
    operation_id = "updatePlant"
)]
#[put("/plants/{id}")]
pub async fn update_plant(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<PlantRequest>,
) -> ApiResult<web::Json<PlantResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    let draft = PlantDraft::from(payload.into_inner()).validated()?;
    let plant = state.plants.update(&owner, id, &draft).await?;
    Ok(web::Json(PlantResponse::new(plant, state.today())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/plants/{id}",
    params(("id" = Uuid, Path, description = "Plant id")),
    responses(
        (status = 204, description = "Plant retired"),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["plants"],
    operation_id = "deletePlant"
)]
#[delete("/plants/{id}")]
pub async fn delete_plant(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    state.plants.deactivate(&owner, id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    post,
    path = "/api/v1/plants/{id}/care",
    params(("id" = Uuid, Path, description = "Plant id")),
    request_body = CareBody,
    responses(
        (status = 201, description = "Care logged", body = CareOutcomeResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["plants"],
    operation_id = "logPlantCare"
)]
#[post("/plants/{id}/care")]
pub async fn log_care(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<CareBody>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    let CareBody {
        kind,
        performed_on,
        notes,
    } = payload.into_inner();
    let kind: CareKind = parse_label(&kind, FieldName::new("kind"))?;
    let request = CareRequest {
        kind,
        performed_on,
        notes,
    };
    let PlantCareOutcome { log, plant } = state.schedule.log_plant_care(&owner, id, request).await?;
    Ok(HttpResponse::Created().json(CareOutcomeResponse {
        log: log.into(),
        plant: PlantResponse::new(plant, state.today()),
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/plants/{id}/care",
    params(("id" = Uuid, Path, description = "Plant id")),
    responses(
        (status = 200, description = "Care history, newest first", body = [CareLogResponse]),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["plants"],
    operation_id = "listPlantCare"
)]
#[get("/plants/{id}/care")]
pub async fn list_care(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<CareLogResponse>>> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    let logs = state.plants.list_care(&owner, id).await?;
    Ok(web::Json(logs.into_iter().map(Into::into).collect()))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_plant)
        .service(list_plants)
        .service(plants_due)
        .service(get_plant)
        .service(update_plant)
        .service(delete_plant)
        .service(log_care)
        .service(list_care);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{MockPorts, login_cookie, test_app, today};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    fn plant(name: &str, last_watered_days_ago: Option<i64>) -> Plant {
        Plant {
            id: Uuid::new_v4(),
            name: name.into(),
            species: None,
            location: None,
            acquired_on: None,
            watering_frequency: 7,
            fertilising_frequency: None,
            last_watered_on: last_watered_days_ago
                .map(|days| today() - chrono::Duration::days(days)),
            last_fertilised_on: None,
            is_active: true,
            notes: None,
            created_at: Utc::now(),
        }
    }

    #[actix_web::test]
    async fn due_lists_only_plants_needing_care() {
        let mut ports = MockPorts::default();
        ports
            .plants
            .expect_list()
            .withf(|_, include_inactive| !*include_inactive)
            .returning(|_, _| {
                Ok(vec![
                    plant("Fern", Some(8)),
                    plant("Cactus", Some(2)),
                    plant("Palm", None),
                ])
            });
        let app = actix_test::init_service(test_app(ports, configure)).await;
        let cookie = login_cookie(&app).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/plants/due")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        let names: Vec<&str> = body
            .as_array()
            .into_iter()
            .flatten()
            .filter_map(|plant| plant["name"].as_str())
            .collect();
        assert_eq!(names, ["Fern", "Palm"]);
    }

    #[rstest]
    #[case("/plants", false)]
    #[case("/plants?includeInactive=true", true)]
    #[actix_web::test]
    async fn inactive_plants_are_opt_in(#[case] uri: &str, #[case] expected: bool) {
        let mut ports = MockPorts::default();
        ports
            .plants
            .expect_list()
            .withf(move |_, include_inactive| *include_inactive == expected)
            .times(1)
            .returning(|_, _| Ok(Vec::new()));
        let app = actix_test::init_service(test_app(ports, configure)).await;
        let cookie = login_cookie(&app).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri(uri).cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn delete_retires_the_plant() {
        let mut ports = MockPorts::default();
        ports
            .plants
            .expect_deactivate()
            .times(1)
            .returning(|_, _| Ok(()));
        let app = actix_test::init_service(test_app(ports, configure)).await;
        let cookie = login_cookie(&app).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri(&format!("/plants/{}", Uuid::new_v4()))
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }

    #[actix_web::test]
    async fn care_goes_through_the_schedule_service() {
        let mut ports = MockPorts::default();
        ports
            .schedule
            .expect_log_plant_care()
            .withf(|_, _, request| {
                request.kind == CareKind::Water && request.performed_on.is_none()
            })
            .times(1)
            .returning(|_, id, request| {
                let mut watered = plant("Fern", Some(0));
                watered.id = id;
                Ok(PlantCareOutcome {
                    log: CareLog {
                        id: Uuid::new_v4(),
                        plant_id: id,
                        kind: request.kind,
                        performed_on: today(),
                        notes: None,
                        created_at: Utc::now(),
                    },
                    plant: watered,
                })
            });
        let app = actix_test::init_service(test_app(ports, configure)).await;
        let cookie = login_cookie(&app).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/plants/{}/care", Uuid::new_v4()))
                .cookie(cookie)
                .set_json(json!({"kind": "water"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["log"]["kind"], "water");
        assert_eq!(body["plant"]["needsWater"], false);
        assert_eq!(body["plant"]["nextWateringOn"], "2026-03-22");
    }

    #[actix_web::test]
    async fn unknown_care_kinds_are_rejected() {
        let app = actix_test::init_service(test_app(MockPorts::default(), configure)).await;
        let cookie = login_cookie(&app).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/plants/{}/care", Uuid::new_v4()))
                .cookie(cookie)
                .set_json(json!({"kind": "sing"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
