//! Vehicle and service record handlers.

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    ApiResult, ServiceRecord, ServiceRecordDraft, Vehicle, VehicleDraft, VehicleDue,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{ID_FIELD, parse_uuid};

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRequest {
    pub household_id: Option<Uuid>,
    #[schema(example = "Volkswagen")]
    pub make: String,
    #[schema(example = "Golf")]
    pub model: String,
    pub year: Option<i32>,
    #[schema(example = "AB12 CDE")]
    pub registration: Option<String>,
    pub vin: Option<String>,
    pub mileage: Option<i32>,
    pub mot_due_date: Option<NaiveDate>,
    pub tax_due_date: Option<NaiveDate>,
    pub service_due_date: Option<NaiveDate>,
}

impl From<VehicleRequest> for VehicleDraft {
    fn from(value: VehicleRequest) -> Self {
        Self {
            household_id: value.household_id,
            make: value.make,
            model: value.model,
            year: value.year,
            registration: value.registration,
            vin: value.vin,
            mileage: value.mileage,
            mot_due_date: value.mot_due_date,
            tax_due_date: value.tax_due_date,
            service_due_date: value.service_due_date,
        }
    }
}

/// Earliest upcoming or missed date of a vehicle.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NextDueResponse {
    #[schema(example = "mot")]
    pub kind: String,
    pub date: NaiveDate,
    pub days_until: i64,
}

impl From<VehicleDue> for NextDueResponse {
    fn from(value: VehicleDue) -> Self {
        Self {
            kind: value.kind.as_str().to_owned(),
            date: value.date,
            days_until: value.days_until,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleResponse {
    pub id: Uuid,
    pub household_id: Option<Uuid>,
    pub make: String,
    pub model: String,
    pub year: Option<i32>,
    pub registration: Option<String>,
    pub vin: Option<String>,
    pub mileage: Option<i32>,
    pub mot_due_date: Option<NaiveDate>,
    pub tax_due_date: Option<NaiveDate>,
    pub service_due_date: Option<NaiveDate>,
    pub next_due: Option<NextDueResponse>,
    pub created_at: DateTime<Utc>,
}

impl VehicleResponse {
    fn new(vehicle: Vehicle, today: NaiveDate) -> Self {
        Self {
            next_due: vehicle.next_due(today).map(Into::into),
            id: vehicle.id,
            household_id: vehicle.household_id,
            make: vehicle.make,
            model: vehicle.model,
            year: vehicle.year,
            registration: vehicle.registration,
            vin: vehicle.vin,
            mileage: vehicle.mileage,
            mot_due_date: vehicle.mot_due_date,
            tax_due_date: vehicle.tax_due_date,
            service_due_date: vehicle.service_due_date,
            created_at: vehicle.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecordRequest {
    pub serviced_on: NaiveDate,
    pub mileage: Option<i32>,
    #[schema(example = "Annual service and oil change")]
    pub description: String,
    pub cost_cents: Option<i64>,
    pub garage: Option<String>,
}

impl From<ServiceRecordRequest> for ServiceRecordDraft {
    fn from(value: ServiceRecordRequest) -> Self {
        Self {
            serviced_on: value.serviced_on,
            mileage: value.mileage,
            description: value.description,
            cost_cents: value.cost_cents,
            garage: value.garage,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecordResponse {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub serviced_on: NaiveDate,
    pub mileage: Option<i32>,
    pub description: String,
    pub cost_cents: Option<i64>,
    pub garage: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ServiceRecord> for ServiceRecordResponse {
    fn from(value: ServiceRecord) -> Self {
        Self {
            id: value.id,
            vehicle_id: value.vehicle_id,
            serviced_on: value.serviced_on,
            mileage: value.mileage,
            description: value.description,
            cost_cents: value.cost_cents,
            garage: value.garage,
            created_at: value.created_at,
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/vehicles",
    request_body = VehicleRequest,
    responses(
        (status = 201, description = "Vehicle created", body = VehicleResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Registration already in use", body = ErrorSchema)
    ),
    tags = ["vehicles"],
    operation_id = "createVehicle"
)]
#[post("/vehicles")]
pub async fn create_vehicle(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<VehicleRequest>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let draft = VehicleDraft::from(payload.into_inner()).validated()?;
    let vehicle = state.vehicles.create(&owner, &draft).await?;
    Ok(HttpResponse::Created().json(VehicleResponse::new(vehicle, state.today())))
}

#[utoipa::path(
    get,
    path = "/api/v1/vehicles",
    responses((status = 200, description = "Vehicles", body = [VehicleResponse])),
    tags = ["vehicles"],
    operation_id = "listVehicles"
)]
#[get("/vehicles")]
pub async fn list_vehicles(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<VehicleResponse>>> {
    let owner = session.require_user_id()?;
    let today = state.today();
    let vehicles = state.vehicles.list(&owner).await?;
    Ok(web::Json(
        vehicles
            .into_iter()
            .map(|vehicle| VehicleResponse::new(vehicle, today))
            .collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/vehicles/{id}",
    params(("id" = Uuid, Path, description = "Vehicle id")),
    responses(
        (status = 200, description = "Vehicle", body = VehicleResponse),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["vehicles"],
    operation_id = "getVehicle"
)]
#[get("/vehicles/{id}")]
pub async fn get_vehicle(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<VehicleResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    let vehicle = state.vehicles.find(&owner, id).await?;
    Ok(web::Json(VehicleResponse::new(vehicle, state.today())))
}

#[utoipa::path(
    put,
    path = "/api/v1/vehicles/{id}",
    params(("id" = Uuid, Path, description = "Vehicle id")),
    request_body = VehicleRequest,
    responses(
        (status = 200, description = "Vehicle updated", body = VehicleResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Registration already in use", body = ErrorSchema)
    ),
    tags = ["vehicles"],
    operation_id = "updateVehicle"
)]
#[put("/vehicles/{id}")]
pub async fn update_vehicle(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<VehicleRequest>,
) -> ApiResult<web::Json<VehicleResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    let draft = VehicleDraft::from(payload.into_inner()).validated()?;
    let vehicle = state.vehicles.update(&owner, id, &draft).await?;
    Ok(web::Json(VehicleResponse::new(vehicle, state.today())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/vehicles/{id}",
    params(("id" = Uuid, Path, description = "Vehicle id")),
    responses(
        (status = 204, description = "Vehicle and its service records deleted"),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["vehicles"],
    operation_id = "deleteVehicle"
)]
#[delete("/vehicles/{id}")]
pub async fn delete_vehicle(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    state.vehicles.delete(&owner, id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Record a service; a higher odometer reading raises the vehicle mileage.
#[utoipa::path(
    post,
    path = "/api/v1/vehicles/{id}/service-records",
    params(("id" = Uuid, Path, description = "Vehicle id")),
    request_body = ServiceRecordRequest,
    responses(
        (status = 201, description = "Service recorded", body = ServiceRecordResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Vehicle not found", body = ErrorSchema)
    ),
    tags = ["vehicles"],
    operation_id = "addServiceRecord"
)]
#[post("/vehicles/{id}/service-records")]
pub async fn add_service_record(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<ServiceRecordRequest>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let vehicle_id = parse_uuid(&path, ID_FIELD)?;
    let draft = ServiceRecordDraft::from(payload.into_inner()).validated()?;
    let record = state
        .vehicles
        .add_service_record(&owner, vehicle_id, &draft)
        .await?;
    Ok(HttpResponse::Created().json(ServiceRecordResponse::from(record)))
}

#[utoipa::path(
    get,
    path = "/api/v1/vehicles/{id}/service-records",
    params(("id" = Uuid, Path, description = "Vehicle id")),
    responses(
        (status = 200, description = "Service history, newest first", body = [ServiceRecordResponse]),
        (status = 404, description = "Vehicle not found", body = ErrorSchema)
    ),
    tags = ["vehicles"],
    operation_id = "listServiceRecords"
)]
#[get("/vehicles/{id}/service-records")]
pub async fn list_service_records(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<ServiceRecordResponse>>> {
    let owner = session.require_user_id()?;
    let vehicle_id = parse_uuid(&path, ID_FIELD)?;
    let records = state
        .vehicles
        .list_service_records(&owner, vehicle_id)
        .await?;
    Ok(web::Json(records.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/service-records/{id}",
    params(("id" = Uuid, Path, description = "Service record id")),
    responses(
        (status = 204, description = "Service record deleted"),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["vehicles"],
    operation_id = "deleteServiceRecord"
)]
#[delete("/service-records/{id}")]
pub async fn delete_service_record(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    state.vehicles.delete_service_record(&owner, id).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_vehicle)
        .service(list_vehicles)
        .service(get_vehicle)
        .service(update_vehicle)
        .service(delete_vehicle)
        .service(add_service_record)
        .service(list_service_records)
        .service(delete_service_record);
}
