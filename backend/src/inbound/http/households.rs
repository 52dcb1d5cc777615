//! Household, person and relationship handlers.
//!
//! ```text
//! POST /api/v1/households {"name":"Home"}
//! POST /api/v1/households/{id}/people {"firstName":"Ada","lastName":"Lovelace"}
//! POST /api/v1/people/{id}/relationships {"relatedPersonId":"...","kind":"sibling"}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    ApiResult, Household, HouseholdDraft, Person, PersonDraft, Relationship, RelationshipDraft,
    RelationshipKind,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, ID_FIELD, parse_label, parse_uuid};

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdRequest {
    #[schema(example = "Home")]
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdResponse {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<Household> for HouseholdResponse {
    fn from(value: Household) -> Self {
        Self {
            id: value.id,
            name: value.name,
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonRequest {
    #[schema(example = "Ada")]
    pub first_name: String,
    #[schema(example = "Lovelace")]
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

impl From<PersonRequest> for PersonDraft {
    fn from(value: PersonRequest) -> Self {
        Self {
            first_name: value.first_name,
            last_name: value.last_name,
            date_of_birth: value.date_of_birth,
            email: value.email,
            phone: value.phone,
            notes: value.notes,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonResponse {
    pub id: Uuid,
    pub household_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub date_of_birth: Option<NaiveDate>,
    /// Completed years as of today; absent without a birth date.
    pub age: Option<u32>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl PersonResponse {
    fn new(person: Person, today: NaiveDate) -> Self {
        Self {
            age: person.age(today),
            full_name: person.full_name(),
            id: person.id,
            household_id: person.household_id,
            first_name: person.first_name,
            last_name: person.last_name,
            date_of_birth: person.date_of_birth,
            email: person.email,
            phone: person.phone,
            notes: person.notes,
            created_at: person.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipRequest {
    pub related_person_id: String,
    #[schema(example = "sibling")]
    pub kind: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipResponse {
    pub id: Uuid,
    pub person_id: Uuid,
    pub related_person_id: Uuid,
    #[schema(example = "parent")]
    pub kind: String,
    pub created_at: DateTime<Utc>,
}

impl From<Relationship> for RelationshipResponse {
    fn from(value: Relationship) -> Self {
        Self {
            id: value.id,
            person_id: value.person_id,
            related_person_id: value.related_person_id,
            kind: value.kind.as_str().to_owned(),
            created_at: value.created_at,
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/households",
    request_body = HouseholdRequest,
    responses(
        (status = 201, description = "Household created", body = HouseholdResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["households"],
    operation_id = "createHousehold"
)]
#[post("/households")]
pub async fn create_household(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<HouseholdRequest>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let draft = HouseholdDraft::new(&payload.name)?;
    let household = state.households.create_household(&owner, &draft).await?;
    Ok(HttpResponse::Created().json(HouseholdResponse::from(household)))
}

#[utoipa::path(
    get,
    path = "/api/v1/households",
    responses(
        (status = 200, description = "Households by name", body = [HouseholdResponse]),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["households"],
    operation_id = "listHouseholds"
)]
#[get("/households")]
pub async fn list_households(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<HouseholdResponse>>> {
    let owner = session.require_user_id()?;
    let households = state.households.list_households(&owner).await?;
    Ok(web::Json(households.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/households/{id}",
    params(("id" = Uuid, Path, description = "Household id")),
    responses(
        (status = 200, description = "Household", body = HouseholdResponse),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["households"],
    operation_id = "getHousehold"
)]
#[get("/households/{id}")]
pub async fn get_household(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<HouseholdResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    let household = state.households.find_household(&owner, id).await?;
    Ok(web::Json(household.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/households/{id}",
    params(("id" = Uuid, Path, description = "Household id")),
    request_body = HouseholdRequest,
    responses(
        (status = 200, description = "Household renamed", body = HouseholdResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["households"],
    operation_id = "renameHousehold"
)]
#[put("/households/{id}")]
pub async fn rename_household(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<HouseholdRequest>,
) -> ApiResult<web::Json<HouseholdResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    let draft = HouseholdDraft::new(&payload.name)?;
    let household = state.households.rename_household(&owner, id, &draft).await?;
    Ok(web::Json(household.into()))
}

/// Delete a household together with its people.
#[utoipa::path(
    delete,
    path = "/api/v1/households/{id}",
    params(("id" = Uuid, Path, description = "Household id")),
    responses(
        (status = 204, description = "Household deleted"),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["households"],
    operation_id = "deleteHousehold"
)]
#[delete("/households/{id}")]
pub async fn delete_household(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    state.households.delete_household(&owner, id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    post,
    path = "/api/v1/households/{id}/people",
    params(("id" = Uuid, Path, description = "Household id")),
    request_body = PersonRequest,
    responses(
        (status = 201, description = "Person created", body = PersonResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Household not found", body = ErrorSchema)
    ),
    tags = ["households"],
    operation_id = "createPerson"
)]
#[post("/households/{id}/people")]
pub async fn create_person(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<PersonRequest>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let household_id = parse_uuid(&path, ID_FIELD)?;
    let draft = PersonDraft::from(payload.into_inner()).validated()?;
    let person = state
        .households
        .create_person(&owner, household_id, &draft)
        .await?;
    Ok(HttpResponse::Created().json(PersonResponse::new(person, state.today())))
}

#[utoipa::path(
    get,
    path = "/api/v1/households/{id}/people",
    params(("id" = Uuid, Path, description = "Household id")),
    responses(
        (status = 200, description = "People in the household", body = [PersonResponse]),
        (status = 404, description = "Household not found", body = ErrorSchema)
    ),
    tags = ["households"],
    operation_id = "listPeople"
)]
#[get("/households/{id}/people")]
pub async fn list_people(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<PersonResponse>>> {
    let owner = session.require_user_id()?;
    let household_id = parse_uuid(&path, ID_FIELD)?;
    let today = state.today();
    let people = state.households.list_people(&owner, household_id).await?;
    Ok(web::Json(
        people
            .into_iter()
            .map(|person| PersonResponse::new(person, today))
            .collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/people/{id}",
    params(("id" = Uuid, Path, description = "Person id")),
    responses(
        (status = 200, description = "Person", body = PersonResponse),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["households"],
    operation_id = "getPerson"
)]
#[get("/people/{id}")]
pub async fn get_person(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<PersonResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    let person = state.households.find_person(&owner, id).await?;
    Ok(web::Json(PersonResponse::new(person, state.today())))
}

#[utoipa::path(
    put,
    path = "/api/v1/people/{id}",
    params(("id" = Uuid, Path, description = "Person id")),
    request_body = PersonRequest,
    responses(
        (status = 200, description = "Person updated", body = PersonResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["households"],
    operation_id = "updatePerson"
)]
#[put("/people/{id}")]
pub async fn update_person(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<PersonRequest>,
) -> ApiResult<web::Json<PersonResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    let draft = PersonDraft::from(payload.into_inner()).validated()?;
    let person = state.households.update_person(&owner, id, &draft).await?;
    Ok(web::Json(PersonResponse::new(person, state.today())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/people/{id}",
    params(("id" = Uuid, Path, description = "Person id")),
    responses(
        (status = 204, description = "Person deleted"),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["households"],
    operation_id = "deletePerson"
)]
#[delete("/people/{id}")]
pub async fn delete_person(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    state.households.delete_person(&owner, id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Relate two of the caller's people; the inverse link is created alongside.
#[utoipa::path(
    post,
    path = "/api/v1/people/{id}/relationships",
    params(("id" = Uuid, Path, description = "Person id")),
    request_body = RelationshipRequest,
    responses(
        (status = 201, description = "Relationship created", body = RelationshipResponse),
        (status = 400, description = "Invalid request or self-relationship", body = ErrorSchema),
        (status = 404, description = "Person not found", body = ErrorSchema),
        (status = 409, description = "Relationship already exists", body = ErrorSchema)
    ),
    tags = ["households"],
    operation_id = "createRelationship"
)]
#[post("/people/{id}/relationships")]
pub async fn create_relationship(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<RelationshipRequest>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let person_id = parse_uuid(&path, ID_FIELD)?;
    let related = parse_uuid(
        &payload.related_person_id,
        FieldName::new("relatedPersonId"),
    )?;
    let kind: RelationshipKind = parse_label(&payload.kind, FieldName::new("kind"))?;
    let draft = RelationshipDraft::new(person_id, related, kind)?;
    let relationship = state.households.create_relationship(&owner, &draft).await?;
    Ok(HttpResponse::Created().json(RelationshipResponse::from(relationship)))
}

#[utoipa::path(
    get,
    path = "/api/v1/people/{id}/relationships",
    params(("id" = Uuid, Path, description = "Person id")),
    responses(
        (status = 200, description = "Relationships of the person", body = [RelationshipResponse]),
        (status = 404, description = "Person not found", body = ErrorSchema)
    ),
    tags = ["households"],
    operation_id = "listRelationships"
)]
#[get("/people/{id}/relationships")]
pub async fn list_relationships(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<RelationshipResponse>>> {
    let owner = session.require_user_id()?;
    let person_id = parse_uuid(&path, ID_FIELD)?;
    let relationships = state.households.list_relationships(&owner, person_id).await?;
    Ok(web::Json(relationships.into_iter().map(Into::into).collect()))
}

/// Remove a relationship and its inverse.
#[utoipa::path(
    delete,
    path = "/api/v1/relationships/{id}",
    params(("id" = Uuid, Path, description = "Relationship id")),
    responses(
        (status = 204, description = "Relationship deleted"),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["households"],
    operation_id = "deleteRelationship"
)]
#[delete("/relationships/{id}")]
pub async fn delete_relationship(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    state.households.delete_relationship(&owner, id).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_household)
        .service(list_households)
        .service(get_household)
        .service(rename_household)
        .service(delete_household)
        .service(create_person)
        .service(list_people)
        .service(get_person)
        .service(update_person)
        .service(delete_person)
        .service(create_relationship)
        .service(list_relationships)
        .service(delete_relationship);
}
