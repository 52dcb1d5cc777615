//! Document reference handlers.
//!
//! Documents point at files kept in Paperless-ngx by id; links attach a
//! document to any other record by entity type and id.

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::{ApiResult, Document, DocumentDraft, DocumentLink, LinkedEntity};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, ID_FIELD, parse_label, parse_uuid};

const ENTITY_TYPE_FIELD: FieldName = FieldName::new("entityType");
const ENTITY_ID_FIELD: FieldName = FieldName::new("entityId");

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRequest {
    pub household_id: Option<Uuid>,
    #[schema(example = "Home insurance schedule 2026")]
    pub title: String,
    pub paperless_document_id: Option<i64>,
    pub category: Option<String>,
    pub notes: Option<String>,
}

impl From<DocumentRequest> for DocumentDraft {
    fn from(value: DocumentRequest) -> Self {
        Self {
            household_id: value.household_id,
            title: value.title,
            paperless_document_id: value.paperless_document_id,
            category: value.category,
            notes: value.notes,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentResponse {
    pub id: Uuid,
    pub household_id: Option<Uuid>,
    pub title: String,
    pub paperless_document_id: Option<i64>,
    pub category: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Document> for DocumentResponse {
    fn from(value: Document) -> Self {
        Self {
            id: value.id,
            household_id: value.household_id,
            title: value.title,
            paperless_document_id: value.paperless_document_id,
            category: value.category,
            notes: value.notes,
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DocumentListQuery {
    pub category: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LinkRequest {
    #[schema(example = "vehicle")]
    pub entity_type: String,
    pub entity_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub id: Uuid,
    pub document_id: Uuid,
    pub entity_type: String,
    pub entity_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<DocumentLink> for LinkResponse {
    fn from(value: DocumentLink) -> Self {
        Self {
            id: value.id,
            document_id: value.document_id,
            entity_type: value.entity_type.as_str().to_owned(),
            entity_id: value.entity_id,
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct LinkedQuery {
    pub entity_type: String,
    pub entity_id: String,
}

#[utoipa::path(
    post,
    path = "/api/v1/documents",
    request_body = DocumentRequest,
    responses(
        (status = 201, description = "Document created", body = DocumentResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Paperless document already referenced", body = ErrorSchema)
    ),
    tags = ["documents"],
    operation_id = "createDocument"
)]
#[post("/documents")]
pub async fn create_document(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<DocumentRequest>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let draft = DocumentDraft::from(payload.into_inner()).validated()?;
    let document = state.documents.create(&owner, &draft).await?;
    Ok(HttpResponse::Created().json(DocumentResponse::from(document)))
}

#[utoipa::path(
    get,
    path = "/api/v1/documents",
    params(DocumentListQuery),
    responses((status = 200, description = "Documents by title", body = [DocumentResponse])),
    tags = ["documents"],
    operation_id = "listDocuments"
)]
#[get("/documents")]
pub async fn list_documents(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<DocumentListQuery>,
) -> ApiResult<web::Json<Vec<DocumentResponse>>> {
    let owner = session.require_user_id()?;
    let category = query
        .category
        .as_deref()
        .map(str::trim)
        .filter(|category| !category.is_empty());
    let documents = state.documents.list(&owner, category).await?;
    Ok(web::Json(documents.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/documents/{id}",
    params(("id" = Uuid, Path, description = "Document id")),
    responses(
        (status = 200, description = "Document", body = DocumentResponse),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["documents"],
    operation_id = "getDocument"
)]
#[get("/documents/{id}")]
pub async fn get_document(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<DocumentResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    let document = state.documents.find(&owner, id).await?;
    Ok(web::Json(document.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/documents/{id}",
    params(("id" = Uuid, Path, description = "Document id")),
    request_body = DocumentRequest,
    responses(
        (status = 200, description = "Document updated", body = DocumentResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Paperless document already referenced", body = ErrorSchema)
    ),
    tags = ["documents"],
    operation_id = "updateDocument"
)]
#[put("/documents/{id}")]
pub async fn update_document(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<DocumentRequest>,
) -> ApiResult<web::Json<DocumentResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    let draft = DocumentDraft::from(payload.into_inner()).validated()?;
    let document = state.documents.update(&owner, id, &draft).await?;
    Ok(web::Json(document.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/documents/{id}",
    params(("id" = Uuid, Path, description = "Document id")),
    responses(
        (status = 204, description = "Document and its links deleted"),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["documents"],
    operation_id = "deleteDocument"
)]
#[delete("/documents/{id}")]
pub async fn delete_document(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    state.documents.delete(&owner, id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    post,
    path = "/api/v1/documents/{id}/links",
    params(("id" = Uuid, Path, description = "Document id")),
    request_body = LinkRequest,
    responses(
        (status = 201, description = "Link created", body = LinkResponse),
        (status = 400, description = "Unknown entity type", body = ErrorSchema),
        (status = 404, description = "Document not found", body = ErrorSchema),
        (status = 409, description = "Link already exists", body = ErrorSchema)
    ),
    tags = ["documents"],
    operation_id = "linkDocument"
)]
#[post("/documents/{id}/links")]
pub async fn link_document(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<LinkRequest>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    let entity_type: LinkedEntity = parse_label(&payload.entity_type, ENTITY_TYPE_FIELD)?;
    let link = state
        .documents
        .link(&owner, id, entity_type, payload.entity_id)
        .await?;
    Ok(HttpResponse::Created().json(LinkResponse::from(link)))
}

#[utoipa::path(
    get,
    path = "/api/v1/documents/{id}/links",
    params(("id" = Uuid, Path, description = "Document id")),
    responses(
        (status = 200, description = "Links of the document", body = [LinkResponse]),
        (status = 404, description = "Document not found", body = ErrorSchema)
    ),
    tags = ["documents"],
    operation_id = "listDocumentLinks"
)]
#[get("/documents/{id}/links")]
pub async fn list_links(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<LinkResponse>>> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    let links = state.documents.list_links(&owner, id).await?;
    Ok(web::Json(links.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/document-links/{id}",
    params(("id" = Uuid, Path, description = "Link id")),
    responses(
        (status = 204, description = "Link removed"),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["documents"],
    operation_id = "unlinkDocument"
)]
#[delete("/document-links/{id}")]
pub async fn unlink_document(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    state.documents.unlink(&owner, id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    get,
    path = "/api/v1/linked-documents",
    params(LinkedQuery),
    responses(
        (status = 200, description = "Documents linked to the record", body = [DocumentResponse]),
        (status = 400, description = "Invalid entity reference", body = ErrorSchema)
    ),
    tags = ["documents"],
    operation_id = "linkedDocuments"
)]
#[get("/linked-documents")]
pub async fn linked_documents(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<LinkedQuery>,
) -> ApiResult<web::Json<Vec<DocumentResponse>>> {
    let owner = session.require_user_id()?;
    let entity_type: LinkedEntity = parse_label(&query.entity_type, ENTITY_TYPE_FIELD)?;
    let entity_id = parse_uuid(&query.entity_id, ENTITY_ID_FIELD)?;
    let documents = state
        .documents
        .linked_documents(&owner, entity_type, entity_id)
        .await?;
    Ok(web::Json(documents.into_iter().map(Into::into).collect()))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_document)
        .service(list_documents)
        .service(get_document)
        .service(update_document)
        .service(delete_document)
        .service(link_document)
        .service(list_links)
        .service(unlink_document)
        .service(linked_documents);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::RepositoryError;
    use crate::inbound::http::test_utils::{MockPorts, login_cookie, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn linked_documents_are_looked_up_by_entity() {
        let entity_id = Uuid::new_v4();
        let mut ports = MockPorts::default();
        ports
            .documents
            .expect_linked_documents()
            .withf(move |_, kind, id| *kind == LinkedEntity::InsurancePolicy && *id == entity_id)
            .times(1)
            .returning(|_, _, _| {
                Ok(vec![Document {
                    id: Uuid::new_v4(),
                    household_id: None,
                    title: "Policy schedule".into(),
                    paperless_document_id: Some(42),
                    category: None,
                    notes: None,
                    created_at: Utc::now(),
                }])
            });
        let app = actix_test::init_service(test_app(ports, configure)).await;
        let cookie = login_cookie(&app).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!(
                    "/linked-documents?entityType=insurance_policy&entityId={entity_id}"
                ))
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body[0]["paperlessDocumentId"], 42);
    }

    #[rstest]
    #[case("/linked-documents?entityType=spaceship&entityId=3fa85f64-5717-4562-b3fc-2c963f66afa6", "entityType")]
    #[case("/linked-documents?entityType=plant&entityId=nope", "entityId")]
    #[actix_web::test]
    async fn malformed_entity_references_are_rejected(#[case] uri: &str, #[case] field: &str) {
        let app = actix_test::init_service(test_app(MockPorts::default(), configure)).await;
        let cookie = login_cookie(&app).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri(uri).cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], field);
    }

    #[actix_web::test]
    async fn duplicate_links_conflict() {
        let mut ports = MockPorts::default();
        ports
            .documents
            .expect_link()
            .returning(|_, _, _, _| Err(RepositoryError::already_exists("document link")));
        let app = actix_test::init_service(test_app(ports, configure)).await;
        let cookie = login_cookie(&app).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/documents/{}/links", Uuid::new_v4()))
                .cookie(cookie)
                .set_json(json!({"entityType": "vehicle", "entityId": Uuid::new_v4()}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }
}
