//! Code snippet handlers.

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::{ApiResult, CodeSnippet, SnippetDraft, SnippetFilter};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{ID_FIELD, parse_uuid};

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SnippetRequest {
    #[schema(example = "Retry with backoff")]
    pub title: String,
    #[schema(example = "rust")]
    pub language: String,
    pub code: String,
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl From<SnippetRequest> for SnippetDraft {
    fn from(value: SnippetRequest) -> Self {
        Self {
            title: value.title,
            language: value.language,
            code: value.code,
            description: value.description,
            tags: value.tags,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SnippetResponse {
    pub id: Uuid,
    pub title: String,
    pub language: String,
    pub code: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CodeSnippet> for SnippetResponse {
    fn from(value: CodeSnippet) -> Self {
        Self {
            id: value.id,
            title: value.title,
            language: value.language,
            code: value.code,
            description: value.description,
            tags: value.tags,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// Filters combine with AND; `q` matches title or description.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SnippetQuery {
    pub language: Option<String>,
    pub tag: Option<String>,
    pub q: Option<String>,
}

impl SnippetQuery {
    fn to_filter(&self) -> SnippetFilter {
        let clean = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map(str::to_owned)
        };
        SnippetFilter {
            language: clean(&self.language).map(|language| language.to_lowercase()),
            tag: clean(&self.tag).map(|tag| tag.to_lowercase()),
            q: clean(&self.q),
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/snippets",
    request_body = SnippetRequest,
    responses(
        (status = 201, description = "Snippet created", body = SnippetResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["snippets"],
    operation_id = "createSnippet"
)]
#[post("/snippets")]
pub async fn create_snippet(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SnippetRequest>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let draft = SnippetDraft::from(payload.into_inner()).validated()?;
    let snippet = state.snippets.create(&owner, &draft).await?;
    Ok(HttpResponse::Created().json(SnippetResponse::from(snippet)))
}

#[utoipa::path(
    get,
    path = "/api/v1/snippets",
    params(SnippetQuery),
    responses((status = 200, description = "Snippets, most recently updated first", body = [SnippetResponse])),
    tags = ["snippets"],
    operation_id = "listSnippets"
)]
#[get("/snippets")]
pub async fn list_snippets(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<SnippetQuery>,
) -> ApiResult<web::Json<Vec<SnippetResponse>>> {
    let owner = session.require_user_id()?;
    let snippets = state.snippets.list(&owner, &query.to_filter()).await?;
    Ok(web::Json(snippets.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/snippets/languages",
    responses((status = 200, description = "Languages in use, alphabetical", body = [String])),
    tags = ["snippets"],
    operation_id = "snippetLanguages"
)]
#[get("/snippets/languages")]
pub async fn languages(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<String>>> {
    let owner = session.require_user_id()?;
    Ok(web::Json(state.snippets.languages(&owner).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/snippets/{id}",
    params(("id" = Uuid, Path, description = "Snippet id")),
    responses(
        (status = 200, description = "Snippet", body = SnippetResponse),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["snippets"],
    operation_id = "getSnippet"
)]
#[get("/snippets/{id}")]
pub async fn get_snippet(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<SnippetResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    let snippet = state.snippets.find(&owner, id).await?;
    Ok(web::Json(snippet.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/snippets/{id}",
    params(("id" = Uuid, Path, description = "Snippet id")),
    request_body = SnippetRequest,
    responses(
        (status = 200, description = "Snippet updated", body = SnippetResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["snippets"],
    operation_id = "updateSnippet"
)]
#[put("/snippets/{id}")]
pub async fn update_snippet(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<SnippetRequest>,
) -> ApiResult<web::Json<SnippetResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    let draft = SnippetDraft::from(payload.into_inner()).validated()?;
    let snippet = state.snippets.update(&owner, id, &draft).await?;
    Ok(web::Json(snippet.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/snippets/{id}",
    params(("id" = Uuid, Path, description = "Snippet id")),
    responses(
        (status = 204, description = "Snippet deleted"),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["snippets"],
    operation_id = "deleteSnippet"
)]
#[delete("/snippets/{id}")]
pub async fn delete_snippet(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    state.snippets.delete(&owner, id).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_snippet)
        .service(list_snippets)
        .service(languages)
        .service(get_snippet)
        .service(update_snippet)
        .service(delete_snippet);
}
