//! Reading handlers: books, reading lists with their entries, and yearly
//! reading goals.

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::{
    ApiResult, Book, BookDraft, EntryProgress, Error, ProgressUpdate, ReadingGoal,
    ReadingGoalDraft, ReadingGoalProgress, ReadingList, ReadingListDraft, ReadingListEntry,
    ReadingStatus, UserId, validate_target,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, ID_FIELD, parse_optional_label, parse_uuid,
};

const BOOK_ID_FIELD: FieldName = FieldName::new("bookId");

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookRequest {
    #[schema(example = "The Left Hand of Darkness")]
    pub title: String,
    pub author: Option<String>,
    #[schema(example = "978-0-441-47812-5")]
    pub isbn: Option<String>,
    pub page_count: Option<i32>,
    pub cover_url: Option<String>,
}

impl From<BookRequest> for BookDraft {
    fn from(value: BookRequest) -> Self {
        Self {
            title: value.title,
            author: value.author,
            isbn: value.isbn,
            page_count: value.page_count,
            cover_url: value.cover_url,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub page_count: Option<i32>,
    pub cover_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Book> for BookResponse {
    fn from(value: Book) -> Self {
        Self {
            id: value.id,
            title: value.title,
            author: value.author,
            isbn: value.isbn,
            page_count: value.page_count,
            cover_url: value.cover_url,
            created_at: value.created_at,
        }
    }
}

/// Title or author search.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookSearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReadingListRequest {
    #[schema(example = "Summer")]
    pub name: String,
    pub description: Option<String>,
}

impl From<ReadingListRequest> for ReadingListDraft {
    fn from(value: ReadingListRequest) -> Self {
        Self {
            name: value.name,
            description: value.description,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReadingListResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ReadingList> for ReadingListResponse {
    fn from(value: ReadingList) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddEntryRequest {
    pub book_id: Uuid,
    /// Initial status; defaults to `want_to_read`.
    #[schema(example = "reading")]
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRequest {
    #[schema(example = "finished")]
    pub status: Option<String>,
    pub current_page: Option<i32>,
    pub rating: Option<i16>,
}

impl ProgressRequest {
    fn into_update(self) -> ApiResult<ProgressUpdate> {
        let update = ProgressUpdate {
            status: parse_optional_label(self.status.as_deref(), FieldName::new("status"))?,
            current_page: self.current_page,
            rating: self.rating,
        };
        Ok(update.validated()?)
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoveEntryRequest {
    pub target_list_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntryResponse {
    pub list_id: Uuid,
    pub book: BookResponse,
    pub status: String,
    pub current_page: i32,
    pub rating: Option<i16>,
    pub started_on: Option<NaiveDate>,
    pub finished_on: Option<NaiveDate>,
    /// Absent when the book has no page count.
    pub progress_percent: Option<f64>,
    pub added_at: DateTime<Utc>,
}

impl From<ReadingListEntry> for EntryResponse {
    fn from(value: ReadingListEntry) -> Self {
        let progress_percent = value.progress_percent();
        let progress = value.progress;
        Self {
            list_id: value.list_id,
            book: value.book.into(),
            status: progress.status.as_str().to_owned(),
            current_page: progress.current_page,
            rating: progress.rating,
            started_on: progress.started_on,
            finished_on: progress.finished_on,
            progress_percent,
            added_at: value.added_at,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GoalRequest {
    #[schema(example = 2026)]
    pub year: i32,
    #[schema(example = 24)]
    pub target_books: i32,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GoalTargetRequest {
    pub target_books: i32,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GoalResponse {
    pub id: Uuid,
    pub year: i32,
    pub target_books: i32,
    pub finished_books: i64,
    /// May exceed 100 once the target is passed.
    pub percent: f64,
    pub is_complete: bool,
    pub created_at: DateTime<Utc>,
}

impl From<ReadingGoalProgress> for GoalResponse {
    fn from(value: ReadingGoalProgress) -> Self {
        let is_complete = value.is_complete();
        Self {
            id: value.goal.id,
            year: value.goal.year,
            target_books: value.goal.target_books,
            finished_books: value.finished_books,
            percent: value.percent,
            is_complete,
            created_at: value.goal.created_at,
        }
    }
}

async fn goal_progress(
    state: &HttpState,
    owner: &UserId,
    goal: ReadingGoal,
) -> ApiResult<GoalResponse> {
    let finished = state.reading.count_finished_books(owner, goal.year).await?;
    Ok(ReadingGoalProgress::new(goal, finished).into())
}

fn entry_path(path: &(String, String)) -> ApiResult<(Uuid, Uuid)> {
    let list_id = parse_uuid(&path.0, ID_FIELD)?;
    let book_id = parse_uuid(&path.1, BOOK_ID_FIELD)?;
    Ok((list_id, book_id))
}

#[utoipa::path(
    post,
    path = "/api/v1/books",
    request_body = BookRequest,
    responses(
        (status = 201, description = "Book created", body = BookResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "ISBN already catalogued", body = ErrorSchema)
    ),
    tags = ["reading"],
    operation_id = "createBook"
)]
#[post("/books")]
pub async fn create_book(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<BookRequest>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let draft = BookDraft::from(payload.into_inner()).validated()?;
    let book = state.reading.create_book(&owner, &draft).await?;
    Ok(HttpResponse::Created().json(BookResponse::from(book)))
}

#[utoipa::path(
    get,
    path = "/api/v1/books",
    params(BookSearchQuery),
    responses((status = 200, description = "Books by title", body = [BookResponse])),
    tags = ["reading"],
    operation_id = "listBooks"
)]
#[get("/books")]
pub async fn list_books(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<BookSearchQuery>,
) -> ApiResult<web::Json<Vec<BookResponse>>> {
    let owner = session.require_user_id()?;
    let needle = query.q.as_deref().map(str::trim).filter(|q| !q.is_empty());
    let books = state.reading.list_books(&owner, needle).await?;
    Ok(web::Json(books.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/books/{id}",
    params(("id" = Uuid, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book", body = BookResponse),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["reading"],
    operation_id = "getBook"
)]
#[get("/books/{id}")]
pub async fn get_book(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<BookResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    let book = state.reading.find_book(&owner, id).await?;
    Ok(web::Json(book.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/books/{id}",
    params(("id" = Uuid, Path, description = "Book id")),
    request_body = BookRequest,
    responses(
        (status = 200, description = "Book updated", body = BookResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "ISBN already catalogued", body = ErrorSchema)
    ),
    tags = ["reading"],
    operation_id = "updateBook"
)]
#[put("/books/{id}")]
pub async fn update_book(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<BookRequest>,
) -> ApiResult<web::Json<BookResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    let draft = BookDraft::from(payload.into_inner()).validated()?;
    let book = state.reading.update_book(&owner, id, &draft).await?;
    Ok(web::Json(book.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/books/{id}",
    params(("id" = Uuid, Path, description = "Book id")),
    responses(
        (status = 204, description = "Book deleted from the catalogue and every list"),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["reading"],
    operation_id = "deleteBook"
)]
#[delete("/books/{id}")]
pub async fn delete_book(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    state.reading.delete_book(&owner, id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    post,
    path = "/api/v1/reading-lists",
    request_body = ReadingListRequest,
    responses(
        (status = 201, description = "List created", body = ReadingListResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "List name in use", body = ErrorSchema)
    ),
    tags = ["reading"],
    operation_id = "createReadingList"
)]
#[post("/reading-lists")]
pub async fn create_list(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ReadingListRequest>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let draft = ReadingListDraft::from(payload.into_inner()).validated()?;
    let list = state.reading.create_list(&owner, &draft).await?;
    Ok(HttpResponse::Created().json(ReadingListResponse::from(list)))
}

#[utoipa::path(
    get,
    path = "/api/v1/reading-lists",
    responses((status = 200, description = "Reading lists", body = [ReadingListResponse])),
    tags = ["reading"],
    operation_id = "listReadingLists"
)]
#[get("/reading-lists")]
pub async fn list_lists(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<ReadingListResponse>>> {
    let owner = session.require_user_id()?;
    let lists = state.reading.list_lists(&owner).await?;
    Ok(web::Json(lists.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/reading-lists/{id}",
    params(("id" = Uuid, Path, description = "List id")),
    responses(
        (status = 200, description = "Reading list", body = ReadingListResponse),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["reading"],
    operation_id = "getReadingList"
)]
#[get("/reading-lists/{id}")]
pub async fn get_list(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ReadingListResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    let list = state.reading.find_list(&owner, id).await?;
    Ok(web::Json(list.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/reading-lists/{id}",
    params(("id" = Uuid, Path, description = "List id")),
    request_body = ReadingListRequest,
    responses(
        (status = 200, description = "List updated", body = ReadingListResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "List name in use", body = ErrorSchema)
    ),
    tags = ["reading"],
    operation_id = "updateReadingList"
)]
#[put("/reading-lists/{id}")]
pub async fn update_list(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<ReadingListRequest>,
) -> ApiResult<web::Json<ReadingListResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    let draft = ReadingListDraft::from(payload.into_inner()).validated()?;
    let list = state.reading.update_list(&owner, id, &draft).await?;
    Ok(web::Json(list.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/reading-lists/{id}",
    params(("id" = Uuid, Path, description = "List id")),
    responses(
        (status = 204, description = "List deleted"),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["reading"],
    operation_id = "deleteReadingList"
)]
#[delete("/reading-lists/{id}")]
pub async fn delete_list(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    state.reading.delete_list(&owner, id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    post,
    path = "/api/v1/reading-lists/{id}/books",
    params(("id" = Uuid, Path, description = "List id")),
    request_body = AddEntryRequest,
    responses(
        (status = 201, description = "Book added to the list", body = EntryResponse),
        (status = 404, description = "List or book not found", body = ErrorSchema),
        (status = 409, description = "Book already on the list", body = ErrorSchema)
    ),
    tags = ["reading"],
    operation_id = "addReadingListEntry"
)]
#[post("/reading-lists/{id}/books")]
pub async fn add_entry(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<AddEntryRequest>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let list_id = parse_uuid(&path, ID_FIELD)?;
    let AddEntryRequest { book_id, status } = payload.into_inner();
    let status: Option<ReadingStatus> =
        parse_optional_label(status.as_deref(), FieldName::new("status"))?;
    let mut progress = EntryProgress::default();
    if status.is_some() {
        let book = state.reading.find_book(&owner, book_id).await?;
        let update = ProgressUpdate {
            status,
            ..ProgressUpdate::default()
        };
        progress = progress.apply(update, book.page_count, state.today());
    }
    let entry = state
        .reading
        .add_entry(&owner, list_id, book_id, progress)
        .await?;
    Ok(HttpResponse::Created().json(EntryResponse::from(entry)))
}

#[utoipa::path(
    get,
    path = "/api/v1/reading-lists/{id}/books",
    params(("id" = Uuid, Path, description = "List id")),
    responses(
        (status = 200, description = "Entries in the order added", body = [EntryResponse]),
        (status = 404, description = "List not found", body = ErrorSchema)
    ),
    tags = ["reading"],
    operation_id = "listReadingListEntries"
)]
#[get("/reading-lists/{id}/books")]
pub async fn list_entries(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<EntryResponse>>> {
    let owner = session.require_user_id()?;
    let list_id = parse_uuid(&path, ID_FIELD)?;
    let entries = state.reading.list_entries(&owner, list_id).await?;
    Ok(web::Json(entries.into_iter().map(Into::into).collect()))
}

/// Update status, page or rating of an entry.
#[utoipa::path(
    put,
    path = "/api/v1/reading-lists/{id}/books/{bookId}",
    params(
        ("id" = Uuid, Path, description = "List id"),
        ("bookId" = Uuid, Path, description = "Book id")
    ),
    request_body = ProgressRequest,
    responses(
        (status = 200, description = "Progress updated", body = EntryResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Entry not found", body = ErrorSchema)
    ),
    tags = ["reading"],
    operation_id = "updateReadingProgress"
)]
#[put("/reading-lists/{id}/books/{book_id}")]
pub async fn update_entry(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(String, String)>,
    payload: web::Json<ProgressRequest>,
) -> ApiResult<web::Json<EntryResponse>> {
    let owner = session.require_user_id()?;
    let (list_id, book_id) = entry_path(&path)?;
    let update = payload.into_inner().into_update()?;
    let entry = state.reading.find_entry(&owner, list_id, book_id).await?;
    let progress = entry
        .progress
        .apply(update, entry.book.page_count, state.today());
    let updated = state
        .reading
        .update_entry(&owner, list_id, book_id, progress)
        .await?;
    Ok(web::Json(updated.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/reading-lists/{id}/books/{bookId}",
    params(
        ("id" = Uuid, Path, description = "List id"),
        ("bookId" = Uuid, Path, description = "Book id")
    ),
    responses(
        (status = 204, description = "Book removed from the list"),
        (status = 404, description = "Entry not found", body = ErrorSchema)
    ),
    tags = ["reading"],
    operation_id = "removeReadingListEntry"
)]
#[delete("/reading-lists/{id}/books/{book_id}")]
pub async fn remove_entry(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let (list_id, book_id) = entry_path(&path)?;
    state.reading.remove_entry(&owner, list_id, book_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Move an entry to another list, keeping its progress.
#[utoipa::path(
    post,
    path = "/api/v1/reading-lists/{id}/books/{bookId}/move",
    params(
        ("id" = Uuid, Path, description = "Source list id"),
        ("bookId" = Uuid, Path, description = "Book id")
    ),
    request_body = MoveEntryRequest,
    responses(
        (status = 200, description = "Entry moved", body = EntryResponse),
        (status = 404, description = "Entry or target list not found", body = ErrorSchema),
        (status = 409, description = "Book already on the target list", body = ErrorSchema)
    ),
    tags = ["reading"],
    operation_id = "moveReadingListEntry"
)]
#[post("/reading-lists/{id}/books/{book_id}/move")]
pub async fn move_entry(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(String, String)>,
    payload: web::Json<MoveEntryRequest>,
) -> ApiResult<web::Json<EntryResponse>> {
    let owner = session.require_user_id()?;
    let (list_id, book_id) = entry_path(&path)?;
    let target_list_id = payload.target_list_id;
    if target_list_id == list_id {
        return Err(Error::conflict("book is already on the target list"));
    }
    let entry = state
        .reading
        .move_entry(&owner, list_id, book_id, target_list_id)
        .await?;
    Ok(web::Json(entry.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/reading-goals",
    request_body = GoalRequest,
    responses(
        (status = 201, description = "Goal created", body = GoalResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "A goal for the year exists", body = ErrorSchema)
    ),
    tags = ["reading"],
    operation_id = "createReadingGoal"
)]
#[post("/reading-goals")]
pub async fn create_goal(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<GoalRequest>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let draft = ReadingGoalDraft {
        year: payload.year,
        target_books: payload.target_books,
    }
    .validated()?;
    let goal = state.reading.create_goal(&owner, draft).await?;
    let response = goal_progress(&state, &owner, goal).await?;
    Ok(HttpResponse::Created().json(response))
}

#[utoipa::path(
    get,
    path = "/api/v1/reading-goals",
    responses((status = 200, description = "Goals with progress, newest year first", body = [GoalResponse])),
    tags = ["reading"],
    operation_id = "listReadingGoals"
)]
#[get("/reading-goals")]
pub async fn list_goals(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<GoalResponse>>> {
    let owner = session.require_user_id()?;
    let goals = state.reading.list_goals(&owner).await?;
    let mut responses = Vec::with_capacity(goals.len());
    for goal in goals {
        responses.push(goal_progress(&state, &owner, goal).await?);
    }
    Ok(web::Json(responses))
}

#[utoipa::path(
    put,
    path = "/api/v1/reading-goals/{id}",
    params(("id" = Uuid, Path, description = "Goal id")),
    request_body = GoalTargetRequest,
    responses(
        (status = 200, description = "Goal updated", body = GoalResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["reading"],
    operation_id = "updateReadingGoal"
)]
#[put("/reading-goals/{id}")]
pub async fn update_goal(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<GoalTargetRequest>,
) -> ApiResult<web::Json<GoalResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    let target = validate_target(payload.target_books)?;
    let goal = state.reading.update_goal_target(&owner, id, target).await?;
    Ok(web::Json(goal_progress(&state, &owner, goal).await?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/reading-goals/{id}",
    params(("id" = Uuid, Path, description = "Goal id")),
    responses(
        (status = 204, description = "Goal deleted"),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["reading"],
    operation_id = "deleteReadingGoal"
)]
#[delete("/reading-goals/{id}")]
pub async fn delete_goal(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    state.reading.delete_goal(&owner, id).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_book)
        .service(list_books)
        .service(get_book)
        .service(update_book)
        .service(delete_book)
        .service(create_list)
        .service(list_lists)
        .service(get_list)
        .service(update_list)
        .service(delete_list)
        .service(add_entry)
        .service(list_entries)
        .service(update_entry)
        .service(remove_entry)
        .service(move_entry)
        .service(create_goal)
        .service(list_goals)
        .service(update_goal)
        .service(delete_goal);
}
