//! Maintenance task handlers.
//!
//! Completing a task logs it and reschedules it from the completion date.

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::CompletionRequest;
use crate::domain::{
    ApiResult, Frequency, MaintenanceCompletion, MaintenanceLog, MaintenanceTask,
    MaintenanceTaskDraft,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, ID_FIELD, parse_label, parse_uuid};

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskRequest {
    pub household_id: Option<Uuid>,
    #[schema(example = "Bleed radiators")]
    pub name: String,
    pub category: Option<String>,
    #[schema(example = "annually")]
    pub frequency: String,
    pub next_due_date: NaiveDate,
    pub notes: Option<String>,
}

impl TaskRequest {
    fn into_draft(self) -> ApiResult<MaintenanceTaskDraft> {
        let frequency: Frequency = parse_label(&self.frequency, FieldName::new("frequency"))?;
        let draft = MaintenanceTaskDraft {
            household_id: self.household_id,
            name: self.name,
            category: self.category,
            frequency,
            next_due_date: self.next_due_date,
            notes: self.notes,
        };
        Ok(draft.validated()?)
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: Uuid,
    pub household_id: Option<Uuid>,
    pub name: String,
    pub category: Option<String>,
    pub frequency: String,
    pub last_completed_on: Option<NaiveDate>,
    pub next_due_date: NaiveDate,
    pub days_until_due: i64,
    pub is_overdue: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TaskResponse {
    fn new(task: MaintenanceTask, today: NaiveDate) -> Self {
        Self {
            days_until_due: task.days_until_due(today),
            is_overdue: task.is_overdue(today),
            id: task.id,
            household_id: task.household_id,
            name: task.name,
            category: task.category,
            frequency: task.frequency.as_str().to_owned(),
            last_completed_on: task.last_completed_on,
            next_due_date: task.next_due_date,
            notes: task.notes,
            created_at: task.created_at,
        }
    }
}

fn respond(tasks: Vec<MaintenanceTask>, today: NaiveDate) -> web::Json<Vec<TaskResponse>> {
    web::Json(
        tasks
            .into_iter()
            .map(|task| TaskResponse::new(task, today))
            .collect(),
    )
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LogResponse {
    pub id: Uuid,
    pub task_id: Uuid,
    pub completed_on: NaiveDate,
    pub cost_cents: Option<i64>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<MaintenanceLog> for LogResponse {
    fn from(value: MaintenanceLog) -> Self {
        Self {
            id: value.id,
            task_id: value.task_id,
            completed_on: value.completed_on,
            cost_cents: value.cost_cents,
            notes: value.notes,
            created_at: value.created_at,
        }
    }
}

/// Completion body; the date defaults to today.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompletionBody {
    pub completed_on: Option<NaiveDate>,
    pub cost_cents: Option<i64>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompletionResponse {
    pub log: LogResponse,
    pub task: TaskResponse,
}

#[utoipa::path(
    post,
    path = "/api/v1/maintenance-tasks",
    request_body = TaskRequest,
    responses(
        (status = 201, description = "Task created", body = TaskResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["maintenance"],
    operation_id = "createMaintenanceTask"
)]
#[post("/maintenance-tasks")]
pub async fn create_task(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<TaskRequest>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let draft = payload.into_inner().into_draft()?;
    let task = state.maintenance.create(&owner, &draft).await?;
    Ok(HttpResponse::Created().json(TaskResponse::new(task, state.today())))
}

#[utoipa::path(
    get,
    path = "/api/v1/maintenance-tasks",
    responses((status = 200, description = "Tasks by due date", body = [TaskResponse])),
    tags = ["maintenance"],
    operation_id = "listMaintenanceTasks"
)]
#[get("/maintenance-tasks")]
pub async fn list_tasks(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<TaskResponse>>> {
    let owner = session.require_user_id()?;
    let tasks = state.maintenance.list(&owner).await?;
    Ok(respond(tasks, state.today()))
}

/// Tasks whose due date is before today.
#[utoipa::path(
    get,
    path = "/api/v1/maintenance-tasks/overdue",
    responses((status = 200, description = "Overdue tasks", body = [TaskResponse])),
    tags = ["maintenance"],
    operation_id = "overdueMaintenanceTasks"
)]
#[get("/maintenance-tasks/overdue")]
pub async fn overdue_tasks(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<TaskResponse>>> {
    let owner = session.require_user_id()?;
    let today = state.today();
    let tasks = state.maintenance.list_overdue(&owner, today).await?;
    Ok(respond(tasks, today))
}

#[utoipa::path(
    get,
    path = "/api/v1/maintenance-tasks/{id}",
    params(("id" = Uuid, Path, description = "Task id")),
    responses(
        (status = 200, description = "Task", body = TaskResponse),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["maintenance"],
    operation_id = "getMaintenanceTask"
)]
#[get("/maintenance-tasks/{id}")]
pub async fn get_task(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<TaskResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    let task = state.maintenance.find(&owner, id).await?;
    Ok(web::Json(TaskResponse::new(task, state.today())))
}

#[utoipa::path(
    put,
    path = "/api/v1/maintenance-tasks/{id}",
    params(("id" = Uuid, Path, description = "Task id")),
    request_body = TaskRequest,
    responses(
        (status = 200, description = "Task updated", body = TaskResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["maintenance"],
    operation_id = "updateMaintenanceTask"
)]
#[put("/maintenance-tasks/{id}")]
pub async fn update_task(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<TaskRequest>,
) -> ApiResult<web::Json<TaskResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    let draft = payload.into_inner().into_draft()?;
    let task = state.maintenance.update(&owner, id, &draft).await?;
    Ok(web::Json(TaskResponse::new(task, state.today())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/maintenance-tasks/{id}",
    params(("id" = Uuid, Path, description = "Task id")),
    responses(
        (status = 204, description = "Task deleted"),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["maintenance"],
    operation_id = "deleteMaintenanceTask"
)]
#[delete("/maintenance-tasks/{id}")]
pub async fn delete_task(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    state.maintenance.delete(&owner, id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    post,
    path = "/api/v1/maintenance-tasks/{id}/complete",
    params(("id" = Uuid, Path, description = "Task id")),
    request_body = CompletionBody,
    responses(
        (status = 201, description = "Completion logged and task rescheduled", body = CompletionResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["maintenance"],
    operation_id = "completeMaintenanceTask"
)]
#[post("/maintenance-tasks/{id}/complete")]
pub async fn complete_task(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: Option<web::Json<CompletionBody>>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    let body = payload.map(web::Json::into_inner).unwrap_or_default();
    let request = CompletionRequest {
        completed_on: body.completed_on,
        cost_cents: body.cost_cents,
        notes: body.notes,
    };
    let MaintenanceCompletion { log, task } = state
        .schedule
        .complete_maintenance_task(&owner, id, request)
        .await?;
    Ok(HttpResponse::Created().json(CompletionResponse {
        log: log.into(),
        task: TaskResponse::new(task, state.today()),
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/maintenance-tasks/{id}/logs",
    params(("id" = Uuid, Path, description = "Task id")),
    responses(
        (status = 200, description = "Completion logs, newest first", body = [LogResponse]),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["maintenance"],
    operation_id = "listMaintenanceLogs"
)]
#[get("/maintenance-tasks/{id}/logs")]
pub async fn list_logs(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<LogResponse>>> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    let logs = state.maintenance.list_logs(&owner, id).await?;
    Ok(web::Json(logs.into_iter().map(Into::into).collect()))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_task)
        .service(list_tasks)
        .service(overdue_tasks)
        .service(get_task)
        .service(update_task)
        .service(delete_task)
        .service(complete_task)
        .service(list_logs);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{MockPorts, login_cookie, test_app, today};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use serde_json::{Value, json};

    fn task(next_due_date: NaiveDate) -> MaintenanceTask {
        MaintenanceTask {
            id: Uuid::new_v4(),
            household_id: None,
            name: "Clean gutters".into(),
            category: Some("exterior".into()),
            frequency: Frequency::Quarterly,
            last_completed_on: None,
            next_due_date,
            notes: None,
            created_at: Utc::now(),
        }
    }

    #[actix_web::test]
    async fn overdue_is_not_shadowed_by_the_id_route() {
        let mut ports = MockPorts::default();
        ports
            .maintenance
            .expect_list_overdue()
            .withf(|_, day| *day == today())
            .times(1)
            .returning(|_, _| Ok(vec![task(today() - chrono::Duration::days(3))]));
        let app = actix_test::init_service(test_app(ports, configure)).await;
        let cookie = login_cookie(&app).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/maintenance-tasks/overdue")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body[0]["isOverdue"], true);
        assert_eq!(body[0]["daysUntilDue"], -3);
    }

    #[actix_web::test]
    async fn completion_passes_the_request_to_the_schedule_service() {
        let completed_on = NaiveDate::from_ymd_opt(2026, 3, 10).expect("valid date");
        let mut ports = MockPorts::default();
        ports
            .schedule
            .expect_complete_maintenance_task()
            .withf(move |_, _, request| {
                request.completed_on == Some(completed_on) && request.cost_cents == Some(1_500)
            })
            .times(1)
            .returning(move |_, id, request| {
                let mut rescheduled = task(NaiveDate::from_ymd_opt(2026, 6, 10).expect("date"));
                rescheduled.id = id;
                rescheduled.last_completed_on = request.completed_on;
                Ok(MaintenanceCompletion {
                    log: MaintenanceLog {
                        id: Uuid::new_v4(),
                        task_id: id,
                        completed_on,
                        cost_cents: request.cost_cents,
                        notes: None,
                        created_at: Utc::now(),
                    },
                    task: rescheduled,
                })
            });
        let app = actix_test::init_service(test_app(ports, configure)).await;
        let cookie = login_cookie(&app).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/maintenance-tasks/{}/complete", Uuid::new_v4()))
                .cookie(cookie)
                .set_json(json!({"completedOn": "2026-03-10", "costCents": 1500}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["task"]["nextDueDate"], "2026-06-10");
        assert_eq!(body["task"]["lastCompletedOn"], "2026-03-10");
        assert_eq!(body["log"]["costCents"], 1500);
    }
}
