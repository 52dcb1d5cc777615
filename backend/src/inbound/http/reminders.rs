//! Reminder handlers.
//!
//! Snoozing and completing go through the schedule service, which owns the
//! date arithmetic; the rest is plain CRUD.

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::{ApiResult, Reminder, ReminderDraft, SNOOZE_DAYS};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, ID_FIELD, ensure_range, parse_optional_label, parse_uuid,
};

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReminderRequest {
    #[schema(example = "Renew passport")]
    pub title: String,
    pub description: Option<String>,
    pub due_date: NaiveDate,
    /// Absent for one-off reminders.
    #[schema(example = "annually")]
    pub frequency: Option<String>,
}

impl ReminderRequest {
    fn into_draft(self) -> ApiResult<ReminderDraft> {
        let draft = ReminderDraft {
            frequency: parse_optional_label(
                self.frequency.as_deref(),
                FieldName::new("frequency"),
            )?,
            title: self.title,
            description: self.description,
            due_date: self.due_date,
        };
        Ok(draft.validated()?)
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReminderResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub due_date: NaiveDate,
    pub frequency: Option<String>,
    pub snoozed_until: Option<NaiveDate>,
    pub completed_at: Option<DateTime<Utc>>,
    #[schema(example = "overdue")]
    pub due_state: String,
    pub days_overdue: i64,
    pub created_at: DateTime<Utc>,
}

impl ReminderResponse {
    fn new(reminder: Reminder, today: NaiveDate) -> Self {
        Self {
            due_state: reminder.due_state(today).as_str().to_owned(),
            days_overdue: reminder.days_overdue(today),
            id: reminder.id,
            title: reminder.title,
            description: reminder.description,
            due_date: reminder.due_date,
            frequency: reminder.frequency.map(|f| f.as_str().to_owned()),
            snoozed_until: reminder.snoozed_until,
            completed_at: reminder.completed_at,
            created_at: reminder.created_at,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct ReminderListQuery {
    #[serde(default)]
    pub include_completed: bool,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SnoozeRequest {
    #[schema(example = 7, minimum = 1, maximum = 365)]
    pub days: i64,
}

#[utoipa::path(
    post,
    path = "/api/v1/reminders",
    request_body = ReminderRequest,
    responses(
        (status = 201, description = "Reminder created", body = ReminderResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["reminders"],
    operation_id = "createReminder"
)]
#[post("/reminders")]
pub async fn create_reminder(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ReminderRequest>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let draft = payload.into_inner().into_draft()?;
    let reminder = state.reminders.create(&owner, &draft).await?;
    Ok(HttpResponse::Created().json(ReminderResponse::new(reminder, state.today())))
}

#[utoipa::path(
    get,
    path = "/api/v1/reminders",
    params(ReminderListQuery),
    responses((status = 200, description = "Reminders by due date", body = [ReminderResponse])),
    tags = ["reminders"],
    operation_id = "listReminders"
)]
#[get("/reminders")]
pub async fn list_reminders(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<ReminderListQuery>,
) -> ApiResult<web::Json<Vec<ReminderResponse>>> {
    let owner = session.require_user_id()?;
    let today = state.today();
    let reminders = state.reminders.list(&owner, query.include_completed).await?;
    Ok(web::Json(
        reminders
            .into_iter()
            .map(|reminder| ReminderResponse::new(reminder, today))
            .collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/reminders/{id}",
    params(("id" = Uuid, Path, description = "Reminder id")),
    responses(
        (status = 200, description = "Reminder", body = ReminderResponse),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["reminders"],
    operation_id = "getReminder"
)]
#[get("/reminders/{id}")]
pub async fn get_reminder(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ReminderResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    let reminder = state.reminders.find(&owner, id).await?;
    Ok(web::Json(ReminderResponse::new(reminder, state.today())))
}

#[utoipa::path(
    put,
    path = "/api/v1/reminders/{id}",
    params(("id" = Uuid, Path, description = "Reminder id")),
    request_body = ReminderRequest,
    responses(
        (status = 200, description = "Reminder updated", body = ReminderResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["reminders"],
    operation_id = "updateReminder"
)]
#[put("/reminders/{id}")]
pub async fn update_reminder(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<ReminderRequest>,
) -> ApiResult<web::Json<ReminderResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    let draft = payload.into_inner().into_draft()?;
    let reminder = state.reminders.update(&owner, id, &draft).await?;
    Ok(web::Json(ReminderResponse::new(reminder, state.today())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/reminders/{id}",
    params(("id" = Uuid, Path, description = "Reminder id")),
    responses(
        (status = 204, description = "Reminder deleted"),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["reminders"],
    operation_id = "deleteReminder"
)]
#[delete("/reminders/{id}")]
pub async fn delete_reminder(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    state.reminders.delete(&owner, id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    post,
    path = "/api/v1/reminders/{id}/snooze",
    params(("id" = Uuid, Path, description = "Reminder id")),
    request_body = SnoozeRequest,
    responses(
        (status = 200, description = "Reminder snoozed", body = ReminderResponse),
        (status = 400, description = "Days out of range", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["reminders"],
    operation_id = "snoozeReminder"
)]
#[post("/reminders/{id}/snooze")]
pub async fn snooze_reminder(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<SnoozeRequest>,
) -> ApiResult<web::Json<ReminderResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    let days = ensure_range(
        payload.days,
        *SNOOZE_DAYS.start(),
        *SNOOZE_DAYS.end(),
        FieldName::new("days"),
    )?;
    let reminder = state.schedule.snooze_reminder(&owner, id, days).await?;
    Ok(web::Json(ReminderResponse::new(reminder, state.today())))
}

/// Complete a reminder; recurring ones move to their next due date.
#[utoipa::path(
    post,
    path = "/api/v1/reminders/{id}/complete",
    params(("id" = Uuid, Path, description = "Reminder id")),
    responses(
        (status = 200, description = "Reminder completed or advanced", body = ReminderResponse),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Already completed", body = ErrorSchema)
    ),
    tags = ["reminders"],
    operation_id = "completeReminder"
)]
#[post("/reminders/{id}/complete")]
pub async fn complete_reminder(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ReminderResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    let reminder = state.schedule.complete_reminder(&owner, id).await?;
    Ok(web::Json(ReminderResponse::new(reminder, state.today())))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_reminder)
        .service(list_reminders)
        .service(get_reminder)
        .service(update_reminder)
        .service(delete_reminder)
        .service(snooze_reminder)
        .service(complete_reminder);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Error, Frequency};
    use crate::inbound::http::test_utils::{MockPorts, login_cookie, test_app, today};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    fn reminder(due_date: NaiveDate) -> Reminder {
        Reminder {
            id: Uuid::new_v4(),
            title: "Boiler service".into(),
            description: None,
            due_date,
            frequency: Some(Frequency::Annually),
            snoozed_until: None,
            completed_at: None,
            created_at: Utc::now(),
        }
    }

    #[actix_web::test]
    async fn overdue_reminders_report_days() {
        let mut ports = MockPorts::default();
        ports
            .reminders
            .expect_list()
            .withf(|_, include_completed| !*include_completed)
            .returning(|_, _| Ok(vec![reminder(today() - chrono::Duration::days(4))]));
        let app = actix_test::init_service(test_app(ports, configure)).await;
        let cookie = login_cookie(&app).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/reminders")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body[0]["dueState"], "overdue");
        assert_eq!(body[0]["daysOverdue"], 4);
        assert_eq!(body[0]["frequency"], "annually");
    }

    #[rstest]
    #[case(0)]
    #[case(366)]
    #[actix_web::test]
    async fn snooze_days_are_bounded(#[case] days: i64) {
        let app = actix_test::init_service(test_app(MockPorts::default(), configure)).await;
        let cookie = login_cookie(&app).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/reminders/{}/snooze", Uuid::new_v4()))
                .cookie(cookie)
                .set_json(json!({"days": days}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], "days");
    }

    #[actix_web::test]
    async fn snoozed_reminders_are_reported_as_snoozed() {
        let mut ports = MockPorts::default();
        ports
            .schedule
            .expect_snooze_reminder()
            .withf(|_, _, days| *days == 3)
            .times(1)
            .returning(|_, _, days| {
                let mut snoozed = reminder(today() - chrono::Duration::days(1));
                snoozed.snoozed_until = Some(today() + chrono::Duration::days(days));
                Ok(snoozed)
            });
        let app = actix_test::init_service(test_app(ports, configure)).await;
        let cookie = login_cookie(&app).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/reminders/{}/snooze", Uuid::new_v4()))
                .cookie(cookie)
                .set_json(json!({"days": 3}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["dueState"], "snoozed");
        assert_eq!(body["snoozedUntil"], "2026-03-18");
    }

    #[actix_web::test]
    async fn completing_twice_conflicts() {
        let mut ports = MockPorts::default();
        ports
            .schedule
            .expect_complete_reminder()
            .returning(|_, _| Err(Error::conflict("reminder is already completed")));
        let app = actix_test::init_service(test_app(ports, configure)).await;
        let cookie = login_cookie(&app).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/reminders/{}/complete", Uuid::new_v4()))
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }
}
