//! Bill, payment and subscription handlers.
//!
//! ```text
//! GET /api/v1/bills/upcoming?days=14
//! POST /api/v1/bills/{id}/payments {"amountCents":4500,"paidOn":"2026-03-01"}
//! GET /api/v1/subscriptions/summary
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::ports::PaymentRequest;
use crate::domain::{
    ApiResult, Bill, BillDraft, BillFilter, BillPayment, BillPaymentOutcome, Frequency,
    Subscription, SubscriptionDraft, SubscriptionSummary,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, ID_FIELD, ensure_range, parse_label, parse_uuid};

const UPCOMING_DEFAULT_DAYS: i64 = 30;
pub(crate) const WINDOW_MAX_DAYS: i64 = 3_650;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BillRequest {
    pub household_id: Option<Uuid>,
    #[schema(example = "Council tax")]
    pub name: String,
    pub payee: Option<String>,
    pub amount_cents: i64,
    #[schema(example = "monthly")]
    pub frequency: String,
    pub next_due_date: NaiveDate,
    #[serde(default)]
    pub auto_pay: bool,
    pub notes: Option<String>,
}

impl BillRequest {
    fn into_draft(self) -> ApiResult<BillDraft> {
        let frequency: Frequency = parse_label(&self.frequency, FieldName::new("frequency"))?;
        let draft = BillDraft {
            household_id: self.household_id,
            name: self.name,
            payee: self.payee,
            amount_cents: self.amount_cents,
            frequency,
            next_due_date: self.next_due_date,
            auto_pay: self.auto_pay,
            notes: self.notes,
        };
        Ok(draft.validated()?)
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BillResponse {
    pub id: Uuid,
    pub household_id: Option<Uuid>,
    pub name: String,
    pub payee: Option<String>,
    pub amount_cents: i64,
    pub frequency: String,
    pub next_due_date: NaiveDate,
    /// Negative once the due date has passed.
    pub days_until_due: i64,
    pub auto_pay: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl BillResponse {
    fn new(bill: Bill, today: NaiveDate) -> Self {
        Self {
            days_until_due: bill.days_until_due(today),
            id: bill.id,
            household_id: bill.household_id,
            name: bill.name,
            payee: bill.payee,
            amount_cents: bill.amount_cents,
            frequency: bill.frequency.as_str().to_owned(),
            next_due_date: bill.next_due_date,
            auto_pay: bill.auto_pay,
            notes: bill.notes,
            created_at: bill.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BillPaymentResponse {
    pub id: Uuid,
    pub bill_id: Uuid,
    pub amount_cents: i64,
    pub paid_on: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<BillPayment> for BillPaymentResponse {
    fn from(value: BillPayment) -> Self {
        Self {
            id: value.id,
            bill_id: value.bill_id,
            amount_cents: value.amount_cents,
            paid_on: value.paid_on,
            notes: value.notes,
            created_at: value.created_at,
        }
    }
}

/// Payment body; the amount defaults to the bill amount and the date to today.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentBody {
    pub amount_cents: Option<i64>,
    pub paid_on: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOutcomeResponse {
    pub payment: BillPaymentResponse,
    /// The bill with its advanced due date.
    pub bill: BillResponse,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct BillListQuery {
    /// Only bills of this household.
    pub household_id: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WindowQuery {
    /// Look-ahead window in days.
    pub days: Option<i64>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRequest {
    #[schema(example = "Streaming")]
    pub name: String,
    pub provider: Option<String>,
    pub amount_cents: i64,
    #[schema(example = "monthly")]
    pub frequency: String,
    pub next_renewal_date: NaiveDate,
    pub category: Option<String>,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

fn active_by_default() -> bool {
    true
}

impl SubscriptionRequest {
    fn into_draft(self) -> ApiResult<SubscriptionDraft> {
        let frequency: Frequency = parse_label(&self.frequency, FieldName::new("frequency"))?;
        let draft = SubscriptionDraft {
            name: self.name,
            provider: self.provider,
            amount_cents: self.amount_cents,
            frequency,
            next_renewal_date: self.next_renewal_date,
            category: self.category,
            is_active: self.is_active,
        };
        Ok(draft.validated()?)
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionResponse {
    pub id: Uuid,
    pub name: String,
    pub provider: Option<String>,
    pub amount_cents: i64,
    pub frequency: String,
    pub next_renewal_date: NaiveDate,
    pub days_until_renewal: i64,
    pub monthly_cost_cents: i64,
    pub annual_cost_cents: i64,
    pub category: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl SubscriptionResponse {
    fn new(subscription: Subscription, today: NaiveDate) -> Self {
        Self {
            days_until_renewal: subscription.days_until_renewal(today),
            monthly_cost_cents: subscription.monthly_cost_cents(),
            annual_cost_cents: subscription.annual_cost_cents(),
            id: subscription.id,
            name: subscription.name,
            provider: subscription.provider,
            amount_cents: subscription.amount_cents,
            frequency: subscription.frequency.as_str().to_owned(),
            next_renewal_date: subscription.next_renewal_date,
            category: subscription.category,
            is_active: subscription.is_active,
            created_at: subscription.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionSummaryResponse {
    pub active_count: usize,
    pub monthly_total_cents: i64,
    pub annual_total_cents: i64,
}

impl From<SubscriptionSummary> for SubscriptionSummaryResponse {
    fn from(value: SubscriptionSummary) -> Self {
        Self {
            active_count: value.active_count,
            monthly_total_cents: value.monthly_total_cents,
            annual_total_cents: value.annual_total_cents,
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/bills",
    request_body = BillRequest,
    responses(
        (status = 201, description = "Bill created", body = BillResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Household not found", body = ErrorSchema)
    ),
    tags = ["bills"],
    operation_id = "createBill"
)]
#[post("/bills")]
pub async fn create_bill(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<BillRequest>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let draft = payload.into_inner().into_draft()?;
    let bill = state.bills.create(&owner, &draft).await?;
    Ok(HttpResponse::Created().json(BillResponse::new(bill, state.today())))
}

#[utoipa::path(
    get,
    path = "/api/v1/bills",
    params(BillListQuery),
    responses(
        (status = 200, description = "Bills by due date", body = [BillResponse]),
        (status = 400, description = "Invalid household id", body = ErrorSchema)
    ),
    tags = ["bills"],
    operation_id = "listBills"
)]
#[get("/bills")]
pub async fn list_bills(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<BillListQuery>,
) -> ApiResult<web::Json<Vec<BillResponse>>> {
    let owner = session.require_user_id()?;
    let household_id = query
        .household_id
        .as_deref()
        .map(|raw| parse_uuid(raw, FieldName::new("householdId")))
        .transpose()?;
    let today = state.today();
    let bills = state.bills.list(&owner, BillFilter { household_id }).await?;
    Ok(web::Json(
        bills
            .into_iter()
            .map(|bill| BillResponse::new(bill, today))
            .collect(),
    ))
}

/// Bills due on or before today plus `days`, overdue ones included.
#[utoipa::path(
    get,
    path = "/api/v1/bills/upcoming",
    params(WindowQuery),
    responses(
        (status = 200, description = "Bills due within the window", body = [BillResponse]),
        (status = 400, description = "Window out of range", body = ErrorSchema)
    ),
    tags = ["bills"],
    operation_id = "upcomingBills"
)]
#[get("/bills/upcoming")]
pub async fn upcoming_bills(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<WindowQuery>,
) -> ApiResult<web::Json<Vec<BillResponse>>> {
    let owner = session.require_user_id()?;
    let days = ensure_range(
        query.days.unwrap_or(UPCOMING_DEFAULT_DAYS),
        0,
        WINDOW_MAX_DAYS,
        FieldName::new("days"),
    )?;
    let today = state.today();
    let bills = state
        .bills
        .list_due_by(&owner, today + chrono::Duration::days(days))
        .await?;
    Ok(web::Json(
        bills
            .into_iter()
            .map(|bill| BillResponse::new(bill, today))
            .collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/bills/{id}",
    params(("id" = Uuid, Path, description = "Bill id")),
    responses(
        (status = 200, description = "Bill", body = BillResponse),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["bills"],
    operation_id = "getBill"
)]
#[get("/bills/{id}")]
pub async fn get_bill(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<BillResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    let bill = state.bills.find(&owner, id).await?;
    Ok(web::Json(BillResponse::new(bill, state.today())))
}

#[utoipa::path(
    put,
    path = "/api/v1/bills/{id}",
    params(("id" = Uuid, Path, description = "Bill id")),
    request_body = BillRequest,
    responses(
        (status = 200, description = "Bill updated", body = BillResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["bills"],
    operation_id = "updateBill"
)]
#[put("/bills/{id}")]
pub async fn update_bill(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<BillRequest>,
) -> ApiResult<web::Json<BillResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    let draft = payload.into_inner().into_draft()?;
    let bill = state.bills.update(&owner, id, &draft).await?;
    Ok(web::Json(BillResponse::new(bill, state.today())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/bills/{id}",
    params(("id" = Uuid, Path, description = "Bill id")),
    responses(
        (status = 204, description = "Bill deleted"),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["bills"],
    operation_id = "deleteBill"
)]
#[delete("/bills/{id}")]
pub async fn delete_bill(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    state.bills.delete(&owner, id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Record a payment and move the bill to its next due date.
#[utoipa::path(
    post,
    path = "/api/v1/bills/{id}/payments",
    params(("id" = Uuid, Path, description = "Bill id")),
    request_body = PaymentBody,
    responses(
        (status = 201, description = "Payment recorded", body = PaymentOutcomeResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Bill not found", body = ErrorSchema)
    ),
    tags = ["bills"],
    operation_id = "recordBillPayment"
)]
#[post("/bills/{id}/payments")]
pub async fn record_payment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: Option<web::Json<PaymentBody>>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    let body = payload.map(web::Json::into_inner).unwrap_or_default();
    let request = PaymentRequest {
        amount_cents: body.amount_cents,
        paid_on: body.paid_on,
        notes: body.notes,
    };
    let BillPaymentOutcome { payment, bill } =
        state.schedule.record_bill_payment(&owner, id, request).await?;
    Ok(HttpResponse::Created().json(PaymentOutcomeResponse {
        payment: payment.into(),
        bill: BillResponse::new(bill, state.today()),
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/bills/{id}/payments",
    params(("id" = Uuid, Path, description = "Bill id")),
    responses(
        (status = 200, description = "Payments, newest first", body = [BillPaymentResponse]),
        (status = 404, description = "Bill not found", body = ErrorSchema)
    ),
    tags = ["bills"],
    operation_id = "listBillPayments"
)]
#[get("/bills/{id}/payments")]
pub async fn list_payments(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<BillPaymentResponse>>> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    let payments = state.bills.list_payments(&owner, id).await?;
    Ok(web::Json(payments.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/api/v1/subscriptions",
    request_body = SubscriptionRequest,
    responses(
        (status = 201, description = "Subscription created", body = SubscriptionResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["bills"],
    operation_id = "createSubscription"
)]
#[post("/subscriptions")]
pub async fn create_subscription(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SubscriptionRequest>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let draft = payload.into_inner().into_draft()?;
    let subscription = state.subscriptions.create(&owner, &draft).await?;
    Ok(HttpResponse::Created().json(SubscriptionResponse::new(subscription, state.today())))
}

#[utoipa::path(
    get,
    path = "/api/v1/subscriptions",
    responses((status = 200, description = "Subscriptions by renewal date", body = [SubscriptionResponse])),
    tags = ["bills"],
    operation_id = "listSubscriptions"
)]
#[get("/subscriptions")]
pub async fn list_subscriptions(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<SubscriptionResponse>>> {
    let owner = session.require_user_id()?;
    let today = state.today();
    let subscriptions = state.subscriptions.list(&owner).await?;
    Ok(web::Json(
        subscriptions
            .into_iter()
            .map(|subscription| SubscriptionResponse::new(subscription, today))
            .collect(),
    ))
}

/// Monthly and annual totals across active subscriptions.
#[utoipa::path(
    get,
    path = "/api/v1/subscriptions/summary",
    responses((status = 200, description = "Subscription totals", body = SubscriptionSummaryResponse)),
    tags = ["bills"],
    operation_id = "subscriptionSummary"
)]
#[get("/subscriptions/summary")]
pub async fn subscription_summary(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<SubscriptionSummaryResponse>> {
    let owner = session.require_user_id()?;
    let subscriptions = state.subscriptions.list(&owner).await?;
    Ok(web::Json(
        SubscriptionSummary::from_subscriptions(&subscriptions).into(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/subscriptions/{id}",
    params(("id" = Uuid, Path, description = "Subscription id")),
    responses(
        (status = 200, description = "Subscription", body = SubscriptionResponse),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["bills"],
    operation_id = "getSubscription"
)]
#[get("/subscriptions/{id}")]
pub async fn get_subscription(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<SubscriptionResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    let subscription = state.subscriptions.find(&owner, id).await?;
    Ok(web::Json(SubscriptionResponse::new(subscription, state.today())))
}

#[utoipa::path(
    put,
    path = "/api/v1/subscriptions/{id}",
    params(("id" = Uuid, Path, description = "Subscription id")),
    request_body = SubscriptionRequest,
    responses(
        (status = 200, description = "Subscription updated", body = SubscriptionResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["bills"],
    operation_id = "updateSubscription"
)]
#[put("/subscriptions/{id}")]
pub async fn update_subscription(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<SubscriptionRequest>,
) -> ApiResult<web::Json<SubscriptionResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    let draft = payload.into_inner().into_draft()?;
    let subscription = state.subscriptions.update(&owner, id, &draft).await?;
    Ok(web::Json(SubscriptionResponse::new(subscription, state.today())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/subscriptions/{id}",
    params(("id" = Uuid, Path, description = "Subscription id")),
    responses(
        (status = 204, description = "Subscription deleted"),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["bills"],
    operation_id = "deleteSubscription"
)]
#[delete("/subscriptions/{id}")]
pub async fn delete_subscription(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    state.subscriptions.delete(&owner, id).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_bill)
        .service(list_bills)
        .service(upcoming_bills)
        .service(get_bill)
        .service(update_bill)
        .service(delete_bill)
        .service(record_payment)
        .service(list_payments)
        .service(create_subscription)
        .service(list_subscriptions)
        .service(subscription_summary)
        .service(get_subscription)
        .service(update_subscription)
        .service(delete_subscription);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Error;
    use crate::inbound::http::test_utils::{MockPorts, login_cookie, test_app, today};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    fn bill(next_due_date: NaiveDate) -> Bill {
        Bill {
            id: Uuid::new_v4(),
            household_id: None,
            name: "Council tax".into(),
            payee: None,
            amount_cents: 15_000,
            frequency: Frequency::Monthly,
            next_due_date,
            auto_pay: false,
            notes: None,
            created_at: Utc::now(),
        }
    }

    fn subscription(amount_cents: i64, frequency: Frequency, is_active: bool) -> Subscription {
        Subscription {
            id: Uuid::new_v4(),
            name: "Streaming".into(),
            provider: None,
            amount_cents,
            frequency,
            next_renewal_date: today(),
            category: None,
            is_active,
            created_at: Utc::now(),
        }
    }

    #[actix_web::test]
    async fn upcoming_uses_the_window_and_reports_days_until_due() {
        let mut ports = MockPorts::default();
        ports
            .bills
            .expect_list_due_by()
            .withf(|_, until| *until == today() + chrono::Duration::days(14))
            .times(1)
            .returning(|_, _| Ok(vec![bill(today() - chrono::Duration::days(2))]));
        let app = actix_test::init_service(test_app(ports, configure)).await;
        let cookie = login_cookie(&app).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/bills/upcoming?days=14")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body[0]["daysUntilDue"], -2);
        assert_eq!(body[0]["frequency"], "monthly");
    }

    #[actix_web::test]
    async fn upcoming_defaults_to_thirty_days() {
        let mut ports = MockPorts::default();
        ports
            .bills
            .expect_list_due_by()
            .withf(|_, until| *until == today() + chrono::Duration::days(UPCOMING_DEFAULT_DAYS))
            .returning(|_, _| Ok(Vec::new()));
        let app = actix_test::init_service(test_app(ports, configure)).await;
        let cookie = login_cookie(&app).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/bills/upcoming")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[rstest]
    #[case("/bills/upcoming?days=-1")]
    #[case("/bills/upcoming?days=soon")]
    #[case("/bills?householdId=nope")]
    #[actix_web::test]
    async fn malformed_queries_are_rejected(#[case] uri: &str) {
        let app = actix_test::init_service(test_app(MockPorts::default(), configure)).await;
        let cookie = login_cookie(&app).await;
        let req = actix_test::TestRequest::get()
            .uri(uri)
            .cookie(cookie)
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn household_filter_is_passed_through() {
        let household = Uuid::new_v4();
        let mut ports = MockPorts::default();
        ports
            .bills
            .expect_list()
            .withf(move |_, filter| filter.household_id == Some(household))
            .returning(|_, _| Ok(Vec::new()));
        let app = actix_test::init_service(test_app(ports, configure)).await;
        let cookie = login_cookie(&app).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/bills?householdId={household}"))
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[rstest]
    #[case(json!({"name": "Water", "amountCents": -5, "frequency": "monthly", "nextDueDate": "2026-04-01"}), "amountCents")]
    #[case(json!({"name": "Water", "amountCents": 500, "frequency": "daily", "nextDueDate": "2026-04-01"}), "frequency")]
    #[case(json!({"name": " ", "amountCents": 500, "frequency": "monthly", "nextDueDate": "2026-04-01"}), "name")]
    #[actix_web::test]
    async fn invalid_bills_are_rejected(#[case] payload: Value, #[case] field: &str) {
        let app = actix_test::init_service(test_app(MockPorts::default(), configure)).await;
        let cookie = login_cookie(&app).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/bills")
                .cookie(cookie)
                .set_json(payload)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], field);
    }

    #[actix_web::test]
    async fn payments_go_through_the_schedule_service() {
        let bill_id = Uuid::new_v4();
        let mut ports = MockPorts::default();
        ports
            .schedule
            .expect_record_bill_payment()
            .withf(move |_, id, request| {
                *id == bill_id && request.amount_cents.is_none() && request.paid_on.is_none()
            })
            .times(1)
            .returning(move |_, id, _| {
                let mut advanced = bill(today() + chrono::Duration::days(31));
                advanced.id = id;
                Ok(BillPaymentOutcome {
                    payment: BillPayment {
                        id: Uuid::new_v4(),
                        bill_id: id,
                        amount_cents: advanced.amount_cents,
                        paid_on: today(),
                        notes: None,
                        created_at: Utc::now(),
                    },
                    bill: advanced,
                })
            });
        let app = actix_test::init_service(test_app(ports, configure)).await;
        let cookie = login_cookie(&app).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/bills/{bill_id}/payments"))
                .cookie(cookie)
                .set_json(json!({}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["payment"]["amountCents"], 15_000);
        assert_eq!(body["bill"]["daysUntilDue"], 31);
    }

    #[actix_web::test]
    async fn payment_on_missing_bill_is_not_found() {
        let mut ports = MockPorts::default();
        ports
            .schedule
            .expect_record_bill_payment()
            .returning(|_, _, _| Err(Error::not_found("bill not found")));
        let app = actix_test::init_service(test_app(ports, configure)).await;
        let cookie = login_cookie(&app).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/bills/{}/payments", Uuid::new_v4()))
                .cookie(cookie)
                .set_json(json!({"amountCents": 100}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn summary_totals_active_subscriptions() {
        let mut ports = MockPorts::default();
        ports.subscriptions.expect_list().returning(|_| {
            Ok(vec![
                subscription(999, Frequency::Monthly, true),
                subscription(12_000, Frequency::Annually, true),
                subscription(5_000, Frequency::Monthly, false),
            ])
        });
        let app = actix_test::init_service(test_app(ports, configure)).await;
        let cookie = login_cookie(&app).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/subscriptions/summary")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["activeCount"], 2);
        assert_eq!(body["annualTotalCents"], 999 * 12 + 12_000);
        assert_eq!(body["monthlyTotalCents"], 1_999);
    }
}
