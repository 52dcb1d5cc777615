//! Insurance policy handlers.

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{ApiResult, Frequency, InsurancePolicy, InsurancePolicyDraft, PolicyType};
use crate::inbound::http::bills::{WINDOW_MAX_DAYS, WindowQuery};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, ID_FIELD, ensure_range, parse_label, parse_uuid};

const RENEWALS_DEFAULT_DAYS: i64 = 60;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PolicyRequest {
    pub household_id: Option<Uuid>,
    #[schema(example = "Acme Mutual")]
    pub provider: String,
    pub policy_number: Option<String>,
    #[schema(example = "home")]
    pub policy_type: String,
    pub premium_cents: i64,
    #[schema(example = "annually")]
    pub premium_frequency: String,
    pub start_date: Option<NaiveDate>,
    pub renewal_date: NaiveDate,
    pub notes: Option<String>,
}

impl PolicyRequest {
    fn into_draft(self) -> ApiResult<InsurancePolicyDraft> {
        let policy_type: PolicyType = parse_label(&self.policy_type, FieldName::new("policyType"))?;
        let premium_frequency: Frequency =
            parse_label(&self.premium_frequency, FieldName::new("premiumFrequency"))?;
        let draft = InsurancePolicyDraft {
            household_id: self.household_id,
            provider: self.provider,
            policy_number: self.policy_number,
            policy_type,
            premium_cents: self.premium_cents,
            premium_frequency,
            start_date: self.start_date,
            renewal_date: self.renewal_date,
            notes: self.notes,
        };
        Ok(draft.validated()?)
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PolicyResponse {
    pub id: Uuid,
    pub household_id: Option<Uuid>,
    pub provider: String,
    pub policy_number: Option<String>,
    pub policy_type: String,
    pub premium_cents: i64,
    pub premium_frequency: String,
    pub annual_premium_cents: i64,
    pub start_date: Option<NaiveDate>,
    pub renewal_date: NaiveDate,
    pub days_until_renewal: i64,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl PolicyResponse {
    fn new(policy: InsurancePolicy, today: NaiveDate) -> Self {
        Self {
            annual_premium_cents: policy.annual_premium_cents(),
            days_until_renewal: policy.days_until_renewal(today),
            id: policy.id,
            household_id: policy.household_id,
            provider: policy.provider,
            policy_number: policy.policy_number,
            policy_type: policy.policy_type.as_str().to_owned(),
            premium_cents: policy.premium_cents,
            premium_frequency: policy.premium_frequency.as_str().to_owned(),
            start_date: policy.start_date,
            renewal_date: policy.renewal_date,
            notes: policy.notes,
            created_at: policy.created_at,
        }
    }
}

fn respond(policies: Vec<InsurancePolicy>, today: NaiveDate) -> web::Json<Vec<PolicyResponse>> {
    web::Json(
        policies
            .into_iter()
            .map(|policy| PolicyResponse::new(policy, today))
            .collect(),
    )
}

#[utoipa::path(
    post,
    path = "/api/v1/insurance-policies",
    request_body = PolicyRequest,
    responses(
        (status = 201, description = "Policy created", body = PolicyResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["insurance"],
    operation_id = "createInsurancePolicy"
)]
#[post("/insurance-policies")]
pub async fn create_policy(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<PolicyRequest>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let draft = payload.into_inner().into_draft()?;
    let policy = state.insurance.create(&owner, &draft).await?;
    Ok(HttpResponse::Created().json(PolicyResponse::new(policy, state.today())))
}

#[utoipa::path(
    get,
    path = "/api/v1/insurance-policies",
    responses((status = 200, description = "Policies by renewal date", body = [PolicyResponse])),
    tags = ["insurance"],
    operation_id = "listInsurancePolicies"
)]
#[get("/insurance-policies")]
pub async fn list_policies(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<PolicyResponse>>> {
    let owner = session.require_user_id()?;
    let policies = state.insurance.list(&owner).await?;
    Ok(respond(policies, state.today()))
}

/// Policies renewing within `days` (default 60), lapsed ones included.
#[utoipa::path(
    get,
    path = "/api/v1/insurance-policies/renewals",
    params(WindowQuery),
    responses(
        (status = 200, description = "Policies renewing within the window", body = [PolicyResponse]),
        (status = 400, description = "Window out of range", body = ErrorSchema)
    ),
    tags = ["insurance"],
    operation_id = "insuranceRenewals"
)]
#[get("/insurance-policies/renewals")]
pub async fn renewals(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<WindowQuery>,
) -> ApiResult<web::Json<Vec<PolicyResponse>>> {
    let owner = session.require_user_id()?;
    let days = ensure_range(
        query.days.unwrap_or(RENEWALS_DEFAULT_DAYS),
        0,
        WINDOW_MAX_DAYS,
        FieldName::new("days"),
    )?;
    let today = state.today();
    let policies = state
        .insurance
        .list_renewing_by(&owner, today + chrono::Duration::days(days))
        .await?;
    Ok(respond(policies, today))
}

#[utoipa::path(
    get,
    path = "/api/v1/insurance-policies/{id}",
    params(("id" = Uuid, Path, description = "Policy id")),
    responses(
        (status = 200, description = "Policy", body = PolicyResponse),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["insurance"],
    operation_id = "getInsurancePolicy"
)]
#[get("/insurance-policies/{id}")]
pub async fn get_policy(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<PolicyResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    let policy = state.insurance.find(&owner, id).await?;
    Ok(web::Json(PolicyResponse::new(policy, state.today())))
}

#[utoipa::path(
    put,
    path = "/api/v1/insurance-policies/{id}",
    params(("id" = Uuid, Path, description = "Policy id")),
    request_body = PolicyRequest,
    responses(
        (status = 200, description = "Policy updated", body = PolicyResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["insurance"],
    operation_id = "updateInsurancePolicy"
)]
#[put("/insurance-policies/{id}")]
pub async fn update_policy(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<PolicyRequest>,
) -> ApiResult<web::Json<PolicyResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    let draft = payload.into_inner().into_draft()?;
    let policy = state.insurance.update(&owner, id, &draft).await?;
    Ok(web::Json(PolicyResponse::new(policy, state.today())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/insurance-policies/{id}",
    params(("id" = Uuid, Path, description = "Policy id")),
    responses(
        (status = 204, description = "Policy deleted"),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["insurance"],
    operation_id = "deleteInsurancePolicy"
)]
#[delete("/insurance-policies/{id}")]
pub async fn delete_policy(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    state.insurance.delete(&owner, id).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_policy)
        .service(list_policies)
        .service(renewals)
        .service(get_policy)
        .service(update_policy)
        .service(delete_policy);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{MockPorts, login_cookie, test_app, today};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use serde_json::{Value, json};

    fn policy() -> InsurancePolicy {
        InsurancePolicy {
            id: Uuid::new_v4(),
            household_id: None,
            provider: "Acme Mutual".into(),
            policy_number: None,
            policy_type: PolicyType::Home,
            premium_cents: 2_500,
            premium_frequency: Frequency::Monthly,
            start_date: None,
            renewal_date: today() + chrono::Duration::days(45),
            notes: None,
            created_at: Utc::now(),
        }
    }

    #[actix_web::test]
    async fn renewals_default_to_sixty_days() {
        let mut ports = MockPorts::default();
        ports
            .insurance
            .expect_list_renewing_by()
            .withf(|_, until| *until == today() + chrono::Duration::days(RENEWALS_DEFAULT_DAYS))
            .times(1)
            .returning(|_, _| Ok(vec![policy()]));
        let app = actix_test::init_service(test_app(ports, configure)).await;
        let cookie = login_cookie(&app).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/insurance-policies/renewals")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body[0]["daysUntilRenewal"], 45);
        assert_eq!(body[0]["annualPremiumCents"], 30_000);
        assert_eq!(body[0]["policyType"], "home");
    }

    #[actix_web::test]
    async fn start_after_renewal_is_rejected() {
        let app = actix_test::init_service(test_app(MockPorts::default(), configure)).await;
        let cookie = login_cookie(&app).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/insurance-policies")
                .cookie(cookie)
                .set_json(json!({
                    "provider": "Acme",
                    "policyType": "car",
                    "premiumCents": 100,
                    "premiumFrequency": "annually",
                    "startDate": "2026-06-01",
                    "renewalDate": "2026-05-01",
                }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], "startDate");
    }

    #[actix_web::test]
    async fn unknown_policy_type_is_rejected() {
        let app = actix_test::init_service(test_app(MockPorts::default(), configure)).await;
        let cookie = login_cookie(&app).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/insurance-policies")
                .cookie(cookie)
                .set_json(json!({
                    "provider": "Acme",
                    "policyType": "boat",
                    "premiumCents": 100,
                    "premiumFrequency": "annually",
                    "renewalDate": "2026-05-01",
                }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], "policyType");
    }
}
