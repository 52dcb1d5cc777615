//! Finance handlers: portfolios with holdings and transactions, cash
//! accounts, fixed assets and the net worth roll-up.

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::{
    ApiResult, AssetClass, CashAccount, CashAccountDraft, CashAccountType, FixedAsset,
    FixedAssetDraft, Holding, HoldingDraft, NetWorth, Portfolio, PortfolioDraft,
    PortfolioSummary, PortfolioTransaction, TransactionDraft, TransactionFilter, TransactionKind,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, ID_FIELD, parse_label, parse_optional_label, parse_uuid,
};

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioRequest {
    #[schema(example = "Pension")]
    pub name: String,
    pub provider: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioResponse {
    pub id: Uuid,
    pub name: String,
    pub provider: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Portfolio> for PortfolioResponse {
    fn from(value: Portfolio) -> Self {
        Self {
            id: value.id,
            name: value.name,
            provider: value.provider,
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummaryResponse {
    pub portfolio: PortfolioResponse,
    pub holdings_count: usize,
    pub cost_basis_cents: i64,
    pub market_value_cents: i64,
    pub gain_cents: i64,
    pub gain_percent: Option<f64>,
}

impl From<PortfolioSummary> for PortfolioSummaryResponse {
    fn from(value: PortfolioSummary) -> Self {
        Self {
            portfolio: value.portfolio.into(),
            holdings_count: value.holdings_count,
            cost_basis_cents: value.cost_basis_cents,
            market_value_cents: value.market_value_cents,
            gain_cents: value.gain_cents,
            gain_percent: value.gain_percent,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HoldingRequest {
    #[schema(example = "VWRL")]
    pub symbol: String,
    pub name: Option<String>,
    #[schema(example = "etf")]
    pub asset_class: String,
    pub quantity: f64,
    pub average_cost_cents: i64,
    pub current_price_cents: i64,
}

impl HoldingRequest {
    fn into_draft(self) -> ApiResult<HoldingDraft> {
        let asset_class: AssetClass = parse_label(&self.asset_class, FieldName::new("assetClass"))?;
        let draft = HoldingDraft {
            symbol: self.symbol,
            name: self.name,
            asset_class,
            quantity: self.quantity,
            average_cost_cents: self.average_cost_cents,
            current_price_cents: self.current_price_cents,
        };
        Ok(draft.validated()?)
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HoldingResponse {
    pub id: Uuid,
    pub portfolio_id: Uuid,
    pub symbol: String,
    pub name: Option<String>,
    pub asset_class: String,
    pub quantity: f64,
    pub average_cost_cents: i64,
    pub current_price_cents: i64,
    pub cost_basis_cents: i64,
    pub market_value_cents: i64,
    pub gain_cents: i64,
    pub gain_percent: Option<f64>,
    pub updated_at: DateTime<Utc>,
}

impl From<Holding> for HoldingResponse {
    fn from(value: Holding) -> Self {
        Self {
            cost_basis_cents: value.cost_basis_cents(),
            market_value_cents: value.market_value_cents(),
            gain_cents: value.gain_cents(),
            gain_percent: value.gain_percent(),
            id: value.id,
            portfolio_id: value.portfolio_id,
            symbol: value.symbol,
            name: value.name,
            asset_class: value.asset_class.as_str().to_owned(),
            quantity: value.quantity,
            average_cost_cents: value.average_cost_cents,
            current_price_cents: value.current_price_cents,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub symbol: Option<String>,
    #[schema(example = "buy")]
    pub kind: String,
    pub quantity: Option<f64>,
    pub price_cents: Option<i64>,
    pub amount_cents: i64,
    pub occurred_on: NaiveDate,
    pub notes: Option<String>,
}

impl TransactionRequest {
    fn into_draft(self) -> ApiResult<TransactionDraft> {
        let kind: TransactionKind = parse_label(&self.kind, FieldName::new("kind"))?;
        let draft = TransactionDraft {
            symbol: self.symbol,
            kind,
            quantity: self.quantity,
            price_cents: self.price_cents,
            amount_cents: self.amount_cents,
            occurred_on: self.occurred_on,
            notes: self.notes,
        };
        Ok(draft.validated()?)
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub id: Uuid,
    pub portfolio_id: Uuid,
    pub symbol: Option<String>,
    pub kind: String,
    pub quantity: Option<f64>,
    pub price_cents: Option<i64>,
    pub amount_cents: i64,
    pub occurred_on: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<PortfolioTransaction> for TransactionResponse {
    fn from(value: PortfolioTransaction) -> Self {
        Self {
            id: value.id,
            portfolio_id: value.portfolio_id,
            symbol: value.symbol,
            kind: value.kind.as_str().to_owned(),
            quantity: value.quantity,
            price_cents: value.price_cents,
            amount_cents: value.amount_cents,
            occurred_on: value.occurred_on,
            notes: value.notes,
            created_at: value.created_at,
        }
    }
}

/// Inclusive transaction filters.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TransactionQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub kind: Option<String>,
}

impl TransactionQuery {
    fn to_filter(&self) -> ApiResult<TransactionFilter> {
        Ok(TransactionFilter {
            from: self.from,
            to: self.to,
            kind: parse_optional_label(self.kind.as_deref(), FieldName::new("kind"))?,
        })
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CashAccountRequest {
    #[schema(example = "Easy access saver")]
    pub name: String,
    pub institution: Option<String>,
    #[schema(example = "savings")]
    pub account_type: String,
    pub balance_cents: i64,
    pub interest_rate_bps: Option<i32>,
}

impl CashAccountRequest {
    fn into_draft(self) -> ApiResult<CashAccountDraft> {
        let account_type: CashAccountType =
            parse_label(&self.account_type, FieldName::new("accountType"))?;
        let draft = CashAccountDraft {
            name: self.name,
            institution: self.institution,
            account_type,
            balance_cents: self.balance_cents,
            interest_rate_bps: self.interest_rate_bps,
        };
        Ok(draft.validated()?)
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CashAccountResponse {
    pub id: Uuid,
    pub name: String,
    pub institution: Option<String>,
    pub account_type: String,
    pub balance_cents: i64,
    pub interest_rate_bps: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<CashAccount> for CashAccountResponse {
    fn from(value: CashAccount) -> Self {
        Self {
            id: value.id,
            name: value.name,
            institution: value.institution,
            account_type: value.account_type.as_str().to_owned(),
            balance_cents: value.balance_cents,
            interest_rate_bps: value.interest_rate_bps,
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FixedAssetRequest {
    #[schema(example = "House")]
    pub name: String,
    pub category: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub purchase_price_cents: i64,
    pub current_value_cents: i64,
}

impl From<FixedAssetRequest> for FixedAssetDraft {
    fn from(value: FixedAssetRequest) -> Self {
        Self {
            name: value.name,
            category: value.category,
            purchase_date: value.purchase_date,
            purchase_price_cents: value.purchase_price_cents,
            current_value_cents: value.current_value_cents,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FixedAssetResponse {
    pub id: Uuid,
    pub name: String,
    pub category: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub purchase_price_cents: i64,
    pub current_value_cents: i64,
    pub appreciation_cents: i64,
    /// Absent when the purchase price is zero.
    pub appreciation_percent: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl From<FixedAsset> for FixedAssetResponse {
    fn from(value: FixedAsset) -> Self {
        Self {
            appreciation_cents: value.appreciation_cents(),
            appreciation_percent: value.appreciation_percent(),
            id: value.id,
            name: value.name,
            category: value.category,
            purchase_date: value.purchase_date,
            purchase_price_cents: value.purchase_price_cents,
            current_value_cents: value.current_value_cents,
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NetWorthResponse {
    pub holdings_cents: i64,
    pub cash_cents: i64,
    pub fixed_assets_cents: i64,
    pub total_cents: i64,
}

impl From<NetWorth> for NetWorthResponse {
    fn from(value: NetWorth) -> Self {
        Self {
            holdings_cents: value.holdings_cents,
            cash_cents: value.cash_cents,
            fixed_assets_cents: value.fixed_assets_cents,
            total_cents: value.total_cents,
        }
    }
}

fn portfolio_draft(payload: PortfolioRequest) -> ApiResult<PortfolioDraft> {
    let draft = PortfolioDraft {
        name: payload.name,
        provider: payload.provider,
    };
    Ok(draft.validated()?)
}

#[utoipa::path(
    post,
    path = "/api/v1/portfolios",
    request_body = PortfolioRequest,
    responses(
        (status = 201, description = "Portfolio created", body = PortfolioResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["finance"],
    operation_id = "createPortfolio"
)]
#[post("/portfolios")]
pub async fn create_portfolio(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<PortfolioRequest>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let draft = portfolio_draft(payload.into_inner())?;
    let portfolio = state.portfolios.create_portfolio(&owner, &draft).await?;
    Ok(HttpResponse::Created().json(PortfolioResponse::from(portfolio)))
}

#[utoipa::path(
    get,
    path = "/api/v1/portfolios",
    responses((status = 200, description = "Portfolios", body = [PortfolioResponse])),
    tags = ["finance"],
    operation_id = "listPortfolios"
)]
#[get("/portfolios")]
pub async fn list_portfolios(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<PortfolioResponse>>> {
    let owner = session.require_user_id()?;
    let portfolios = state.portfolios.list_portfolios(&owner).await?;
    Ok(web::Json(portfolios.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/portfolios/{id}",
    params(("id" = Uuid, Path, description = "Portfolio id")),
    responses(
        (status = 200, description = "Portfolio", body = PortfolioResponse),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["finance"],
    operation_id = "getPortfolio"
)]
#[get("/portfolios/{id}")]
pub async fn get_portfolio(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<PortfolioResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    let portfolio = state.portfolios.find_portfolio(&owner, id).await?;
    Ok(web::Json(portfolio.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/portfolios/{id}",
    params(("id" = Uuid, Path, description = "Portfolio id")),
    request_body = PortfolioRequest,
    responses(
        (status = 200, description = "Portfolio updated", body = PortfolioResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["finance"],
    operation_id = "updatePortfolio"
)]
#[put("/portfolios/{id}")]
pub async fn update_portfolio(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<PortfolioRequest>,
) -> ApiResult<web::Json<PortfolioResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    let draft = portfolio_draft(payload.into_inner())?;
    let portfolio = state.portfolios.update_portfolio(&owner, id, &draft).await?;
    Ok(web::Json(portfolio.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/portfolios/{id}",
    params(("id" = Uuid, Path, description = "Portfolio id")),
    responses(
        (status = 204, description = "Portfolio deleted with its holdings and transactions"),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["finance"],
    operation_id = "deletePortfolio"
)]
#[delete("/portfolios/{id}")]
pub async fn delete_portfolio(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    state.portfolios.delete_portfolio(&owner, id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    get,
    path = "/api/v1/portfolios/{id}/summary",
    params(("id" = Uuid, Path, description = "Portfolio id")),
    responses(
        (status = 200, description = "Portfolio valuation", body = PortfolioSummaryResponse),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["finance"],
    operation_id = "portfolioSummary"
)]
#[get("/portfolios/{id}/summary")]
pub async fn portfolio_summary(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<PortfolioSummaryResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    let portfolio = state.portfolios.find_portfolio(&owner, id).await?;
    let holdings = state.portfolios.list_holdings(&owner, id).await?;
    Ok(web::Json(PortfolioSummary::new(portfolio, &holdings).into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/portfolios/{id}/holdings",
    params(("id" = Uuid, Path, description = "Portfolio id")),
    request_body = HoldingRequest,
    responses(
        (status = 201, description = "Holding created", body = HoldingResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Portfolio not found", body = ErrorSchema),
        (status = 409, description = "Symbol already held", body = ErrorSchema)
    ),
    tags = ["finance"],
    operation_id = "createHolding"
)]
#[post("/portfolios/{id}/holdings")]
pub async fn create_holding(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<HoldingRequest>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let portfolio_id = parse_uuid(&path, ID_FIELD)?;
    let draft = payload.into_inner().into_draft()?;
    let holding = state
        .portfolios
        .create_holding(&owner, portfolio_id, &draft)
        .await?;
    Ok(HttpResponse::Created().json(HoldingResponse::from(holding)))
}

#[utoipa::path(
    get,
    path = "/api/v1/portfolios/{id}/holdings",
    params(("id" = Uuid, Path, description = "Portfolio id")),
    responses(
        (status = 200, description = "Holdings by symbol", body = [HoldingResponse]),
        (status = 404, description = "Portfolio not found", body = ErrorSchema)
    ),
    tags = ["finance"],
    operation_id = "listHoldings"
)]
#[get("/portfolios/{id}/holdings")]
pub async fn list_holdings(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<HoldingResponse>>> {
    let owner = session.require_user_id()?;
    let portfolio_id = parse_uuid(&path, ID_FIELD)?;
    let holdings = state.portfolios.list_holdings(&owner, portfolio_id).await?;
    Ok(web::Json(holdings.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    put,
    path = "/api/v1/holdings/{id}",
    params(("id" = Uuid, Path, description = "Holding id")),
    request_body = HoldingRequest,
    responses(
        (status = 200, description = "Holding updated", body = HoldingResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Symbol already held", body = ErrorSchema)
    ),
    tags = ["finance"],
    operation_id = "updateHolding"
)]
#[put("/holdings/{id}")]
pub async fn update_holding(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<HoldingRequest>,
) -> ApiResult<web::Json<HoldingResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    let draft = payload.into_inner().into_draft()?;
    let holding = state.portfolios.update_holding(&owner, id, &draft).await?;
    Ok(web::Json(holding.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/holdings/{id}",
    params(("id" = Uuid, Path, description = "Holding id")),
    responses(
        (status = 204, description = "Holding deleted"),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["finance"],
    operation_id = "deleteHolding"
)]
#[delete("/holdings/{id}")]
pub async fn delete_holding(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    state.portfolios.delete_holding(&owner, id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    post,
    path = "/api/v1/portfolios/{id}/transactions",
    params(("id" = Uuid, Path, description = "Portfolio id")),
    request_body = TransactionRequest,
    responses(
        (status = 201, description = "Transaction recorded", body = TransactionResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Portfolio not found", body = ErrorSchema)
    ),
    tags = ["finance"],
    operation_id = "createTransaction"
)]
#[post("/portfolios/{id}/transactions")]
pub async fn create_transaction(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<TransactionRequest>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let portfolio_id = parse_uuid(&path, ID_FIELD)?;
    let draft = payload.into_inner().into_draft()?;
    let transaction = state
        .portfolios
        .create_transaction(&owner, portfolio_id, &draft)
        .await?;
    Ok(HttpResponse::Created().json(TransactionResponse::from(transaction)))
}

#[utoipa::path(
    get,
    path = "/api/v1/portfolios/{id}/transactions",
    params(("id" = Uuid, Path, description = "Portfolio id"), TransactionQuery),
    responses(
        (status = 200, description = "Transactions, newest first", body = [TransactionResponse]),
        (status = 400, description = "Invalid filter", body = ErrorSchema),
        (status = 404, description = "Portfolio not found", body = ErrorSchema)
    ),
    tags = ["finance"],
    operation_id = "listTransactions"
)]
#[get("/portfolios/{id}/transactions")]
pub async fn list_transactions(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    query: web::Query<TransactionQuery>,
) -> ApiResult<web::Json<Vec<TransactionResponse>>> {
    let owner = session.require_user_id()?;
    let portfolio_id = parse_uuid(&path, ID_FIELD)?;
    let filter = query.to_filter()?;
    let transactions = state
        .portfolios
        .list_transactions(&owner, portfolio_id, filter)
        .await?;
    Ok(web::Json(transactions.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/transactions/{id}",
    params(("id" = Uuid, Path, description = "Transaction id")),
    responses(
        (status = 204, description = "Transaction deleted"),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["finance"],
    operation_id = "deleteTransaction"
)]
#[delete("/transactions/{id}")]
pub async fn delete_transaction(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    state.portfolios.delete_transaction(&owner, id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    post,
    path = "/api/v1/cash-accounts",
    request_body = CashAccountRequest,
    responses(
        (status = 201, description = "Cash account created", body = CashAccountResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["finance"],
    operation_id = "createCashAccount"
)]
#[post("/cash-accounts")]
pub async fn create_cash_account(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CashAccountRequest>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let draft = payload.into_inner().into_draft()?;
    let account = state.assets.create_cash_account(&owner, &draft).await?;
    Ok(HttpResponse::Created().json(CashAccountResponse::from(account)))
}

#[utoipa::path(
    get,
    path = "/api/v1/cash-accounts",
    responses((status = 200, description = "Cash accounts", body = [CashAccountResponse])),
    tags = ["finance"],
    operation_id = "listCashAccounts"
)]
#[get("/cash-accounts")]
pub async fn list_cash_accounts(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<CashAccountResponse>>> {
    let owner = session.require_user_id()?;
    let accounts = state.assets.list_cash_accounts(&owner).await?;
    Ok(web::Json(accounts.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/cash-accounts/{id}",
    params(("id" = Uuid, Path, description = "Cash account id")),
    responses(
        (status = 200, description = "Cash account", body = CashAccountResponse),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["finance"],
    operation_id = "getCashAccount"
)]
#[get("/cash-accounts/{id}")]
pub async fn get_cash_account(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<CashAccountResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    let account = state.assets.find_cash_account(&owner, id).await?;
    Ok(web::Json(account.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/cash-accounts/{id}",
    params(("id" = Uuid, Path, description = "Cash account id")),
    request_body = CashAccountRequest,
    responses(
        (status = 200, description = "Cash account updated", body = CashAccountResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["finance"],
    operation_id = "updateCashAccount"
)]
#[put("/cash-accounts/{id}")]
pub async fn update_cash_account(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<CashAccountRequest>,
) -> ApiResult<web::Json<CashAccountResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    let draft = payload.into_inner().into_draft()?;
    let account = state.assets.update_cash_account(&owner, id, &draft).await?;
    Ok(web::Json(account.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/cash-accounts/{id}",
    params(("id" = Uuid, Path, description = "Cash account id")),
    responses(
        (status = 204, description = "Cash account deleted"),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["finance"],
    operation_id = "deleteCashAccount"
)]
#[delete("/cash-accounts/{id}")]
pub async fn delete_cash_account(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    state.assets.delete_cash_account(&owner, id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    post,
    path = "/api/v1/fixed-assets",
    request_body = FixedAssetRequest,
    responses(
        (status = 201, description = "Fixed asset created", body = FixedAssetResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["finance"],
    operation_id = "createFixedAsset"
)]
#[post("/fixed-assets")]
pub async fn create_fixed_asset(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<FixedAssetRequest>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let draft = FixedAssetDraft::from(payload.into_inner()).validated()?;
    let asset = state.assets.create_fixed_asset(&owner, &draft).await?;
    Ok(HttpResponse::Created().json(FixedAssetResponse::from(asset)))
}

#[utoipa::path(
    get,
    path = "/api/v1/fixed-assets",
    responses((status = 200, description = "Fixed assets", body = [FixedAssetResponse])),
    tags = ["finance"],
    operation_id = "listFixedAssets"
)]
#[get("/fixed-assets")]
pub async fn list_fixed_assets(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<FixedAssetResponse>>> {
    let owner = session.require_user_id()?;
    let assets = state.assets.list_fixed_assets(&owner).await?;
    Ok(web::Json(assets.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/fixed-assets/{id}",
    params(("id" = Uuid, Path, description = "Fixed asset id")),
    responses(
        (status = 200, description = "Fixed asset", body = FixedAssetResponse),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["finance"],
    operation_id = "getFixedAsset"
)]
#[get("/fixed-assets/{id}")]
pub async fn get_fixed_asset(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<FixedAssetResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    let asset = state.assets.find_fixed_asset(&owner, id).await?;
    Ok(web::Json(asset.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/fixed-assets/{id}",
    params(("id" = Uuid, Path, description = "Fixed asset id")),
    request_body = FixedAssetRequest,
    responses(
        (status = 200, description = "Fixed asset updated", body = FixedAssetResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["finance"],
    operation_id = "updateFixedAsset"
)]
#[put("/fixed-assets/{id}")]
pub async fn update_fixed_asset(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<FixedAssetRequest>,
) -> ApiResult<web::Json<FixedAssetResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    let draft = FixedAssetDraft::from(payload.into_inner()).validated()?;
    let asset = state.assets.update_fixed_asset(&owner, id, &draft).await?;
    Ok(web::Json(asset.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/fixed-assets/{id}",
    params(("id" = Uuid, Path, description = "Fixed asset id")),
    responses(
        (status = 204, description = "Fixed asset deleted"),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["finance"],
    operation_id = "deleteFixedAsset"
)]
#[delete("/fixed-assets/{id}")]
pub async fn delete_fixed_asset(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    state.assets.delete_fixed_asset(&owner, id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Holdings at market value plus cash balances plus fixed asset values.
#[utoipa::path(
    get,
    path = "/api/v1/net-worth",
    responses((status = 200, description = "Net worth", body = NetWorthResponse)),
    tags = ["finance"],
    operation_id = "netWorth"
)]
#[get("/net-worth")]
pub async fn net_worth(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<NetWorthResponse>> {
    let owner = session.require_user_id()?;
    let holdings = state.portfolios.list_all_holdings(&owner).await?;
    let cash = state.assets.list_cash_accounts(&owner).await?;
    let assets = state.assets.list_fixed_assets(&owner).await?;
    Ok(web::Json(NetWorth::compute(&holdings, &cash, &assets).into()))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_portfolio)
        .service(list_portfolios)
        .service(get_portfolio)
        .service(update_portfolio)
        .service(delete_portfolio)
        .service(portfolio_summary)
        .service(create_holding)
        .service(list_holdings)
        .service(update_holding)
        .service(delete_holding)
        .service(create_transaction)
        .service(list_transactions)
        .service(delete_transaction)
        .service(create_cash_account)
        .service(list_cash_accounts)
        .service(get_cash_account)
        .service(update_cash_account)
        .service(delete_cash_account)
        .service(create_fixed_asset)
        .service(list_fixed_assets)
        .service(get_fixed_asset)
        .service(update_fixed_asset)
        .service(delete_fixed_asset)
        .service(net_worth);
}
