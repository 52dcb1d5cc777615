//! Portfolio, holding, transaction and asset rows.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::ports::RepositoryError;
use crate::domain::{
    CashAccount, CashAccountDraft, FixedAsset, FixedAssetDraft, Holding, HoldingDraft, Portfolio,
    PortfolioDraft, PortfolioTransaction, TransactionDraft,
};

use super::super::schema::{
    cash_accounts, fixed_assets, holdings, portfolio_transactions, portfolios,
};
use super::parse_label;

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = portfolios)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PortfolioRow {
    pub id: Uuid,
    pub name: String,
    pub provider: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<PortfolioRow> for Portfolio {
    fn from(row: PortfolioRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            provider: row.provider,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = portfolios, treat_none_as_null = true)]
pub(crate) struct PortfolioFields<'a> {
    pub name: &'a str,
    pub provider: Option<&'a str>,
}

impl<'a> From<&'a PortfolioDraft> for PortfolioFields<'a> {
    fn from(draft: &'a PortfolioDraft) -> Self {
        Self {
            name: &draft.name,
            provider: draft.provider.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = holdings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct HoldingRow {
    pub id: Uuid,
    pub portfolio_id: Uuid,
    pub symbol: String,
    pub name: Option<String>,
    pub asset_class: String,
    pub quantity: f64,
    pub average_cost_cents: i64,
    pub current_price_cents: i64,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<HoldingRow> for Holding {
    type Error = RepositoryError;

    fn try_from(row: HoldingRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            portfolio_id: row.portfolio_id,
            symbol: row.symbol,
            name: row.name,
            asset_class: parse_label(&row.asset_class)?,
            quantity: row.quantity,
            average_cost_cents: row.average_cost_cents,
            current_price_cents: row.current_price_cents,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = holdings, treat_none_as_null = true)]
pub(crate) struct HoldingFields<'a> {
    pub symbol: &'a str,
    pub name: Option<&'a str>,
    pub asset_class: &'static str,
    pub quantity: f64,
    pub average_cost_cents: i64,
    pub current_price_cents: i64,
}

impl<'a> From<&'a HoldingDraft> for HoldingFields<'a> {
    fn from(draft: &'a HoldingDraft) -> Self {
        Self {
            symbol: &draft.symbol,
            name: draft.name.as_deref(),
            asset_class: draft.asset_class.as_str(),
            quantity: draft.quantity,
            average_cost_cents: draft.average_cost_cents,
            current_price_cents: draft.current_price_cents,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = portfolio_transactions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TransactionRow {
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

impl TryFrom<TransactionRow> for PortfolioTransaction {
    type Error = RepositoryError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            portfolio_id: row.portfolio_id,
            symbol: row.symbol,
            kind: parse_label(&row.kind)?,
            quantity: row.quantity,
            price_cents: row.price_cents,
            amount_cents: row.amount_cents,
            occurred_on: row.occurred_on,
            notes: row.notes,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = portfolio_transactions)]
pub(crate) struct TransactionFields<'a> {
    pub symbol: Option<&'a str>,
    pub kind: &'static str,
    pub quantity: Option<f64>,
    pub price_cents: Option<i64>,
    pub amount_cents: i64,
    pub occurred_on: NaiveDate,
    pub notes: Option<&'a str>,
}

impl<'a> From<&'a TransactionDraft> for TransactionFields<'a> {
    fn from(draft: &'a TransactionDraft) -> Self {
        Self {
            symbol: draft.symbol.as_deref(),
            kind: draft.kind.as_str(),
            quantity: draft.quantity,
            price_cents: draft.price_cents,
            amount_cents: draft.amount_cents,
            occurred_on: draft.occurred_on,
            notes: draft.notes.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = cash_accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CashAccountRow {
    pub id: Uuid,
    pub name: String,
    pub institution: Option<String>,
    pub account_type: String,
    pub balance_cents: i64,
    pub interest_rate_bps: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<CashAccountRow> for CashAccount {
    type Error = RepositoryError;

    fn try_from(row: CashAccountRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            name: row.name,
            institution: row.institution,
            account_type: parse_label(&row.account_type)?,
            balance_cents: row.balance_cents,
            interest_rate_bps: row.interest_rate_bps,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = cash_accounts, treat_none_as_null = true)]
pub(crate) struct CashAccountFields<'a> {
    pub name: &'a str,
    pub institution: Option<&'a str>,
    pub account_type: &'static str,
    pub balance_cents: i64,
    pub interest_rate_bps: Option<i32>,
}

impl<'a> From<&'a CashAccountDraft> for CashAccountFields<'a> {
    fn from(draft: &'a CashAccountDraft) -> Self {
        Self {
            name: &draft.name,
            institution: draft.institution.as_deref(),
            account_type: draft.account_type.as_str(),
            balance_cents: draft.balance_cents,
            interest_rate_bps: draft.interest_rate_bps,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = fixed_assets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FixedAssetRow {
    pub id: Uuid,
    pub name: String,
    pub category: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub purchase_price_cents: i64,
    pub current_value_cents: i64,
    pub created_at: DateTime<Utc>,
}

impl From<FixedAssetRow> for FixedAsset {
    fn from(row: FixedAssetRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            category: row.category,
            purchase_date: row.purchase_date,
            purchase_price_cents: row.purchase_price_cents,
            current_value_cents: row.current_value_cents,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = fixed_assets, treat_none_as_null = true)]
pub(crate) struct FixedAssetFields<'a> {
    pub name: &'a str,
    pub category: Option<&'a str>,
    pub purchase_date: Option<NaiveDate>,
    pub purchase_price_cents: i64,
    pub current_value_cents: i64,
}

impl<'a> From<&'a FixedAssetDraft> for FixedAssetFields<'a> {
    fn from(draft: &'a FixedAssetDraft) -> Self {
        Self {
            name: &draft.name,
            category: draft.category.as_deref(),
            purchase_date: draft.purchase_date,
            purchase_price_cents: draft.purchase_price_cents,
            current_value_cents: draft.current_value_cents,
        }
    }
}
