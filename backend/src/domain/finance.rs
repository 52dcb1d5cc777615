//! Investment portfolios, cash accounts, fixed assets and net worth.
//!
//! Money is held in minor units (`i64` cents). Holding quantities are
//! fractional, so valuations round to the nearest cent.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use super::labels::labelled_enum;
use super::validation::{
    FieldViolation, non_negative_cents, non_negative_quantity, optional_text, required_text,
};

const NAME_MAX: usize = 120;
/// Largest balance magnitude a cash account may carry.
pub const BALANCE_LIMIT_CENTS: i64 = 1_000_000_000_000_000;

fn total(values: impl Iterator<Item = i64>) -> i64 {
    values.fold(0, i64::saturating_add)
}

fn percent(numerator: i64, denominator: i64) -> Option<f64> {
    if denominator == 0 {
        return None;
    }
    let raw = numerator as f64 / denominator as f64 * 100.0;
    Some((raw * 100.0).round() / 100.0)
}

fn cents(quantity: f64, unit_cents: i64) -> i64 {
    (quantity * unit_cents as f64).round() as i64
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Portfolio {
    pub id: Uuid,
    pub name: String,
    pub provider: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortfolioDraft {
    pub name: String,
    pub provider: Option<String>,
}

impl PortfolioDraft {
    pub fn validated(self) -> Result<Self, FieldViolation> {
        Ok(Self {
            name: required_text("name", &self.name, NAME_MAX)?,
            provider: optional_text("provider", self.provider.as_deref(), NAME_MAX)?,
        })
    }
}

labelled_enum! {
    pub enum AssetClass as "asset class" {
        Equity => "equity",
        Fund => "fund",
        Etf => "etf",
        Bond => "bond",
        Crypto => "crypto",
        Cash => "cash",
        Other => "other",
    }
}

/// Position in a single instrument.
#[derive(Debug, Clone, PartialEq)]
pub struct Holding {
    pub id: Uuid,
    pub portfolio_id: Uuid,
    pub symbol: String,
    pub name: Option<String>,
    pub asset_class: AssetClass,
    pub quantity: f64,
    pub average_cost_cents: i64,
    pub current_price_cents: i64,
    pub updated_at: DateTime<Utc>,
}

impl Holding {
    pub fn cost_basis_cents(&self) -> i64 {
        cents(self.quantity, self.average_cost_cents)
    }

    pub fn market_value_cents(&self) -> i64 {
        cents(self.quantity, self.current_price_cents)
    }

    pub fn gain_cents(&self) -> i64 {
        self.market_value_cents().saturating_sub(self.cost_basis_cents())
    }

    /// Gain relative to cost basis, two decimals; `None` for a zero basis.
    pub fn gain_percent(&self) -> Option<f64> {
        percent(self.gain_cents(), self.cost_basis_cents())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HoldingDraft {
    pub symbol: String,
    pub name: Option<String>,
    pub asset_class: AssetClass,
    pub quantity: f64,
    pub average_cost_cents: i64,
    pub current_price_cents: i64,
}

impl HoldingDraft {
    /// Symbols are upper-cased so uniqueness within a portfolio ignores case.
    pub fn validated(self) -> Result<Self, FieldViolation> {
        Ok(Self {
            symbol: required_text("symbol", &self.symbol, 20)?.to_uppercase(),
            name: optional_text("name", self.name.as_deref(), NAME_MAX)?,
            quantity: non_negative_quantity("quantity", self.quantity)?,
            average_cost_cents: non_negative_cents("averageCostCents", self.average_cost_cents)?,
            current_price_cents: non_negative_cents(
                "currentPriceCents",
                self.current_price_cents,
            )?,
            ..self
        })
    }
}

labelled_enum! {
    pub enum TransactionKind as "transaction kind" {
        Buy => "buy",
        Sell => "sell",
        Dividend => "dividend",
        Deposit => "deposit",
        Withdrawal => "withdrawal",
        Fee => "fee",
        Interest => "interest",
    }
}

/// Ledger entry against a portfolio.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioTransaction {
    pub id: Uuid,
    pub portfolio_id: Uuid,
    pub symbol: Option<String>,
    pub kind: TransactionKind,
    pub quantity: Option<f64>,
    pub price_cents: Option<i64>,
    pub amount_cents: i64,
    pub occurred_on: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub symbol: Option<String>,
    pub kind: TransactionKind,
    pub quantity: Option<f64>,
    pub price_cents: Option<i64>,
    pub amount_cents: i64,
    pub occurred_on: NaiveDate,
    pub notes: Option<String>,
}

impl TransactionDraft {
    /// Buys and sells must name the instrument they trade.
    pub fn validated(self) -> Result<Self, FieldViolation> {
        let symbol =
            optional_text("symbol", self.symbol.as_deref(), 20)?.map(|s| s.to_uppercase());
        if matches!(self.kind, TransactionKind::Buy | TransactionKind::Sell) && symbol.is_none() {
            return Err(FieldViolation::required("symbol"));
        }
        Ok(Self {
            symbol,
            quantity: self
                .quantity
                .map(|q| non_negative_quantity("quantity", q))
                .transpose()?,
            price_cents: self
                .price_cents
                .map(|p| non_negative_cents("priceCents", p))
                .transpose()?,
            amount_cents: non_negative_cents("amountCents", self.amount_cents)?,
            notes: optional_text("notes", self.notes.as_deref(), 2_000)?,
            ..self
        })
    }
}

/// Optional filters for the transaction listing; every bound is inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub kind: Option<TransactionKind>,
}

labelled_enum! {
    pub enum CashAccountType as "account type" {
        Current => "current",
        Savings => "savings",
        Isa => "isa",
        Other => "other",
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CashAccount {
    pub id: Uuid,
    pub name: String,
    pub institution: Option<String>,
    pub account_type: CashAccountType,
    pub balance_cents: i64,
    pub interest_rate_bps: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CashAccountDraft {
    pub name: String,
    pub institution: Option<String>,
    pub account_type: CashAccountType,
    pub balance_cents: i64,
    pub interest_rate_bps: Option<i32>,
}

impl CashAccountDraft {
    /// Balances may be negative (overdrafts); rates may not.
    pub fn validated(self) -> Result<Self, FieldViolation> {
        if self.interest_rate_bps.is_some_and(|bps| !(0..=10_000).contains(&bps)) {
            return Err(FieldViolation::out_of_range("interestRateBps", 0, 10_000));
        }
        if !(-BALANCE_LIMIT_CENTS..=BALANCE_LIMIT_CENTS).contains(&self.balance_cents) {
            return Err(FieldViolation::out_of_range(
                "balanceCents",
                -BALANCE_LIMIT_CENTS,
                BALANCE_LIMIT_CENTS,
            ));
        }
        Ok(Self {
            name: required_text("name", &self.name, NAME_MAX)?,
            institution: optional_text("institution", self.institution.as_deref(), NAME_MAX)?,
            ..self
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedAsset {
    pub id: Uuid,
    pub name: String,
    pub category: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub purchase_price_cents: i64,
    pub current_value_cents: i64,
    pub created_at: DateTime<Utc>,
}

impl FixedAsset {
    pub fn appreciation_cents(&self) -> i64 {
        self.current_value_cents - self.purchase_price_cents
    }

    /// `None` when the purchase price is zero.
    pub fn appreciation_percent(&self) -> Option<f64> {
        percent(self.appreciation_cents(), self.purchase_price_cents)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedAssetDraft {
    pub name: String,
    pub category: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub purchase_price_cents: i64,
    pub current_value_cents: i64,
}

impl FixedAssetDraft {
    pub fn validated(self) -> Result<Self, FieldViolation> {
        Ok(Self {
            name: required_text("name", &self.name, NAME_MAX)?,
            category: optional_text("category", self.category.as_deref(), 60)?,
            purchase_price_cents: non_negative_cents(
                "purchasePriceCents",
                self.purchase_price_cents,
            )?,
            current_value_cents: non_negative_cents("currentValueCents", self.current_value_cents)?,
            ..self
        })
    }
}

/// Valuation of one portfolio.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioSummary {
    pub portfolio: Portfolio,
    pub holdings_count: usize,
    pub cost_basis_cents: i64,
    pub market_value_cents: i64,
    pub gain_cents: i64,
    pub gain_percent: Option<f64>,
}

impl PortfolioSummary {
    pub fn new(portfolio: Portfolio, holdings: &[Holding]) -> Self {
        let cost_basis_cents = total(holdings.iter().map(Holding::cost_basis_cents));
        let market_value_cents = total(holdings.iter().map(Holding::market_value_cents));
        let gain_cents = market_value_cents.saturating_sub(cost_basis_cents);
        Self {
            portfolio,
            holdings_count: holdings.len(),
            cost_basis_cents,
            market_value_cents,
            gain_cents,
            gain_percent: percent(gain_cents, cost_basis_cents),
        }
    }
}

/// Total of everything the user owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NetWorth {
    pub holdings_cents: i64,
    pub cash_cents: i64,
    pub fixed_assets_cents: i64,
    pub total_cents: i64,
}

impl NetWorth {
    /// Holdings count at market value, fixed assets at current value.
    pub fn compute(holdings: &[Holding], cash: &[CashAccount], assets: &[FixedAsset]) -> Self {
        let holdings_cents = total(holdings.iter().map(Holding::market_value_cents));
        let cash_cents = total(cash.iter().map(|account| account.balance_cents));
        let fixed_assets_cents = total(assets.iter().map(|asset| asset.current_value_cents));
        Self {
            holdings_cents,
            cash_cents,
            fixed_assets_cents,
            total_cents: total([holdings_cents, cash_cents, fixed_assets_cents].into_iter()),
        }
    }
}

#[cfg(test)]
mod tests;
