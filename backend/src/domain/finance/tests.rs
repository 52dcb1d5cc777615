//! Valuation and draft validation tests.

use super::*;
use rstest::{fixture, rstest};

#[fixture]
fn portfolio() -> Portfolio {
    Portfolio {
        id: Uuid::new_v4(),
        name: "ISA".into(),
        provider: Some("Broker".into()),
        created_at: Utc::now(),
    }
}

fn holding(quantity: f64, average_cost_cents: i64, current_price_cents: i64) -> Holding {
    Holding {
        id: Uuid::new_v4(),
        portfolio_id: Uuid::new_v4(),
        symbol: "VWRL".into(),
        name: None,
        asset_class: AssetClass::Etf,
        quantity,
        average_cost_cents,
        current_price_cents,
        updated_at: Utc::now(),
    }
}

#[test]
fn holding_valuation() {
    let h = holding(10.0, 8_000, 9_000);
    assert_eq!(h.cost_basis_cents(), 80_000);
    assert_eq!(h.market_value_cents(), 90_000);
    assert_eq!(h.gain_cents(), 10_000);
    assert_eq!(h.gain_percent(), Some(12.5));
}

#[test]
fn fractional_quantities_round_to_cents() {
    let h = holding(0.333, 1_000, 1_000);
    assert_eq!(h.market_value_cents(), 333);
}

#[test]
fn zero_cost_basis_has_no_gain_percent() {
    assert_eq!(holding(5.0, 0, 100).gain_percent(), None);
}

#[rstest]
fn portfolio_summary_totals(portfolio: Portfolio) {
    let holdings = [holding(10.0, 1_000, 1_500), holding(2.0, 5_000, 4_000)];
    let summary = PortfolioSummary::new(portfolio, &holdings);
    assert_eq!(summary.holdings_count, 2);
    assert_eq!(summary.cost_basis_cents, 20_000);
    assert_eq!(summary.market_value_cents, 23_000);
    assert_eq!(summary.gain_cents, 3_000);
    assert_eq!(summary.gain_percent, Some(15.0));
}

#[rstest]
fn empty_portfolio_summary(portfolio: Portfolio) {
    let summary = PortfolioSummary::new(portfolio, &[]);
    assert_eq!(summary.market_value_cents, 0);
    assert_eq!(summary.gain_percent, None);
}

#[test]
fn net_worth_sums_every_asset_kind() {
    let cash = CashAccount {
        id: Uuid::new_v4(),
        name: "Current".into(),
        institution: None,
        account_type: CashAccountType::Current,
        balance_cents: -2_000,
        interest_rate_bps: None,
        created_at: Utc::now(),
    };
    let house = FixedAsset {
        id: Uuid::new_v4(),
        name: "House".into(),
        category: None,
        purchase_date: None,
        purchase_price_cents: 100_000,
        current_value_cents: 150_000,
        created_at: Utc::now(),
    };
    let worth = NetWorth::compute(&[holding(1.0, 0, 10_000)], &[cash], &[house]);
    assert_eq!(worth.holdings_cents, 10_000);
    assert_eq!(worth.cash_cents, -2_000);
    assert_eq!(worth.fixed_assets_cents, 150_000);
    assert_eq!(worth.total_cents, 158_000);
}

fn cash(balance_cents: i64) -> CashAccount {
    CashAccount {
        id: Uuid::new_v4(),
        name: "Saver".into(),
        institution: None,
        account_type: CashAccountType::Savings,
        balance_cents,
        interest_rate_bps: None,
        created_at: Utc::now(),
    }
}

#[test]
fn net_worth_saturates_instead_of_overflowing() {
    let worth = NetWorth::compute(&[], &[cash(i64::MAX), cash(1)], &[]);
    assert_eq!(worth.cash_cents, i64::MAX);
    assert_eq!(worth.total_cents, i64::MAX);
}

#[rstest]
fn huge_portfolios_saturate(portfolio: Portfolio) {
    let holdings = [
        holding(1e12, 10_000_000_000, 10_000_000_000),
        holding(1e12, 10_000_000_000, 10_000_000_000),
    ];
    let summary = PortfolioSummary::new(portfolio, &holdings);
    assert_eq!(summary.market_value_cents, i64::MAX);
    assert_eq!(summary.cost_basis_cents, i64::MAX);
    assert_eq!(summary.gain_cents, 0);
}

#[rstest]
#[case(BALANCE_LIMIT_CENTS, true)]
#[case(-BALANCE_LIMIT_CENTS, true)]
#[case(BALANCE_LIMIT_CENTS + 1, false)]
#[case(i64::MIN, false)]
fn cash_balances_are_bounded(#[case] balance_cents: i64, #[case] accepted: bool) {
    let draft = CashAccountDraft {
        name: "Current".into(),
        institution: None,
        account_type: CashAccountType::Current,
        balance_cents,
        interest_rate_bps: None,
    };
    match draft.validated() {
        Ok(valid) => {
            assert!(accepted);
            assert_eq!(valid.balance_cents, balance_cents);
        }
        Err(violation) => {
            assert!(!accepted);
            assert_eq!(violation.field(), "balanceCents");
        }
    }
}

#[rstest]
#[case(100_000, 150_000, Some(50.0))]
#[case(30_000, 20_000, Some(-33.33))]
#[case(0, 5_000, None)]
fn fixed_asset_appreciation(
    #[case] purchase: i64,
    #[case] current: i64,
    #[case] expected: Option<f64>,
) {
    let asset = FixedAsset {
        id: Uuid::new_v4(),
        name: "Watch".into(),
        category: None,
        purchase_date: None,
        purchase_price_cents: purchase,
        current_value_cents: current,
        created_at: Utc::now(),
    };
    assert_eq!(asset.appreciation_cents(), current - purchase);
    assert_eq!(asset.appreciation_percent(), expected);
}

#[test]
fn buy_requires_symbol() {
    let draft = TransactionDraft {
        symbol: Some("  ".into()),
        kind: TransactionKind::Buy,
        quantity: Some(1.0),
        price_cents: Some(100),
        amount_cents: 100,
        occurred_on: NaiveDate::from_ymd_opt(2026, 1, 2).expect("date"),
        notes: None,
    };
    assert_eq!(draft.validated().expect_err("symbol").field(), "symbol");
}

#[test]
fn holding_symbol_is_upper_cased() {
    let draft = HoldingDraft {
        symbol: " vwrl ".into(),
        name: None,
        asset_class: AssetClass::Etf,
        quantity: 1.0,
        average_cost_cents: 1,
        current_price_cents: 1,
    }
    .validated()
    .expect("valid holding");
    assert_eq!(draft.symbol, "VWRL");
}

#[test]
fn interest_rate_must_be_in_range() {
    let draft = CashAccountDraft {
        name: "Saver".into(),
        institution: None,
        account_type: CashAccountType::Savings,
        balance_cents: 0,
        interest_rate_bps: Some(20_000),
    };
    assert_eq!(
        draft.validated().expect_err("rate").code(),
        "out_of_range"
    );
}
