//! PostgreSQL-backed portfolio and asset repositories using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{AssetRepository, PortfolioRepository, RepositoryError};
use crate::domain::{
    CashAccount, CashAccountDraft, FixedAsset, FixedAssetDraft, Holding, HoldingDraft, Portfolio,
    PortfolioDraft, PortfolioTransaction, TransactionDraft, TransactionFilter, UserId,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::diesel_helpers::{delete_owned, owner_id, require_owned};
use super::models::{
    CashAccountFields, CashAccountRow, FixedAssetFields, FixedAssetRow, HoldingFields,
    HoldingRow, PortfolioFields, PortfolioRow, TransactionFields, TransactionRow, convert_rows,
};
use super::pool::DbPool;
use super::schema::{cash_accounts, fixed_assets, holdings, portfolio_transactions, portfolios};

const PORTFOLIO: &str = "portfolio";
const HOLDING: &str = "holding";
const TRANSACTION: &str = "transaction";

/// Diesel-backed implementation of the `PortfolioRepository` port.
///
/// Holdings and transactions cascade with their portfolio.
#[derive(Clone)]
pub struct DieselPortfolioRepository {
    pool: DbPool,
}

impl DieselPortfolioRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PortfolioRepository for DieselPortfolioRepository {
    async fn create_portfolio(
        &self,
        owner: &UserId,
        draft: &PortfolioDraft,
    ) -> Result<Portfolio, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(portfolios::table)
            .values((
                portfolios::id.eq(Uuid::new_v4()),
                portfolios::user_id.eq(owner_id(owner)),
                PortfolioFields::from(draft),
            ))
            .returning(PortfolioRow::as_returning())
            .get_result::<PortfolioRow>(&mut conn)
            .await
            .map(Portfolio::from)
            .map_err(|err| map_diesel_error(err, PORTFOLIO))
    }

    async fn list_portfolios(&self, owner: &UserId) -> Result<Vec<Portfolio>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = portfolios::table
            .filter(portfolios::user_id.eq(owner_id(owner)))
            .order(portfolios::name.asc())
            .select(PortfolioRow::as_select())
            .load::<PortfolioRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, PORTFOLIO))?;
        Ok(rows.into_iter().map(Portfolio::from).collect())
    }

    async fn find_portfolio(
        &self,
        owner: &UserId,
        id: Uuid,
    ) -> Result<Portfolio, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        portfolios::table
            .find(id)
            .filter(portfolios::user_id.eq(owner_id(owner)))
            .select(PortfolioRow::as_select())
            .first::<PortfolioRow>(&mut conn)
            .await
            .map(Portfolio::from)
            .map_err(|err| map_diesel_error(err, PORTFOLIO))
    }

    async fn update_portfolio(
        &self,
        owner: &UserId,
        id: Uuid,
        draft: &PortfolioDraft,
    ) -> Result<Portfolio, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(
            portfolios::table
                .find(id)
                .filter(portfolios::user_id.eq(owner_id(owner))),
        )
        .set(PortfolioFields::from(draft))
        .returning(PortfolioRow::as_returning())
        .get_result::<PortfolioRow>(&mut conn)
        .await
        .map(Portfolio::from)
        .map_err(|err| map_diesel_error(err, PORTFOLIO))
    }

    async fn delete_portfolio(&self, owner: &UserId, id: Uuid) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        delete_owned!(&mut conn, portfolios, id, owner_id(owner), PORTFOLIO)
    }

    async fn list_holdings(
        &self,
        owner: &UserId,
        portfolio_id: Uuid,
    ) -> Result<Vec<Holding>, RepositoryError> {
        let owner = owner_id(owner);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        require_owned!(&mut conn, portfolios, portfolio_id, owner, PORTFOLIO);
        let rows = holdings::table
            .filter(holdings::portfolio_id.eq(portfolio_id))
            .filter(holdings::user_id.eq(owner))
            .order(holdings::symbol.asc())
            .select(HoldingRow::as_select())
            .load::<HoldingRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, HOLDING))?;
        convert_rows(rows)
    }

    async fn list_all_holdings(&self, owner: &UserId) -> Result<Vec<Holding>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = holdings::table
            .filter(holdings::user_id.eq(owner_id(owner)))
            .order((holdings::portfolio_id.asc(), holdings::symbol.asc()))
            .select(HoldingRow::as_select())
            .load::<HoldingRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, HOLDING))?;
        convert_rows(rows)
    }

    async fn create_holding(
        &self,
        owner: &UserId,
        portfolio_id: Uuid,
        draft: &HoldingDraft,
    ) -> Result<Holding, RepositoryError> {
        let owner = owner_id(owner);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        require_owned!(&mut conn, portfolios, portfolio_id, owner, PORTFOLIO);
        diesel::insert_into(holdings::table)
            .values((
                holdings::id.eq(Uuid::new_v4()),
                holdings::user_id.eq(owner),
                holdings::portfolio_id.eq(portfolio_id),
                HoldingFields::from(draft),
            ))
            .returning(HoldingRow::as_returning())
            .get_result::<HoldingRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, HOLDING))?
            .try_into()
    }

    async fn update_holding(
        &self,
        owner: &UserId,
        id: Uuid,
        draft: &HoldingDraft,
    ) -> Result<Holding, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(
            holdings::table
                .find(id)
                .filter(holdings::user_id.eq(owner_id(owner))),
        )
        .set((HoldingFields::from(draft), holdings::updated_at.eq(diesel::dsl::now)))
        .returning(HoldingRow::as_returning())
        .get_result::<HoldingRow>(&mut conn)
        .await
        .map_err(|err| map_diesel_error(err, HOLDING))?
        .try_into()
    }

    async fn delete_holding(&self, owner: &UserId, id: Uuid) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        delete_owned!(&mut conn, holdings, id, owner_id(owner), HOLDING)
    }

    async fn create_transaction(
        &self,
        owner: &UserId,
        portfolio_id: Uuid,
        draft: &TransactionDraft,
    ) -> Result<PortfolioTransaction, RepositoryError> {
        let owner = owner_id(owner);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        require_owned!(&mut conn, portfolios, portfolio_id, owner, PORTFOLIO);
        diesel::insert_into(portfolio_transactions::table)
            .values((
                portfolio_transactions::id.eq(Uuid::new_v4()),
                portfolio_transactions::user_id.eq(owner),
                portfolio_transactions::portfolio_id.eq(portfolio_id),
                TransactionFields::from(draft),
            ))
            .returning(TransactionRow::as_returning())
            .get_result::<TransactionRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, TRANSACTION))?
            .try_into()
    }

    async fn list_transactions(
        &self,
        owner: &UserId,
        portfolio_id: Uuid,
        filter: TransactionFilter,
    ) -> Result<Vec<PortfolioTransaction>, RepositoryError> {
        let owner = owner_id(owner);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        require_owned!(&mut conn, portfolios, portfolio_id, owner, PORTFOLIO);
        let mut query = portfolio_transactions::table
            .filter(portfolio_transactions::portfolio_id.eq(portfolio_id))
            .filter(portfolio_transactions::user_id.eq(owner))
            .select(TransactionRow::as_select())
            .order((
                portfolio_transactions::occurred_on.desc(),
                portfolio_transactions::created_at.desc(),
            ))
            .into_boxed();
        if let Some(from) = filter.from {
            query = query.filter(portfolio_transactions::occurred_on.ge(from));
        }
        if let Some(to) = filter.to {
            query = query.filter(portfolio_transactions::occurred_on.le(to));
        }
        if let Some(kind) = filter.kind {
            query = query.filter(portfolio_transactions::kind.eq(kind.as_str()));
        }
        let rows = query
            .load::<TransactionRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, TRANSACTION))?;
        convert_rows(rows)
    }

    async fn delete_transaction(&self, owner: &UserId, id: Uuid) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        delete_owned!(
            &mut conn,
            portfolio_transactions,
            id,
            owner_id(owner),
            TRANSACTION
        )
    }
}

/// Diesel-backed implementation of the `AssetRepository` port.
#[derive(Clone)]
pub struct DieselAssetRepository {
    pool: DbPool,
}

impl DieselAssetRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

const CASH_ACCOUNT: &str = "cash account";
const FIXED_ASSET: &str = "fixed asset";

#[async_trait]
impl AssetRepository for DieselAssetRepository {
    async fn create_cash_account(
        &self,
        owner: &UserId,
        draft: &CashAccountDraft,
    ) -> Result<CashAccount, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(cash_accounts::table)
            .values((
                cash_accounts::id.eq(Uuid::new_v4()),
                cash_accounts::user_id.eq(owner_id(owner)),
                CashAccountFields::from(draft),
            ))
            .returning(CashAccountRow::as_returning())
            .get_result::<CashAccountRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, CASH_ACCOUNT))?
            .try_into()
    }

    async fn list_cash_accounts(
        &self,
        owner: &UserId,
    ) -> Result<Vec<CashAccount>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = cash_accounts::table
            .filter(cash_accounts::user_id.eq(owner_id(owner)))
            .order(cash_accounts::name.asc())
            .select(CashAccountRow::as_select())
            .load::<CashAccountRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, CASH_ACCOUNT))?;
        convert_rows(rows)
    }

    async fn find_cash_account(
        &self,
        owner: &UserId,
        id: Uuid,
    ) -> Result<CashAccount, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        cash_accounts::table
            .find(id)
            .filter(cash_accounts::user_id.eq(owner_id(owner)))
            .select(CashAccountRow::as_select())
            .first::<CashAccountRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, CASH_ACCOUNT))?
            .try_into()
    }

    async fn update_cash_account(
        &self,
        owner: &UserId,
        id: Uuid,
        draft: &CashAccountDraft,
    ) -> Result<CashAccount, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(
            cash_accounts::table
                .find(id)
                .filter(cash_accounts::user_id.eq(owner_id(owner))),
        )
        .set(CashAccountFields::from(draft))
        .returning(CashAccountRow::as_returning())
        .get_result::<CashAccountRow>(&mut conn)
        .await
        .map_err(|err| map_diesel_error(err, CASH_ACCOUNT))?
        .try_into()
    }

    async fn delete_cash_account(&self, owner: &UserId, id: Uuid) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        delete_owned!(&mut conn, cash_accounts, id, owner_id(owner), CASH_ACCOUNT)
    }

    async fn create_fixed_asset(
        &self,
        owner: &UserId,
        draft: &FixedAssetDraft,
    ) -> Result<FixedAsset, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(fixed_assets::table)
            .values((
                fixed_assets::id.eq(Uuid::new_v4()),
                fixed_assets::user_id.eq(owner_id(owner)),
                FixedAssetFields::from(draft),
            ))
            .returning(FixedAssetRow::as_returning())
            .get_result::<FixedAssetRow>(&mut conn)
            .await
            .map(FixedAsset::from)
            .map_err(|err| map_diesel_error(err, FIXED_ASSET))
    }

    async fn list_fixed_assets(&self, owner: &UserId) -> Result<Vec<FixedAsset>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = fixed_assets::table
            .filter(fixed_assets::user_id.eq(owner_id(owner)))
            .order(fixed_assets::name.asc())
            .select(FixedAssetRow::as_select())
            .load::<FixedAssetRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, FIXED_ASSET))?;
        Ok(rows.into_iter().map(FixedAsset::from).collect())
    }

    async fn find_fixed_asset(
        &self,
        owner: &UserId,
        id: Uuid,
    ) -> Result<FixedAsset, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        fixed_assets::table
            .find(id)
            .filter(fixed_assets::user_id.eq(owner_id(owner)))
            .select(FixedAssetRow::as_select())
            .first::<FixedAssetRow>(&mut conn)
            .await
            .map(FixedAsset::from)
            .map_err(|err| map_diesel_error(err, FIXED_ASSET))
    }

    async fn update_fixed_asset(
        &self,
        owner: &UserId,
        id: Uuid,
        draft: &FixedAssetDraft,
    ) -> Result<FixedAsset, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(
            fixed_assets::table
                .find(id)
                .filter(fixed_assets::user_id.eq(owner_id(owner))),
        )
        .set(FixedAssetFields::from(draft))
        .returning(FixedAssetRow::as_returning())
        .get_result::<FixedAssetRow>(&mut conn)
        .await
        .map(FixedAsset::from)
        .map_err(|err| map_diesel_error(err, FIXED_ASSET))
    }

    async fn delete_fixed_asset(&self, owner: &UserId, id: Uuid) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        delete_owned!(&mut conn, fixed_assets, id, owner_id(owner), FIXED_ASSET)
    }
}
