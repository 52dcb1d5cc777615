//! Ports for portfolios (holdings and transactions) and owned assets.
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    CashAccount, CashAccountDraft, FixedAsset, FixedAssetDraft, Holding, HoldingDraft, Portfolio,
    PortfolioDraft, PortfolioTransaction, TransactionDraft, TransactionFilter, UserId,
};

use super::RepositoryError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PortfolioRepository: Send + Sync {
    async fn create_portfolio(
        &self,
        owner: &UserId,
        draft: &PortfolioDraft,
    ) -> Result<Portfolio, RepositoryError>;

    async fn list_portfolios(&self, owner: &UserId) -> Result<Vec<Portfolio>, RepositoryError>;

    async fn find_portfolio(&self, owner: &UserId, id: Uuid)
    -> Result<Portfolio, RepositoryError>;

    async fn update_portfolio(
        &self,
        owner: &UserId,
        id: Uuid,
        draft: &PortfolioDraft,
    ) -> Result<Portfolio, RepositoryError>;

    /// Delete a portfolio with its holdings and transactions.
    async fn delete_portfolio(&self, owner: &UserId, id: Uuid) -> Result<(), RepositoryError>;

    /// Holdings of one portfolio ordered by symbol.
    async fn list_holdings(
        &self,
        owner: &UserId,
        portfolio_id: Uuid,
    ) -> Result<Vec<Holding>, RepositoryError>;

    /// Holdings across every portfolio of `owner`.
    async fn list_all_holdings(&self, owner: &UserId) -> Result<Vec<Holding>, RepositoryError>;

    /// Insert a holding; a repeated symbol in the portfolio is `AlreadyExists`.
    async fn create_holding(
        &self,
        owner: &UserId,
        portfolio_id: Uuid,
        draft: &HoldingDraft,
    ) -> Result<Holding, RepositoryError>;

    async fn update_holding(
        &self,
        owner: &UserId,
        id: Uuid,
        draft: &HoldingDraft,
    ) -> Result<Holding, RepositoryError>;

    async fn delete_holding(&self, owner: &UserId, id: Uuid) -> Result<(), RepositoryError>;

    async fn create_transaction(
        &self,
        owner: &UserId,
        portfolio_id: Uuid,
        draft: &TransactionDraft,
    ) -> Result<PortfolioTransaction, RepositoryError>;

    /// Transactions matching `filter`, newest first.
    async fn list_transactions(
        &self,
        owner: &UserId,
        portfolio_id: Uuid,
        filter: TransactionFilter,
    ) -> Result<Vec<PortfolioTransaction>, RepositoryError>;

    async fn delete_transaction(&self, owner: &UserId, id: Uuid) -> Result<(), RepositoryError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetRepository: Send + Sync {
    async fn create_cash_account(
        &self,
        owner: &UserId,
        draft: &CashAccountDraft,
    ) -> Result<CashAccount, RepositoryError>;

    async fn list_cash_accounts(&self, owner: &UserId)
    -> Result<Vec<CashAccount>, RepositoryError>;

    async fn find_cash_account(
        &self,
        owner: &UserId,
        id: Uuid,
    ) -> Result<CashAccount, RepositoryError>;

    async fn update_cash_account(
        &self,
        owner: &UserId,
        id: Uuid,
        draft: &CashAccountDraft,
    ) -> Result<CashAccount, RepositoryError>;

    async fn delete_cash_account(&self, owner: &UserId, id: Uuid) -> Result<(), RepositoryError>;

    async fn create_fixed_asset(
        &self,
        owner: &UserId,
        draft: &FixedAssetDraft,
    ) -> Result<FixedAsset, RepositoryError>;

    async fn list_fixed_assets(&self, owner: &UserId) -> Result<Vec<FixedAsset>, RepositoryError>;

    async fn find_fixed_asset(
        &self,
        owner: &UserId,
        id: Uuid,
    ) -> Result<FixedAsset, RepositoryError>;

    async fn update_fixed_asset(
        &self,
        owner: &UserId,
        id: Uuid,
        draft: &FixedAssetDraft,
    ) -> Result<FixedAsset, RepositoryError>;

    async fn delete_fixed_asset(&self, owner: &UserId, id: Uuid) -> Result<(), RepositoryError>;
}
