//! Ports for bills, bill payments and subscriptions.
use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{
    Bill, BillDraft, BillFilter, BillPayment, BillPaymentOutcome, NewBillPayment, Subscription,
    SubscriptionDraft, Transition, UserId,
};

use super::RepositoryError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BillRepository: Send + Sync {
    /// Insert a bill; a household id must belong to `owner`.
    async fn create(&self, owner: &UserId, draft: &BillDraft) -> Result<Bill, RepositoryError>;

    /// Bills ordered by next due date.
    async fn list(&self, owner: &UserId, filter: BillFilter) -> Result<Vec<Bill>, RepositoryError>;

    /// Bills due on or before `until`, overdue ones included.
    async fn list_due_by(
        &self,
        owner: &UserId,
        until: NaiveDate,
    ) -> Result<Vec<Bill>, RepositoryError>;

    async fn find(&self, owner: &UserId, id: Uuid) -> Result<Bill, RepositoryError>;

    async fn update(
        &self,
        owner: &UserId,
        id: Uuid,
        draft: &BillDraft,
    ) -> Result<Bill, RepositoryError>;

    async fn delete(&self, owner: &UserId, id: Uuid) -> Result<(), RepositoryError>;

    /// Payments for a bill, newest first.
    async fn list_payments(
        &self,
        owner: &UserId,
        bill_id: Uuid,
    ) -> Result<Vec<BillPayment>, RepositoryError>;

    /// Insert the payment and move the bill's next due date atomically.
    ///
    /// Fails with `Stale` when the stored due date is no longer `due.from`.
    async fn record_payment(
        &self,
        owner: &UserId,
        bill_id: Uuid,
        payment: &NewBillPayment,
        due: Transition<NaiveDate>,
    ) -> Result<BillPaymentOutcome, RepositoryError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    async fn create(
        &self,
        owner: &UserId,
        draft: &SubscriptionDraft,
    ) -> Result<Subscription, RepositoryError>;

    /// Subscriptions ordered by next renewal date.
    async fn list(&self, owner: &UserId) -> Result<Vec<Subscription>, RepositoryError>;

    async fn find(&self, owner: &UserId, id: Uuid) -> Result<Subscription, RepositoryError>;

    async fn update(
        &self,
        owner: &UserId,
        id: Uuid,
        draft: &SubscriptionDraft,
    ) -> Result<Subscription, RepositoryError>;

    async fn delete(&self, owner: &UserId, id: Uuid) -> Result<(), RepositoryError>;
}
