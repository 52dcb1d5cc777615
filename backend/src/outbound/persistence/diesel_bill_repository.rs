//! PostgreSQL-backed bill and subscription repositories using Diesel ORM.

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{BillRepository, RepositoryError, SubscriptionRepository};
use crate::domain::{
    Bill, BillDraft, BillFilter, BillPayment, BillPaymentOutcome, NewBillPayment, Subscription,
    SubscriptionDraft, Transition, UserId,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::diesel_helpers::{delete_owned, owner_id, require_owned};
use super::models::{
    BillFields, BillPaymentFields, BillPaymentRow, BillRow, SubscriptionFields, SubscriptionRow,
    convert_rows,
};
use super::pool::DbPool;
use super::schema::{bill_payments, bills, households, subscriptions};

/// Diesel-backed implementation of the `BillRepository` port.
#[derive(Clone)]
pub struct DieselBillRepository {
    pool: DbPool,
}

impl DieselBillRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BillRepository for DieselBillRepository {
    async fn create(&self, owner: &UserId, draft: &BillDraft) -> Result<Bill, RepositoryError> {
        let owner = owner_id(owner);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        if let Some(household_id) = draft.household_id {
            require_owned!(&mut conn, households, household_id, owner, "household");
        }
        diesel::insert_into(bills::table)
            .values((
                bills::id.eq(Uuid::new_v4()),
                bills::user_id.eq(owner),
                BillFields::from(draft),
            ))
            .returning(BillRow::as_returning())
            .get_result::<BillRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "bill"))?
            .try_into()
    }

    async fn list(&self, owner: &UserId, filter: BillFilter) -> Result<Vec<Bill>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = bills::table
            .filter(bills::user_id.eq(owner_id(owner)))
            .select(BillRow::as_select())
            .order((bills::next_due_date.asc(), bills::name.asc()))
            .into_boxed();
        if let Some(household_id) = filter.household_id {
            query = query.filter(bills::household_id.eq(household_id));
        }
        let rows = query
            .load::<BillRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "bill"))?;
        convert_rows(rows)
    }

    async fn list_due_by(
        &self,
        owner: &UserId,
        until: NaiveDate,
    ) -> Result<Vec<Bill>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = bills::table
            .filter(bills::user_id.eq(owner_id(owner)))
            .filter(bills::next_due_date.le(until))
            .order((bills::next_due_date.asc(), bills::name.asc()))
            .select(BillRow::as_select())
            .load::<BillRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "bill"))?;
        convert_rows(rows)
    }

    async fn find(&self, owner: &UserId, id: Uuid) -> Result<Bill, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        bills::table
            .find(id)
            .filter(bills::user_id.eq(owner_id(owner)))
            .select(BillRow::as_select())
            .first::<BillRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "bill"))?
            .try_into()
    }

    async fn update(
        &self,
        owner: &UserId,
        id: Uuid,
        draft: &BillDraft,
    ) -> Result<Bill, RepositoryError> {
        let owner = owner_id(owner);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        if let Some(household_id) = draft.household_id {
            require_owned!(&mut conn, households, household_id, owner, "household");
        }
        diesel::update(bills::table.find(id).filter(bills::user_id.eq(owner)))
            .set(BillFields::from(draft))
            .returning(BillRow::as_returning())
            .get_result::<BillRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "bill"))?
            .try_into()
    }

    async fn delete(&self, owner: &UserId, id: Uuid) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        delete_owned!(&mut conn, bills, id, owner_id(owner), "bill")
    }

    async fn list_payments(
        &self,
        owner: &UserId,
        bill_id: Uuid,
    ) -> Result<Vec<BillPayment>, RepositoryError> {
        let owner = owner_id(owner);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        require_owned!(&mut conn, bills, bill_id, owner, "bill");
        let rows = bill_payments::table
            .filter(bill_payments::bill_id.eq(bill_id))
            .filter(bill_payments::user_id.eq(owner))
            .order((bill_payments::paid_on.desc(), bill_payments::created_at.desc()))
            .select(BillPaymentRow::as_select())
            .load::<BillPaymentRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "bill payment"))?;
        Ok(rows.into_iter().map(BillPayment::from).collect())
    }

    async fn record_payment(
        &self,
        owner: &UserId,
        bill_id: Uuid,
        payment: &NewBillPayment,
        due: Transition<NaiveDate>,
    ) -> Result<BillPaymentOutcome, RepositoryError> {
        let owner = owner_id(owner);
        let fields = BillPaymentFields::from(payment);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let (payment_row, bill_row) = conn
            .transaction::<_, RepositoryError, _>(|conn| {
                async move {
                    let stored = bills::table
                        .find(bill_id)
                        .filter(bills::user_id.eq(owner))
                        .select(bills::next_due_date)
                        .for_update()
                        .first::<NaiveDate>(conn)
                        .await
                        .map_err(|err| map_diesel_error(err, "bill"))?;
                    if !due.applies_to(&stored) {
                        return Err(RepositoryError::stale("bill"));
                    }
                    let bill_row = diesel::update(bills::table.find(bill_id))
                        .set(bills::next_due_date.eq(due.to))
                        .returning(BillRow::as_returning())
                        .get_result::<BillRow>(conn)
                        .await
                        .map_err(|err| map_diesel_error(err, "bill"))?;
                    let payment_row = diesel::insert_into(bill_payments::table)
                        .values((
                            bill_payments::id.eq(Uuid::new_v4()),
                            bill_payments::user_id.eq(owner),
                            bill_payments::bill_id.eq(bill_id),
                            &fields,
                        ))
                        .returning(BillPaymentRow::as_returning())
                        .get_result::<BillPaymentRow>(conn)
                        .await
                        .map_err(|err| map_diesel_error(err, "bill payment"))?;
                    Ok((payment_row, bill_row))
                }
                .scope_boxed()
            })
            .await?;
        Ok(BillPaymentOutcome {
            payment: payment_row.into(),
            bill: bill_row.try_into()?,
        })
    }
}

/// Diesel-backed implementation of the `SubscriptionRepository` port.
#[derive(Clone)]
pub struct DieselSubscriptionRepository {
    pool: DbPool,
}

impl DieselSubscriptionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriptionRepository for DieselSubscriptionRepository {
    async fn create(
        &self,
        owner: &UserId,
        draft: &SubscriptionDraft,
    ) -> Result<Subscription, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(subscriptions::table)
            .values((
                subscriptions::id.eq(Uuid::new_v4()),
                subscriptions::user_id.eq(owner_id(owner)),
                SubscriptionFields::from(draft),
            ))
            .returning(SubscriptionRow::as_returning())
            .get_result::<SubscriptionRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "subscription"))?
            .try_into()
    }

    async fn list(&self, owner: &UserId) -> Result<Vec<Subscription>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = subscriptions::table
            .filter(subscriptions::user_id.eq(owner_id(owner)))
            .order((subscriptions::next_renewal_date.asc(), subscriptions::name.asc()))
            .select(SubscriptionRow::as_select())
            .load::<SubscriptionRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "subscription"))?;
        convert_rows(rows)
    }

    async fn find(&self, owner: &UserId, id: Uuid) -> Result<Subscription, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        subscriptions::table
            .find(id)
            .filter(subscriptions::user_id.eq(owner_id(owner)))
            .select(SubscriptionRow::as_select())
            .first::<SubscriptionRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "subscription"))?
            .try_into()
    }

    async fn update(
        &self,
        owner: &UserId,
        id: Uuid,
        draft: &SubscriptionDraft,
    ) -> Result<Subscription, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(
            subscriptions::table
                .find(id)
                .filter(subscriptions::user_id.eq(owner_id(owner))),
        )
        .set(SubscriptionFields::from(draft))
        .returning(SubscriptionRow::as_returning())
        .get_result::<SubscriptionRow>(&mut conn)
        .await
        .map_err(|err| map_diesel_error(err, "subscription"))?
        .try_into()
    }

    async fn delete(&self, owner: &UserId, id: Uuid) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        delete_owned!(&mut conn, subscriptions, id, owner_id(owner), "subscription")
    }
}
