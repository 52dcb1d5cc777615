//! Rows for bills, subscriptions, insurance, maintenance and vehicles.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::ports::RepositoryError;
use crate::domain::{
    Bill, BillDraft, BillPayment, InsurancePolicy, InsurancePolicyDraft, MaintenanceLog,
    MaintenanceTask, MaintenanceTaskDraft, NewBillPayment, NewMaintenanceLog, ServiceRecord,
    ServiceRecordDraft, Subscription, SubscriptionDraft, Vehicle, VehicleDraft,
};

use super::super::schema::{
    bill_payments, bills, insurance_policies, maintenance_logs, maintenance_tasks, subscriptions,
    vehicle_service_records, vehicles,
};
use super::parse_label;

// ---------------------------------------------------------------------------
// Bills
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = bills)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BillRow {
    pub id: Uuid,
    pub household_id: Option<Uuid>,
    pub name: String,
    pub payee: Option<String>,
    pub amount_cents: i64,
    pub frequency: String,
    pub next_due_date: NaiveDate,
    pub auto_pay: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<BillRow> for Bill {
    type Error = RepositoryError;

    fn try_from(row: BillRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            household_id: row.household_id,
            name: row.name,
            payee: row.payee,
            amount_cents: row.amount_cents,
            frequency: parse_label(&row.frequency)?,
            next_due_date: row.next_due_date,
            auto_pay: row.auto_pay,
            notes: row.notes,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = bills, treat_none_as_null = true)]
pub(crate) struct BillFields<'a> {
    pub household_id: Option<Uuid>,
    pub name: &'a str,
    pub payee: Option<&'a str>,
    pub amount_cents: i64,
    pub frequency: &'static str,
    pub next_due_date: NaiveDate,
    pub auto_pay: bool,
    pub notes: Option<&'a str>,
}

impl<'a> From<&'a BillDraft> for BillFields<'a> {
    fn from(draft: &'a BillDraft) -> Self {
        Self {
            household_id: draft.household_id,
            name: &draft.name,
            payee: draft.payee.as_deref(),
            amount_cents: draft.amount_cents,
            frequency: draft.frequency.as_str(),
            next_due_date: draft.next_due_date,
            auto_pay: draft.auto_pay,
            notes: draft.notes.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = bill_payments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BillPaymentRow {
    pub id: Uuid,
    pub bill_id: Uuid,
    pub amount_cents: i64,
    pub paid_on: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<BillPaymentRow> for BillPayment {
    fn from(row: BillPaymentRow) -> Self {
        Self {
            id: row.id,
            bill_id: row.bill_id,
            amount_cents: row.amount_cents,
            paid_on: row.paid_on,
            notes: row.notes,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = bill_payments)]
pub(crate) struct BillPaymentFields<'a> {
    pub amount_cents: i64,
    pub paid_on: NaiveDate,
    pub notes: Option<&'a str>,
}

impl<'a> From<&'a NewBillPayment> for BillPaymentFields<'a> {
    fn from(payment: &'a NewBillPayment) -> Self {
        Self {
            amount_cents: payment.amount_cents,
            paid_on: payment.paid_on,
            notes: payment.notes.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = subscriptions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SubscriptionRow {
    pub id: Uuid,
    pub name: String,
    pub provider: Option<String>,
    pub amount_cents: i64,
    pub frequency: String,
    pub next_renewal_date: NaiveDate,
    pub category: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<SubscriptionRow> for Subscription {
    type Error = RepositoryError;

    fn try_from(row: SubscriptionRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            name: row.name,
            provider: row.provider,
            amount_cents: row.amount_cents,
            frequency: parse_label(&row.frequency)?,
            next_renewal_date: row.next_renewal_date,
            category: row.category,
            is_active: row.is_active,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = subscriptions, treat_none_as_null = true)]
pub(crate) struct SubscriptionFields<'a> {
    pub name: &'a str,
    pub provider: Option<&'a str>,
    pub amount_cents: i64,
    pub frequency: &'static str,
    pub next_renewal_date: NaiveDate,
    pub category: Option<&'a str>,
    pub is_active: bool,
}

impl<'a> From<&'a SubscriptionDraft> for SubscriptionFields<'a> {
    fn from(draft: &'a SubscriptionDraft) -> Self {
        Self {
            name: &draft.name,
            provider: draft.provider.as_deref(),
            amount_cents: draft.amount_cents,
            frequency: draft.frequency.as_str(),
            next_renewal_date: draft.next_renewal_date,
            category: draft.category.as_deref(),
            is_active: draft.is_active,
        }
    }
}

// ---------------------------------------------------------------------------
// Insurance
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = insurance_policies)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct InsurancePolicyRow {
    pub id: Uuid,
    pub household_id: Option<Uuid>,
    pub provider: String,
    pub policy_number: Option<String>,
    pub policy_type: String,
    pub premium_cents: i64,
    pub premium_frequency: String,
    pub start_date: Option<NaiveDate>,
    pub renewal_date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<InsurancePolicyRow> for InsurancePolicy {
    type Error = RepositoryError;

    fn try_from(row: InsurancePolicyRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            household_id: row.household_id,
            provider: row.provider,
            policy_number: row.policy_number,
            policy_type: parse_label(&row.policy_type)?,
            premium_cents: row.premium_cents,
            premium_frequency: parse_label(&row.premium_frequency)?,
            start_date: row.start_date,
            renewal_date: row.renewal_date,
            notes: row.notes,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = insurance_policies, treat_none_as_null = true)]
pub(crate) struct InsurancePolicyFields<'a> {
    pub household_id: Option<Uuid>,
    pub provider: &'a str,
    pub policy_number: Option<&'a str>,
    pub policy_type: &'static str,
    pub premium_cents: i64,
    pub premium_frequency: &'static str,
    pub start_date: Option<NaiveDate>,
    pub renewal_date: NaiveDate,
    pub notes: Option<&'a str>,
}

impl<'a> From<&'a InsurancePolicyDraft> for InsurancePolicyFields<'a> {
    fn from(draft: &'a InsurancePolicyDraft) -> Self {
        Self {
            household_id: draft.household_id,
            provider: &draft.provider,
            policy_number: draft.policy_number.as_deref(),
            policy_type: draft.policy_type.as_str(),
            premium_cents: draft.premium_cents,
            premium_frequency: draft.premium_frequency.as_str(),
            start_date: draft.start_date,
            renewal_date: draft.renewal_date,
            notes: draft.notes.as_deref(),
        }
    }
}

// ---------------------------------------------------------------------------
// Maintenance
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = maintenance_tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MaintenanceTaskRow {
    pub id: Uuid,
    pub household_id: Option<Uuid>,
    pub name: String,
    pub category: Option<String>,
    pub frequency: String,
    pub last_completed_on: Option<NaiveDate>,
    pub next_due_date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<MaintenanceTaskRow> for MaintenanceTask {
    type Error = RepositoryError;

    fn try_from(row: MaintenanceTaskRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            household_id: row.household_id,
            name: row.name,
            category: row.category,
            frequency: parse_label(&row.frequency)?,
            last_completed_on: row.last_completed_on,
            next_due_date: row.next_due_date,
            notes: row.notes,
            created_at: row.created_at,
        })
    }
}

/// Editable task columns; `last_completed_on` only moves through completions.
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = maintenance_tasks, treat_none_as_null = true)]
pub(crate) struct MaintenanceTaskFields<'a> {
    pub household_id: Option<Uuid>,
    pub name: &'a str,
    pub category: Option<&'a str>,
    pub frequency: &'static str,
    pub next_due_date: NaiveDate,
    pub notes: Option<&'a str>,
}

impl<'a> From<&'a MaintenanceTaskDraft> for MaintenanceTaskFields<'a> {
    fn from(draft: &'a MaintenanceTaskDraft) -> Self {
        Self {
            household_id: draft.household_id,
            name: &draft.name,
            category: draft.category.as_deref(),
            frequency: draft.frequency.as_str(),
            next_due_date: draft.next_due_date,
            notes: draft.notes.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = maintenance_logs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MaintenanceLogRow {
    pub id: Uuid,
    pub task_id: Uuid,
    pub completed_on: NaiveDate,
    pub cost_cents: Option<i64>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<MaintenanceLogRow> for MaintenanceLog {
    fn from(row: MaintenanceLogRow) -> Self {
        Self {
            id: row.id,
            task_id: row.task_id,
            completed_on: row.completed_on,
            cost_cents: row.cost_cents,
            notes: row.notes,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = maintenance_logs)]
pub(crate) struct MaintenanceLogFields<'a> {
    pub completed_on: NaiveDate,
    pub cost_cents: Option<i64>,
    pub notes: Option<&'a str>,
}

impl<'a> From<&'a NewMaintenanceLog> for MaintenanceLogFields<'a> {
    fn from(log: &'a NewMaintenanceLog) -> Self {
        Self {
            completed_on: log.completed_on,
            cost_cents: log.cost_cents,
            notes: log.notes.as_deref(),
        }
    }
}

// ---------------------------------------------------------------------------
// Vehicles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = vehicles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct VehicleRow {
    pub id: Uuid,
    pub household_id: Option<Uuid>,
    pub make: String,
    pub model: String,
    pub year: Option<i32>,
    pub registration: Option<String>,
    pub vin: Option<String>,
    pub mileage: Option<i32>,
    pub mot_due_date: Option<NaiveDate>,
    pub tax_due_date: Option<NaiveDate>,
    pub service_due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl From<VehicleRow> for Vehicle {
    fn from(row: VehicleRow) -> Self {
        Self {
            id: row.id,
            household_id: row.household_id,
            make: row.make,
            model: row.model,
            year: row.year,
            registration: row.registration,
            vin: row.vin,
            mileage: row.mileage,
            mot_due_date: row.mot_due_date,
            tax_due_date: row.tax_due_date,
            service_due_date: row.service_due_date,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = vehicles, treat_none_as_null = true)]
pub(crate) struct VehicleFields<'a> {
    pub household_id: Option<Uuid>,
    pub make: &'a str,
    pub model: &'a str,
    pub year: Option<i32>,
    pub registration: Option<&'a str>,
    pub vin: Option<&'a str>,
    pub mileage: Option<i32>,
    pub mot_due_date: Option<NaiveDate>,
    pub tax_due_date: Option<NaiveDate>,
    pub service_due_date: Option<NaiveDate>,
}

impl<'a> From<&'a VehicleDraft> for VehicleFields<'a> {
    fn from(draft: &'a VehicleDraft) -> Self {
        Self {
            household_id: draft.household_id,
            make: &draft.make,
            model: &draft.model,
            year: draft.year,
            registration: draft.registration.as_deref(),
            vin: draft.vin.as_deref(),
            mileage: draft.mileage,
            mot_due_date: draft.mot_due_date,
            tax_due_date: draft.tax_due_date,
            service_due_date: draft.service_due_date,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = vehicle_service_records)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ServiceRecordRow {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub serviced_on: NaiveDate,
    pub mileage: Option<i32>,
    pub description: String,
    pub cost_cents: Option<i64>,
    pub garage: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ServiceRecordRow> for ServiceRecord {
    fn from(row: ServiceRecordRow) -> Self {
        Self {
            id: row.id,
            vehicle_id: row.vehicle_id,
            serviced_on: row.serviced_on,
            mileage: row.mileage,
            description: row.description,
            cost_cents: row.cost_cents,
            garage: row.garage,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = vehicle_service_records)]
pub(crate) struct ServiceRecordFields<'a> {
    pub serviced_on: NaiveDate,
    pub mileage: Option<i32>,
    pub description: &'a str,
    pub cost_cents: Option<i64>,
    pub garage: Option<&'a str>,
}

impl<'a> From<&'a ServiceRecordDraft> for ServiceRecordFields<'a> {
    fn from(draft: &'a ServiceRecordDraft) -> Self {
        Self {
            serviced_on: draft.serviced_on,
            mileage: draft.mileage,
            description: &draft.description,
            cost_cents: draft.cost_cents,
            garage: draft.garage.as_deref(),
        }
    }
}
