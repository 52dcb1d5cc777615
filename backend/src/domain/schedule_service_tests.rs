//! Tests for the schedule service.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{
    MockBillRepository, MockMaintenanceRepository, MockPlantRepository, MockReminderRepository,
    RepositoryError,
};
use crate::domain::{
    Bill, BillPayment, CareKind, CareLog, ErrorCode, Frequency, MaintenanceLog, MaintenanceTask,
    Plant, ReminderSchedule,
};

type Service = ScheduleService<
    MockBillRepository,
    MockMaintenanceRepository,
    MockPlantRepository,
    MockReminderRepository,
>;

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 15, 10, 30, 0)
        .single()
        .expect("valid fixture timestamp")
}

fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, m, d).expect("valid date")
}

#[derive(Default)]
struct Repos {
    bills: MockBillRepository,
    maintenance: MockMaintenanceRepository,
    plants: MockPlantRepository,
    reminders: MockReminderRepository,
}

impl Repos {
    fn into_service(self) -> Service {
        ScheduleService::new(
            Arc::new(self.bills),
            Arc::new(self.maintenance),
            Arc::new(self.plants),
            Arc::new(self.reminders),
            Arc::new(FixtureClock { utc_now: now() }),
        )
    }
}

#[fixture]
fn owner() -> UserId {
    UserId::random()
}

fn bill(next_due_date: NaiveDate) -> Bill {
    Bill {
        id: Uuid::new_v4(),
        household_id: None,
        name: "Council tax".into(),
        payee: None,
        amount_cents: 15_000,
        frequency: Frequency::Monthly,
        next_due_date,
        auto_pay: false,
        notes: None,
        created_at: now(),
    }
}

#[rstest]
#[tokio::test]
async fn payment_defaults_to_bill_amount_and_today(owner: UserId) {
    let bill = bill(date(3, 10));
    let bill_id = bill.id;
    let mut repos = Repos::default();
    let found = bill.clone();
    repos
        .bills
        .expect_find()
        .times(1)
        .return_once(move |_, _| Ok(found));
    repos
        .bills
        .expect_record_payment()
        .withf(|_, _, payment: &NewBillPayment, due: &Transition<NaiveDate>| {
            payment.amount_cents == 15_000
                && payment.paid_on == date(3, 15)
                && due.from == date(3, 10)
                && due.to == date(4, 10)
        })
        .times(1)
        .return_once(move |_, id, payment, due| {
            Ok(BillPaymentOutcome {
                payment: BillPayment {
                    id: Uuid::new_v4(),
                    bill_id: id,
                    amount_cents: payment.amount_cents,
                    paid_on: payment.paid_on,
                    notes: None,
                    created_at: now(),
                },
                bill: Bill {
                    next_due_date: due.to,
                    ..bill
                },
            })
        });

    let outcome = repos
        .into_service()
        .record_bill_payment(&owner, bill_id, PaymentRequest::default())
        .await
        .expect("payment recorded");
    assert_eq!(outcome.bill.next_due_date, date(4, 10));
    assert_eq!(outcome.payment.bill_id, bill_id);
}

#[rstest]
#[tokio::test]
async fn early_payment_still_advances_one_period(owner: UserId) {
    let bill = bill(date(3, 20));
    let mut repos = Repos::default();
    let found = bill.clone();
    repos.bills.expect_find().return_once(move |_, _| Ok(found));
    repos
        .bills
        .expect_record_payment()
        .withf(|_, _, payment: &NewBillPayment, due: &Transition<NaiveDate>| {
            payment.amount_cents == 9_900 && due.to == date(4, 20)
        })
        .times(1)
        .return_once(|_, _, _, _| Err(RepositoryError::query("stop here")));

    let request = PaymentRequest {
        amount_cents: Some(9_900),
        paid_on: Some(date(3, 12)),
        notes: None,
    };
    let error = repos
        .into_service()
        .record_bill_payment(&owner, bill.id, request)
        .await
        .expect_err("repository stub fails");
    assert_eq!(error.code(), ErrorCode::InternalError);
}

#[rstest]
#[tokio::test]
async fn negative_payment_is_rejected_before_persisting(owner: UserId) {
    let bill = bill(date(3, 20));
    let mut repos = Repos::default();
    let found = bill.clone();
    repos.bills.expect_find().return_once(move |_, _| Ok(found));
    repos.bills.expect_record_payment().times(0);

    let request = PaymentRequest {
        amount_cents: Some(-1),
        ..PaymentRequest::default()
    };
    let error = repos
        .into_service()
        .record_bill_payment(&owner, bill.id, request)
        .await
        .expect_err("negative amount");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn paying_a_missing_bill_is_not_found(owner: UserId) {
    let mut repos = Repos::default();
    repos
        .bills
        .expect_find()
        .return_once(|_, _| Err(RepositoryError::not_found("bill")));

    let error = repos
        .into_service()
        .record_bill_payment(&owner, Uuid::new_v4(), PaymentRequest::default())
        .await
        .expect_err("missing bill");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn completion_reschedules_from_completion_date(owner: UserId) {
    let task = MaintenanceTask {
        id: Uuid::new_v4(),
        household_id: None,
        name: "Service boiler".into(),
        category: None,
        frequency: Frequency::Annually,
        last_completed_on: None,
        next_due_date: date(1, 31),
        notes: None,
        created_at: now(),
    };
    let task_id = task.id;
    let mut repos = Repos::default();
    let found = task.clone();
    repos
        .maintenance
        .expect_find()
        .return_once(move |_, _| Ok(found));
    repos
        .maintenance
        .expect_record_completion()
        .withf(|_, _, log: &NewMaintenanceLog, due: &Transition<NaiveDate>| {
            log.completed_on == date(3, 15)
                && due.from == date(1, 31)
                && due.to == NaiveDate::from_ymd_opt(2027, 3, 15).expect("valid date")
        })
        .times(1)
        .return_once(move |_, id, log, due| {
            Ok(MaintenanceCompletion {
                log: MaintenanceLog {
                    id: Uuid::new_v4(),
                    task_id: id,
                    completed_on: log.completed_on,
                    cost_cents: log.cost_cents,
                    notes: log.notes.clone(),
                    created_at: now(),
                },
                task: MaintenanceTask {
                    last_completed_on: Some(log.completed_on),
                    next_due_date: due.to,
                    ..task
                },
            })
        });

    let request = CompletionRequest {
        cost_cents: Some(8_500),
        ..CompletionRequest::default()
    };
    let completion = repos
        .into_service()
        .complete_maintenance_task(&owner, task_id, request)
        .await
        .expect("task completed");
    assert_eq!(completion.task.last_completed_on, Some(date(3, 15)));
    assert_eq!(completion.log.cost_cents, Some(8_500));
}

fn fern() -> Plant {
    Plant {
        id: Uuid::new_v4(),
        name: "Fern".into(),
        species: None,
        location: None,
        acquired_on: None,
        watering_frequency: 3,
        fertilising_frequency: Some(14),
        last_watered_on: Some(date(3, 10)),
        last_fertilised_on: Some(date(3, 1)),
        is_active: true,
        notes: None,
        created_at: now(),
    }
}

#[rstest]
#[case(CareKind::Water, Some(date(3, 15)), Some(date(3, 1)))]
#[case(CareKind::Fertilise, Some(date(3, 10)), Some(date(3, 15)))]
#[case(CareKind::Repot, Some(date(3, 10)), Some(date(3, 1)))]
#[tokio::test]
async fn care_updates_matching_date_only(
    owner: UserId,
    #[case] kind: CareKind,
    #[case] watered: Option<NaiveDate>,
    #[case] fertilised: Option<NaiveDate>,
) {
    let plant = fern();
    let plant_id = plant.id;
    let mut repos = Repos::default();
    let found = plant.clone();
    repos.plants.expect_find().return_once(move |_, _| Ok(found));
    repos
        .plants
        .expect_record_care()
        .withf(move |_, _, log: &NewCareLog, dates: &Transition<CareDates>| {
            log.kind == kind
                && dates.from.last_watered_on == Some(date(3, 10))
                && dates.to.last_watered_on == watered
                && dates.to.last_fertilised_on == fertilised
        })
        .times(1)
        .return_once(move |_, id, log, dates| {
            Ok(PlantCareOutcome {
                log: CareLog {
                    id: Uuid::new_v4(),
                    plant_id: id,
                    kind: log.kind,
                    performed_on: log.performed_on,
                    notes: None,
                    created_at: now(),
                },
                plant: Plant {
                    last_watered_on: dates.to.last_watered_on,
                    last_fertilised_on: dates.to.last_fertilised_on,
                    ..plant
                },
            })
        });

    let request = CareRequest {
        kind,
        performed_on: None,
        notes: None,
    };
    let outcome = repos
        .into_service()
        .log_plant_care(&owner, plant_id, request)
        .await
        .expect("care logged");
    assert_eq!(outcome.plant.last_watered_on, watered);
    assert_eq!(outcome.log.performed_on, date(3, 15));
}

fn reminder(frequency: Option<Frequency>) -> Reminder {
    Reminder {
        id: Uuid::new_v4(),
        title: "Renew passport".into(),
        description: None,
        due_date: date(3, 10),
        frequency,
        snoozed_until: None,
        completed_at: None,
        created_at: now(),
    }
}

fn apply(reminder: Reminder, schedule: Transition<ReminderSchedule>) -> Reminder {
    Reminder {
        due_date: schedule.to.due_date,
        snoozed_until: schedule.to.snoozed_until,
        completed_at: schedule.to.completed_at,
        ..reminder
    }
}

#[rstest]
#[tokio::test]
async fn snooze_counts_from_today(owner: UserId) {
    let reminder = reminder(None);
    let id = reminder.id;
    let mut repos = Repos::default();
    let found = reminder.clone();
    repos
        .reminders
        .expect_find()
        .return_once(move |_, _| Ok(found));
    repos
        .reminders
        .expect_set_schedule()
        .withf(|_, _, schedule: &Transition<ReminderSchedule>| {
            schedule.from.snoozed_until.is_none() && schedule.to.snoozed_until == Some(date(3, 22))
        })
        .times(1)
        .return_once(move |_, _, schedule| Ok(apply(reminder, schedule)));

    let snoozed = repos
        .into_service()
        .snooze_reminder(&owner, id, 7)
        .await
        .expect("snoozed");
    assert_eq!(snoozed.snoozed_until, Some(date(3, 22)));
}

#[rstest]
#[tokio::test]
async fn snooze_outside_bounds_is_invalid(owner: UserId) {
    let reminder = reminder(None);
    let id = reminder.id;
    let mut repos = Repos::default();
    repos
        .reminders
        .expect_find()
        .return_once(move |_, _| Ok(reminder));
    repos.reminders.expect_set_schedule().times(0);

    let error = repos
        .into_service()
        .snooze_reminder(&owner, id, 0)
        .await
        .expect_err("zero days");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn completing_recurring_reminder_moves_due_date(owner: UserId) {
    let reminder = reminder(Some(Frequency::Weekly));
    let id = reminder.id;
    let mut repos = Repos::default();
    let found = reminder.clone();
    repos
        .reminders
        .expect_find()
        .return_once(move |_, _| Ok(found));
    repos
        .reminders
        .expect_set_schedule()
        .withf(|_, _, schedule: &Transition<ReminderSchedule>| {
            schedule.to.due_date == date(3, 17) && schedule.to.completed_at.is_none()
        })
        .times(1)
        .return_once(move |_, _, schedule| Ok(apply(reminder, schedule)));

    let completed = repos
        .into_service()
        .complete_reminder(&owner, id)
        .await
        .expect("completed");
    assert_eq!(completed.due_date, date(3, 17));
}

#[rstest]
#[tokio::test]
async fn completing_one_off_reminder_stamps_now(owner: UserId) {
    let reminder = reminder(None);
    let id = reminder.id;
    let mut repos = Repos::default();
    let found = reminder.clone();
    repos
        .reminders
        .expect_find()
        .return_once(move |_, _| Ok(found));
    repos
        .reminders
        .expect_set_schedule()
        .return_once(move |_, _, schedule| Ok(apply(reminder, schedule)));

    let completed = repos
        .into_service()
        .complete_reminder(&owner, id)
        .await
        .expect("completed");
    assert_eq!(completed.completed_at, Some(now()));
}

#[rstest]
#[tokio::test]
async fn completing_twice_is_a_conflict(owner: UserId) {
    let mut reminder = reminder(None);
    reminder.completed_at = Some(now());
    let id = reminder.id;
    let mut repos = Repos::default();
    repos
        .reminders
        .expect_find()
        .return_once(move |_, _| Ok(reminder));
    repos.reminders.expect_set_schedule().times(0);

    let error = repos
        .into_service()
        .complete_reminder(&owner, id)
        .await
        .expect_err("already completed");
    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn racing_completion_is_a_conflict(owner: UserId) {
    let reminder = reminder(None);
    let id = reminder.id;
    let mut repos = Repos::default();
    let found = reminder.clone();
    repos
        .reminders
        .expect_find()
        .return_once(move |_, _| Ok(found));
    repos
        .reminders
        .expect_set_schedule()
        .withf(|_, _, schedule: &Transition<ReminderSchedule>| {
            schedule.from.completed_at.is_none() && schedule.to.completed_at == Some(now())
        })
        .times(1)
        .return_once(|_, _, _| Err(RepositoryError::stale("reminder")));

    let error = repos
        .into_service()
        .complete_reminder(&owner, id)
        .await
        .expect_err("row changed underneath");
    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn stale_bill_payment_is_a_conflict(owner: UserId) {
    let bill = bill(date(3, 10));
    let bill_id = bill.id;
    let mut repos = Repos::default();
    repos.bills.expect_find().return_once(move |_, _| Ok(bill));
    repos
        .bills
        .expect_record_payment()
        .times(1)
        .return_once(|_, _, _, _| Err(RepositoryError::stale("bill")));

    let error = repos
        .into_service()
        .record_bill_payment(&owner, bill_id, PaymentRequest::default())
        .await
        .expect_err("bill moved on");
    assert_eq!(error.code(), ErrorCode::Conflict);
}
