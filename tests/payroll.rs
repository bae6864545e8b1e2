mod common;

use common::{seed_employee, setup_pool};
use sqlx::SqlitePool;

use tcms::error::PayrollError;
use tcms::model::adjustment::AdjustmentType;
use tcms::model::salary_record::SalaryRecord;
use tcms::payroll::ledger::{self, NewAdjustment};
use tcms::payroll::store::{self, NewSalaryRecord};
use tcms::payroll::engine;

async fn add(
    pool: &SqlitePool,
    salary_id: i64,
    kind: AdjustmentType,
    amount: f64,
    reason: &str,
) -> Result<tcms::model::adjustment::Adjustment, PayrollError> {
    ledger::add_adjustment(
        pool,
        NewAdjustment {
            salary_id,
            kind,
            amount,
            reason: reason.to_string(),
            description: None,
        },
    )
    .await
}

async fn only_record_for(pool: &SqlitePool, month: i32, year: i32) -> SalaryRecord {
    let mut records = engine::list_for_period(pool, month, year, None).await.unwrap();
    assert_eq!(records.len(), 1);
    records.remove(0)
}

#[actix_web::test]
async fn generation_snapshots_base_and_adjustments_recompute_net() {
    let pool = setup_pool().await;
    seed_employee(&pool, "EMP-001", 5000.0, "active").await;

    let generated = engine::generate_for_period(&pool, 3, 2025).await.unwrap();
    assert_eq!(generated, 1);

    let record = only_record_for(&pool, 3, 2025).await;
    assert_eq!(record.base_salary, 5000.0);
    assert_eq!(record.total_deductions, 0.0);
    assert_eq!(record.total_bonuses, 0.0);
    assert_eq!(record.net_salary, 5000.0);
    assert_eq!(record.status, "pending");

    add(&pool, record.id, AdjustmentType::Deduction, 200.0, "late")
        .await
        .unwrap();
    let record = store::fetch(&pool, record.id).await.unwrap();
    assert_eq!(record.total_deductions, 200.0);
    assert_eq!(record.net_salary, 4800.0);

    add(&pool, record.id, AdjustmentType::Bonus, 300.0, "performance")
        .await
        .unwrap();
    let record = store::fetch(&pool, record.id).await.unwrap();
    assert_eq!(record.total_bonuses, 300.0);
    assert_eq!(record.net_salary, 5100.0);

    // The derived value always equals the formula over the current totals.
    assert_eq!(
        record.net_salary,
        record.base_salary - record.total_deductions + record.total_bonuses
    );
}

#[actix_web::test]
async fn generation_is_idempotent_and_only_picks_up_new_employees() {
    let pool = setup_pool().await;
    seed_employee(&pool, "EMP-001", 5000.0, "active").await;

    assert_eq!(engine::generate_for_period(&pool, 3, 2025).await.unwrap(), 1);
    let before = only_record_for(&pool, 3, 2025).await;

    // Re-running generates nothing and leaves the existing record untouched.
    assert_eq!(engine::generate_for_period(&pool, 3, 2025).await.unwrap(), 0);
    let after = only_record_for(&pool, 3, 2025).await;
    assert_eq!(after.id, before.id);
    assert_eq!(after.net_salary, before.net_salary);

    // A new hire shows up on the next run without duplicating the first.
    seed_employee(&pool, "EMP-002", 4000.0, "active").await;
    assert_eq!(engine::generate_for_period(&pool, 3, 2025).await.unwrap(), 1);
    let records = engine::list_for_period(&pool, 3, 2025, None).await.unwrap();
    assert_eq!(records.len(), 2);
}

#[actix_web::test]
async fn generation_skips_inactive_employees() {
    let pool = setup_pool().await;
    let active = seed_employee(&pool, "EMP-001", 5000.0, "active").await;
    seed_employee(&pool, "EMP-002", 4000.0, "inactive").await;

    assert_eq!(engine::generate_for_period(&pool, 1, 2025).await.unwrap(), 1);

    let records = engine::list_for_period(&pool, 1, 2025, None).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].employee_id, active);
}

#[actix_web::test]
async fn manual_create_rejects_duplicates() {
    let pool = setup_pool().await;
    let employee_id = seed_employee(&pool, "EMP-001", 5000.0, "active").await;

    let record = store::create(
        &pool,
        NewSalaryRecord {
            employee_id,
            month: 3,
            year: 2025,
            base_salary: 5000.0,
            notes: Some("march payroll".to_string()),
        },
    )
    .await
    .unwrap();
    assert_eq!(record.net_salary, 5000.0);
    assert_eq!(record.notes.as_deref(), Some("march payroll"));

    let err = store::create(
        &pool,
        NewSalaryRecord {
            employee_id,
            month: 3,
            year: 2025,
            base_salary: 5000.0,
            notes: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, PayrollError::DuplicateRecord));

    // Bulk generation treats the existing record as a skip, not a failure.
    assert_eq!(engine::generate_for_period(&pool, 3, 2025).await.unwrap(), 0);
}

#[actix_web::test]
async fn paid_records_are_locked() {
    let pool = setup_pool().await;
    seed_employee(&pool, "EMP-001", 5000.0, "active").await;
    engine::generate_for_period(&pool, 3, 2025).await.unwrap();
    let record = only_record_for(&pool, 3, 2025).await;

    let kept = add(&pool, record.id, AdjustmentType::Deduction, 200.0, "late")
        .await
        .unwrap();

    let paid = store::mark_paid(&pool, record.id).await.unwrap();
    assert_eq!(paid.status, "paid");
    assert_eq!(paid.net_salary, 4800.0);

    let err = add(&pool, record.id, AdjustmentType::Bonus, 100.0, "too late")
        .await
        .unwrap_err();
    assert!(matches!(err, PayrollError::RecordLocked));

    let err = ledger::remove_adjustment(&pool, kept.id).await.unwrap_err();
    assert!(matches!(err, PayrollError::RecordLocked));

    let err = store::delete(&pool, record.id).await.unwrap_err();
    assert!(matches!(err, PayrollError::InvalidTransition));

    let err = store::mark_paid(&pool, record.id).await.unwrap_err();
    assert!(matches!(err, PayrollError::InvalidTransition));

    // Nothing about the record moved while the calls were being refused.
    let record = store::fetch(&pool, record.id).await.unwrap();
    assert_eq!(record.status, "paid");
    assert_eq!(record.net_salary, 4800.0);
}

#[actix_web::test]
async fn cancelled_records_are_terminal_too() {
    let pool = setup_pool().await;
    seed_employee(&pool, "EMP-001", 5000.0, "active").await;
    engine::generate_for_period(&pool, 3, 2025).await.unwrap();
    let record = only_record_for(&pool, 3, 2025).await;

    let cancelled = store::cancel(&pool, record.id).await.unwrap();
    assert_eq!(cancelled.status, "cancelled");

    let err = add(&pool, record.id, AdjustmentType::Bonus, 50.0, "oops")
        .await
        .unwrap_err();
    assert!(matches!(err, PayrollError::RecordLocked));

    let err = store::mark_paid(&pool, record.id).await.unwrap_err();
    assert!(matches!(err, PayrollError::InvalidTransition));

    let err = store::cancel(&pool, record.id).await.unwrap_err();
    assert!(matches!(err, PayrollError::InvalidTransition));

    let err = store::delete(&pool, record.id).await.unwrap_err();
    assert!(matches!(err, PayrollError::InvalidTransition));
}

#[actix_web::test]
async fn non_positive_amounts_are_rejected_before_any_write() {
    let pool = setup_pool().await;
    seed_employee(&pool, "EMP-001", 5000.0, "active").await;
    engine::generate_for_period(&pool, 3, 2025).await.unwrap();
    let record = only_record_for(&pool, 3, 2025).await;

    for amount in [0.0, -5.0] {
        let err = add(&pool, record.id, AdjustmentType::Deduction, amount, "bad")
            .await
            .unwrap_err();
        assert!(matches!(err, PayrollError::AmountInvalid));
    }

    let record = store::fetch(&pool, record.id).await.unwrap();
    assert_eq!(record.net_salary, 5000.0);
    assert!(ledger::list_for_salary(&pool, record.id).await.unwrap().is_empty());
}

#[actix_web::test]
async fn removing_an_adjustment_recomputes_totals() {
    let pool = setup_pool().await;
    seed_employee(&pool, "EMP-001", 5000.0, "active").await;
    engine::generate_for_period(&pool, 3, 2025).await.unwrap();
    let record = only_record_for(&pool, 3, 2025).await;

    let deduction = add(&pool, record.id, AdjustmentType::Deduction, 200.0, "late")
        .await
        .unwrap();
    add(&pool, record.id, AdjustmentType::Bonus, 300.0, "performance")
        .await
        .unwrap();

    ledger::remove_adjustment(&pool, deduction.id).await.unwrap();

    let record = store::fetch(&pool, record.id).await.unwrap();
    assert_eq!(record.total_deductions, 0.0);
    assert_eq!(record.total_bonuses, 300.0);
    assert_eq!(record.net_salary, 5300.0);

    let remaining = ledger::list_for_salary(&pool, record.id).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].kind, "bonus");

    let err = ledger::remove_adjustment(&pool, deduction.id).await.unwrap_err();
    assert!(matches!(err, PayrollError::AdjustmentNotFound));
}

#[actix_web::test]
async fn adjustments_list_in_creation_order_with_parent_employee() {
    let pool = setup_pool().await;
    let employee_id = seed_employee(&pool, "EMP-001", 5000.0, "active").await;
    engine::generate_for_period(&pool, 3, 2025).await.unwrap();
    let record = only_record_for(&pool, 3, 2025).await;

    for reason in ["first", "second", "third"] {
        add(&pool, record.id, AdjustmentType::Bonus, 10.0, reason)
            .await
            .unwrap();
    }

    let listed = ledger::list_for_salary(&pool, record.id).await.unwrap();
    let reasons: Vec<&str> = listed.iter().map(|a| a.reason.as_str()).collect();
    assert_eq!(reasons, ["first", "second", "third"]);
    assert!(listed.windows(2).all(|w| w[0].id < w[1].id));
    // Denormalized audit column always mirrors the owning record.
    assert!(listed.iter().all(|a| a.employee_id == employee_id));
}

#[actix_web::test]
async fn deleting_a_pending_record_cascades_to_its_ledger() {
    let pool = setup_pool().await;
    seed_employee(&pool, "EMP-001", 5000.0, "active").await;
    engine::generate_for_period(&pool, 3, 2025).await.unwrap();
    let record = only_record_for(&pool, 3, 2025).await;

    add(&pool, record.id, AdjustmentType::Deduction, 100.0, "late")
        .await
        .unwrap();
    add(&pool, record.id, AdjustmentType::Bonus, 100.0, "even")
        .await
        .unwrap();

    store::delete(&pool, record.id).await.unwrap();

    let err = store::fetch(&pool, record.id).await.unwrap_err();
    assert!(matches!(err, PayrollError::RecordNotFound));

    let orphans =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM salary_adjustments WHERE salary_id = ?")
            .bind(record.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(orphans, 0);
}

#[actix_web::test]
async fn base_salary_is_a_snapshot_not_a_reference() {
    let pool = setup_pool().await;
    let employee_id = seed_employee(&pool, "EMP-001", 5000.0, "active").await;
    engine::generate_for_period(&pool, 3, 2025).await.unwrap();
    let record = only_record_for(&pool, 3, 2025).await;

    // A raise after generation must not leak into the existing record,
    // not even through a recompute.
    sqlx::query("UPDATE employees SET base_salary = 9000.0 WHERE id = ?")
        .bind(employee_id)
        .execute(&pool)
        .await
        .unwrap();

    add(&pool, record.id, AdjustmentType::Bonus, 100.0, "spot")
        .await
        .unwrap();
    let record = store::fetch(&pool, record.id).await.unwrap();
    assert_eq!(record.base_salary, 5000.0);
    assert_eq!(record.net_salary, 5100.0);

    // The next period snapshots the new figure.
    engine::generate_for_period(&pool, 4, 2025).await.unwrap();
    let next = only_record_for(&pool, 4, 2025).await;
    assert_eq!(next.base_salary, 9000.0);
}

#[actix_web::test]
async fn yearly_statistics_split_by_status() {
    let pool = setup_pool().await;
    let e1 = seed_employee(&pool, "EMP-001", 5000.0, "active").await;
    seed_employee(&pool, "EMP-002", 6000.0, "active").await;

    engine::generate_for_period(&pool, 3, 2025).await.unwrap();
    let records = engine::list_for_period(&pool, 3, 2025, None).await.unwrap();

    // E1 stays pending at 4800, E2 gets paid at 6000.
    let r1 = records.iter().find(|r| r.employee_id == e1).unwrap();
    add(&pool, r1.id, AdjustmentType::Deduction, 200.0, "late")
        .await
        .unwrap();
    let r2 = records.iter().find(|r| r.employee_id != e1).unwrap();
    store::mark_paid(&pool, r2.id).await.unwrap();

    let stats = engine::period_statistics(&pool, 2025).await.unwrap();
    assert_eq!(stats.total_pending, 4800.0);
    assert_eq!(stats.total_paid, 6000.0);
    assert_eq!(stats.employee_count, 2);

    // Another year does not bleed in.
    let empty = engine::period_statistics(&pool, 2024).await.unwrap();
    assert_eq!(empty.total_pending, 0.0);
    assert_eq!(empty.total_paid, 0.0);
    assert_eq!(empty.employee_count, 0);
}

#[actix_web::test]
async fn cancelled_records_count_employees_but_not_totals() {
    let pool = setup_pool().await;
    seed_employee(&pool, "EMP-001", 5000.0, "active").await;
    let e2 = seed_employee(&pool, "EMP-002", 7000.0, "active").await;

    engine::generate_for_period(&pool, 6, 2025).await.unwrap();
    let records = engine::list_for_period(&pool, 6, 2025, None).await.unwrap();
    let r2 = records.iter().find(|r| r.employee_id == e2).unwrap();
    store::cancel(&pool, r2.id).await.unwrap();

    let stats = engine::period_statistics(&pool, 2025).await.unwrap();
    assert_eq!(stats.total_pending, 5000.0);
    assert_eq!(stats.total_paid, 0.0);
    assert_eq!(stats.employee_count, 2);
}

#[actix_web::test]
async fn period_listing_filters_by_employee() {
    let pool = setup_pool().await;
    let e1 = seed_employee(&pool, "EMP-001", 5000.0, "active").await;
    let e2 = seed_employee(&pool, "EMP-002", 6000.0, "active").await;

    engine::generate_for_period(&pool, 3, 2025).await.unwrap();

    let all = engine::list_for_period(&pool, 3, 2025, None).await.unwrap();
    assert_eq!(all.len(), 2);
    // Documented ordering: ascending employee id.
    assert!(all[0].employee_id < all[1].employee_id);

    let one = engine::list_for_period(&pool, 3, 2025, Some(e2)).await.unwrap();
    assert_eq!(one.len(), 1);
    assert_eq!(one[0].employee_id, e2);

    let none = engine::list_for_period(&pool, 4, 2025, Some(e1)).await.unwrap();
    assert!(none.is_empty());
}

#[actix_web::test]
async fn employee_history_is_newest_first() {
    let pool = setup_pool().await;
    let employee_id = seed_employee(&pool, "EMP-001", 5000.0, "active").await;

    for (month, year) in [(11, 2024), (12, 2024), (1, 2025)] {
        engine::generate_for_period(&pool, month, year).await.unwrap();
    }

    let history = engine::list_for_employee(&pool, employee_id).await.unwrap();
    let periods: Vec<(i32, i32)> = history.iter().map(|r| (r.year, r.month)).collect();
    assert_eq!(periods, [(2025, 1), (2024, 12), (2024, 11)]);
}

#[actix_web::test]
async fn out_of_range_months_are_rejected() {
    let pool = setup_pool().await;
    let employee_id = seed_employee(&pool, "EMP-001", 5000.0, "active").await;

    for month in [0, 13] {
        let err = engine::generate_for_period(&pool, month, 2025).await.unwrap_err();
        assert!(matches!(err, PayrollError::PeriodInvalid));

        let err = store::create(
            &pool,
            NewSalaryRecord {
                employee_id,
                month,
                year: 2025,
                base_salary: 5000.0,
                notes: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, PayrollError::PeriodInvalid));

        let err = engine::list_for_period(&pool, month, 2025, None).await.unwrap_err();
        assert!(matches!(err, PayrollError::PeriodInvalid));
    }
}

#[actix_web::test]
async fn missing_ids_surface_not_found() {
    let pool = setup_pool().await;

    assert!(matches!(
        store::fetch(&pool, 999).await.unwrap_err(),
        PayrollError::RecordNotFound
    ));
    assert!(matches!(
        store::mark_paid(&pool, 999).await.unwrap_err(),
        PayrollError::RecordNotFound
    ));
    assert!(matches!(
        store::delete(&pool, 999).await.unwrap_err(),
        PayrollError::RecordNotFound
    ));
    assert!(matches!(
        add(&pool, 999, AdjustmentType::Bonus, 10.0, "ghost")
            .await
            .unwrap_err(),
        PayrollError::RecordNotFound
    ));
    assert!(matches!(
        ledger::remove_adjustment(&pool, 999).await.unwrap_err(),
        PayrollError::AdjustmentNotFound
    ));
    assert!(matches!(
        ledger::list_for_salary(&pool, 999).await.unwrap_err(),
        PayrollError::RecordNotFound
    ));
}
