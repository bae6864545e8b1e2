use sqlx::SqlitePool;

use crate::error::PayrollError;
use crate::model::adjustment::{Adjustment, AdjustmentType};
use crate::model::salary_record::SalaryStatus;
use crate::payroll::store;

/// Input for appending a ledger entry. `employee_id` is not taken from the
/// caller: it is copied from the owning salary record at insert time, so the
/// denormalized audit column can never drift from the parent.
pub struct NewAdjustment {
    pub salary_id: i64,
    pub kind: AdjustmentType,
    pub amount: f64,
    pub reason: String,
    pub description: Option<String>,
}

/// Appends a deduction or bonus and recomputes the parent's totals in the
/// same transaction. The parent's status is re-checked here, at write time.
pub async fn add_adjustment(
    pool: &SqlitePool,
    new: NewAdjustment,
) -> Result<Adjustment, PayrollError> {
    if new.amount <= 0.0 {
        return Err(PayrollError::AmountInvalid);
    }

    let mut tx = pool.begin().await?;

    let parent: (i64, String) =
        sqlx::query_as("SELECT employee_id, status FROM salary_records WHERE id = ?")
            .bind(new.salary_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(PayrollError::RecordNotFound)?;

    if parent.1 != SalaryStatus::Pending.to_string() {
        return Err(PayrollError::RecordLocked);
    }

    let done = sqlx::query(
        r#"
        INSERT INTO salary_adjustments (salary_id, employee_id, kind, amount, reason, description)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(new.salary_id)
    .bind(parent.0)
    .bind(new.kind.to_string())
    .bind(new.amount)
    .bind(&new.reason)
    .bind(&new.description)
    .execute(&mut *tx)
    .await?;

    let adjustment_id = done.last_insert_rowid();

    store::recompute_totals(&mut tx, new.salary_id).await?;
    tx.commit().await?;

    sqlx::query_as::<_, Adjustment>("SELECT * FROM salary_adjustments WHERE id = ?")
        .bind(adjustment_id)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
}

/// Removes a ledger entry and recomputes the parent's totals in the same
/// transaction. Refused once the parent is past `pending`. There is no
/// update operation: corrections are delete-and-recreate.
pub async fn remove_adjustment(pool: &SqlitePool, adjustment_id: i64) -> Result<(), PayrollError> {
    let mut tx = pool.begin().await?;

    let salary_id =
        sqlx::query_scalar::<_, i64>("SELECT salary_id FROM salary_adjustments WHERE id = ?")
            .bind(adjustment_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(PayrollError::AdjustmentNotFound)?;

    let status = sqlx::query_scalar::<_, String>("SELECT status FROM salary_records WHERE id = ?")
        .bind(salary_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(PayrollError::RecordNotFound)?;

    if status != SalaryStatus::Pending.to_string() {
        return Err(PayrollError::RecordLocked);
    }

    sqlx::query("DELETE FROM salary_adjustments WHERE id = ?")
        .bind(adjustment_id)
        .execute(&mut *tx)
        .await?;

    store::recompute_totals(&mut tx, salary_id).await?;
    tx.commit().await?;

    Ok(())
}

/// Ledger entries for one salary record in creation order, for audit display.
pub async fn list_for_salary(
    pool: &SqlitePool,
    salary_id: i64,
) -> Result<Vec<Adjustment>, PayrollError> {
    store::fetch(pool, salary_id).await?;

    sqlx::query_as::<_, Adjustment>(
        "SELECT * FROM salary_adjustments WHERE salary_id = ? ORDER BY id",
    )
    .bind(salary_id)
    .fetch_all(pool)
    .await
    .map_err(Into::into)
}
