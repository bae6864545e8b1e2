use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::error::{PayrollError, is_unique_violation};
use crate::model::salary_record::{SalaryRecord, SalaryStatus};

/// Input for manually creating a single salary record. Bulk creation goes
/// through `engine::generate_for_period` instead.
pub struct NewSalaryRecord {
    pub employee_id: i64,
    pub month: i32,
    pub year: i32,
    pub base_salary: f64,
    pub notes: Option<String>,
}

pub(crate) fn validate_period(month: i32) -> Result<(), PayrollError> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(PayrollError::PeriodInvalid)
    }
}

/// Creates a salary record with totals zeroed and `net_salary` equal to the
/// base-salary snapshot. The unique index on (employee_id, month, year) turns
/// a second record for the same period into `DuplicateRecord`.
pub async fn create(pool: &SqlitePool, new: NewSalaryRecord) -> Result<SalaryRecord, PayrollError> {
    validate_period(new.month)?;

    let result = sqlx::query(
        r#"
        INSERT INTO salary_records (employee_id, month, year, base_salary, net_salary, notes)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(new.employee_id)
    .bind(new.month)
    .bind(new.year)
    .bind(new.base_salary)
    .bind(new.base_salary)
    .bind(&new.notes)
    .execute(pool)
    .await;

    match result {
        Ok(done) => fetch(pool, done.last_insert_rowid()).await,
        Err(e) if is_unique_violation(&e) => Err(PayrollError::DuplicateRecord),
        Err(e) => Err(e.into()),
    }
}

pub async fn fetch(pool: &SqlitePool, id: i64) -> Result<SalaryRecord, PayrollError> {
    sqlx::query_as::<_, SalaryRecord>("SELECT * FROM salary_records WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(PayrollError::RecordNotFound)
}

/// Re-sums the adjustment ledger for one record and rewrites the totals and
/// the derived net salary. Runs inside the caller's transaction so the new
/// totals land together with the ledger mutation that triggered them.
pub(crate) async fn recompute_totals(
    tx: &mut Transaction<'_, Sqlite>,
    salary_id: i64,
) -> Result<(), PayrollError> {
    let (deductions, bonuses): (f64, f64) = sqlx::query_as(
        r#"
        SELECT
            COALESCE(SUM(CASE WHEN kind = 'deduction' THEN amount ELSE 0.0 END), 0.0),
            COALESCE(SUM(CASE WHEN kind = 'bonus' THEN amount ELSE 0.0 END), 0.0)
        FROM salary_adjustments
        WHERE salary_id = ?
        "#,
    )
    .bind(salary_id)
    .fetch_one(&mut **tx)
    .await?;

    sqlx::query(
        r#"
        UPDATE salary_records
        SET total_deductions = ?,
            total_bonuses = ?,
            net_salary = base_salary - ? + ?
        WHERE id = ?
        "#,
    )
    .bind(deductions)
    .bind(bonuses)
    .bind(deductions)
    .bind(bonuses)
    .bind(salary_id)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

/// Finalizes a pending record. Terminal: once paid, adjustments and deletion
/// are both refused.
pub async fn mark_paid(pool: &SqlitePool, id: i64) -> Result<SalaryRecord, PayrollError> {
    let done = sqlx::query("UPDATE salary_records SET status = ? WHERE id = ? AND status = ?")
        .bind(SalaryStatus::Paid.to_string())
        .bind(id)
        .bind(SalaryStatus::Pending.to_string())
        .execute(pool)
        .await?;

    if done.rows_affected() == 0 {
        return Err(not_found_or_transition(pool, id).await?);
    }

    fetch(pool, id).await
}

/// Cancels a pending record. Terminal, same guard as `mark_paid`.
pub async fn cancel(pool: &SqlitePool, id: i64) -> Result<SalaryRecord, PayrollError> {
    let done = sqlx::query("UPDATE salary_records SET status = ? WHERE id = ? AND status = ?")
        .bind(SalaryStatus::Cancelled.to_string())
        .bind(id)
        .bind(SalaryStatus::Pending.to_string())
        .execute(pool)
        .await?;

    if done.rows_affected() == 0 {
        return Err(not_found_or_transition(pool, id).await?);
    }

    fetch(pool, id).await
}

/// Deletes a pending record together with its adjustments. Paid and
/// cancelled records are protected from removal.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), PayrollError> {
    let mut tx = pool.begin().await?;

    let status = sqlx::query_scalar::<_, String>("SELECT status FROM salary_records WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(PayrollError::RecordNotFound)?;

    if status != SalaryStatus::Pending.to_string() {
        return Err(PayrollError::InvalidTransition);
    }

    sqlx::query("DELETE FROM salary_adjustments WHERE salary_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    // Status re-checked at write time; a transition committed in between
    // leaves nothing to delete and the whole unit rolls back.
    let done = sqlx::query("DELETE FROM salary_records WHERE id = ? AND status = ?")
        .bind(id)
        .bind(SalaryStatus::Pending.to_string())
        .execute(&mut *tx)
        .await?;

    if done.rows_affected() == 0 {
        return Err(PayrollError::InvalidTransition);
    }

    tx.commit().await?;
    Ok(())
}

/// A guarded write that touched no rows either raced a record that is past
/// `pending`, or the record never existed.
async fn not_found_or_transition(pool: &SqlitePool, id: i64) -> Result<PayrollError, PayrollError> {
    let exists = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM salary_records WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;

    Ok(if exists == 0 {
        PayrollError::RecordNotFound
    } else {
        PayrollError::InvalidTransition
    })
}
