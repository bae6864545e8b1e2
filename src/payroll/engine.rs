use serde::Serialize;
use sqlx::SqlitePool;
use utoipa::ToSchema;

use crate::error::PayrollError;
use crate::model::employee::EmployeeStatus;
use crate::model::salary_record::SalaryRecord;
use crate::payroll::store;

/// Aggregates over one calendar year. Cancelled records contribute to
/// `employee_count` but to neither sum.
#[derive(Debug, Serialize, ToSchema)]
pub struct PeriodStatistics {
    #[schema(example = 6000.0)]
    pub total_paid: f64,

    #[schema(example = 4800.0)]
    pub total_pending: f64,

    #[schema(example = 2)]
    pub employee_count: i64,
}

/// Creates one salary record per active employee that does not already have
/// one for the period, snapshotting the employee's current base salary.
///
/// Idempotent: each insert is `ON CONFLICT DO NOTHING` against the unique
/// index on (employee_id, month, year), so a re-run or two overlapping calls
/// can only skip, never duplicate. Returns how many records were actually
/// created.
pub async fn generate_for_period(
    pool: &SqlitePool,
    month: i32,
    year: i32,
) -> Result<u64, PayrollError> {
    store::validate_period(month)?;

    let employees: Vec<(i64, f64)> =
        sqlx::query_as("SELECT id, base_salary FROM employees WHERE status = ? ORDER BY id")
            .bind(EmployeeStatus::Active.to_string())
            .fetch_all(pool)
            .await?;

    let mut generated: u64 = 0;
    for (employee_id, base_salary) in employees {
        let done = sqlx::query(
            r#"
            INSERT INTO salary_records (employee_id, month, year, base_salary, net_salary)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT (employee_id, month, year) DO NOTHING
            "#,
        )
        .bind(employee_id)
        .bind(month)
        .bind(year)
        .bind(base_salary)
        .bind(base_salary)
        .execute(pool)
        .await?;

        generated += done.rows_affected();
    }

    tracing::info!(month, year, generated, "Payroll generation finished");
    Ok(generated)
}

/// Salary records for one period, ordered by employee id.
pub async fn list_for_period(
    pool: &SqlitePool,
    month: i32,
    year: i32,
    employee_id: Option<i64>,
) -> Result<Vec<SalaryRecord>, PayrollError> {
    store::validate_period(month)?;

    let records = match employee_id {
        Some(id) => {
            sqlx::query_as::<_, SalaryRecord>(
                r#"
                SELECT * FROM salary_records
                WHERE month = ? AND year = ? AND employee_id = ?
                ORDER BY employee_id
                "#,
            )
            .bind(month)
            .bind(year)
            .bind(id)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, SalaryRecord>(
                "SELECT * FROM salary_records WHERE month = ? AND year = ? ORDER BY employee_id",
            )
            .bind(month)
            .bind(year)
            .fetch_all(pool)
            .await?
        }
    };

    Ok(records)
}

/// One employee's payroll history, newest period first.
pub async fn list_for_employee(
    pool: &SqlitePool,
    employee_id: i64,
) -> Result<Vec<SalaryRecord>, PayrollError> {
    sqlx::query_as::<_, SalaryRecord>(
        "SELECT * FROM salary_records WHERE employee_id = ? ORDER BY year DESC, month DESC",
    )
    .bind(employee_id)
    .fetch_all(pool)
    .await
    .map_err(Into::into)
}

pub async fn period_statistics(
    pool: &SqlitePool,
    year: i32,
) -> Result<PeriodStatistics, PayrollError> {
    let (total_paid, total_pending, employee_count): (f64, f64, i64) = sqlx::query_as(
        r#"
        SELECT
            COALESCE(SUM(CASE WHEN status = 'paid' THEN net_salary ELSE 0.0 END), 0.0),
            COALESCE(SUM(CASE WHEN status = 'pending' THEN net_salary ELSE 0.0 END), 0.0),
            COUNT(DISTINCT employee_id)
        FROM salary_records
        WHERE year = ?
        "#,
    )
    .bind(year)
    .fetch_one(pool)
    .await?;

    Ok(PeriodStatistics {
        total_paid,
        total_pending,
        employee_count,
    })
}
