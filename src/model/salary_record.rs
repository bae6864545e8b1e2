use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

/// One employee's payroll computation for one (month, year) period.
///
/// `base_salary` is snapshotted from the employee directory when the record
/// is created and never re-synced afterward. `net_salary` always equals
/// `base_salary - total_deductions + total_bonuses`; the totals are re-summed
/// from the adjustment ledger on every ledger mutation while the record is
/// still `pending`.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "employee_id": 1,
        "month": 3,
        "year": 2025,
        "base_salary": 5000.0,
        "total_deductions": 200.0,
        "total_bonuses": 300.0,
        "net_salary": 5100.0,
        "status": "pending",
        "notes": null,
        "created_at": "2025-03-01T00:00:00"
    })
)]
pub struct SalaryRecord {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = 1)]
    pub employee_id: i64,

    #[schema(example = 3)]
    pub month: i32,

    #[schema(example = 2025)]
    pub year: i32,

    #[schema(example = 5000.0)]
    pub base_salary: f64,

    #[schema(example = 200.0)]
    pub total_deductions: f64,

    #[schema(example = 300.0)]
    pub total_bonuses: f64,

    #[schema(example = 5100.0)]
    pub net_salary: f64,

    #[schema(example = "pending")]
    pub status: String,

    #[schema(example = "march payroll", nullable = true)]
    pub notes: Option<String>,

    #[schema(example = "2025-03-01T00:00:00", format = "date-time", value_type = String)]
    pub created_at: NaiveDateTime,
}

/// Lifecycle of a salary record. `pending` is the only mutable state; both
/// `paid` and `cancelled` are terminal, and there is no path back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SalaryStatus {
    Pending,
    Paid,
    Cancelled,
}
