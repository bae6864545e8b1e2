use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

/// A single deduction or bonus entry attached to a salary record.
///
/// Entries are immutable once created; corrections are delete-and-recreate,
/// and both operations are refused once the owning record leaves `pending`.
/// `employee_id` is copied from the owning record at insert time.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "salary_id": 1,
        "employee_id": 1,
        "kind": "deduction",
        "amount": 200.0,
        "reason": "late",
        "description": null,
        "created_at": "2025-03-05T00:00:00"
    })
)]
pub struct Adjustment {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = 1)]
    pub salary_id: i64,

    #[schema(example = 1)]
    pub employee_id: i64,

    #[schema(example = "deduction")]
    pub kind: String,

    #[schema(example = 200.0)]
    pub amount: f64,

    #[schema(example = "late")]
    pub reason: String,

    #[schema(example = "arrived late three times", nullable = true)]
    pub description: Option<String>,

    #[schema(example = "2025-03-05T00:00:00", format = "date-time", value_type = String)]
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AdjustmentType {
    Deduction,
    Bonus,
}
