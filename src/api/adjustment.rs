use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use sqlx::SqlitePool;
use utoipa::ToSchema;

use crate::model::adjustment::{Adjustment, AdjustmentType};
use crate::payroll::ledger;

#[derive(Deserialize, ToSchema)]
pub struct CreateAdjustment {
    #[schema(example = 1)]
    pub salary_id: i64,

    /// Advisory only; the stored value is copied from the owning salary
    /// record so the audit column cannot drift.
    #[schema(example = 1)]
    pub employee_id: i64,

    #[schema(example = "deduction")]
    pub kind: AdjustmentType,

    #[schema(example = 200.0)]
    pub amount: f64,

    #[schema(example = "late")]
    pub reason: String,

    #[schema(example = "arrived late three times", nullable = true)]
    pub description: Option<String>,
}

/// Append a deduction or bonus to a pending salary record
#[utoipa::path(
    post,
    path = "/api/v1/payroll/adjustments",
    request_body = CreateAdjustment,
    responses(
        (status = 201, description = "Adjustment created, totals recomputed", body = Adjustment),
        (status = 400, description = "Amount must be greater than zero"),
        (status = 404, description = "Salary record not found"),
        (status = 409, description = "Salary record is locked")
    ),
    tag = "Adjustment"
)]
pub async fn create_adjustment(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateAdjustment>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();

    let adjustment = ledger::add_adjustment(
        pool.get_ref(),
        ledger::NewAdjustment {
            salary_id: payload.salary_id,
            kind: payload.kind,
            amount: payload.amount,
            reason: payload.reason,
            description: payload.description,
        },
    )
    .await?;

    Ok(HttpResponse::Created().json(adjustment))
}

/// Remove a ledger entry; corrections are delete-and-recreate
#[utoipa::path(
    delete,
    path = "/api/v1/payroll/adjustments/{id}",
    params(
        ("id", description = "Adjustment ID")
    ),
    responses(
        (status = 200, description = "Adjustment removed, totals recomputed"),
        (status = 404, description = "Adjustment not found"),
        (status = 409, description = "Salary record is locked")
    ),
    tag = "Adjustment"
)]
pub async fn delete_adjustment(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    ledger::remove_adjustment(pool.get_ref(), path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Adjustment removed"
    })))
}

/// Ledger entries for one salary record, in creation order
#[utoipa::path(
    get,
    path = "/api/v1/payroll/{id}/adjustments",
    params(
        ("id", description = "Salary record ID")
    ),
    responses(
        (status = 200, body = [Adjustment]),
        (status = 404, description = "Salary record not found")
    ),
    tag = "Adjustment"
)]
pub async fn list_adjustments(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let adjustments = ledger::list_for_salary(pool.get_ref(), path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(adjustments))
}
