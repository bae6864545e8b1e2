use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use utoipa::{IntoParams, ToSchema};

use crate::model::salary_record::SalaryRecord;
use crate::payroll::engine::PeriodStatistics;
use crate::payroll::{engine, store};

#[derive(Deserialize, ToSchema)]
pub struct GeneratePayload {
    #[schema(example = 3)]
    pub month: i32,

    #[schema(example = 2025)]
    pub year: i32,
}

#[derive(Serialize, ToSchema)]
pub struct GenerateResponse {
    /// Records actually created; employees that already had one for the
    /// period are skipped.
    #[schema(example = 12)]
    pub generated_count: u64,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateSalaryRecord {
    #[schema(example = 1)]
    pub employee_id: i64,

    #[schema(example = 3)]
    pub month: i32,

    #[schema(example = 2025)]
    pub year: i32,

    #[schema(example = 5000.0)]
    pub base_salary: f64,

    #[schema(example = "march payroll", nullable = true)]
    pub notes: Option<String>,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct SalaryListQuery {
    #[schema(example = 2025)]
    pub year: i32,

    #[schema(example = 3)]
    pub month: i32,

    #[schema(example = 1)]
    pub employee_id: Option<i64>,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct StatsQuery {
    #[schema(example = 2025)]
    pub year: i32,
}

/// Bulk generation for one period
#[utoipa::path(
    post,
    path = "/api/v1/payroll/generate",
    request_body = GeneratePayload,
    responses(
        (status = 200, description = "Generation finished", body = GenerateResponse),
        (status = 400, description = "Invalid period")
    ),
    tag = "Payroll"
)]
pub async fn generate(
    pool: web::Data<SqlitePool>,
    payload: web::Json<GeneratePayload>,
) -> actix_web::Result<impl Responder> {
    let generated_count =
        engine::generate_for_period(pool.get_ref(), payload.month, payload.year).await?;

    Ok(HttpResponse::Ok().json(GenerateResponse { generated_count }))
}

/// Manual creation of a single salary record
#[utoipa::path(
    post,
    path = "/api/v1/payroll",
    request_body = CreateSalaryRecord,
    responses(
        (status = 201, description = "Salary record created", body = SalaryRecord),
        (status = 400, description = "Invalid period"),
        (status = 409, description = "Record already exists for this employee and period")
    ),
    tag = "Payroll"
)]
pub async fn create_salary(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateSalaryRecord>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();

    let record = store::create(
        pool.get_ref(),
        store::NewSalaryRecord {
            employee_id: payload.employee_id,
            month: payload.month,
            year: payload.year,
            base_salary: payload.base_salary,
            notes: payload.notes,
        },
    )
    .await?;

    Ok(HttpResponse::Created().json(record))
}

#[utoipa::path(
    get,
    path = "/api/v1/payroll/{id}",
    params(
        ("id", description = "Salary record ID")
    ),
    responses(
        (status = 200, body = SalaryRecord),
        (status = 404, description = "Salary record not found")
    ),
    tag = "Payroll"
)]
pub async fn get_salary(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let record = store::fetch(pool.get_ref(), path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(record))
}

/// Salary records for one period, optionally narrowed to one employee
#[utoipa::path(
    get,
    path = "/api/v1/payroll",
    params(SalaryListQuery),
    responses(
        (status = 200, body = [SalaryRecord]),
        (status = 400, description = "Invalid period")
    ),
    tag = "Payroll"
)]
pub async fn list_salaries(
    pool: web::Data<SqlitePool>,
    query: web::Query<SalaryListQuery>,
) -> actix_web::Result<impl Responder> {
    let records =
        engine::list_for_period(pool.get_ref(), query.month, query.year, query.employee_id)
            .await?;

    Ok(HttpResponse::Ok().json(records))
}

/// One employee's payroll history, newest period first
#[utoipa::path(
    get,
    path = "/api/v1/payroll/employee/{employee_id}",
    params(
        ("employee_id", description = "Employee ID")
    ),
    responses(
        (status = 200, body = [SalaryRecord])
    ),
    tag = "Payroll"
)]
pub async fn employee_history(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let records = engine::list_for_employee(pool.get_ref(), path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(records))
}

#[utoipa::path(
    get,
    path = "/api/v1/payroll/stats",
    params(StatsQuery),
    responses(
        (status = 200, body = PeriodStatistics)
    ),
    tag = "Payroll"
)]
pub async fn stats(
    pool: web::Data<SqlitePool>,
    query: web::Query<StatsQuery>,
) -> actix_web::Result<impl Responder> {
    let stats = engine::period_statistics(pool.get_ref(), query.year).await?;

    Ok(HttpResponse::Ok().json(stats))
}

/// Finalize: pending -> paid. Terminal, no unpay path.
#[utoipa::path(
    put,
    path = "/api/v1/payroll/{id}/pay",
    params(
        ("id", description = "Salary record ID")
    ),
    responses(
        (status = 200, description = "Record marked paid", body = SalaryRecord),
        (status = 404, description = "Salary record not found"),
        (status = 409, description = "Record is not pending")
    ),
    tag = "Payroll"
)]
pub async fn pay_salary(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let record = store::mark_paid(pool.get_ref(), path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(record))
}

/// Cancel: pending -> cancelled. Terminal.
#[utoipa::path(
    put,
    path = "/api/v1/payroll/{id}/cancel",
    params(
        ("id", description = "Salary record ID")
    ),
    responses(
        (status = 200, description = "Record cancelled", body = SalaryRecord),
        (status = 404, description = "Salary record not found"),
        (status = 409, description = "Record is not pending")
    ),
    tag = "Payroll"
)]
pub async fn cancel_salary(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let record = store::cancel(pool.get_ref(), path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(record))
}

#[utoipa::path(
    delete,
    path = "/api/v1/payroll/{id}",
    params(
        ("id", description = "Salary record ID")
    ),
    responses(
        (status = 200, description = "Record deleted together with its adjustments"),
        (status = 404, description = "Salary record not found"),
        (status = 409, description = "Record is not pending")
    ),
    tag = "Payroll"
)]
pub async fn delete_salary(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    store::delete(pool.get_ref(), path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Salary record deleted"
    })))
}
