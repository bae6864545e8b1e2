use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::{Display, Error};
use serde_json::json;

/// Failure taxonomy of the payroll core. Every variant is a deterministic,
/// per-request rejection detected before any persistent write; nothing here
/// is retried and none of it is fatal to the process.
#[derive(Debug, Display, Error)]
pub enum PayrollError {
    #[display(fmt = "Salary record already exists for this employee and period")]
    DuplicateRecord,

    #[display(fmt = "Only pending salary records can be updated or removed")]
    InvalidTransition,

    #[display(fmt = "Salary record is locked; adjustments are only allowed while pending")]
    RecordLocked,

    #[display(fmt = "Amount must be greater than zero")]
    AmountInvalid,

    #[display(fmt = "Month must be between 1 and 12")]
    PeriodInvalid,

    #[display(fmt = "Salary record not found")]
    RecordNotFound,

    #[display(fmt = "Adjustment not found")]
    AdjustmentNotFound,

    #[display(fmt = "Employee not found")]
    EmployeeNotFound,

    #[display(fmt = "Internal Server Error")]
    Database { source: sqlx::Error },
}

impl From<sqlx::Error> for PayrollError {
    fn from(source: sqlx::Error) -> Self {
        PayrollError::Database { source }
    }
}

impl ResponseError for PayrollError {
    fn status_code(&self) -> StatusCode {
        match self {
            PayrollError::DuplicateRecord
            | PayrollError::InvalidTransition
            | PayrollError::RecordLocked => StatusCode::CONFLICT,
            PayrollError::AmountInvalid | PayrollError::PeriodInvalid => StatusCode::BAD_REQUEST,
            PayrollError::RecordNotFound
            | PayrollError::AdjustmentNotFound
            | PayrollError::EmployeeNotFound => StatusCode::NOT_FOUND,
            PayrollError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let PayrollError::Database { source } = self {
            tracing::error!(error = %source, "Payroll database error");
        }

        HttpResponse::build(self.status_code()).json(json!({
            "message": self.to_string()
        }))
    }
}

/// Maps the driver's duplicate-key failure onto the taxonomy. The unique
/// index on (employee_id, month, year) is what backs generation idempotency.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db) if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation)
    )
}
