use crate::api::adjustment::CreateAdjustment;
use crate::api::employee::{
    CreateEmployee, EmployeeListResponse, EmployeeQuery, UpdateEmployee,
};
use crate::api::payroll::{
    CreateSalaryRecord, GeneratePayload, GenerateResponse, SalaryListQuery, StatsQuery,
};
use crate::model::adjustment::{Adjustment, AdjustmentType};
use crate::model::employee::{Employee, EmployeeStatus};
use crate::model::salary_record::{SalaryRecord, SalaryStatus};
use crate::payroll::engine::PeriodStatistics;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Training Center Back Office API",
        version = "1.0.0",
        description = r#"
## Training Center Back Office

This API powers the back-office of a training center. The payroll core is the
heart of it: one salary record per employee and month, an append-only ledger
of deductions and bonuses, a finalize-then-lock lifecycle, and per-year
statistics.

### 🔹 Key Features
- **Employee Directory**
  - Create, update, list, and view employee profiles with a base salary
- **Payroll**
  - Bulk generation of one salary record per active employee and period
  - Deductions and bonuses with automatic net-salary recomputation
  - Pay / cancel / delete lifecycle with pending-only mutation
  - Per-year totals and employee counts

### 📦 Response Format
- JSON-based RESTful responses
- Errors are reported as `{"message": "..."}`

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::employee::create_employee,
        crate::api::employee::get_employee,
        crate::api::employee::list_employees,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,

        crate::api::payroll::generate,
        crate::api::payroll::create_salary,
        crate::api::payroll::get_salary,
        crate::api::payroll::list_salaries,
        crate::api::payroll::employee_history,
        crate::api::payroll::stats,
        crate::api::payroll::pay_salary,
        crate::api::payroll::cancel_salary,
        crate::api::payroll::delete_salary,

        crate::api::adjustment::create_adjustment,
        crate::api::adjustment::delete_adjustment,
        crate::api::adjustment::list_adjustments
    ),
    components(
        schemas(
            CreateEmployee,
            UpdateEmployee,
            EmployeeQuery,
            Employee,
            EmployeeStatus,
            EmployeeListResponse,
            GeneratePayload,
            GenerateResponse,
            CreateSalaryRecord,
            SalaryListQuery,
            StatsQuery,
            SalaryRecord,
            SalaryStatus,
            PeriodStatistics,
            CreateAdjustment,
            Adjustment,
            AdjustmentType
        )
    ),
    tags(
        (name = "Employee", description = "Employee directory APIs"),
        (name = "Payroll", description = "Salary record generation and lifecycle APIs"),
        (name = "Adjustment", description = "Deduction and bonus ledger APIs"),
    )
)]
pub struct ApiDoc;
