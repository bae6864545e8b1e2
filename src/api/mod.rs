pub mod adjustment;
pub mod employee;
pub mod payroll;
