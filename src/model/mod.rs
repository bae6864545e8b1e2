pub mod adjustment;
pub mod employee;
pub mod salary_record;
