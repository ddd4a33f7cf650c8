pub mod bonus;
pub mod contract_type;
pub mod deduction;
pub mod employee;
pub mod payroll;
pub mod payroll_type;
pub mod performance;
pub mod role;
pub mod user;
pub mod vacation;
