pub mod bonus;
pub mod catalog;
pub mod confirmations;
pub mod contract_type;
pub mod deduction;
pub mod employee;
pub mod notifications;
pub mod payments;
pub mod payroll;
pub mod payroll_type;
pub mod performance;
pub mod report;
pub mod users;
pub mod vacation;

#[cfg(test)]
pub(crate) mod testing;
