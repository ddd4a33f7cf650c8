//! Payroll period rules: end date derivation, month grouping and date range
//! filtering. Pure calendar-date code, no time zones involved.

pub mod deriver;
pub mod grouper;
pub mod range;

pub use deriver::{ContractTypeCode, PayrollPeriodInput, PeriodEndPreview, derive_period_end};
pub use grouper::{PeriodBounds, PeriodGroup, group_by_period_end, month_label};
pub use range::DateRange;
