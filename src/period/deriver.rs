use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Payroll type whose period length is fixed by the contract type.
/// Every other payroll type takes a free-form end date.
pub const STANDARD_PAYROLL_TYPE_ID: u64 = 1;

/// Contract types with a fixed payroll period length.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ContractTypeCode {
    Weekly = 1,
    Biweekly = 2,
    Monthly = 3,
}

impl ContractTypeCode {
    pub fn from_id(id: u64) -> Option<Self> {
        match id {
            1 => Some(ContractTypeCode::Weekly),
            2 => Some(ContractTypeCode::Biweekly),
            3 => Some(ContractTypeCode::Monthly),
            _ => None,
        }
    }

    /// Days added to the period start to reach the period end.
    pub fn offset_days(self, period_start: NaiveDate) -> u32 {
        match self {
            ContractTypeCode::Weekly => 6,
            ContractTypeCode::Biweekly => 15,
            ContractTypeCode::Monthly => days_in_month(period_start),
        }
    }

    /// Helper text shown next to the start date field.
    pub fn hint(self) -> &'static str {
        match self {
            ContractTypeCode::Weekly => "El período será de 7 días",
            ContractTypeCode::Biweekly => "El período será de 15 días",
            ContractTypeCode::Monthly => "El período será de 30 días",
        }
    }
}

/// Number of days in the month `date` falls in.
pub fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = (date.year(), date.month());
    let first = NaiveDate::from_ymd_opt(year, month, 1);
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };

    match (first, next_first) {
        (Some(first), Some(next)) => next.signed_duration_since(first).num_days() as u32,
        // only reachable in the last month chrono can represent
        _ => 31,
    }
}

/// Computes the period end for a start date and a contract type id.
///
/// Returns `None` when the start date is empty or the contract type is not
/// one of the fixed-length types; the caller then leaves the end date
/// editable. This is a silent fallback, never an error.
pub fn derive_period_end(period_start: Option<NaiveDate>, contract_type_id: u64) -> Option<NaiveDate> {
    let start = period_start?;
    let code = ContractTypeCode::from_id(contract_type_id)?;

    start.checked_add_days(Days::new(code.offset_days(start) as u64))
}

/// Form state while a payroll run is being edited.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PayrollPeriodInput {
    #[schema(example = 1)]
    pub payroll_type_id: u64,

    #[schema(example = 3)]
    pub contract_type_id: u64,

    #[serde(default, deserialize_with = "crate::utils::de::opt_date_lenient")]
    #[schema(example = "2025-02-01", value_type = Option<String>, format = "date")]
    pub period_start: Option<NaiveDate>,
}

/// What the form should show for the end date field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PeriodEndPreview {
    #[schema(example = "2025-03-01", value_type = Option<String>, format = "date")]
    pub period_end: Option<NaiveDate>,

    /// false when the end date is computed and must not be edited
    pub editable: bool,

    #[schema(example = "El período será de 30 días")]
    pub hint: Option<String>,
}

impl PayrollPeriodInput {
    pub fn is_standard(&self) -> bool {
        self.payroll_type_id == STANDARD_PAYROLL_TYPE_ID
    }

    /// Derived end date; only standard payroll types derive one.
    pub fn derived_end(&self) -> Option<NaiveDate> {
        if !self.is_standard() {
            return None;
        }
        derive_period_end(self.period_start, self.contract_type_id)
    }

    pub fn preview(&self) -> PeriodEndPreview {
        let code = ContractTypeCode::from_id(self.contract_type_id);
        let period_end = self.derived_end();

        PeriodEndPreview {
            period_end,
            editable: !self.is_standard(),
            hint: match (self.is_standard(), code) {
                (true, Some(code)) => Some(code.hint().to_string()),
                _ => None,
            },
        }
    }
}
