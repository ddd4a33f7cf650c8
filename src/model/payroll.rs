use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};
use utoipa::ToSchema;

use crate::model::bonus::Bonus;
use crate::model::deduction::Deduction;
use crate::model::employee::Employee;
use crate::model::payroll_type::PayrollType;
use crate::period::PeriodBounds;
use crate::utils::de;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, AsRefStr, ToSchema)]
pub enum PayrollStatus {
    #[serde(rename = "pendiente")]
    #[strum(serialize = "pendiente")]
    Pending,
    #[serde(rename = "pagado")]
    #[strum(serialize = "pagado")]
    Paid,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PayrollBonus {
    pub id: u64,
    pub payroll_id: u64,
    pub bonus_id: u64,
    #[serde(deserialize_with = "de::f64_lenient")]
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonus: Option<Bonus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PayrollDeduction {
    pub id: u64,
    pub payroll_id: u64,
    pub deduction_id: u64,
    #[serde(deserialize_with = "de::f64_lenient")]
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deduction: Option<Deduction>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": 31,
        "employee_id": 4,
        "payroll_type_id": 1,
        "period_start": "2025-01-01",
        "period_end": "2025-01-31",
        "total_income": 7150.0,
        "total_deductions": 845.5,
        "net_salary": 6304.5,
        "status": "pendiente",
        "payment_date": null,
        "approved_by": null
    })
)]
pub struct Payroll {
    pub id: u64,
    pub employee_id: u64,
    pub payroll_type_id: u64,

    #[serde(deserialize_with = "de::date_lenient")]
    #[schema(value_type = String, format = "date")]
    pub period_start: NaiveDate,

    #[serde(deserialize_with = "de::date_lenient")]
    #[schema(value_type = String, format = "date")]
    pub period_end: NaiveDate,

    #[serde(deserialize_with = "de::f64_lenient")]
    pub total_income: f64,

    #[serde(deserialize_with = "de::f64_lenient")]
    pub total_deductions: f64,

    #[serde(deserialize_with = "de::f64_lenient")]
    pub net_salary: f64,

    pub status: PayrollStatus,

    #[serde(default, deserialize_with = "de::opt_date_lenient")]
    #[schema(value_type = Option<String>, format = "date")]
    pub payment_date: Option<NaiveDate>,

    #[serde(default)]
    pub approved_by: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee: Option<Employee>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payroll_type: Option<PayrollType>,

    #[serde(default)]
    pub payroll_bonu: Vec<PayrollBonus>,

    #[serde(default)]
    pub payroll_deduction: Vec<PayrollDeduction>,
}

impl PeriodBounds for Payroll {
    fn period_start(&self) -> NaiveDate {
        self.period_start
    }

    fn period_end(&self) -> NaiveDate {
        self.period_end
    }
}

impl Payroll {
    pub fn is_pending(&self) -> bool {
        self.status == PayrollStatus::Pending
    }

    pub fn contract_type_id(&self) -> Option<u64> {
        self.employee.as_ref().map(|e| e.contract_type_id)
    }
}
