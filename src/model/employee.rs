use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::contract_type::ContractType;
use crate::model::user::UserSummary;
use crate::model::vacation::VacationBalance;
use crate::utils::de;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": 4,
        "user_id": 9,
        "dpi": "2547896541201",
        "nit": "84512369",
        "position": "Analista",
        "salary": 6500.0,
        "hire_date": "2024-01-15",
        "termination_date": null,
        "is_active": 1,
        "contract_type_id": 3
    })
)]
pub struct Employee {
    #[schema(example = 4)]
    pub id: u64,

    #[schema(example = 9)]
    pub user_id: u64,

    #[serde(default, deserialize_with = "de::opt_text_lenient")]
    pub dpi: Option<String>,

    #[serde(default, deserialize_with = "de::opt_text_lenient")]
    pub nit: Option<String>,

    #[serde(default)]
    pub position: Option<String>,

    #[serde(deserialize_with = "de::f64_lenient")]
    #[schema(example = 6500.0)]
    pub salary: f64,

    #[serde(default, deserialize_with = "de::opt_date_lenient")]
    #[schema(example = "2024-01-15", value_type = Option<String>, format = "date")]
    pub hire_date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "de::opt_date_lenient")]
    #[schema(value_type = Option<String>, format = "date")]
    pub termination_date: Option<NaiveDate>,

    #[serde(default = "active")]
    pub is_active: u8,

    #[schema(example = 3)]
    pub contract_type_id: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummary>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_type: Option<ContractType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vacation_balance: Option<VacationBalance>,
}

fn active() -> u8 {
    1
}
