use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::employee::Employee;
use crate::period::PeriodBounds;
use crate::utils::de;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": 12,
        "employee_id": 4,
        "quality_of_work": 4,
        "achievement_of_objectives": 5,
        "responsibility": 4,
        "teamwork_communication": 3,
        "proactivity": 4,
        "final_note": 4.0,
        "start_period": "2025-01-01",
        "end_period": "2025-03-31"
    })
)]
pub struct PerformanceEvaluation {
    pub id: u64,
    pub employee_id: u64,
    pub quality_of_work: u8,
    pub achievement_of_objectives: u8,
    pub responsibility: u8,
    pub teamwork_communication: u8,
    pub proactivity: u8,

    #[serde(deserialize_with = "de::f64_lenient")]
    pub final_note: f64,

    #[serde(deserialize_with = "de::date_lenient")]
    #[schema(value_type = String, format = "date")]
    pub start_period: NaiveDate,

    #[serde(deserialize_with = "de::date_lenient")]
    #[schema(value_type = String, format = "date")]
    pub end_period: NaiveDate,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee: Option<Employee>,
}

impl PeriodBounds for PerformanceEvaluation {
    fn period_start(&self) -> NaiveDate {
        self.start_period
    }

    fn period_end(&self) -> NaiveDate {
        self.end_period
    }
}
