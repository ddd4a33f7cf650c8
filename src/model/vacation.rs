use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};
use utoipa::ToSchema;

use crate::model::employee::Employee;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, AsRefStr, ToSchema)]
pub enum VacationStatus {
    #[serde(rename = "pendiente")]
    #[strum(serialize = "pendiente")]
    Pending,
    #[serde(rename = "aprobado")]
    #[strum(serialize = "aprobado")]
    Approved,
    #[serde(rename = "rechazado")]
    #[strum(serialize = "rechazado")]
    Declined,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VacationApplication {
    pub id: u64,
    pub employee_id: u64,
    #[schema(example = 5)]
    pub total_days: u32,
    pub status: VacationStatus,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee: Option<Box<Employee>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VacationBalance {
    #[schema(example = 15)]
    pub available_days: u32,
}

impl VacationApplication {
    pub fn is_pending(&self) -> bool {
        self.status == VacationStatus::Pending
    }
}

/// An employee may only have one open request at a time.
pub fn has_pending_request(applications: &[VacationApplication]) -> bool {
    applications.iter().any(VacationApplication::is_pending)
}
