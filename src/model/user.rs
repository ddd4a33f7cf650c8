use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::employee::Employee;
use crate::model::role::{Role, RoleInfo};

/// User as returned by the backend login and `/users` endpoints.
///
/// Employee-role users carry their nested employee record, including the
/// vacation balance shown on the vacations screen.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": 9,
        "username": "jperez",
        "name": "Juan",
        "last_name": "Pérez",
        "email": "juan.perez@empresa.com",
        "role_id": 2,
        "is_active": 1
    })
)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub role_id: u64,
    #[serde(default = "active")]
    pub is_active: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<RoleInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee: Option<Box<Employee>>,
}

/// User nested inside an employee record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserSummary {
    pub id: u64,
    #[serde(default)]
    pub username: Option<String>,
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub role_id: u64,
    #[serde(default = "active")]
    pub is_active: u8,
}

fn active() -> u8 {
    1
}

impl User {
    pub fn role(&self) -> Option<Role> {
        Role::from_id(self.role_id)
    }

    pub fn employee_id(&self) -> Option<u64> {
        self.employee.as_ref().map(|e| e.id)
    }
}
