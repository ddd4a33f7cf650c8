use serde::Serialize;

use crate::client::{ApiError, SessionClient};
use crate::model::vacation::{VacationApplication, VacationBalance};
use crate::models::{Ack, Envelope};

/// Body of `POST /vacation`. New requests always start pending (status 1).
#[derive(Debug, Clone, Serialize)]
pub struct NewVacation {
    pub employee_id: u64,
    pub total_days: u32,
    pub status: u8,
}

impl NewVacation {
    pub fn pending(employee_id: u64, total_days: u32) -> Self {
        Self {
            employee_id,
            total_days,
            status: 1,
        }
    }
}

impl SessionClient {
    pub async fn list_vacations(&self) -> Result<Vec<VacationApplication>, ApiError> {
        let envelope: Envelope<Vec<VacationApplication>> = self.get("/vacation").await?;
        Ok(envelope.data)
    }

    pub async fn vacations_for_employee(
        &self,
        employee_id: u64,
    ) -> Result<Vec<VacationApplication>, ApiError> {
        let envelope: Envelope<Vec<VacationApplication>> = self
            .get(&format!("/vacation/employee/{}", employee_id))
            .await?;
        Ok(envelope.data)
    }

    pub async fn create_vacation(&self, body: &NewVacation) -> Result<VacationApplication, ApiError> {
        let envelope: Envelope<VacationApplication> = self.post("/vacation", body).await?;
        Ok(envelope.data)
    }

    pub async fn approve_vacation(&self, id: u64) -> Result<Ack, ApiError> {
        self.put_empty(&format!("/vacation/approve/{}", id)).await
    }

    pub async fn decline_vacation(&self, id: u64) -> Result<Ack, ApiError> {
        self.put_empty(&format!("/vacation/decline/{}", id)).await
    }

    /// Runs the backend's periodic accrual for every employee.
    pub async fn accrue_vacations(&self) -> Result<Ack, ApiError> {
        self.post_empty("/vacation/add-vacation").await
    }

    pub async fn vacation_balance(&self, employee_id: u64) -> Result<VacationBalance, ApiError> {
        let envelope: Envelope<VacationBalance> = self
            .get(&format!("/vacation/balance/{}", employee_id))
            .await?;
        Ok(envelope.data)
    }
}
