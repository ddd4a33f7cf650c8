use serde::Serialize;

use crate::client::{ApiError, SessionClient};
use crate::model::payroll::Payroll;
use crate::models::{Ack, Envelope};
use crate::period::DateRange;

/// Body of `POST /payroll`.
#[derive(Debug, Clone, Serialize)]
pub struct NewPayroll {
    pub payroll_type_id: u64,
    pub contract_type_id: u64,
    pub period_start: chrono::NaiveDate,
    pub period_end: chrono::NaiveDate,
    pub bonus: Vec<u64>,
    pub deductions: Vec<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PayPayrolls<'a> {
    pub payrolls: &'a [u64],
}

impl SessionClient {
    pub async fn list_payrolls(&self, range: &DateRange) -> Result<Vec<Payroll>, ApiError> {
        let envelope: Envelope<Vec<Payroll>> = self.get_with("/payroll", range).await?;
        Ok(envelope.data)
    }

    /// Generates one payroll per active employee of the contract type.
    pub async fn create_payroll(&self, payroll: &NewPayroll) -> Result<Vec<Payroll>, ApiError> {
        let envelope: Envelope<Vec<Payroll>> = self.post("/payroll", payroll).await?;
        Ok(envelope.data)
    }

    pub async fn pay_payrolls(&self, ids: &[u64]) -> Result<Ack, ApiError> {
        self.post("/payroll/pay", &PayPayrolls { payrolls: ids }).await
    }

    /// Payment history keyed by the user id, which is what the backend route
    /// expects.
    pub async fn payrolls_for_user(
        &self,
        user_id: u64,
        range: &DateRange,
    ) -> Result<Vec<Payroll>, ApiError> {
        let envelope: Envelope<Vec<Payroll>> = self
            .get_with(&format!("/payroll/employee/{}", user_id), range)
            .await?;
        Ok(envelope.data)
    }
}
