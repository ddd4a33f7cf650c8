use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

use crate::client::{ApiError, BackendClient, SessionClient};
use crate::model::payroll::Payroll;
use crate::models::Envelope;

/// Report filters. Dates are `YYYY-MM-DD`; unset filters are omitted from the
/// backend query.
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
pub struct ReportQuery {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::utils::de::opt_date_lenient"
    )]
    #[param(value_type = Option<String>, format = "date")]
    pub period_start: Option<chrono::NaiveDate>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::utils::de::opt_date_lenient"
    )]
    #[param(value_type = Option<String>, format = "date")]
    pub period_end: Option<chrono::NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_type_id: Option<u64>,
}

impl SessionClient {
    pub async fn payroll_report(&self, query: &ReportQuery) -> Result<Vec<Payroll>, ApiError> {
        let envelope: Envelope<Vec<Payroll>> = self.get_with("/report/payroll", query).await?;
        Ok(envelope.data)
    }
}

impl BackendClient {
    /// Download link for the spreadsheet export. The contract type filter is
    /// not part of the export.
    pub fn report_export_url(&self, query: &ReportQuery) -> Result<String, ApiError> {
        let export = ReportQuery {
            contract_type_id: None,
            ..query.clone()
        };
        self.link("/reports/export", &export)
    }
}
