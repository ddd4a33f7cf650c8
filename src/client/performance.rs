use serde::Serialize;

use crate::client::{ApiError, SessionClient};
use crate::model::performance::PerformanceEvaluation;
use crate::models::Envelope;

#[derive(Serialize)]
struct EvaluationFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    employee_id: Option<u64>,
}

impl SessionClient {
    /// Every evaluation, or only `employee_id`'s. Dates are filtered by the caller.
    pub async fn list_evaluations(
        &self,
        employee_id: Option<u64>,
    ) -> Result<Vec<PerformanceEvaluation>, ApiError> {
        let filter = EvaluationFilter { employee_id };
        let envelope: Envelope<Vec<PerformanceEvaluation>> =
            self.get_with("/performance-evaluation", &filter).await?;
        Ok(envelope.data)
    }

    pub async fn create_evaluation<B: Serialize + ?Sized>(
        &self,
        body: &B,
    ) -> Result<PerformanceEvaluation, ApiError> {
        let envelope: Envelope<PerformanceEvaluation> =
            self.post("/performance-evaluation", body).await?;
        Ok(envelope.data)
    }
}
