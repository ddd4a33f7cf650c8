use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PayrollType {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = "Ordinaria")]
    pub name: String,
}
