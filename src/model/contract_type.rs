use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContractType {
    #[schema(example = 3)]
    pub id: u64,
    #[schema(example = "Mensual")]
    pub name: String,
}
