use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::utils::de;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "deduction_name": "IGSS",
        "deduction_percentage": 4.83,
        "deduction_fixed_amount": null
    })
)]
pub struct Deduction {
    pub id: u64,
    pub deduction_name: String,
    #[serde(deserialize_with = "de::f64_lenient")]
    pub deduction_percentage: f64,
    #[serde(default, deserialize_with = "de::opt_f64_lenient")]
    pub deduction_fixed_amount: Option<f64>,
}
