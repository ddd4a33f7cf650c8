use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::utils::de;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "bonu_name": "Bonificación incentivo",
        "bonu_percentage": 0.0,
        "bonu_fixed_amount": 250.0
    })
)]
pub struct Bonus {
    pub id: u64,
    pub bonu_name: String,
    #[serde(deserialize_with = "de::f64_lenient")]
    pub bonu_percentage: f64,
    #[serde(default, deserialize_with = "de::opt_f64_lenient")]
    pub bonu_fixed_amount: Option<f64>,
}
