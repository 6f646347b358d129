use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::Date;

use super::scoring::ObjectiveResult;
use crate::catalog::repo::Product;

/// Raw survey submission. Nothing is required: absent lab values score as
/// zero and absent lists as empty. A present-but-non-numeric lab value is
/// rejected at the JSON boundary instead of being defaulted away.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SurveyInput {
    /// True when the client attached health-checkup lab values.
    #[serde(default)]
    pub upload: bool,

    // lab values
    #[serde(default)]
    pub systolic: f64,
    #[serde(default)]
    pub diastolic: f64,
    #[serde(default)]
    pub fasting_glucose: f64,
    #[serde(default)]
    pub bmi: f64,
    #[serde(default)]
    pub ast: f64,
    #[serde(default)]
    pub alt: f64,
    #[serde(default)]
    pub egfr: f64,
    #[serde(default)]
    pub hemoglobin: f64,

    // history lists
    #[serde(default)]
    pub medications: Vec<String>,
    #[serde(default)]
    pub supplements: Vec<String>,
    #[serde(default)]
    pub past_conditions: Vec<String>,
    #[serde(default)]
    pub family_history: Vec<String>,

    // self-reported answers, stored verbatim
    #[serde(default)]
    pub subjective_score: Option<f64>,
    #[serde(default)]
    pub overall_health_aware: Option<Value>,
    #[serde(default)]
    pub daily_function: Option<Value>,
    #[serde(default)]
    pub life_pattern: Option<Value>,
    #[serde(default)]
    pub mental: Option<Value>,
    #[serde(default)]
    pub inconvenience_concern: Option<Value>,
}

/// Matched ingredient names plus the sampled products, as shown to the
/// client.
#[derive(Debug, Default, Serialize)]
pub struct SupplementList {
    pub recommended_ingredients: Vec<String>,
    pub supplements: Vec<Product>,
}

#[derive(Debug, Serialize)]
pub struct SurveyResultResponse {
    pub username: Option<String>,
    pub dob: Option<Date>,
    pub message: &'static str,
    pub total_score: ObjectiveResult,
    /// Ingredient tokens parsed out of the model reply, pre-matching.
    pub suggested_ingredients: Vec<String>,
    pub supplement_list: SupplementList,
}
