//! Objective wellness scoring and the subjective answer bundle.
//!
//! The rule table is fixed and non-adaptive. Band boundaries are checked in
//! a deliberate order; a value belongs to the first band whose condition
//! holds, so the order below is part of the contract and must not be
//! "cleaned up" into a sorted range table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::dto::SurveyInput;

/// Qualitative classification of a single lab metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricStatus {
    Normal,
    Caution,
    Risk,
}

/// Result of the objective scoring pass. Immutable once computed; the
/// score is intentionally left unclamped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectiveResult {
    pub score: f64,
    pub medications: Vec<String>,
    pub supplements: Vec<String>,
    pub past_conditions: Vec<String>,
    pub family_history: Vec<String>,
    /// Per-metric classification; only produced in upload mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<BTreeMap<String, MetricStatus>>,
}

/// Self-reported answers repackaged under fixed keys for storage and
/// display. Never computed on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectiveResult {
    pub subjective_score: Option<f64>,
    pub overall_health_aware: Option<Value>,
    pub daily_function: Option<Value>,
    pub life_pattern: Option<Value>,
    pub mental: Option<Value>,
    pub inconvenience_concern: Option<Value>,
}

pub fn aggregate_subjective(input: &SurveyInput) -> SubjectiveResult {
    SubjectiveResult {
        subjective_score: input.subjective_score,
        overall_health_aware: input.overall_health_aware.clone(),
        daily_function: input.daily_function.clone(),
        life_pattern: input.life_pattern.clone(),
        mental: input.mental.clone(),
        inconvenience_concern: input.inconvenience_concern.clone(),
    }
}

/// Scores a submission. Upload mode starts from 100 and folds in the lab
/// classifiers; without labs the score starts from 35 and is rescaled to
/// the 100-point range.
pub fn score_objective(input: &SurveyInput, upload: bool) -> ObjectiveResult {
    if upload {
        score_with_labs(input)
    } else {
        score_without_labs(input)
    }
}

fn history_penalty(input: &SurveyInput) -> f64 {
    (input.medications.len() as f64 * 4.0).min(20.0)
        + (input.past_conditions.len() as f64 * 2.0).min(10.0)
        + (input.family_history.len() as f64).min(5.0)
}

fn score_with_labs(input: &SurveyInput) -> ObjectiveResult {
    let mut score = 100.0 - history_penalty(input);

    let metrics = [
        (
            "blood_pressure",
            classify_blood_pressure(input.systolic, input.diastolic),
        ),
        (
            "fasting_glucose",
            classify_fasting_glucose(input.fasting_glucose),
        ),
        ("bmi", classify_bmi(input.bmi)),
        ("ast", classify_aminotransferase(input.ast)),
        ("alt", classify_aminotransferase(input.alt)),
        ("egfr", classify_egfr(input.egfr)),
        ("hemoglobin", classify_hemoglobin(input.hemoglobin)),
    ];

    let mut conditions = BTreeMap::new();
    for (metric, (penalty, status)) in metrics {
        score -= penalty;
        conditions.insert(metric.to_string(), status);
    }

    ObjectiveResult {
        score,
        medications: input.medications.clone(),
        supplements: input.supplements.clone(),
        past_conditions: input.past_conditions.clone(),
        family_history: input.family_history.clone(),
        conditions: Some(conditions),
    }
}

fn score_without_labs(input: &SurveyInput) -> ObjectiveResult {
    let raw = 35.0 - history_penalty(input);

    ObjectiveResult {
        score: raw / 35.0 * 100.0,
        medications: input.medications.clone(),
        supplements: input.supplements.clone(),
        past_conditions: input.past_conditions.clone(),
        family_history: input.family_history.clone(),
        conditions: None,
    }
}

/// Systolic and diastolic are judged jointly, worst band first.
fn classify_blood_pressure(systolic: f64, diastolic: f64) -> (f64, MetricStatus) {
    if systolic > 180.0 || diastolic > 120.0 {
        (10.0, MetricStatus::Risk)
    } else if systolic >= 140.0 || diastolic >= 90.0 {
        (8.0, MetricStatus::Risk)
    } else if systolic >= 130.0 || diastolic >= 80.0 {
        (5.0, MetricStatus::Risk)
    } else if systolic >= 120.0 {
        (3.0, MetricStatus::Caution)
    } else {
        (0.0, MetricStatus::Normal)
    }
}

/// The hypoglycemia band sits after the elevated bands on purpose: a value
/// like 65 must fall through the first two checks and land on `< 70`.
fn classify_fasting_glucose(value: f64) -> (f64, MetricStatus) {
    if value >= 126.0 {
        (10.0, MetricStatus::Risk)
    } else if value >= 100.0 {
        (5.0, MetricStatus::Caution)
    } else if value < 70.0 {
        (12.0, MetricStatus::Risk)
    } else {
        (0.0, MetricStatus::Normal)
    }
}

fn classify_bmi(value: f64) -> (f64, MetricStatus) {
    if value < 18.5 {
        (5.0, MetricStatus::Risk)
    } else if value >= 30.0 {
        (7.0, MetricStatus::Risk)
    } else if value >= 25.0 {
        (5.0, MetricStatus::Risk)
    } else if value >= 24.0 {
        (2.0, MetricStatus::Caution)
    } else {
        (0.0, MetricStatus::Normal)
    }
}

/// Shared by AST and ALT; the two are still scored as independent metrics.
fn classify_aminotransferase(value: f64) -> (f64, MetricStatus) {
    if value > 100.0 {
        (4.0, MetricStatus::Risk)
    } else if value >= 61.0 {
        (2.0, MetricStatus::Risk)
    } else if value >= 41.0 {
        (1.0, MetricStatus::Caution)
    } else {
        (0.0, MetricStatus::Normal)
    }
}

fn classify_egfr(value: f64) -> (f64, MetricStatus) {
    if value < 15.0 {
        (15.0, MetricStatus::Risk)
    } else if value < 30.0 {
        (12.0, MetricStatus::Risk)
    } else if value < 45.0 {
        (9.0, MetricStatus::Risk)
    } else if value < 60.0 {
        (6.0, MetricStatus::Caution)
    } else if value < 90.0 {
        (3.0, MetricStatus::Caution)
    } else {
        (0.0, MetricStatus::Normal)
    }
}

fn classify_hemoglobin(value: f64) -> (f64, MetricStatus) {
    if value > 19.0 || value < 7.0 {
        (12.0, MetricStatus::Risk)
    } else if (16.5..=18.9).contains(&value) || (7.0..=9.9).contains(&value) {
        let penalty = if value < 10.0 { 10.0 } else { 5.0 };
        (penalty, MetricStatus::Caution)
    } else if (10.0..=12.49).contains(&value) {
        (5.0, MetricStatus::Caution)
    } else {
        (0.0, MetricStatus::Normal)
    }
}
