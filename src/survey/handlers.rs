use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use tracing::instrument;

use super::dto::{SurveyInput, SurveyResultResponse};
use super::services;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/survey/result", post(survey_result))
}

/// POST /survey/result — scores the submission, stores it and returns the
/// supplement recommendation. A body that fails to deserialize (e.g. a
/// non-numeric lab value) is a validation error, not a silent default.
#[instrument(skip(state, payload))]
pub async fn survey_result(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    payload: Result<Json<SurveyInput>, JsonRejection>,
) -> Result<Json<SurveyResultResponse>, ApiError> {
    let Json(input) = payload.map_err(|e| ApiError::Validation(e.body_text()))?;
    let response = services::submit_survey(&state, user_id, input).await?;
    Ok(Json(response))
}
