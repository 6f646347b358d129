use serde::Serialize;
use sqlx::{types::Json, FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use super::scoring::{ObjectiveResult, SubjectiveResult};

/// One survey submission as persisted. Insert-only; rows are never
/// mutated or deleted.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SurveyRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub objective_responses: Json<ObjectiveResult>,
    pub subjective_responses: Json<SubjectiveResult>,
    pub created_at: OffsetDateTime,
}

pub async fn insert_survey(
    db: &PgPool,
    user_id: Uuid,
    objective: &ObjectiveResult,
    subjective: &SubjectiveResult,
) -> Result<SurveyRecord, sqlx::Error> {
    let record = sqlx::query_as::<_, SurveyRecord>(
        r#"
        INSERT INTO survey_responses (user_id, objective_responses, subjective_responses)
        VALUES ($1, $2, $3)
        RETURNING id, user_id, objective_responses, subjective_responses, created_at
        "#,
    )
    .bind(user_id)
    .bind(Json(objective))
    .bind(Json(subjective))
    .fetch_one(db)
    .await?;
    Ok(record)
}
