use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use uuid::Uuid;

use super::dto::{SupplementList, SurveyInput, SurveyResultResponse};
use super::{prompt, repo, scoring};
use crate::auth::repo::User;
use crate::catalog::matcher::{self, MatchOutcome, DEFAULT_SAMPLE_LIMIT};
use crate::completion::{complete_with_retry, ChatMessage};
use crate::error::ApiError;
use crate::state::AppState;

/// Runs one survey submission end to end: score, persist, ask the
/// completion service for ingredient suggestions, match them against the
/// catalog.
///
/// The survey row is committed before the completion call; if the service
/// still fails after the bounded retry, the submission degrades to an
/// empty recommendation instead of discarding the stored result.
pub async fn submit_survey(
    state: &AppState,
    user_id: Uuid,
    input: SurveyInput,
) -> Result<SurveyResultResponse, ApiError> {
    let user = User::find_by_id(&state.db, user_id)
        .await
        .map_err(ApiError::Internal)?
        .ok_or(ApiError::NotFound("user"))?;

    let objective = scoring::score_objective(&input, input.upload);
    let subjective = scoring::aggregate_subjective(&input);

    let record = repo::insert_survey(&state.db, user_id, &objective, &subjective).await?;
    info!(survey_id = %record.id, user_id = %user_id, score = objective.score, "survey stored");

    let messages = [
        ChatMessage::system(prompt::SYSTEM_ROLE),
        ChatMessage::user(prompt::build_prompt(&user, &objective)),
    ];

    let (suggested, outcome) = match complete_with_retry(
        state.completion.as_ref(),
        &messages,
        prompt::MAX_REPLY_TOKENS,
    )
    .await
    {
        Ok(reply) => {
            let tokens = prompt::parse_ingredient_tokens(&reply);
            let mut rng = StdRng::from_entropy();
            let outcome =
                matcher::recommend_products(&state.db, &tokens, DEFAULT_SAMPLE_LIMIT, &mut rng)
                    .await?;
            (tokens, outcome)
        }
        Err(e) => {
            warn!(error = %e, user_id = %user_id, "completion failed; survey kept, recommendation empty");
            (Vec::new(), MatchOutcome::default())
        }
    };

    Ok(SurveyResultResponse {
        username: user.name,
        dob: user.dob,
        message: "Survey saved successfully",
        total_score: objective,
        suggested_ingredients: suggested,
        supplement_list: SupplementList {
            recommended_ingredients: outcome
                .matched_ingredients
                .into_iter()
                .map(|ing| ing.name)
                .collect(),
            supplements: outcome.products,
        },
    })
}
