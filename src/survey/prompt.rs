//! Prompt construction for the completion service and tokenization of its
//! reply. Both sides treat the service as unstructured text: the prompt
//! pins the answer to a closed ingredient vocabulary and the tokenizer
//! makes no assumption beyond comma/newline separation.

use super::scoring::ObjectiveResult;
use crate::auth::repo::User;

/// System role given to the completion service.
pub const SYSTEM_ROLE: &str = "당신은 영양제 전문가입니다.";

/// Maximum reply length requested from the service.
pub const MAX_REPLY_TOKENS: u32 = 300;

/// The closed vocabulary the model may pick from. Mirrors the catalog's
/// Korean ingredient names.
pub const INGREDIENT_VOCABULARY: &[&str] = &[
    "DHA/EPA 제품",
    "밀크씨슬",
    "프로바이오틱스",
    "은행잎 추출물",
    "홍삼",
    "비타민 C",
    "코엔자임 Q10",
    "멀티비타민",
    "포스파티딜세린",
    "L-테아닌",
    "알로에",
    "홍경천",
    "녹차추출물",
    "칼슘 + 비타민D",
    "글루코사민",
    "뮤코다당단백",
    "콘드로이친",
    "프락토 올리고당",
    "쏘팔메토 열매추출물",
    "비타민A",
    "루테인",
    "아스타잔틴",
    "바나바잎",
];

/// Builds the user prompt from the profile and the objective result.
pub fn build_prompt(user: &User, objective: &ObjectiveResult) -> String {
    let unknown = "미상";
    let gender = user.gender.as_deref().unwrap_or(unknown);
    let birth_year = user
        .dob
        .map(|d| d.year().to_string())
        .unwrap_or_else(|| unknown.to_string());
    let occupation = user.occupation.as_deref().unwrap_or(unknown);
    let work_style = user.work_style.as_deref().unwrap_or(unknown);

    let conditions = match &objective.conditions {
        Some(map) if !map.is_empty() => map
            .iter()
            .map(|(metric, status)| format!("{metric}: {status:?}"))
            .collect::<Vec<_>>()
            .join(", "),
        _ => "없음".to_string(),
    };

    format!(
        "성별: {gender}, 출생연도: {birth_year}, 직업군: {occupation}, 근무형태: {work_style}\n\
         복용중인 약물: {medications}\n\
         복용중인 영양제: {supplements}\n\
         건강검진 주요 상태: {conditions}\n\
         \n\
         이 정보를 바탕으로 현재 건강상태를 보완할 수 있는 주요 영양제 성분 2가지 추천해줘\n\
         다른말은 하지 말고 이름만 적어줘\n\
         아래 리스트 중에서만 추천해줘\n\
         {vocabulary}",
        medications = join_or_none(&objective.medications),
        supplements = join_or_none(&objective.supplements),
        vocabulary = INGREDIENT_VOCABULARY.join(", "),
    )
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "없음".to_string()
    } else {
        items.join(", ")
    }
}

/// Splits a free-text reply into candidate ingredient names: comma and
/// newline are separators, surrounding whitespace is dropped, empty
/// fragments are discarded.
pub fn parse_ingredient_tokens(reply: &str) -> Vec<String> {
    reply
        .split(|c| c == ',' || c == '\n')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            email: "sample@example.com".into(),
            password_hash: String::new(),
            name: Some("김민지".into()),
            gender: Some("여성".into()),
            dob: Some(time::macros::date!(1994 - 03 - 12)),
            occupation: Some("간호사".into()),
            work_style: Some("교대근무".into()),
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    fn objective_with(medications: &[&str]) -> ObjectiveResult {
        ObjectiveResult {
            score: 88.0,
            medications: medications.iter().map(|s| s.to_string()).collect(),
            supplements: vec![],
            past_conditions: vec![],
            family_history: vec![],
            conditions: None,
        }
    }

    #[test]
    fn prompt_embeds_profile_and_vocabulary() {
        let prompt = build_prompt(&sample_user(), &objective_with(&["아스피린"]));
        assert!(prompt.contains("여성"));
        assert!(prompt.contains("1994"));
        assert!(prompt.contains("간호사"));
        assert!(prompt.contains("아스피린"));
        assert!(prompt.contains("밀크씨슬"));
        assert!(prompt.contains("바나바잎"));
    }

    #[test]
    fn prompt_falls_back_for_missing_profile_fields() {
        let mut user = sample_user();
        user.gender = None;
        user.dob = None;
        let prompt = build_prompt(&user, &objective_with(&[]));
        assert!(prompt.contains("미상"));
        assert!(prompt.contains("없음"));
    }

    #[test]
    fn tokenizer_splits_on_commas_and_newlines() {
        let tokens = parse_ingredient_tokens("밀크씨슬, 비타민 C\n홍삼");
        assert_eq!(tokens, vec!["밀크씨슬", "비타민 C", "홍삼"]);
    }

    #[test]
    fn tokenizer_trims_and_drops_empty_fragments() {
        let tokens = parse_ingredient_tokens("  밀크씨슬 ,, \n , 루테인  \n\n");
        assert_eq!(tokens, vec!["밀크씨슬", "루테인"]);
    }

    #[test]
    fn tokenizer_of_empty_reply_is_empty() {
        assert!(parse_ingredient_tokens("").is_empty());
        assert!(parse_ingredient_tokens(" \n , \n ").is_empty());
    }

    #[test]
    fn vocabulary_names_are_unique() {
        let mut names: Vec<_> = INGREDIENT_VOCABULARY.to_vec();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), INGREDIENT_VOCABULARY.len());
    }
}
