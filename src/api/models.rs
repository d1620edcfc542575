//! Request and response bodies exchanged with the quiz backend.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// -- Authentication -----------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct SignInRequest {
    pub email_address: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignUpRequest {
    pub email_address: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignInResponse {
    pub id: String,
    pub email_address: String,
    #[serde(rename = "accessToken")]
    pub access_token: String,
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignUpResponse {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub message: Option<String>,
}

// -- Users --------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email_address: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub roles: Vec<Role>,
}

// -- Quizzes ------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Visibility {
    Public,
    #[default]
    Private,
}

impl std::str::FromStr for Visibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PUBLIC" => Ok(Self::Public),
            "PRIVATE" => Ok(Self::Private),
            other => Err(format!("unknown visibility '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub id: i64,
    pub content: String,
    #[serde(default = "default_content_type")]
    pub content_type: String,
    pub is_correct: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i64,
    pub content: String,
    #[serde(default = "default_content_type")]
    pub content_type: String,
    pub question_type: String,
    #[serde(default)]
    pub points: u32,
    #[serde(default)]
    pub time_limit_seconds: u32,
    #[serde(default)]
    pub question_order: u32,
    #[serde(default)]
    pub answers: Vec<Answer>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: String,
    #[serde(default)]
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub visibility: Visibility,
    pub creator_id: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// Paged listing body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub size: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuizRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
    pub visibility: Visibility,
    pub creator_id: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateQuizResponse {
    pub id: i64,
    #[serde(default)]
    pub message: String,
}

/// Partial quiz update. Absent fields are left untouched by the backend.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuizRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
}

/// Filters and paging for the "my quizzes" listing.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizQuery {
    pub user_id: String,
    pub category: Option<String>,
    pub search: Option<String>,
    pub page: u32,
    pub size: u32,
}

impl QuizQuery {
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            category: None,
            search: None,
            page: 0,
            size: 20,
        }
    }

    /// Query pairs in backend naming. Blank filters are omitted.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("userId", self.user_id.clone())];
        if let Some(category) = self.category.as_deref().filter(|c| !c.trim().is_empty()) {
            pairs.push(("category", category.to_string()));
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.trim().is_empty()) {
            pairs.push(("search", search.to_string()));
        }
        pairs.push(("page", self.page.to_string()));
        pairs.push(("size", self.size.to_string()));
        pairs
    }
}

// -- Questions ----------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRequest {
    pub content: String,
    pub content_type: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRequest {
    pub content: String,
    pub content_type: String,
    pub question_type: String,
    pub points: u32,
    pub time_limit_seconds: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_order: Option<u32>,
    pub answers: Vec<AnswerRequest>,
}

/// Reasons a question draft is refused before it is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestionValidationError {
    #[error("Question text must not be empty")]
    EmptyContent,
    #[error("At least 2 answers are required, got {0}")]
    TooFewAnswers(usize),
    #[error("Mark exactly one answer as correct")]
    NoCorrectAnswer,
}

impl QuestionRequest {
    /// Build a multiple-choice question from answer texts.
    ///
    /// Blank answers are dropped; `correct` indexes the non-blank list.
    pub fn multiple_choice(
        content: impl Into<String>,
        answers: &[String],
        correct: usize,
        points: u32,
        time_limit_seconds: u32,
    ) -> Self {
        let answers = answers
            .iter()
            .map(|a| a.trim())
            .filter(|a| !a.is_empty())
            .enumerate()
            .map(|(i, a)| AnswerRequest {
                content: a.to_string(),
                content_type: default_content_type(),
                is_correct: i == correct,
            })
            .collect();

        Self {
            content: content.into(),
            content_type: default_content_type(),
            question_type: "MULTIPLE_CHOICE".to_string(),
            points,
            time_limit_seconds,
            question_order: None,
            answers,
        }
    }

    /// Client-side checks run by the caller before invoking `add_question`.
    pub fn validate(&self) -> Result<(), QuestionValidationError> {
        if self.content.trim().is_empty() {
            return Err(QuestionValidationError::EmptyContent);
        }
        let filled = self
            .answers
            .iter()
            .filter(|a| !a.content.trim().is_empty())
            .count();
        if filled < 2 {
            return Err(QuestionValidationError::TooFewAnswers(filled));
        }
        if !self.answers.iter().any(|a| a.is_correct) {
            return Err(QuestionValidationError::NoCorrectAnswer);
        }
        Ok(())
    }
}

fn default_content_type() -> String {
    "TEXT".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_in_response_mixed_casing() {
        let body = r#"{
            "id": "u1",
            "email_address": "test@example.com",
            "accessToken": "a",
            "refreshToken": "r"
        }"#;
        let parsed: SignInResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.id, "u1");
        assert_eq!(parsed.access_token, "a");
        assert_eq!(parsed.refresh_token, "r");
    }

    #[test]
    fn quiz_defaults_optional_fields() {
        let body = r#"{"id": 7, "name": "Math", "category": "MATHEMATICS", "creatorId": "u1"}"#;
        let quiz: Quiz = serde_json::from_str(body).unwrap();
        assert_eq!(quiz.visibility, Visibility::Private);
        assert!(quiz.questions.is_empty());
        assert!(quiz.description.is_none());
    }

    #[test]
    fn create_request_omits_absent_fields() {
        let request = CreateQuizRequest {
            name: "Math Quiz".to_string(),
            description: None,
            category: "MATHEMATICS".to_string(),
            cover_image_url: None,
            visibility: Visibility::Public,
            creator_id: "u1".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["creatorId"], "u1");
        assert_eq!(json["visibility"], "PUBLIC");
        assert!(json.get("description").is_none());
    }

    #[test]
    fn quiz_query_skips_blank_filters() {
        let mut query = QuizQuery::for_user("u1");
        query.search = Some("  ".to_string());
        query.category = Some("SCIENCE".to_string());

        let keys: Vec<_> = query.to_pairs().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["userId", "category", "page", "size"]);
    }

    #[test]
    fn question_needs_two_non_blank_answers() {
        let answers = vec!["4".to_string(), "   ".to_string()];
        let question = QuestionRequest::multiple_choice("2 + 2?", &answers, 0, 10, 30);
        assert_eq!(
            question.validate(),
            Err(QuestionValidationError::TooFewAnswers(1))
        );
    }

    #[test]
    fn question_correct_index_counts_non_blank_answers() {
        let answers = vec!["".to_string(), "3".to_string(), "4".to_string()];
        let question = QuestionRequest::multiple_choice("2 + 2?", &answers, 1, 10, 30);

        assert!(question.validate().is_ok());
        assert_eq!(question.answers.len(), 2);
        assert!(question.answers[1].is_correct);
        assert_eq!(question.answers[1].content, "4");
    }

    #[test]
    fn question_out_of_range_correct_index() {
        let answers = vec!["3".to_string(), "4".to_string()];
        let question = QuestionRequest::multiple_choice("2 + 2?", &answers, 5, 10, 30);
        assert_eq!(
            question.validate(),
            Err(QuestionValidationError::NoCorrectAnswer)
        );
    }
}
