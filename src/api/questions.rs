//! Question endpoints nested under a quiz.

use reqwest::{Method, Response};

use crate::transport::ApiClient;

use super::models::QuestionRequest;

fn questions_path(quiz_id: i64) -> String {
    format!("/api/v1/quizzes/{}/questions", quiz_id)
}

impl ApiClient {
    pub async fn add_question(
        &self,
        quiz_id: i64,
        user_id: &str,
        body: &QuestionRequest,
    ) -> reqwest::Result<Response> {
        self.request(
            Method::POST,
            &questions_path(quiz_id),
            &[("userId", user_id.to_string())],
        )
        .json(body)
        .send()
        .await
    }

    pub async fn update_question(
        &self,
        quiz_id: i64,
        question_id: i64,
        user_id: &str,
        body: &QuestionRequest,
    ) -> reqwest::Result<Response> {
        let path = format!("{}/{}", questions_path(quiz_id), question_id);
        self.request(Method::PUT, &path, &[("userId", user_id.to_string())])
            .json(body)
            .send()
            .await
    }

    pub async fn delete_question(
        &self,
        quiz_id: i64,
        question_id: i64,
        user_id: &str,
    ) -> reqwest::Result<Response> {
        let path = format!("{}/{}", questions_path(quiz_id), question_id);
        self.request(Method::DELETE, &path, &[("userId", user_id.to_string())])
            .send()
            .await
    }
}
