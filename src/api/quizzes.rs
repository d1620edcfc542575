//! `/api/v1/quizzes` endpoints. Every call is scoped by the acting user.

use reqwest::{Method, Response};

use crate::transport::ApiClient;

use super::models::{CreateQuizRequest, QuizQuery, UpdateQuizRequest};

const QUIZZES: &str = "/api/v1/quizzes";

fn user_scope(user_id: &str) -> [(&'static str, String); 1] {
    [("userId", user_id.to_string())]
}

impl ApiClient {
    pub async fn my_quizzes(&self, query: &QuizQuery) -> reqwest::Result<Response> {
        let path = format!("{}/my-quizzes", QUIZZES);
        self.request(Method::GET, &path, &query.to_pairs())
            .send()
            .await
    }

    pub async fn create_quiz(
        &self,
        user_id: &str,
        body: &CreateQuizRequest,
    ) -> reqwest::Result<Response> {
        self.request(Method::POST, QUIZZES, &user_scope(user_id))
            .json(body)
            .send()
            .await
    }

    pub async fn get_quiz(&self, quiz_id: i64, user_id: &str) -> reqwest::Result<Response> {
        let path = format!("{}/{}", QUIZZES, quiz_id);
        self.request(Method::GET, &path, &user_scope(user_id))
            .send()
            .await
    }

    pub async fn update_quiz(
        &self,
        quiz_id: i64,
        user_id: &str,
        body: &UpdateQuizRequest,
    ) -> reqwest::Result<Response> {
        let path = format!("{}/{}", QUIZZES, quiz_id);
        self.request(Method::PUT, &path, &user_scope(user_id))
            .json(body)
            .send()
            .await
    }

    pub async fn delete_quiz(&self, quiz_id: i64, user_id: &str) -> reqwest::Result<Response> {
        let path = format!("{}/{}", QUIZZES, quiz_id);
        self.request(Method::DELETE, &path, &user_scope(user_id))
            .send()
            .await
    }

    pub async fn publish_quiz(&self, quiz_id: i64, user_id: &str) -> reqwest::Result<Response> {
        let path = format!("{}/{}/publish", QUIZZES, quiz_id);
        self.request(Method::PATCH, &path, &user_scope(user_id))
            .send()
            .await
    }
}
