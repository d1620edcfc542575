use crate::api::{
    CreateQuizRequest, CreateQuizResponse, Page, Question, QuestionRequest, Quiz, QuizQuery,
    UpdateQuizRequest,
};
use crate::transport::ApiClient;

use super::call::{call_empty, call_json};
use super::error::Outcome;

/// Quiz and question CRUD against the authenticated client.
#[derive(Clone)]
pub struct QuizRepository {
    client: ApiClient,
}

impl QuizRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn my_quizzes(&self, query: &QuizQuery) -> Outcome<Page<Quiz>> {
        call_json("my_quizzes", self.client.my_quizzes(query)).await
    }

    pub async fn get_quiz(&self, quiz_id: i64, user_id: &str) -> Outcome<Quiz> {
        call_json("get_quiz", self.client.get_quiz(quiz_id, user_id)).await
    }

    pub async fn create_quiz(&self, request: &CreateQuizRequest) -> Outcome<CreateQuizResponse> {
        call_json(
            "create_quiz",
            self.client.create_quiz(&request.creator_id, request),
        )
        .await
    }

    pub async fn update_quiz(
        &self,
        quiz_id: i64,
        user_id: &str,
        request: &UpdateQuizRequest,
    ) -> Outcome<Quiz> {
        call_json(
            "update_quiz",
            self.client.update_quiz(quiz_id, user_id, request),
        )
        .await
    }

    pub async fn delete_quiz(&self, quiz_id: i64, user_id: &str) -> Outcome<()> {
        call_empty("delete_quiz", self.client.delete_quiz(quiz_id, user_id)).await
    }

    pub async fn publish_quiz(&self, quiz_id: i64, user_id: &str) -> Outcome<Quiz> {
        call_json("publish_quiz", self.client.publish_quiz(quiz_id, user_id)).await
    }

    pub async fn add_question(
        &self,
        quiz_id: i64,
        user_id: &str,
        request: &QuestionRequest,
    ) -> Outcome<Question> {
        call_json(
            "add_question",
            self.client.add_question(quiz_id, user_id, request),
        )
        .await
    }

    pub async fn update_question(
        &self,
        quiz_id: i64,
        question_id: i64,
        user_id: &str,
        request: &QuestionRequest,
    ) -> Outcome<Question> {
        call_json(
            "update_question",
            self.client
                .update_question(quiz_id, question_id, user_id, request),
        )
        .await
    }

    pub async fn delete_question(
        &self,
        quiz_id: i64,
        question_id: i64,
        user_id: &str,
    ) -> Outcome<()> {
        call_empty(
            "delete_question",
            self.client.delete_question(quiz_id, question_id, user_id),
        )
        .await
    }
}
