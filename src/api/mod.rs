//! Typed definitions of the backend's REST operations.
//!
//! Each endpoint is an async method on [`ApiClient`](crate::transport::ApiClient)
//! returning the raw response; outcome normalization happens in
//! [`crate::repository`].

mod auth;
pub mod models;
mod questions;
mod quizzes;
mod users;

pub use models::{
    Answer, AnswerRequest, CreateQuizRequest, CreateQuizResponse, Page, Question,
    QuestionRequest, QuestionValidationError, Quiz, QuizQuery, RefreshRequest, RefreshResponse,
    Role, SignInRequest, SignInResponse, SignUpRequest, SignUpResponse, UpdateQuizRequest, User,
    Visibility,
};
