use std::sync::Arc;

use crate::api::{
    CreateQuizRequest, CreateQuizResponse, Question, QuestionRequest, Quiz, QuizQuery,
    UpdateQuizRequest,
};
use crate::repository::QuizRepository;
use crate::state::{run_operation, run_operation_with, Invocation, ListSlot, Slot, TaskScope};

/// Result of a question mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionChange {
    Added(Question),
    Updated(Question),
    Deleted { quiz_id: i64, question_id: i64 },
}

/// State holder for the quiz screens.
///
/// One slot per operation family:
///
/// | slot                 | operations                                   |
/// |----------------------|----------------------------------------------|
/// | `quiz_list`          | `get_my_quizzes`                             |
/// | `quiz`               | `get_quiz`                                   |
/// | `create_quiz`        | `create_quiz`                                |
/// | `operation`          | `update_quiz`, `delete_quiz`, `publish_quiz` |
/// | `question_operation` | `add_question`, `update_question`, `delete_question` |
pub struct QuizViewModel {
    repository: QuizRepository,
    quiz_list: ListSlot<Quiz>,
    quiz: Arc<Slot<Quiz>>,
    create_quiz: Arc<Slot<CreateQuizResponse>>,
    operation: Arc<Slot<String>>,
    question_operation: Arc<Slot<QuestionChange>>,
    scope: TaskScope,
}

impl QuizViewModel {
    pub fn new(repository: QuizRepository) -> Self {
        Self {
            repository,
            quiz_list: ListSlot::new(),
            quiz: Arc::new(Slot::new()),
            create_quiz: Arc::new(Slot::new()),
            operation: Arc::new(Slot::new()),
            question_operation: Arc::new(Slot::new()),
            scope: TaskScope::new(),
        }
    }

    pub fn quiz_list(&self) -> &ListSlot<Quiz> {
        &self.quiz_list
    }

    /// Last successfully loaded quizzes, minus local deletions.
    pub fn quizzes(&self) -> Vec<Quiz> {
        self.quiz_list.items()
    }

    pub fn quiz(&self) -> &Arc<Slot<Quiz>> {
        &self.quiz
    }

    pub fn create_quiz_state(&self) -> &Arc<Slot<CreateQuizResponse>> {
        &self.create_quiz
    }

    pub fn operation(&self) -> &Arc<Slot<String>> {
        &self.operation
    }

    pub fn question_operation(&self) -> &Arc<Slot<QuestionChange>> {
        &self.question_operation
    }

    pub fn get_my_quizzes(&self, query: QuizQuery) -> Invocation<Vec<Quiz>> {
        let repository = self.repository.clone();
        self.quiz_list.run(&self.scope, async move {
            repository
                .my_quizzes(&query)
                .await
                .map(|page| page.content)
                .map_err(|e| e.to_string())
        })
    }

    pub fn get_quiz(&self, quiz_id: i64, user_id: &str) -> Invocation<Quiz> {
        let repository = self.repository.clone();
        let user_id = user_id.to_string();
        run_operation(&self.quiz, &self.scope, async move {
            repository
                .get_quiz(quiz_id, &user_id)
                .await
                .map_err(|e| e.to_string())
        })
    }

    pub fn create_quiz(&self, request: CreateQuizRequest) -> Invocation<CreateQuizResponse> {
        let repository = self.repository.clone();
        run_operation(&self.create_quiz, &self.scope, async move {
            repository
                .create_quiz(&request)
                .await
                .map_err(|e| e.to_string())
        })
    }

    pub fn update_quiz(
        &self,
        quiz_id: i64,
        user_id: &str,
        request: UpdateQuizRequest,
    ) -> Invocation<String> {
        let repository = self.repository.clone();
        let list = self.quiz_list.clone();
        let user_id = user_id.to_string();
        run_operation_with(
            &self.operation,
            &self.scope,
            async move {
                repository
                    .update_quiz(quiz_id, &user_id, &request)
                    .await
                    .map_err(|e| e.to_string())
            },
            move |updated: Quiz| {
                let message = format!("Quiz \"{}\" updated", updated.name);
                replace_cached(&list, updated);
                Ok(message)
            },
        )
    }

    /// Delete a quiz; on success it is also evicted from the cached list.
    pub fn delete_quiz(&self, quiz_id: i64, user_id: &str) -> Invocation<String> {
        let repository = self.repository.clone();
        let list = self.quiz_list.clone();
        let user_id = user_id.to_string();
        run_operation_with(
            &self.operation,
            &self.scope,
            async move {
                repository
                    .delete_quiz(quiz_id, &user_id)
                    .await
                    .map_err(|e| e.to_string())
            },
            move |()| {
                list.retain(|quiz| quiz.id != quiz_id);
                Ok(format!("Quiz {} deleted", quiz_id))
            },
        )
    }

    pub fn publish_quiz(&self, quiz_id: i64, user_id: &str) -> Invocation<String> {
        let repository = self.repository.clone();
        let list = self.quiz_list.clone();
        let user_id = user_id.to_string();
        run_operation_with(
            &self.operation,
            &self.scope,
            async move {
                repository
                    .publish_quiz(quiz_id, &user_id)
                    .await
                    .map_err(|e| e.to_string())
            },
            move |published: Quiz| {
                let message = format!("Quiz \"{}\" published", published.name);
                replace_cached(&list, published);
                Ok(message)
            },
        )
    }

    /// Callers run [`QuestionRequest::validate`] first.
    pub fn add_question(
        &self,
        quiz_id: i64,
        user_id: &str,
        request: QuestionRequest,
    ) -> Invocation<QuestionChange> {
        let repository = self.repository.clone();
        let user_id = user_id.to_string();
        run_operation(&self.question_operation, &self.scope, async move {
            repository
                .add_question(quiz_id, &user_id, &request)
                .await
                .map(QuestionChange::Added)
                .map_err(|e| e.to_string())
        })
    }

    pub fn update_question(
        &self,
        quiz_id: i64,
        question_id: i64,
        user_id: &str,
        request: QuestionRequest,
    ) -> Invocation<QuestionChange> {
        let repository = self.repository.clone();
        let user_id = user_id.to_string();
        run_operation(&self.question_operation, &self.scope, async move {
            repository
                .update_question(quiz_id, question_id, &user_id, &request)
                .await
                .map(QuestionChange::Updated)
                .map_err(|e| e.to_string())
        })
    }

    pub fn delete_question(
        &self,
        quiz_id: i64,
        question_id: i64,
        user_id: &str,
    ) -> Invocation<QuestionChange> {
        let repository = self.repository.clone();
        let user_id = user_id.to_string();
        run_operation(&self.question_operation, &self.scope, async move {
            repository
                .delete_question(quiz_id, question_id, &user_id)
                .await
                .map(|()| QuestionChange::Deleted {
                    quiz_id,
                    question_id,
                })
                .map_err(|e| e.to_string())
        })
    }

    pub fn reset_quiz_list(&self) {
        self.quiz_list.reset();
    }

    pub fn reset_quiz(&self) {
        self.quiz.reset();
    }

    pub fn reset_create_quiz(&self) {
        self.create_quiz.reset();
    }

    pub fn reset_operation(&self) {
        self.operation.reset();
    }

    pub fn reset_question_operation(&self) {
        self.question_operation.reset();
    }
}

fn replace_cached(list: &ListSlot<Quiz>, quiz: Quiz) {
    let id = quiz.id;
    list.replace_where(|cached| cached.id == id, quiz);
}
