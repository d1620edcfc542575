//! Per-feature state containers built on [`crate::state`].
//!
//! Operations return immediately after publishing `Loading`; observers
//! follow the slots, and callers that need the outcome await
//! [`Invocation::settled`](crate::state::Invocation::settled).

mod auth;
mod quiz;
mod user;

pub use auth::AuthViewModel;
pub use quiz::{QuestionChange, QuizViewModel};
pub use user::UserViewModel;
