//! Repositories: one per feature area, all sharing the same outcome
//! normalization (see [`call`]).

mod auth;
pub mod call;
mod error;
mod quiz;
mod user;

pub use auth::AuthRepository;
pub use call::{call_empty, call_json, expect_empty, expect_json, RawResponse};
pub use error::{Outcome, RepositoryError};
pub use quiz::QuizRepository;
pub use user::UserRepository;
