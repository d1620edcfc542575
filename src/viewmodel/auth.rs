use std::future::Future;
use std::sync::Arc;

use crate::repository::{AuthRepository, Outcome, RepositoryError};
use crate::state::{run_operation_with, Invocation, Slot, TaskScope};
use crate::token::Credential;

/// Sign-in/sign-up state for the authentication screens.
pub struct AuthViewModel {
    repository: AuthRepository,
    auth_state: Arc<Slot<Credential>>,
    scope: TaskScope,
}

impl AuthViewModel {
    pub fn new(repository: AuthRepository) -> Self {
        Self {
            repository,
            auth_state: Arc::new(Slot::new()),
            scope: TaskScope::new(),
        }
    }

    pub fn auth_state(&self) -> &Arc<Slot<Credential>> {
        &self.auth_state
    }

    pub fn sign_in(&self, email: &str, password: &str) -> Invocation<Credential> {
        let repository = self.repository.clone();
        let (email, password) = (email.to_string(), password.to_string());
        self.authenticate("Sign-in", async move {
            repository.sign_in(&email, &password).await
        })
    }

    /// Register and, on success, sign straight in.
    pub fn sign_up(&self, email: &str, password: &str) -> Invocation<Credential> {
        let repository = self.repository.clone();
        let (email, password) = (email.to_string(), password.to_string());
        self.authenticate("Sign-up", async move {
            repository.sign_up(&email, &password).await
        })
    }

    pub fn refresh(&self) -> Invocation<Credential> {
        let repository = self.repository.clone();
        self.authenticate("Refresh", async move { repository.refresh().await })
    }

    /// Forget the stored credential and return the slot to `Idle`.
    ///
    /// The slot is reset first, so a sign-in still in flight can no
    /// longer store its tokens once they are cleared.
    pub fn logout(&self) -> Outcome<()> {
        self.auth_state.reset();
        self.repository.logout()
    }

    pub fn is_logged_in(&self) -> bool {
        self.repository.is_logged_in()
    }

    pub fn current_credential(&self) -> Outcome<Option<Credential>> {
        self.repository.current_credential()
    }

    pub fn reset_auth(&self) {
        self.auth_state.reset();
    }

    /// Run a credential-producing call; the credential is stored only if
    /// the call's result lands.
    fn authenticate<F>(&self, action: &'static str, call: F) -> Invocation<Credential>
    where
        F: Future<Output = Outcome<Credential>> + Send + 'static,
    {
        let repository = self.repository.clone();
        run_operation_with(
            &self.auth_state,
            &self.scope,
            async move { call.await.map_err(|e| failure_message(action, &e)) },
            move |credential: Credential| {
                repository
                    .save_credential(&credential)
                    .map(|()| credential)
                    .map_err(|e| failure_message(action, &e))
            },
        )
    }
}

fn failure_message(action: &str, error: &RepositoryError) -> String {
    format!("{} failed: {}", action, error.reason())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_failure_uses_status_text() {
        let err = RepositoryError::Http {
            status: 401,
            message: "Unauthorized".to_string(),
            body: r#"{"error":"bad credentials"}"#.to_string(),
        };
        assert_eq!(failure_message("Sign-in", &err), "Sign-in failed: Unauthorized");
    }

    #[test]
    fn other_failures_use_full_message() {
        assert_eq!(
            failure_message("Refresh", &RepositoryError::NotSignedIn),
            "Refresh failed: Not signed in"
        );
    }
}
