//! Wiring: config → token store → HTTP clients → repositories → containers.

use std::sync::Arc;

use crate::config::Config;
use crate::repository::{AuthRepository, QuizRepository, UserRepository};
use crate::token::TokenStore;
use crate::transport::{HttpClientFactory, TransportError};
use crate::viewmodel::{AuthViewModel, QuizViewModel, UserViewModel};

/// Shared dependencies for building feature containers.
pub struct AppContext {
    clients: HttpClientFactory,
}

impl AppContext {
    /// Build from config, opening the configured token file.
    pub fn new(config: &Config) -> Result<Self, TransportError> {
        let tokens = TokenStore::open(config.storage.resolved_token_path());
        Self::with_token_store(config, Arc::new(tokens))
    }

    pub fn with_token_store(
        config: &Config,
        tokens: Arc<TokenStore>,
    ) -> Result<Self, TransportError> {
        let clients = HttpClientFactory::new(&config.api, tokens)?;
        Ok(Self { clients })
    }

    pub fn token_store(&self) -> &Arc<TokenStore> {
        self.clients.token_store()
    }

    pub fn auth_view_model(&self) -> AuthViewModel {
        AuthViewModel::new(AuthRepository::new(
            self.clients.unauthenticated(),
            Arc::clone(self.clients.token_store()),
        ))
    }

    pub fn quiz_view_model(&self) -> QuizViewModel {
        QuizViewModel::new(QuizRepository::new(self.clients.authenticated()))
    }

    pub fn user_view_model(&self) -> UserViewModel {
        UserViewModel::new(UserRepository::new(self.clients.authenticated()))
    }
}
