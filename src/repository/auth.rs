use std::sync::Arc;

use crate::api::{
    RefreshRequest, RefreshResponse, SignInRequest, SignInResponse, SignUpRequest, SignUpResponse,
};
use crate::token::{Credential, SecureString, TokenStore};
use crate::transport::ApiClient;

use super::call::call_json;
use super::error::{Outcome, RepositoryError};

/// Sign-in, sign-up and refresh, plus persistence of the resulting tokens.
///
/// The network calls return the new [`Credential`] without storing it;
/// callers persist it with [`AuthRepository::save_credential`] once they
/// accept the result.
#[derive(Clone)]
pub struct AuthRepository {
    client: ApiClient,
    tokens: Arc<TokenStore>,
}

impl AuthRepository {
    /// `client` should be the unauthenticated configuration.
    pub fn new(client: ApiClient, tokens: Arc<TokenStore>) -> Self {
        Self { client, tokens }
    }

    /// Sign in and return the issued credential.
    pub async fn sign_in(&self, email: &str, password: &str) -> Outcome<Credential> {
        let request = SignInRequest {
            email_address: email.to_string(),
            password: password.to_string(),
        };
        let response: SignInResponse =
            call_json("sign_in", self.client.sign_in(&request)).await?;

        let credential = Credential {
            access_token: SecureString::new(response.access_token),
            refresh_token: SecureString::new(response.refresh_token),
            user_id: response.id,
            user_email: response.email_address,
        };
        tracing::debug!(user_id = %credential.user_id, "Sign-in accepted");
        Ok(credential)
    }

    /// Register, then sign in with the same credentials.
    ///
    /// The backend hands out tokens only on sign-in, so both steps are one
    /// operation from the caller's point of view.
    pub async fn sign_up(&self, email: &str, password: &str) -> Outcome<Credential> {
        let request = SignUpRequest {
            email_address: email.to_string(),
            password: password.to_string(),
        };
        let created: SignUpResponse = call_json("sign_up", self.client.sign_up(&request)).await?;
        tracing::info!(user_id = %created.id, "Account created");

        self.sign_in(email, password).await
    }

    /// Exchange the stored refresh token for a new token pair.
    ///
    /// Identity fields are carried over from the stored credential.
    pub async fn refresh(&self) -> Outcome<Credential> {
        let current = self
            .tokens
            .credential()?
            .ok_or(RepositoryError::NotSignedIn)?;

        let request = RefreshRequest {
            refresh_token: current.refresh_token.expose().to_string(),
        };
        let response: RefreshResponse =
            call_json("refresh", self.client.refresh(&request)).await?;

        let credential = Credential {
            access_token: SecureString::new(response.access_token),
            refresh_token: SecureString::new(response.refresh_token),
            ..current
        };
        tracing::debug!(server_message = ?response.message, "Tokens refreshed");
        Ok(credential)
    }

    /// Persist `credential` as the signed-in user.
    pub fn save_credential(&self, credential: &Credential) -> Outcome<()> {
        self.tokens.save_credential(credential)?;
        tracing::info!(user_id = %credential.user_id, "Signed in");
        Ok(())
    }

    pub fn logout(&self) -> Outcome<()> {
        self.tokens.logout()?;
        tracing::info!("Signed out");
        Ok(())
    }

    pub fn is_logged_in(&self) -> bool {
        self.tokens.is_logged_in()
    }

    pub fn current_credential(&self) -> Outcome<Option<Credential>> {
        Ok(self.tokens.credential()?)
    }
}
