//! `/api/v1/authentication` endpoints.

use reqwest::{Method, Response};

use crate::transport::ApiClient;

use super::models::{RefreshRequest, SignInRequest, SignUpRequest};

const SIGN_IN: &str = "/api/v1/authentication/sign-in";
const SIGN_UP: &str = "/api/v1/authentication/sign-up";
const REFRESH: &str = "/api/v1/authentication/refresh";

impl ApiClient {
    pub async fn sign_in(&self, body: &SignInRequest) -> reqwest::Result<Response> {
        self.request(Method::POST, SIGN_IN, &[]).json(body).send().await
    }

    pub async fn sign_up(&self, body: &SignUpRequest) -> reqwest::Result<Response> {
        self.request(Method::POST, SIGN_UP, &[]).json(body).send().await
    }

    pub async fn refresh(&self, body: &RefreshRequest) -> reqwest::Result<Response> {
        self.request(Method::POST, REFRESH, &[]).json(body).send().await
    }
}
