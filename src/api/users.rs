//! `/api/v1/users` and `/api/v1/roles` endpoints.

use reqwest::{Method, Response};

use crate::transport::ApiClient;

impl ApiClient {
    pub async fn list_users(&self) -> reqwest::Result<Response> {
        self.request(Method::GET, "/api/v1/users", &[]).send().await
    }

    pub async fn get_user(&self, user_id: &str) -> reqwest::Result<Response> {
        let path = format!("/api/v1/users/{}", user_id);
        self.request(Method::GET, &path, &[]).send().await
    }

    pub async fn list_roles(&self) -> reqwest::Result<Response> {
        self.request(Method::GET, "/api/v1/roles", &[]).send().await
    }
}
