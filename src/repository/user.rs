use crate::api::{Role, User};
use crate::transport::ApiClient;

use super::call::call_json;
use super::error::Outcome;

/// User and role lookups.
#[derive(Clone)]
pub struct UserRepository {
    client: ApiClient,
}

impl UserRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list_users(&self) -> Outcome<Vec<User>> {
        call_json("list_users", self.client.list_users()).await
    }

    pub async fn get_user(&self, user_id: &str) -> Outcome<User> {
        call_json("get_user", self.client.get_user(user_id)).await
    }

    pub async fn list_roles(&self) -> Outcome<Vec<Role>> {
        call_json("list_roles", self.client.list_roles()).await
    }
}
