use std::sync::Arc;

use crate::api::{Role, User};
use crate::repository::UserRepository;
use crate::state::{run_operation, Invocation, ListSlot, Slot, TaskScope};

/// User directory and role lookups.
pub struct UserViewModel {
    repository: UserRepository,
    users: ListSlot<User>,
    user: Arc<Slot<User>>,
    roles: Arc<Slot<Vec<Role>>>,
    scope: TaskScope,
}

impl UserViewModel {
    pub fn new(repository: UserRepository) -> Self {
        Self {
            repository,
            users: ListSlot::new(),
            user: Arc::new(Slot::new()),
            roles: Arc::new(Slot::new()),
            scope: TaskScope::new(),
        }
    }

    pub fn users(&self) -> &ListSlot<User> {
        &self.users
    }

    pub fn user(&self) -> &Arc<Slot<User>> {
        &self.user
    }

    pub fn roles(&self) -> &Arc<Slot<Vec<Role>>> {
        &self.roles
    }

    pub fn load_users(&self) -> Invocation<Vec<User>> {
        let repository = self.repository.clone();
        self.users.run(&self.scope, async move {
            repository.list_users().await.map_err(|e| e.to_string())
        })
    }

    pub fn load_user(&self, user_id: &str) -> Invocation<User> {
        let repository = self.repository.clone();
        let user_id = user_id.to_string();
        run_operation(&self.user, &self.scope, async move {
            repository.get_user(&user_id).await.map_err(|e| e.to_string())
        })
    }

    pub fn load_roles(&self) -> Invocation<Vec<Role>> {
        let repository = self.repository.clone();
        run_operation(&self.roles, &self.scope, async move {
            repository.list_roles().await.map_err(|e| e.to_string())
        })
    }

    pub fn reset_users(&self) {
        self.users.reset();
    }

    pub fn reset_user(&self) {
        self.user.reset();
    }

    pub fn reset_roles(&self) {
        self.roles.reset();
    }
}
