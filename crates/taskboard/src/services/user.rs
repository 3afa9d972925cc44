//! User service.

use std::sync::Arc;

use serde_json::json;

use taskboard_core::cache::{users_key, KeyedCache};
use taskboard_core::model::{Client, Task, User};
use taskboard_core::storage::{EntityStore, Filter, FindOptions, Order, Projection, RelationSet};

use super::{CachedRepository, Result, TaskService};

/// Service for [`User`] records.
///
/// Wraps the generic cached repository and adds the sign-in lookup, the
/// display-name search, and the cross-service open-task read.
pub struct UserService<S, C> {
    repo: CachedRepository<User, S, C>,
    tasks: Arc<TaskService<S, C>>,
}

impl<S, C> UserService<S, C>
where
    S: EntityStore<User> + EntityStore<Task> + 'static,
    C: KeyedCache,
{
    /// Relation paths hydrated on every full user read.
    fn default_relations() -> RelationSet {
        RelationSet::new([
            "user_role",
            "tasks_watched",
            "tasks_watched.assignee",
            "tasks_watched.priority",
            "projects_watched",
        ])
    }

    pub fn new(store: Arc<S>, cache: Arc<C>, tasks: Arc<TaskService<S, C>>) -> Self {
        Self {
            repo: CachedRepository::new(store, cache, users_key(), Self::default_relations()),
            tasks,
        }
    }

    /// Reads all users, optionally from the shared cache.
    pub async fn read_all(&self, options: FindOptions, cached: bool) -> Result<Vec<User>> {
        self.repo.read_all(options, cached).await
    }

    /// Reads a single user; `None` when nothing matches.
    pub async fn read(&self, options: FindOptions) -> Result<Option<User>> {
        self.repo.read(options).await
    }

    /// Saves a new or updated user and clears the user list cache.
    pub async fn save(&self, user: User) -> Result<User> {
        self.repo.save(user).await
    }

    /// Deletes a user and clears the user list cache.
    pub async fn delete(&self, user: User) -> Result<User> {
        self.repo.delete(user).await
    }

    /// Reads the user record handed to authentication on a sign-in attempt.
    ///
    /// The hydrated relation set depends on the requesting client; the result
    /// is projected down to the identity and credential fields. Inactive
    /// accounts are never returned.
    pub async fn read_signin_user(&self, client: Client, email: &str) -> Result<Option<User>> {
        let relations = match client {
            Client::Milestone => Self::default_relations(),
            _ => RelationSet::new(["user_role"]),
        };

        let options = FindOptions::default()
            .with_select(Projection::new([
                "id",
                "email",
                "firstname",
                "lastname",
                "password",
            ]))
            .with_filter(Filter::new().eq("email", json!(email)).eq("active", json!(true)));

        self.repo.read_with_relations(relations, options).await
    }

    /// Searches users by a display-name fragment.
    ///
    /// The first space-separated component matches against firstnames, the
    /// second against lastnames, both as case-sensitive substrings. With no
    /// usable component the unfiltered cached list is returned.
    pub async fn read_users_by_username(&self, username: &str) -> Result<Vec<User>> {
        let mut components = username.split(' ');
        let firstname = components.next().filter(|c| !c.is_empty());
        let lastname = components.next().filter(|c| !c.is_empty());

        let mut filter = Filter::new();
        if let Some(firstname) = firstname {
            filter = filter.contains("firstname", firstname);
        }
        if let Some(lastname) = lastname {
            filter = filter.contains("lastname", lastname);
        }

        if filter.is_empty() {
            return self.read_all(FindOptions::default(), true).await;
        }

        self.read_all(FindOptions::default().with_filter(filter), false)
            .await
    }

    /// Reads the user's open tasks, highest priority first.
    pub async fn read_user_tasks(&self, user: &User) -> Result<Vec<Task>> {
        let options = FindOptions::default()
            .with_filter(
                Filter::new()
                    .eq("assignee_id", json!(user.id))
                    .eq("completed", json!(false)),
            )
            .with_order(Order::descending("priority.value"));

        self.tasks.read_all(options, false).await
    }
}
