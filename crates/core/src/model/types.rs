use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use uuid::Uuid;

/// Common contract for persisted records.
///
/// Entities are identified by UUID and carry store-assigned `created` /
/// `updated` stamps. The serde bounds let query evaluation and cache storage
/// operate on the JSON form of a record regardless of its concrete type.
pub trait Entity: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Entity name used in error messages.
    const KIND: &'static str;

    fn id(&self) -> Uuid;

    fn set_id(&mut self, id: Uuid);

    fn created(&self) -> Option<DateTime<Utc>>;

    fn set_created(&mut self, at: DateTime<Utc>);

    fn set_updated(&mut self, at: DateTime<Utc>);
}

/// A role assignable to users.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserRole {
    pub id: Uuid,
    pub name: String,
    pub created: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
}

impl UserRole {
    /// Creates a new role with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets a specific ID for this role (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}

impl Entity for UserRole {
    const KIND: &'static str = "UserRole";

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }

    fn created(&self) -> Option<DateTime<Utc>> {
        self.created
    }

    fn set_created(&mut self, at: DateTime<Utc>) {
        self.created = Some(at);
    }

    fn set_updated(&mut self, at: DateTime<Utc>) {
        self.updated = Some(at);
    }
}

/// A user account.
///
/// The `user_role`, `tasks_watched`, and `projects_watched` fields are empty
/// on a bare row; the store fills them according to the relation set of the
/// query that produced the record. Foreign keys (`role_id`,
/// `watched_task_ids`, `watched_project_ids`) are always present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub firstname: String,
    pub lastname: String,
    /// Credential hash; only surfaced by projected sign-in reads.
    pub password: Option<String>,
    pub active: bool,
    pub role_id: Option<Uuid>,
    pub watched_task_ids: Vec<Uuid>,
    pub watched_project_ids: Vec<Uuid>,
    pub user_role: Option<UserRole>,
    pub tasks_watched: Vec<Task>,
    pub projects_watched: Vec<Project>,
    pub created: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
}

impl User {
    /// Creates a new active user.
    pub fn new(
        email: impl Into<String>,
        firstname: impl Into<String>,
        lastname: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            firstname: firstname.into(),
            lastname: lastname.into(),
            active: true,
            ..Self::default()
        }
    }

    /// Sets the credential hash.
    pub fn with_password(mut self, hash: impl Into<String>) -> Self {
        self.password = Some(hash.into());
        self
    }

    /// Assigns the user's role.
    pub fn with_role(mut self, role_id: Uuid) -> Self {
        self.role_id = Some(role_id);
        self
    }

    /// Adds a task to the user's watch list.
    pub fn watching_task(mut self, task_id: Uuid) -> Self {
        self.watched_task_ids.push(task_id);
        self
    }

    /// Adds a project to the user's watch list.
    pub fn watching_project(mut self, project_id: Uuid) -> Self {
        self.watched_project_ids.push(project_id);
        self
    }

    /// Marks the account inactive.
    pub fn deactivated(mut self) -> Self {
        self.active = false;
        self
    }

    /// Sets a specific ID for this user (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}

impl Entity for User {
    const KIND: &'static str = "User";

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }

    fn created(&self) -> Option<DateTime<Utc>> {
        self.created
    }

    fn set_created(&mut self, at: DateTime<Utc>) {
        self.created = Some(at);
    }

    fn set_updated(&mut self, at: DateTime<Utc>) {
        self.updated = Some(at);
    }
}

/// A priority level orderable by weight.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskPriority {
    pub id: Uuid,
    pub name: String,
    /// Ordering weight; higher means more urgent.
    pub value: i32,
    pub created: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
}

impl TaskPriority {
    /// Creates a new priority with the given name and weight.
    pub fn new(name: impl Into<String>, value: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            value,
            ..Self::default()
        }
    }

    /// Sets a specific ID for this priority (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}

impl Entity for TaskPriority {
    const KIND: &'static str = "TaskPriority";

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }

    fn created(&self) -> Option<DateTime<Utc>> {
        self.created
    }

    fn set_created(&mut self, at: DateTime<Utc>) {
        self.created = Some(at);
    }

    fn set_updated(&mut self, at: DateTime<Utc>) {
        self.updated = Some(at);
    }
}

/// A unit of work assignable to a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub assignee_id: Option<Uuid>,
    pub priority_id: Option<Uuid>,
    pub assignee: Option<User>,
    pub priority: Option<TaskPriority>,
    pub created: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a new open task.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets the description for this task.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Assigns the task to a user.
    pub fn with_assignee(mut self, user_id: Uuid) -> Self {
        self.assignee_id = Some(user_id);
        self
    }

    /// Sets the task's priority.
    pub fn with_priority(mut self, priority_id: Uuid) -> Self {
        self.priority_id = Some(priority_id);
        self
    }

    /// Marks the task completed.
    pub fn completed(mut self) -> Self {
        self.completed = true;
        self
    }

    /// Sets a specific ID for this task (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}

impl Entity for Task {
    const KIND: &'static str = "Task";

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }

    fn created(&self) -> Option<DateTime<Utc>> {
        self.created
    }

    fn set_created(&mut self, at: DateTime<Utc>) {
        self.created = Some(at);
    }

    fn set_updated(&mut self, at: DateTime<Utc>) {
        self.updated = Some(at);
    }
}

/// A project grouping tasks under an author.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub done: bool,
    pub author_id: Option<Uuid>,
    pub task_ids: Vec<Uuid>,
    pub author: Option<User>,
    pub tasks: Vec<Task>,
    pub created: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
}

impl Project {
    /// Creates a new project.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets the description for this project.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the project's author.
    pub fn with_author(mut self, user_id: Uuid) -> Self {
        self.author_id = Some(user_id);
        self
    }

    /// Adds a task to the project.
    pub fn with_task(mut self, task_id: Uuid) -> Self {
        self.task_ids.push(task_id);
        self
    }

    /// Sets a specific ID for this project (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}

impl Entity for Project {
    const KIND: &'static str = "Project";

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }

    fn created(&self) -> Option<DateTime<Utc>> {
        self.created
    }

    fn set_created(&mut self, at: DateTime<Utc>) {
        self.created = Some(at);
    }

    fn set_updated(&mut self, at: DateTime<Utc>) {
        self.updated = Some(at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_is_active_with_fresh_id() {
        let user = User::new("ada@example.com", "Ada", "Lovelace");

        assert!(!user.id.is_nil());
        assert!(user.active);
        assert!(user.password.is_none());
        assert!(user.created.is_none());
    }

    #[test]
    fn test_user_builders() {
        let role = UserRole::new("Admin");
        let task = Task::new("Write report");

        let user = User::new("ada@example.com", "Ada", "Lovelace")
            .with_password("hash")
            .with_role(role.id)
            .watching_task(task.id)
            .deactivated();

        assert_eq!(user.password.as_deref(), Some("hash"));
        assert_eq!(user.role_id, Some(role.id));
        assert_eq!(user.watched_task_ids, vec![task.id]);
        assert!(!user.active);
    }

    #[test]
    fn test_task_builders() {
        let user = User::new("ada@example.com", "Ada", "Lovelace");
        let priority = TaskPriority::new("High", 30);

        let task = Task::new("Ship release")
            .with_description("Cut the release branch")
            .with_assignee(user.id)
            .with_priority(priority.id)
            .completed();

        assert_eq!(task.assignee_id, Some(user.id));
        assert_eq!(task.priority_id, Some(priority.id));
        assert!(task.completed);
        assert!(task.assignee.is_none());
    }

    #[test]
    fn test_serde_roundtrip_with_missing_fields() {
        // Projected reads drop non-selected keys; deserialization must fill
        // the gaps with defaults.
        let json = r#"{"id":"00000000-0000-0000-0000-000000000001","email":"ada@example.com"}"#;
        let user: User = serde_json::from_str(json).unwrap();

        assert_eq!(user.email, "ada@example.com");
        assert!(!user.active);
        assert!(user.tasks_watched.is_empty());
        assert!(user.created.is_none());
    }

    #[test]
    fn test_entity_kinds() {
        assert_eq!(User::KIND, "User");
        assert_eq!(UserRole::KIND, "UserRole");
        assert_eq!(Task::KIND, "Task");
        assert_eq!(TaskPriority::KIND, "TaskPriority");
        assert_eq!(Project::KIND, "Project");
    }
}
