//! In-memory store accessor.
//!
//! Rows are stored bare (foreign keys only); relation hydration happens per
//! query according to its relation set. Natural order is ascending creation
//! time then id, so unfiltered reads are deterministic.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::{RwLock, RwLockReadGuard};
use uuid::Uuid;

use taskboard_core::model::{Entity, Project, Task, TaskPriority, User, UserRole};
use taskboard_core::storage::{
    EntityStore, PersistenceError, Query, RelationSet, Result,
};

/// In-memory storage backend.
///
/// Implements [`EntityStore`] for every entity type over `RwLock`ed hash
/// maps. Data is not persisted and is lost when the store is dropped.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    roles: RwLock<HashMap<Uuid, UserRole>>,
    tasks: RwLock<HashMap<Uuid, Task>>,
    priorities: RwLock<HashMap<Uuid, TaskPriority>>,
    projects: RwLock<HashMap<Uuid, Project>>,
}

impl InMemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes read guards over every table for one hydrating query.
    async fn tables(&self) -> Tables<'_> {
        Tables {
            users: self.users.read().await,
            roles: self.roles.read().await,
            tasks: self.tasks.read().await,
            priorities: self.priorities.read().await,
            projects: self.projects.read().await,
        }
    }
}

/// Read view over all tables, used while hydrating one query.
struct Tables<'a> {
    users: RwLockReadGuard<'a, HashMap<Uuid, User>>,
    roles: RwLockReadGuard<'a, HashMap<Uuid, UserRole>>,
    tasks: RwLockReadGuard<'a, HashMap<Uuid, Task>>,
    priorities: RwLockReadGuard<'a, HashMap<Uuid, TaskPriority>>,
    projects: RwLockReadGuard<'a, HashMap<Uuid, Project>>,
}

impl Tables<'_> {
    fn hydrate_user(&self, mut user: User, relations: &RelationSet) -> User {
        if relations.contains("user_role") {
            user.user_role = user.role_id.and_then(|id| self.roles.get(&id)).cloned();
        }
        if relations.contains("tasks_watched") {
            let nested = relations.nested("tasks_watched");
            user.tasks_watched = user
                .watched_task_ids
                .iter()
                .filter_map(|id| self.tasks.get(id))
                .map(|task| self.hydrate_task(task.clone(), &nested))
                .collect();
        }
        if relations.contains("projects_watched") {
            let nested = relations.nested("projects_watched");
            user.projects_watched = user
                .watched_project_ids
                .iter()
                .filter_map(|id| self.projects.get(id))
                .map(|project| self.hydrate_project(project.clone(), &nested))
                .collect();
        }
        user
    }

    fn hydrate_task(&self, mut task: Task, relations: &RelationSet) -> Task {
        if relations.contains("assignee") {
            let nested = relations.nested("assignee");
            task.assignee = task
                .assignee_id
                .and_then(|id| self.users.get(&id))
                .map(|user| self.hydrate_user(user.clone(), &nested));
        }
        if relations.contains("priority") {
            task.priority = task
                .priority_id
                .and_then(|id| self.priorities.get(&id))
                .cloned();
        }
        task
    }

    fn hydrate_project(&self, mut project: Project, relations: &RelationSet) -> Project {
        if relations.contains("author") {
            let nested = relations.nested("author");
            project.author = project
                .author_id
                .and_then(|id| self.users.get(&id))
                .map(|user| self.hydrate_user(user.clone(), &nested));
        }
        if relations.contains("tasks") {
            let nested = relations.nested("tasks");
            project.tasks = project
                .task_ids
                .iter()
                .filter_map(|id| self.tasks.get(id))
                .map(|task| self.hydrate_task(task.clone(), &nested))
                .collect();
        }
        project
    }
}

/// Assigns store-owned fields before a row is written.
fn stamp<E: Entity>(entity: &mut E) {
    let now = Utc::now();
    if entity.id().is_nil() {
        entity.set_id(Uuid::new_v4());
    }
    if entity.created().is_none() {
        entity.set_created(now);
    }
    entity.set_updated(now);
}

/// Applies natural order, filter, explicit order, and projection to hydrated
/// rows.
fn run_query<E: Entity>(mut rows: Vec<E>, query: &Query) -> Result<Vec<E>> {
    rows.sort_by(|a, b| {
        a.created()
            .cmp(&b.created())
            .then_with(|| a.id().cmp(&b.id()))
    });

    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        records.push((to_json(&row)?, row));
    }

    if let Some(filter) = &query.filter {
        records.retain(|(value, _)| filter.matches(value));
    }

    if let Some(order) = &query.order {
        records.sort_by(|(a, _), (b, _)| order.compare(a, b));
    }

    if let Some(select) = &query.select {
        return records
            .into_iter()
            .map(|(value, _)| from_json(select.apply(value, &query.relations)))
            .collect();
    }

    Ok(records.into_iter().map(|(_, row)| row).collect())
}

fn to_json<E: Entity>(row: &E) -> Result<Value> {
    serde_json::to_value(row).map_err(|e| PersistenceError::Serialization(e.to_string()))
}

fn from_json<E: Entity>(value: Value) -> Result<E> {
    serde_json::from_value(value).map_err(|e| PersistenceError::Serialization(e.to_string()))
}

#[async_trait]
impl EntityStore<User> for InMemoryStore {
    async fn find(&self, query: &Query) -> Result<Vec<User>> {
        let tables = self.tables().await;
        let rows = tables
            .users
            .values()
            .map(|user| tables.hydrate_user(user.clone(), &query.relations))
            .collect();
        run_query(rows, query)
    }

    async fn find_one(&self, query: &Query) -> Result<Option<User>> {
        Ok(EntityStore::<User>::find(self, query).await?.into_iter().next())
    }

    async fn persist(&self, entity: User) -> Result<User> {
        let mut user = entity;
        // Rows hold foreign keys only.
        user.user_role = None;
        user.tasks_watched = Vec::new();
        user.projects_watched = Vec::new();

        let mut users = self.users.write().await;
        if users
            .values()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(PersistenceError::AlreadyExists {
                entity_type: User::KIND,
                id: user.email.clone(),
            });
        }
        if user.created.is_none() {
            user.created = users.get(&user.id).and_then(|existing| existing.created);
        }
        stamp(&mut user);
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn remove(&self, entity: User) -> Result<User> {
        let mut users = self.users.write().await;
        users
            .remove(&entity.id)
            .ok_or_else(|| PersistenceError::NotFound {
                entity_type: User::KIND,
                id: entity.id.to_string(),
            })
    }
}

#[async_trait]
impl EntityStore<UserRole> for InMemoryStore {
    async fn find(&self, query: &Query) -> Result<Vec<UserRole>> {
        let roles = self.roles.read().await;
        let rows = roles.values().cloned().collect();
        run_query(rows, query)
    }

    async fn find_one(&self, query: &Query) -> Result<Option<UserRole>> {
        Ok(EntityStore::<UserRole>::find(self, query)
            .await?
            .into_iter()
            .next())
    }

    async fn persist(&self, entity: UserRole) -> Result<UserRole> {
        let mut role = entity;
        let mut roles = self.roles.write().await;
        if role.created.is_none() {
            role.created = roles.get(&role.id).and_then(|existing| existing.created);
        }
        stamp(&mut role);
        roles.insert(role.id, role.clone());
        Ok(role)
    }

    async fn remove(&self, entity: UserRole) -> Result<UserRole> {
        let mut roles = self.roles.write().await;
        roles
            .remove(&entity.id)
            .ok_or_else(|| PersistenceError::NotFound {
                entity_type: UserRole::KIND,
                id: entity.id.to_string(),
            })
    }
}

#[async_trait]
impl EntityStore<Task> for InMemoryStore {
    async fn find(&self, query: &Query) -> Result<Vec<Task>> {
        let tables = self.tables().await;
        let rows = tables
            .tasks
            .values()
            .map(|task| tables.hydrate_task(task.clone(), &query.relations))
            .collect();
        run_query(rows, query)
    }

    async fn find_one(&self, query: &Query) -> Result<Option<Task>> {
        Ok(EntityStore::<Task>::find(self, query).await?.into_iter().next())
    }

    async fn persist(&self, entity: Task) -> Result<Task> {
        let mut task = entity;
        task.assignee = None;
        task.priority = None;

        let mut tasks = self.tasks.write().await;
        if task.created.is_none() {
            task.created = tasks.get(&task.id).and_then(|existing| existing.created);
        }
        stamp(&mut task);
        tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn remove(&self, entity: Task) -> Result<Task> {
        let mut tasks = self.tasks.write().await;
        tasks
            .remove(&entity.id)
            .ok_or_else(|| PersistenceError::NotFound {
                entity_type: Task::KIND,
                id: entity.id.to_string(),
            })
    }
}

#[async_trait]
impl EntityStore<TaskPriority> for InMemoryStore {
    async fn find(&self, query: &Query) -> Result<Vec<TaskPriority>> {
        let priorities = self.priorities.read().await;
        let rows = priorities.values().cloned().collect();
        run_query(rows, query)
    }

    async fn find_one(&self, query: &Query) -> Result<Option<TaskPriority>> {
        Ok(EntityStore::<TaskPriority>::find(self, query)
            .await?
            .into_iter()
            .next())
    }

    async fn persist(&self, entity: TaskPriority) -> Result<TaskPriority> {
        let mut priority = entity;
        let mut priorities = self.priorities.write().await;
        if priority.created.is_none() {
            priority.created = priorities
                .get(&priority.id)
                .and_then(|existing| existing.created);
        }
        stamp(&mut priority);
        priorities.insert(priority.id, priority.clone());
        Ok(priority)
    }

    async fn remove(&self, entity: TaskPriority) -> Result<TaskPriority> {
        let mut priorities = self.priorities.write().await;
        priorities
            .remove(&entity.id)
            .ok_or_else(|| PersistenceError::NotFound {
                entity_type: TaskPriority::KIND,
                id: entity.id.to_string(),
            })
    }
}

#[async_trait]
impl EntityStore<Project> for InMemoryStore {
    async fn find(&self, query: &Query) -> Result<Vec<Project>> {
        let tables = self.tables().await;
        let rows = tables
            .projects
            .values()
            .map(|project| tables.hydrate_project(project.clone(), &query.relations))
            .collect();
        run_query(rows, query)
    }

    async fn find_one(&self, query: &Query) -> Result<Option<Project>> {
        Ok(EntityStore::<Project>::find(self, query)
            .await?
            .into_iter()
            .next())
    }

    async fn persist(&self, entity: Project) -> Result<Project> {
        let mut project = entity;
        project.author = None;
        project.tasks = Vec::new();

        let mut projects = self.projects.write().await;
        if project.created.is_none() {
            project.created = projects
                .get(&project.id)
                .and_then(|existing| existing.created);
        }
        stamp(&mut project);
        projects.insert(project.id, project.clone());
        Ok(project)
    }

    async fn remove(&self, entity: Project) -> Result<Project> {
        let mut projects = self.projects.write().await;
        projects
            .remove(&entity.id)
            .ok_or_else(|| PersistenceError::NotFound {
                entity_type: Project::KIND,
                id: entity.id.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{Duration, TimeZone};
    use serde_json::json;

    use taskboard_core::storage::{Filter, FindOptions, Order, Projection};

    fn all() -> Query {
        Query::default()
    }

    fn with_relations(relations: RelationSet) -> Query {
        Query {
            relations,
            ..Query::default()
        }
    }

    fn stamped(at_offset_secs: i64) -> Option<chrono::DateTime<Utc>> {
        let base = Utc.with_ymd_and_hms(2024, 6, 15, 10, 0, 0).unwrap();
        Some(base + Duration::seconds(at_offset_secs))
    }

    #[tokio::test]
    async fn test_persist_and_find() {
        let store = InMemoryStore::new();
        let user = User::new("ada@example.com", "Ada", "Lovelace");

        let persisted = store.persist(user.clone()).await.unwrap();
        assert_eq!(persisted.id, user.id);
        assert!(persisted.created.is_some());
        assert!(persisted.updated.is_some());

        let found: Vec<User> = store.find(&all()).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_persist_assigns_id_when_nil() {
        let store = InMemoryStore::new();
        let role = UserRole::new("Admin").with_id(Uuid::nil());

        let persisted = store.persist(role).await.unwrap();
        assert!(!persisted.id.is_nil());
    }

    #[tokio::test]
    async fn test_persist_update_keeps_created() {
        let store = InMemoryStore::new();
        let task = store.persist(Task::new("Write report")).await.unwrap();
        let created = task.created;

        let mut update = task.clone();
        update.title = "Write the report".to_string();
        update.created = None;

        let persisted = store.persist(update).await.unwrap();
        assert_eq!(persisted.created, created);
        assert_eq!(persisted.title, "Write the report");

        let found: Vec<Task> = store.find(&all()).await.unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_persist_rejects_duplicate_email() {
        let store = InMemoryStore::new();
        store
            .persist(User::new("ada@example.com", "Ada", "Lovelace"))
            .await
            .unwrap();

        let result = store
            .persist(User::new("ada@example.com", "Augusta", "King"))
            .await;
        assert!(matches!(
            result,
            Err(PersistenceError::AlreadyExists { .. })
        ));
    }

    #[tokio::test]
    async fn test_remove_returns_prior_row() {
        let store = InMemoryStore::new();
        let project = store.persist(Project::new("Engine")).await.unwrap();

        let removed = store.remove(project.clone()).await.unwrap();
        assert_eq!(removed.id, project.id);
        assert_eq!(removed.title, "Engine");

        let found: Vec<Project> = store.find(&all()).await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_remove_missing_row_is_not_found() {
        let store = InMemoryStore::new();
        let result = store.remove(Task::new("ghost")).await;
        assert!(matches!(result, Err(PersistenceError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_find_one_returns_none_when_nothing_matches() {
        let store = InMemoryStore::new();
        let query = Query::resolve(
            &RelationSet::default(),
            FindOptions::default().with_filter(Filter::new().eq("id", json!("999"))),
        );

        let found: Option<User> = store.find_one(&query).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_natural_order_is_creation_order() {
        let store = InMemoryStore::new();

        let mut first = Task::new("first");
        first.created = stamped(0);
        let mut second = Task::new("second");
        second.created = stamped(1);
        let mut third = Task::new("third");
        third.created = stamped(2);

        // Insert out of order.
        store.persist(second).await.unwrap();
        store.persist(third).await.unwrap();
        store.persist(first).await.unwrap();

        let found: Vec<Task> = store.find(&all()).await.unwrap();
        let titles: Vec<&str> = found.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_hydration_follows_nested_relation_paths() {
        let store = InMemoryStore::new();

        let role = store.persist(UserRole::new("Admin")).await.unwrap();
        let priority = store.persist(TaskPriority::new("High", 30)).await.unwrap();
        let alan = store
            .persist(User::new("alan@example.com", "Alan", "Turing"))
            .await
            .unwrap();
        let task = store
            .persist(
                Task::new("Break the code")
                    .with_assignee(alan.id)
                    .with_priority(priority.id),
            )
            .await
            .unwrap();
        store
            .persist(
                User::new("ada@example.com", "Ada", "Lovelace")
                    .with_role(role.id)
                    .watching_task(task.id),
            )
            .await
            .unwrap();

        let relations = RelationSet::new([
            "user_role",
            "tasks_watched",
            "tasks_watched.assignee",
            "tasks_watched.priority",
        ]);
        let query = Query::resolve(
            &relations,
            FindOptions::default().with_filter(Filter::new().eq("email", json!("ada@example.com"))),
        );

        let ada: User = store.find_one(&query).await.unwrap().unwrap();
        assert_eq!(ada.user_role.as_ref().unwrap().name, "Admin");
        assert_eq!(ada.tasks_watched.len(), 1);

        let watched = &ada.tasks_watched[0];
        assert_eq!(watched.assignee.as_ref().unwrap().email, "alan@example.com");
        assert_eq!(watched.priority.as_ref().unwrap().value, 30);
    }

    #[tokio::test]
    async fn test_hydration_skips_undeclared_relations() {
        let store = InMemoryStore::new();

        let role = store.persist(UserRole::new("Admin")).await.unwrap();
        store
            .persist(User::new("ada@example.com", "Ada", "Lovelace").with_role(role.id))
            .await
            .unwrap();

        let found: Vec<User> = store
            .find(&with_relations(RelationSet::default()))
            .await
            .unwrap();
        assert!(found[0].user_role.is_none());
        assert_eq!(found[0].role_id, Some(role.id));
    }

    #[tokio::test]
    async fn test_order_by_priority_value_descending() {
        let store = InMemoryStore::new();

        let low = store.persist(TaskPriority::new("Low", 10)).await.unwrap();
        let high = store.persist(TaskPriority::new("High", 30)).await.unwrap();
        store
            .persist(Task::new("minor").with_priority(low.id))
            .await
            .unwrap();
        store
            .persist(Task::new("urgent").with_priority(high.id))
            .await
            .unwrap();

        let query = Query::resolve(
            &RelationSet::new(["priority"]),
            FindOptions::default().with_order(Order::descending("priority.value")),
        );

        let found: Vec<Task> = store.find(&query).await.unwrap();
        let titles: Vec<&str> = found.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["urgent", "minor"]);
    }

    #[tokio::test]
    async fn test_projection_restricts_scalar_fields() {
        let store = InMemoryStore::new();
        let role = store.persist(UserRole::new("Admin")).await.unwrap();
        store
            .persist(
                User::new("ada@example.com", "Ada", "Lovelace")
                    .with_password("hash")
                    .with_role(role.id),
            )
            .await
            .unwrap();

        let query = Query::resolve(
            &RelationSet::new(["user_role"]),
            FindOptions::default().with_select(Projection::new([
                "id",
                "email",
                "firstname",
                "lastname",
                "password",
            ])),
        );

        let ada: User = store.find_one(&query).await.unwrap().unwrap();
        assert_eq!(ada.password.as_deref(), Some("hash"));
        assert_eq!(ada.user_role.as_ref().unwrap().name, "Admin");
        // `active` is not selected, so the projected record falls back to the
        // field default.
        assert!(!ada.active);
        assert!(ada.role_id.is_none());
    }
}
