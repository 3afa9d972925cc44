//! Cache keys for the per-entity list entries.
//!
//! Each entity type owns exactly one key, under which its unfiltered,
//! default-relation result set is stored. Only that entity's service may
//! invalidate its key.

/// Returns the cache key for the full user list.
pub fn users_key() -> &'static str {
    "users"
}

/// Returns the cache key for the full user-role list.
pub fn user_roles_key() -> &'static str {
    "user-roles"
}

/// Returns the cache key for the full task list.
pub fn tasks_key() -> &'static str {
    "tasks"
}

/// Returns the cache key for the full task-priority list.
pub fn task_priorities_key() -> &'static str {
    "task-priorities"
}

/// Returns the cache key for the full project list.
pub fn projects_key() -> &'static str {
    "projects"
}
