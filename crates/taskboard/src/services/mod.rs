//! Entity services built on the cache-aside repository.
//!
//! Each service binds one entity type to its default relation set and list
//! cache key. Unfiltered reads may be served from the process-wide cache;
//! reads carrying options always hit the store; writes invalidate the owning
//! entity's cache entry before returning.

mod error;
mod project;
mod repository;
mod task;
mod task_priority;
mod user;
mod user_role;

pub use error::{Result, ServiceError};
pub use project::ProjectService;
pub use repository::CachedRepository;
pub use task::TaskService;
pub use task_priority::TaskPriorityService;
pub use user::UserService;
pub use user_role::UserRoleService;
