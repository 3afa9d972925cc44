mod client;
mod types;

pub use client::Client;
pub use types::{Entity, Project, Task, TaskPriority, User, UserRole};
