mod error;
mod keys;
mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use keys::{projects_key, task_priorities_key, tasks_key, user_roles_key, users_key};
pub use serialization::{deserialize_records, serialize_records};
pub use traits::{KeyedCache, Populate};
