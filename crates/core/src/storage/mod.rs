mod error;
mod traits;
mod types;

pub use error::{PersistenceError, Result};
pub use traits::EntityStore;
pub use types::{
    Condition, Direction, Filter, FindOptions, Order, Projection, Query, RelationSet,
};
