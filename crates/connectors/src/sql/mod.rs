pub mod builder;
pub mod dialect;
pub mod error;
pub mod predicate;
pub mod render;

pub use builder::SqlPredicateBuilder;
pub use dialect::{Dialect, MySql, Postgres, Sqlite, dialect_for};
pub use error::SqlBuildError;
pub use predicate::{CompareOp, SqlPredicate};
pub use render::{Render, Renderer};
