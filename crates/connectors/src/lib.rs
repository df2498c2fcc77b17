//! Reference storage collaborators for the filter compiler.
//!
//! - [`sql`] builds parameterised `WHERE` fragments for PostgreSQL, MySQL and SQLite.
//! - [`memory`] evaluates filters directly against JSON records.

pub mod memory;
pub mod sql;
