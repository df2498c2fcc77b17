pub mod matcher;

pub use matcher::{MemoryPredicateBuilder, Record, RecordMatcher};
