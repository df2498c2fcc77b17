pub mod compile;
pub mod error;
pub mod predicate;
pub mod simplify;

pub use compile::{CompileOptions, Compiler, compile};
pub use error::CompilationError;
pub use predicate::{BooleanPredicate, PredicateBuilder};
pub use simplify::simplify;
