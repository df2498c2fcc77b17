//! Capabilities a storage backend provides to the compiler.

use model::{ConditionValue, FieldSpec, OperatorKind};

/// Boolean combinators over a backend's predicate type.
///
/// `and`/`or` must not depend on the order of their operands for the set of
/// matched records, and `not` negates exactly its operand.
pub trait BooleanPredicate: Sized {
    fn and(children: Vec<Self>) -> Self;
    fn or(children: Vec<Self>) -> Self;
    fn not(inner: Self) -> Self;
}

/// Builds a backend predicate for one `field op value` condition.
pub trait PredicateBuilder {
    type Predicate: BooleanPredicate;
    type Error: std::error::Error + Send + Sync + 'static;

    fn build(
        &self,
        field: &FieldSpec,
        operator: OperatorKind,
        value: &ConditionValue,
    ) -> Result<Self::Predicate, Self::Error>;
}
