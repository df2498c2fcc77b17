//! Backend predicate tree for SQL `WHERE` clauses.

use crate::sql::{
    dialect::Dialect,
    render::{Render, Renderer},
};
use compiler::BooleanPredicate;
use model::Scalar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,    // =
    NotEq, // <>
    Lt,    // <
    Gt,    // >
}

impl CompareOp {
    fn as_sql(&self) -> &'static str {
        match self {
            CompareOp::Eq => " = ",
            CompareOp::NotEq => " <> ",
            CompareOp::Lt => " < ",
            CompareOp::Gt => " > ",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SqlPredicate {
    Compare {
        column: String,
        op: CompareOp,
        value: Scalar,
    },
    InList {
        column: String,
        values: Vec<Scalar>,
        negated: bool,
    },
    Between {
        column: String,
        low: Scalar,
        high: Scalar,
    },
    /// `pattern` is bound as-is; `%`, `_` and `\` inside user text must
    /// already be escaped with `\`.
    Like { column: String, pattern: String },
    IsNull { column: String, negated: bool },
    And(Vec<SqlPredicate>),
    Or(Vec<SqlPredicate>),
    Not(Box<SqlPredicate>),
}

impl SqlPredicate {
    /// Renders the predicate as a `WHERE` fragment plus its bound parameters.
    pub fn to_sql(&self, dialect: &dyn Dialect) -> (String, Vec<Scalar>) {
        let mut renderer = Renderer::new(dialect);
        self.render(&mut renderer);
        renderer.finish()
    }
}

impl BooleanPredicate for SqlPredicate {
    fn and(children: Vec<Self>) -> Self {
        SqlPredicate::And(children)
    }

    fn or(children: Vec<Self>) -> Self {
        SqlPredicate::Or(children)
    }

    fn not(inner: Self) -> Self {
        SqlPredicate::Not(Box::new(inner))
    }
}

impl Render for SqlPredicate {
    fn render(&self, r: &mut Renderer) {
        match self {
            SqlPredicate::Compare { column, op, value } => {
                r.push_identifier(column);
                r.sql.push_str(op.as_sql());
                r.add_param(value.clone());
            }
            SqlPredicate::InList {
                column,
                values,
                negated,
            } => {
                r.push_identifier(column);
                r.sql.push_str(if *negated { " NOT IN " } else { " IN " });
                r.push_parenthesized(values, ", ", |r, value| r.add_param(value.clone()));
            }
            SqlPredicate::Between { column, low, high } => {
                r.push_identifier(column);
                r.sql.push_str(" BETWEEN ");
                r.add_param(low.clone());
                r.sql.push_str(" AND ");
                r.add_param(high.clone());
            }
            SqlPredicate::Like { column, pattern } => {
                r.push_identifier(column);
                r.sql.push_str(" LIKE ");
                r.add_param(Scalar::String(pattern.clone()));
                r.sql.push_str(r.dialect.like_escape());
            }
            SqlPredicate::IsNull { column, negated } => {
                r.push_identifier(column);
                r.sql
                    .push_str(if *negated { " IS NOT NULL" } else { " IS NULL" });
            }
            SqlPredicate::And(children) => {
                r.push_parenthesized(children, " AND ", |r, child| child.render(r))
            }
            SqlPredicate::Or(children) => {
                r.push_parenthesized(children, " OR ", |r, child| child.render(r))
            }
            SqlPredicate::Not(inner) => {
                r.sql.push_str("NOT ");
                r.push_parenthesized(std::slice::from_ref(inner.as_ref()), "", |r, child| {
                    child.render(r)
                });
            }
        }
    }
}
