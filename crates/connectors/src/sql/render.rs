//! Rendering of predicates into SQL text plus bound parameters.

use crate::sql::dialect::Dialect;
use model::Scalar;

pub trait Render {
    fn render(&self, renderer: &mut Renderer);
}

/// Output buffer for one `WHERE` fragment.
///
/// Values never enter `sql` directly: [`Renderer::add_param`] stores them in
/// `params` and writes the dialect's placeholder instead.
pub struct Renderer<'a> {
    pub sql: String,
    pub params: Vec<Scalar>,
    pub dialect: &'a dyn Dialect,
}

impl<'a> Renderer<'a> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self {
            sql: String::new(),
            params: Vec::new(),
            dialect,
        }
    }

    pub fn finish(self) -> (String, Vec<Scalar>) {
        (self.sql, self.params)
    }

    pub fn add_param(&mut self, value: Scalar) {
        let placeholder = self.dialect.get_placeholder(self.params.len());
        self.params.push(value);
        self.sql.push_str(&placeholder);
    }

    pub fn push_identifier(&mut self, ident: &str) {
        let quoted = self.dialect.quote_identifier(ident);
        self.sql.push_str(&quoted);
    }

    /// Renders `items` inside parentheses, separated by `separator`.
    pub fn push_parenthesized<T, F>(&mut self, items: &[T], separator: &str, mut each: F)
    where
        F: FnMut(&mut Self, &T),
    {
        self.sql.push('(');
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.sql.push_str(separator);
            }
            each(self, item);
        }
        self.sql.push(')');
    }
}
