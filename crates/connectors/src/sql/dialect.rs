//! SQL syntax that differs between database engines.

pub trait Dialect: Send + Sync {
    /// Quotes a column name, doubling any quote character inside it.
    fn quote_identifier(&self, ident: &str) -> String;

    /// Placeholder for the bound parameter at zero-based `index`.
    fn get_placeholder(&self, index: usize) -> String;

    /// Clause declaring `\` as the escape character of a `LIKE` pattern.
    fn like_escape(&self) -> &'static str {
        r" ESCAPE '\'"
    }

    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Postgres;

impl Dialect for Postgres {
    fn quote_identifier(&self, ident: &str) -> String {
        format!(r#""{}""#, ident.replace('"', r#""""#))
    }

    fn get_placeholder(&self, index: usize) -> String {
        // 1-based
        format!("${}", index + 1)
    }

    fn name(&self) -> &'static str {
        "PostgreSQL"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MySql;

impl Dialect for MySql {
    fn quote_identifier(&self, ident: &str) -> String {
        format!("`{}`", ident.replace('`', "``"))
    }

    fn get_placeholder(&self, _index: usize) -> String {
        "?".into()
    }

    // Backslash is an escape character inside MySQL string literals.
    fn like_escape(&self) -> &'static str {
        r" ESCAPE '\\'"
    }

    fn name(&self) -> &'static str {
        "MySQL"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Sqlite;

impl Dialect for Sqlite {
    fn quote_identifier(&self, ident: &str) -> String {
        format!(r#""{}""#, ident.replace('"', r#""""#))
    }

    fn get_placeholder(&self, _index: usize) -> String {
        "?".into()
    }

    fn name(&self) -> &'static str {
        "SQLite"
    }
}

/// Looks a dialect up by its common name (`postgres`, `mysql`, `sqlite`).
pub fn dialect_for(name: &str) -> Option<Box<dyn Dialect>> {
    match name.to_ascii_lowercase().as_str() {
        "postgres" | "postgresql" | "pg" => Some(Box::new(Postgres)),
        "mysql" | "mariadb" => Some(Box::new(MySql)),
        "sqlite" => Some(Box::new(Sqlite)),
        _ => None,
    }
}
