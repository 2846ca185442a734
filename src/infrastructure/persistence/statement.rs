//! Named-parameter SQL statements.
//!
//! Statements are written with `@name` placeholders and rendered to PostgreSQL's
//! positional `$n` form right before execution. Values are always bound, never
//! interpolated into the statement text.

/// Errors raised while rendering a [`Statement`].
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum StatementError {
    #[error("placeholder @{0} has no bound parameter")]
    UnboundPlaceholder(String),

    #[error("parameter {0} is bound but never referenced")]
    UnusedParameter(String),
}

/// A SQL statement with named parameters.
#[derive(Debug, Clone)]
pub struct Statement<'a> {
    sql: &'static str,
    params: Vec<(&'static str, &'a str)>,
}

/// A statement rendered for positional binding.
#[derive(Debug, PartialEq, Eq)]
pub struct PositionalStatement<'a> {
    pub sql: String,
    /// Values in `$1..$n` order.
    pub binds: Vec<&'a str>,
}

impl<'a> Statement<'a> {
    pub fn new(sql: &'static str) -> Self {
        Self {
            sql,
            params: Vec::new(),
        }
    }

    /// Binds `value` to `@name`.
    pub fn param(mut self, name: &'static str, value: &'a str) -> Self {
        self.params.push((name, value));
        self
    }

    /// Rewrites `@name` placeholders to `$n`, numbering names by first occurrence.
    ///
    /// A name used more than once reuses its position.
    ///
    /// # Errors
    ///
    /// Returns [`StatementError::UnboundPlaceholder`] for a placeholder with no
    /// binding and [`StatementError::UnusedParameter`] for a binding the text
    /// never references.
    pub fn to_positional(&self) -> Result<PositionalStatement<'a>, StatementError> {
        let mut sql = String::with_capacity(self.sql.len());
        let mut order: Vec<&str> = Vec::new();
        let mut binds = Vec::new();
        let mut rest = self.sql;

        while let Some(at) = rest.find('@') {
            sql.push_str(&rest[..at]);
            let after = &rest[at + 1..];
            let len = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            let name = &after[..len];

            if name.is_empty() {
                sql.push('@');
                rest = after;
                continue;
            }

            let position = match order.iter().position(|n| *n == name) {
                Some(i) => i + 1,
                None => {
                    let value = self
                        .params
                        .iter()
                        .find(|(n, _)| *n == name)
                        .map(|(_, v)| *v)
                        .ok_or_else(|| StatementError::UnboundPlaceholder(name.to_string()))?;
                    order.push(name);
                    binds.push(value);
                    order.len()
                }
            };

            sql.push('$');
            sql.push_str(&position.to_string());
            rest = &after[len..];
        }
        sql.push_str(rest);

        if let Some((unused, _)) = self.params.iter().find(|(n, _)| !order.contains(n)) {
            return Err(StatementError::UnusedParameter(unused.to_string()));
        }

        Ok(PositionalStatement { sql, binds })
    }
}
