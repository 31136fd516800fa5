use crate::{AsValue, Value, truncate_long};
use std::{
    fmt::{self, Display},
    sync::Arc,
};

/// SQL text plus the arguments bound, in order, to its `?` placeholders.
///
/// Checking that the number of placeholders matches the number of arguments is
/// up to the [`Executor`](crate::Executor) running the query.
///
/// ```rust
/// use quarry_core::{Query, Value};
/// let query = Query::new("SELECT * FROM \"player\" WHERE \"team\" = ? AND \"score\" > ?")
///     .bind("red")
///     .bind(100);
/// assert_eq!(query.arguments.len(), 2);
/// assert_eq!(query.arguments[1], Value::Int32(Some(100)));
/// ```
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Query {
    pub sql: String,
    pub arguments: Vec<Value>,
}

impl Query {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            arguments: Vec::new(),
        }
    }
    /// Append a positional argument.
    pub fn bind(mut self, value: impl AsValue) -> Self {
        self.arguments.push(value.as_value());
        self
    }
    /// Append every value, in iteration order.
    pub fn bind_all<V: AsValue>(mut self, values: impl IntoIterator<Item = V>) -> Self {
        self.arguments
            .extend(values.into_iter().map(AsValue::as_value));
        self
    }
}

impl From<&str> for Query {
    fn from(value: &str) -> Self {
        Query::new(value)
    }
}

impl From<String> for Query {
    fn from(value: String) -> Self {
        Query::new(value)
    }
}

impl<S: Into<String>> From<(S, Vec<Value>)> for Query {
    fn from((sql, arguments): (S, Vec<Value>)) -> Self {
        Self {
            sql: sql.into(),
            arguments,
        }
    }
}

impl Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", truncate_long!(self.sql))?;
        if !self.arguments.is_empty() {
            f.write_str(" [")?;
            for (i, v) in self.arguments.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{v}")?;
            }
            f.write_str("]")?;
        }
        Ok(())
    }
}

/// Shared reference-counted column name list.
pub type RowNames = Arc<[String]>;
/// Owned row value slice matching `RowNames` length.
pub type Row = Box<[Value]>;

/// A result row with its corresponding column labels.
#[derive(Debug, Clone, PartialEq)]
pub struct RowLabeled {
    /// Column names.
    pub labels: RowNames,
    /// Data values (aligned by index with `labels`).
    pub values: Row,
}

impl RowLabeled {
    pub fn new(labels: RowNames, values: Row) -> Self {
        Self { labels, values }
    }
    pub fn get_column(&self, name: &str) -> Option<&Value> {
        self.labels
            .iter()
            .position(|v| v == name)
            .map(|i| &self.values[i])
    }
    /// Value of the leftmost column, `None` when the row has no columns.
    pub fn into_first(self) -> Option<Value> {
        self.values.into_vec().into_iter().next()
    }
}
