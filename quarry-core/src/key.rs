use crate::{AsValue, Value};
use std::{borrow::Cow, slice, vec};

/// Ordered mapping from column name to value, used to look up a row by any
/// combination of columns (joined with `AND`).
///
/// Iteration order is insertion order, and it decides both the order of the
/// generated conditions and the order of the bound arguments. Setting a column
/// that is already present replaces its value in place.
///
/// ```rust
/// use quarry_core::{Key, Value};
/// let key = Key::from([("team", 3), ("number", 10)]);
/// let columns: Vec<_> = key.columns().collect();
/// assert_eq!(columns, ["team", "number"]);
/// assert_eq!(key.get("number"), Some(&Value::Int32(Some(10))));
/// ```
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Key {
    entries: Vec<(Cow<'static, str>, Value)>,
}

impl Key {
    pub fn new() -> Self {
        Default::default()
    }
    /// Builder form of [`Key::set`].
    pub fn with(mut self, column: impl Into<Cow<'static, str>>, value: impl AsValue) -> Self {
        self.set(column, value);
        self
    }
    pub fn set(&mut self, column: impl Into<Cow<'static, str>>, value: impl AsValue) {
        let column = column.into();
        let value = value.as_value();
        match self.entries.iter_mut().find(|(c, _)| *c == column) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((column, value)),
        }
    }
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find_map(|(c, v)| if c == column { Some(v) } else { None })
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    pub fn columns(&self) -> impl ExactSizeIterator<Item = &str> {
        self.entries.iter().map(|(c, _)| c.as_ref())
    }
    pub fn into_values(self) -> impl ExactSizeIterator<Item = Value> {
        self.entries.into_iter().map(|(_, v)| v)
    }
}

impl<C, V> FromIterator<(C, V)> for Key
where
    C: Into<Cow<'static, str>>,
    V: AsValue,
{
    fn from_iter<T: IntoIterator<Item = (C, V)>>(iter: T) -> Self {
        let mut result = Key::new();
        for (column, value) in iter {
            result.set(column, value);
        }
        result
    }
}

impl<C, V, const N: usize> From<[(C, V); N]> for Key
where
    C: Into<Cow<'static, str>>,
    V: AsValue,
{
    fn from(value: [(C, V); N]) -> Self {
        value.into_iter().collect()
    }
}

impl IntoIterator for Key {
    type Item = (Cow<'static, str>, Value);
    type IntoIter = vec::IntoIter<(Cow<'static, str>, Value)>;
    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Key {
    type Item = &'a (Cow<'static, str>, Value);
    type IntoIter = slice::Iter<'a, (Cow<'static, str>, Value)>;
    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
