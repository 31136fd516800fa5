use std::slice;

/// Which column or columns identify a row of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryKey {
    /// Implicit auto identifier column (for example SQLite's `rowid`).
    RowId(&'static str),
    /// Single named column.
    Column(&'static str),
    /// Ordered composite key, never empty.
    Columns(&'static [&'static str]),
}

impl PrimaryKey {
    pub const ROW_ID: PrimaryKey = PrimaryKey::RowId("rowid");

    /// Composite key over `columns`. An empty list fails const evaluation:
    /// ```compile_fail
    /// use quarry_core::{PrimaryKey, TableDef};
    /// static TABLE: TableDef = TableDef::new("t").with_primary_key(PrimaryKey::columns(&[]));
    /// ```
    pub const fn columns(columns: &'static [&'static str]) -> Self {
        assert!(
            !columns.is_empty(),
            "A composite primary key must name at least one column"
        );
        PrimaryKey::Columns(columns)
    }

    pub fn column_names(&self) -> &[&'static str] {
        match self {
            PrimaryKey::RowId(column) | PrimaryKey::Column(column) => slice::from_ref(column),
            PrimaryKey::Columns(columns) => columns,
        }
    }

    /// The key column when the key has exactly one.
    pub fn single_column(&self) -> Option<&'static str> {
        match *self.column_names() {
            [column] => Some(column),
            _ => None,
        }
    }
}

/// Storage description of an entity: where its rows live and how they are identified.
///
/// Built in const context so entities can hand out a `&'static` reference:
/// ```rust
/// use quarry_core::{PrimaryKey, TableDef};
/// static TABLE: TableDef = TableDef::new("membership")
///     .with_schema("club")
///     .with_primary_key(PrimaryKey::columns(&["member_id", "club_id"]));
/// assert_eq!(TABLE.full_name(), "club.membership");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableDef {
    pub name: &'static str,
    /// Empty when the table lives in the default schema.
    pub schema: &'static str,
    pub primary_key: Option<PrimaryKey>,
}

impl TableDef {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            schema: "",
            primary_key: None,
        }
    }
    pub const fn with_schema(mut self, schema: &'static str) -> Self {
        self.schema = schema;
        self
    }
    pub const fn with_primary_key(mut self, primary_key: PrimaryKey) -> Self {
        self.primary_key = Some(primary_key);
        self
    }
    pub fn full_name(&self) -> String {
        let mut result = String::new();
        if !self.schema.is_empty() {
            result.push_str(self.schema);
            result.push('.');
        }
        result.push_str(self.name);
        result
    }
}
