use crate::{TableDef, separated_by};

/// Dialect printer for the lookup statements generated by [`Entity`](crate::Entity).
///
/// Every table and column name goes through [`SqlWriter::write_identifier_quoted`],
/// values never appear in the text: they are always `?` placeholders.
pub trait SqlWriter {
    /// Escape occurrences of `search` char with `replace` while copying into buffer.
    fn write_escaped(&self, out: &mut String, value: &str, search: char, replace: &str) {
        let mut position = 0;
        for (i, c) in value.char_indices() {
            if c == search {
                out.push_str(&value[position..i]);
                out.push_str(replace);
                position = i + c.len_utf8();
            }
        }
        out.push_str(&value[position..]);
    }

    /// Quote identifiers ("name") doubling inner quotes.
    fn write_identifier_quoted(&self, out: &mut String, value: &str) {
        out.push('"');
        self.write_escaped(out, value, '"', "\"\"");
        out.push('"');
    }

    /// Render a table name, qualified with its schema when present.
    fn write_table_ref(&self, out: &mut String, table: &TableDef) {
        if !table.schema.is_empty() {
            self.write_identifier_quoted(out, table.schema);
            out.push('.');
        }
        self.write_identifier_quoted(out, table.name);
    }

    fn write_select_star_from(&self, out: &mut String, table: &TableDef) {
        out.push_str("SELECT * FROM ");
        self.write_table_ref(out, table);
    }

    /// `SELECT * FROM <table> WHERE <column> = ?`
    fn write_select_by_primary_key(&self, out: &mut String, table: &TableDef, column: &str) {
        self.write_select_star_from(out, table);
        out.push_str(" WHERE ");
        self.write_identifier_quoted(out, column);
        out.push_str(" = ?");
    }

    /// `SELECT * FROM <table> WHERE <column> IN (?,?,..)` with `count` placeholders.
    fn write_select_by_primary_keys(
        &self,
        out: &mut String,
        table: &TableDef,
        column: &str,
        count: usize,
    ) {
        self.write_select_star_from(out, table);
        out.push_str(" WHERE ");
        self.write_identifier_quoted(out, column);
        out.push_str(" IN (");
        separated_by(out, 0..count, |out, _| out.push('?'), ",");
        out.push(')');
    }

    /// `SELECT * FROM <table> WHERE <c1>=? AND <c2>=? ..` in the order of `columns`.
    fn write_select_by_key<'a>(
        &self,
        out: &mut String,
        table: &TableDef,
        columns: impl IntoIterator<Item = &'a str>,
    ) {
        self.write_select_star_from(out, table);
        out.push_str(" WHERE ");
        separated_by(
            out,
            columns,
            |out, column| {
                self.write_identifier_quoted(out, column);
                out.push_str("=?");
            },
            " AND ",
        );
    }
}

/// Standard SQL dialect, identifiers delimited by double quotes.
#[derive(Default, Debug, Clone, Copy)]
pub struct GenericSqlWriter {}

impl GenericSqlWriter {
    pub fn new() -> Self {
        Self {}
    }
}

impl SqlWriter for GenericSqlWriter {}
