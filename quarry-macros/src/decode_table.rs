use crate::decode_column::{ColumnMetadata, KeyRole, decode_column};
use convert_case::{Case, Casing};
use proc_macro2::Span;
use quote::ToTokens;
use std::cmp::min;
use syn::{
    Error, Expr, ExprLit, ExprPath, Fields, ItemStruct, Lit, LitStr, Path, Result,
    ext::IdentExt, parse::ParseBuffer, spanned::Spanned,
};

pub(crate) enum PrimaryKeyMetadata {
    None,
    RowId(String),
    Column(String),
    Columns(Vec<String>),
}

pub(crate) struct TableMetadata {
    pub(crate) item: ItemStruct,
    pub(crate) columns: Vec<ColumnMetadata>,
    pub(crate) name: String,
    pub(crate) schema: String,
    pub(crate) primary_key: PrimaryKeyMetadata,
}

fn matches_path(path: &Path, expect: &[&str]) -> bool {
    let len = min(path.segments.len(), expect.len());
    path.segments
        .iter()
        .rev()
        .take(len)
        .map(|v| v.ident.unraw().to_string())
        .eq(expect.iter().rev().take(len).map(|v| v.to_string()))
}

/// Resolves a column given either as a string literal (column name) or as a field path.
fn decode_key_column(
    item: &ItemStruct,
    columns: &[ColumnMetadata],
    col: &Expr,
) -> Result<String> {
    match col {
        Expr::Lit(ExprLit {
            lit: Lit::Str(v), ..
        }) => {
            let name = v.value();
            if !columns.iter().any(|c| !c.ignored && c.name == name) {
                return Err(Error::new(
                    v.span(),
                    format!("Column `{}` does not exist in the table", name),
                ));
            }
            Ok(name)
        }
        Expr::Path(ExprPath { path, .. }) => columns
            .iter()
            .find(|c| {
                let field = c.ident.unraw().to_string();
                !c.ignored
                    && (matches_path(path, &["Self", &field])
                        || matches_path(path, &[&item.ident.to_string(), &field]))
            })
            .map(|c| c.name.clone())
            .ok_or_else(|| {
                Error::new(
                    path.span(),
                    format!(
                        "Field `{}` does not exist in the entity",
                        path.to_token_stream()
                    ),
                )
            }),
        _ => Err(Error::new(
            Span::call_site(),
            "Expected a string literal column name or a field path",
        )),
    }
}

fn decode_key_columns(
    item: &ItemStruct,
    columns: &[ColumnMetadata],
    expr: Expr,
) -> Result<Vec<String>> {
    match expr {
        Expr::Tuple(tuple) => tuple
            .elems
            .iter()
            .map(|v| decode_key_column(item, columns, v))
            .collect(),
        Expr::Paren(paren) => Ok(vec![decode_key_column(item, columns, &paren.expr)?]),
        expr => Ok(vec![decode_key_column(item, columns, &expr)?]),
    }
}

pub(crate) fn decode_table(item: ItemStruct) -> TableMetadata {
    let Fields::Named(..) = item.fields else {
        panic!("Entity can be derived only on structs with named fields");
    };
    let columns: Vec<_> = item.fields.iter().map(decode_column).collect();
    for (i, column) in columns.iter().enumerate().filter(|(_, c)| !c.ignored) {
        if let Some(other) = columns[i + 1..]
            .iter()
            .find(|c| !c.ignored && c.name == column.name)
        {
            panic!(
                "Fields `{}` and `{}` both map to column `{}`, rename one of them with `#[quarry(name = \"my_column\")]`",
                column.ident, other.ident, column.name
            );
        }
    }
    let mut name = item.ident.to_string().to_case(Case::Snake);
    let mut schema = String::new();
    let mut primary_key = PrimaryKeyMetadata::None;
    if name.starts_with('_') {
        name.remove(0);
    }
    for attr in &item.attrs {
        let meta = &attr.meta;
        if meta.path().is_ident("quarry") {
            let Ok(list) = meta.require_list() else {
                panic!("Error while parsing `quarry`, use it like: `#[quarry(attribute = value, ..)]`");
            };
            let _ = list.parse_nested_meta(|arg| {
                if arg.path.is_ident("name") {
                    let Ok(value) = arg.value().and_then(ParseBuffer::parse::<LitStr>) else {
                        panic!("Error while parsing `name`, use it like: `#[quarry(name = \"my_table\")]`");
                    };
                    name = value.value();
                } else if arg.path.is_ident("schema") {
                    let Ok(value) = arg.value().and_then(ParseBuffer::parse::<LitStr>) else {
                        panic!("Error while parsing `schema`, use it like: `#[quarry(schema = \"my_schema\")]`");
                    };
                    schema = value.value();
                } else if arg.path.is_ident("primary_key") {
                    let Ok(value) = arg
                        .value()
                        .and_then(ParseBuffer::parse::<Expr>)
                        .and_then(|v| decode_key_columns(&item, &columns, v))
                    else {
                        panic!("Error while parsing `primary_key`, use it like: `#[quarry(primary_key = (\"k1\", Self::k2, ..))]`");
                    };
                    if !matches!(primary_key, PrimaryKeyMetadata::None) {
                        panic!("Primary key attribute can appear just once on a table");
                    }
                    if let Some(column) = value
                        .iter()
                        .enumerate()
                        .find_map(|(i, c)| value[i + 1..].contains(c).then_some(c))
                    {
                        panic!("Column `{}` appears more than once in the primary key", column);
                    }
                    primary_key = match <[String; 1]>::try_from(value) {
                        Ok([column]) => PrimaryKeyMetadata::Column(column),
                        Err(value) if value.is_empty() => {
                            panic!("Primary key must name at least one column");
                        }
                        Err(value) => PrimaryKeyMetadata::Columns(value),
                    };
                } else if arg.path.is_ident("row_id") {
                    let Ok(value) = arg.value().and_then(ParseBuffer::parse::<LitStr>) else {
                        panic!("Error while parsing `row_id`, use it like: `#[quarry(row_id = \"rowid\")]`");
                    };
                    if !matches!(primary_key, PrimaryKeyMetadata::None) {
                        panic!("Primary key attribute can appear just once on a table");
                    }
                    primary_key = PrimaryKeyMetadata::RowId(value.value());
                } else {
                    panic!(
                        "Unknown attribute `{}` inside quarry macro",
                        arg.path.to_token_stream()
                    );
                }
                Ok(())
            });
        }
    }
    let mut field_keys = columns.iter().filter(|c| c.key != KeyRole::None);
    if let Some(column) = field_keys.next() {
        if !matches!(primary_key, PrimaryKeyMetadata::None) {
            panic!(
                "Column `{}` cannot be declared as a primary key while the table also specifies one",
                column.name
            );
        }
        if let Some(other) = field_keys.next() {
            panic!(
                "Columns `{}` and `{}` are both declared as primary key, use `#[quarry(primary_key = (..))]` on the struct for a composite key",
                column.name, other.name
            );
        }
        primary_key = match column.key {
            KeyRole::RowId => PrimaryKeyMetadata::RowId(column.name.clone()),
            _ => PrimaryKeyMetadata::Column(column.name.clone()),
        };
    }
    TableMetadata {
        item,
        columns,
        name,
        schema,
        primary_key,
    }
}
