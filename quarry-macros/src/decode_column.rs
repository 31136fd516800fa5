use quote::ToTokens;
use syn::{Field, Ident, LitStr, Type, ext::IdentExt, parse::ParseBuffer};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyRole {
    /// Declared as the single primary key column.
    PrimaryKey,
    /// Declared as the implicit row identifier.
    RowId,
    #[default]
    None,
}

pub(crate) struct ColumnMetadata {
    pub(crate) ident: Ident,
    pub(crate) ty: Type,
    pub(crate) name: String,
    pub(crate) key: KeyRole,
    pub(crate) ignored: bool,
}

fn flag(arg: &syn::meta::ParseNestedMeta, usage: &str) {
    // value() is Err for Meta::Path
    let Err(..) = arg.value() else {
        panic!("Error while parsing `{usage}`, use it like: `#[quarry({usage})]`");
    };
}

pub(crate) fn decode_column(field: &Field) -> ColumnMetadata {
    let ident = field
        .ident
        .clone()
        .expect("Entity can be derived only on structs with named fields");
    let mut name = ident.unraw().to_string();
    if name.starts_with('_') {
        name.remove(0);
    }
    let mut metadata = ColumnMetadata {
        ident,
        ty: field.ty.clone(),
        name,
        key: KeyRole::None,
        ignored: false,
    };
    for attr in &field.attrs {
        let meta = &attr.meta;
        if meta.path().is_ident("quarry") {
            let Ok(list) = meta.require_list() else {
                panic!("Error while parsing `quarry`, use it like: `#[quarry(attribute = value, ..)]`");
            };
            let _ = list.parse_nested_meta(|arg| {
                if arg.path.is_ident("name") {
                    let Ok(v) = arg.value().and_then(ParseBuffer::parse::<LitStr>) else {
                        panic!("Error while parsing `name`, use it like: `#[quarry(name = \"my_column\")]`");
                    };
                    metadata.name = v.value();
                } else if arg.path.is_ident("primary_key") {
                    flag(&arg, "primary_key");
                    metadata.key = KeyRole::PrimaryKey;
                } else if arg.path.is_ident("row_id") {
                    flag(&arg, "row_id");
                    metadata.key = KeyRole::RowId;
                } else if arg.path.is_ident("ignore") {
                    flag(&arg, "ignore");
                    metadata.ignored = true;
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
    if metadata.ignored && metadata.key != KeyRole::None {
        panic!(
            "Field `{}` cannot be both ignored and part of the primary key",
            metadata.ident
        );
    }
    metadata
}
