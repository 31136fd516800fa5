mod decode_column;
mod decode_table;
mod from_row;

use decode_table::{PrimaryKeyMetadata, decode_table};
use from_row::from_row;
use proc_macro::TokenStream;
use quote::quote;
use syn::{ItemStruct, parse_macro_input};

/// Implements `quarry::Entity`: table metadata from the `#[quarry(..)]` attributes
/// and row construction matching columns to fields by name.
#[proc_macro_derive(Entity, attributes(quarry))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let table = decode_table(parse_macro_input!(input as ItemStruct));
    let name = &table.item.ident;
    let (impl_generics, ty_generics, where_clause) = table.item.generics.split_for_impl();
    let table_name = &table.name;
    let schema_name = &table.schema;
    let primary_key = match &table.primary_key {
        PrimaryKeyMetadata::None => quote!(None),
        PrimaryKeyMetadata::RowId(column) => {
            quote!(Some(::quarry::PrimaryKey::RowId(#column)))
        }
        PrimaryKeyMetadata::Column(column) => {
            quote!(Some(::quarry::PrimaryKey::Column(#column)))
        }
        PrimaryKeyMetadata::Columns(columns) => {
            quote!(Some(::quarry::PrimaryKey::columns(&[#(#columns),*])))
        }
    };
    let from_row = from_row(&table);
    quote! {
        impl #impl_generics ::quarry::Entity for #name #ty_generics #where_clause {
            fn table() -> Option<&'static ::quarry::TableDef> {
                static TABLE: ::quarry::TableDef = ::quarry::TableDef {
                    name: #table_name,
                    schema: #schema_name,
                    primary_key: #primary_key,
                };
                Some(&TABLE)
            }

            fn from_row(__row__: ::quarry::RowLabeled) -> ::quarry::Result<Self> {
                #from_row
            }
        }
    }
    .into()
}
