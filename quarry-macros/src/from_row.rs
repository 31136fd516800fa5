use crate::decode_table::TableMetadata;
use proc_macro2::TokenStream;
use quote::quote;

/// Body of `Entity::from_row`: cells are matched to fields by column label.
pub(crate) fn from_row(table: &TableMetadata) -> TokenStream {
    let columns = table.columns.iter().filter(|c| !c.ignored);
    let holders = columns.clone().map(|c| {
        let ident = &c.ident;
        let ty = &c.ty;
        quote! {
            let mut #ident: ::std::option::Option<#ty> = None;
        }
    });
    let assignments = columns.clone().map(|c| {
        let ident = &c.ident;
        let ty = &c.ty;
        let name = &c.name;
        quote! {
            #name => #ident = Some(<#ty as ::quarry::AsValue>::try_from_value(__v__)?),
        }
    });
    let fields = table.columns.iter().map(|c| {
        let ident = &c.ident;
        if c.ignored {
            quote!(#ident: ::std::default::Default::default())
        } else {
            let name = &c.name;
            quote!(#ident: #ident.ok_or_else(|| __missing__(#name))?)
        }
    });
    quote! {
        #(#holders)*
        let __labels__ = __row__.labels;
        for (__n__, __v__) in ::std::iter::zip(__labels__.iter(), __row__.values.into_vec()) {
            match __n__.as_str() {
                #(#assignments)*
                _ => {}
            }
        }
        let __missing__ = |name: &str| ::quarry::Error::msg(format!(
            "Column `{}` does not exist in the row provided",
            name
        ));
        Ok(Self {
            #(#fields,)*
        })
    }
}
