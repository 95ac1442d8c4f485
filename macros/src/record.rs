//! Implementation of `#[derive(Record)]`
//!
//! Generates a `Record` impl that resolves public fields by name, converting
//! a field only when it is asked for, plus an `IntoValue` impl that stores the
//! struct as a Struct value.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    Data, DeriveInput, Fields, GenericParam, Ident, LitStr, Type, Visibility, ext::IdentExt,
    parse_macro_input, parse_quote,
};

use crate::common::{error, parse_container_options, parse_field_options};

/// Entry point for `#[derive(Record)]`.
pub fn derive_record_impl(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

// ============================================================================
// Parsing
// ============================================================================

/// A field reachable through `Record::field`.
struct Exposed<'a> {
    ident: &'a Ident,
    ty: &'a Type,
    name: LitStr,
}

fn exposed_fields(input: &DeriveInput) -> syn::Result<Vec<Exposed<'_>>> {
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => named.named.iter().collect(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => {
                return Err(error(
                    &input.ident,
                    "Record cannot be derived for tuple structs",
                ));
            }
        },
        _ => {
            return Err(error(
                &input.ident,
                "Record can only be derived for structs with named fields",
            ));
        }
    };

    let mut exposed = Vec::new();
    for field in named {
        let options = parse_field_options(&field.attrs)?;
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        if !matches!(field.vis, Visibility::Public(_)) {
            if !options.is_default() {
                return Err(error(
                    ident,
                    "`#[record(...)]` on a private field has no effect; private fields are never exposed",
                ));
            }
            continue;
        }
        if options.skip {
            continue;
        }
        let name = options
            .rename
            .unwrap_or_else(|| LitStr::new(&ident.unraw().to_string(), ident.span()));
        if exposed.iter().any(|e: &Exposed| e.name.value() == name.value()) {
            return Err(error(&name, format!("duplicate field name `{}`", name.value())));
        }
        exposed.push(Exposed {
            ident,
            ty: &field.ty,
            name,
        });
    }
    Ok(exposed)
}

// ============================================================================
// Code Generation
// ============================================================================

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let container = parse_container_options(&input.attrs)?;
    let krate = container.krate.unwrap_or_else(|| parse_quote!(::kit_core));
    let fields = exposed_fields(input)?;

    if let Some(lifetime) = input.generics.lifetimes().next() {
        return Err(error(
            lifetime,
            "Record cannot be derived for types with lifetime parameters",
        ));
    }

    // Stored values must be shareable across threads and outlive any borrow.
    let mut generics = input.generics.clone();
    let has_type_params = generics
        .params
        .iter()
        .any(|p| matches!(p, GenericParam::Type(_)));
    for param in generics.params.iter_mut() {
        if let GenericParam::Type(param) = param {
            param
                .bounds
                .push(parse_quote!(::core::marker::Send));
            param
                .bounds
                .push(parse_quote!(::core::marker::Sync));
            param.bounds.push(parse_quote!('static));
        }
    }
    if has_type_params {
        let where_clause = generics.make_where_clause();
        for field in &fields {
            let ty = field.ty;
            where_clause.predicates.push(parse_quote! {
                #ty: ::core::clone::Clone + #krate::values::IntoValue
            });
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let ident = &input.ident;
    let names: Vec<&LitStr> = fields.iter().map(|f| &f.name).collect();
    let arms = fields.iter().map(|field| {
        let name = &field.name;
        let member = field.ident;
        quote! {
            #name => ::core::option::Option::Some(#krate::values::IntoValue::into_value(
                ::core::clone::Clone::clone(&self.#member),
            )),
        }
    });

    Ok(quote! {
        impl #impl_generics #krate::values::Record for #ident #ty_generics #where_clause {
            fn field(&self, name: &str) -> ::core::option::Option<#krate::values::Value> {
                match name {
                    #(#arms)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_names(&self) -> &'static [&'static str] {
                &[#(#names),*]
            }

            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }
        }

        impl #impl_generics #krate::values::IntoValue for #ident #ty_generics #where_clause {
            fn into_value(self) -> #krate::values::Value {
                #krate::values::Value::record(self)
            }
        }
    })
}
