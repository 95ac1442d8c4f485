//! Attribute parsing shared by the derive macros.

use syn::{Attribute, LitStr, Path};

/// Name of the helper attribute, as in `#[record(...)]`.
pub(crate) const ATTR: &str = "record";

/// Options from a `#[record(...)]` attribute on a struct.
#[derive(Debug, Default)]
pub(crate) struct ContainerOptions {
    /// Path under which the runtime crate is reachable (default `::kit_core`).
    pub krate: Option<Path>,
}

/// Options from a `#[record(...)]` attribute on a field.
#[derive(Debug, Default)]
pub(crate) struct FieldOptions {
    /// Name the field is looked up by, instead of its Rust name.
    pub rename: Option<LitStr>,
    /// Hide a public field.
    pub skip: bool,
}

impl FieldOptions {
    pub(crate) fn is_default(&self) -> bool {
        self.rename.is_none() && !self.skip
    }
}

pub(crate) fn error(spanned: impl quote::ToTokens, message: impl std::fmt::Display) -> syn::Error {
    syn::Error::new_spanned(spanned, format!("[kit] {message}"))
}

/// Parse every `#[record(...)]` attribute on a struct.
///
/// Accepts `crate = "path"`.
pub(crate) fn parse_container_options(attrs: &[Attribute]) -> syn::Result<ContainerOptions> {
    let mut options = ContainerOptions::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident(ATTR)) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("crate") {
                let lit: LitStr = meta.value()?.parse()?;
                options.krate = Some(lit.parse()?);
                return Ok(());
            }
            Err(meta.error("[kit] unknown struct option, expected `crate = \"...\"`"))
        })?;
    }
    Ok(options)
}

/// Parse every `#[record(...)]` attribute on a field.
///
/// Accepts `rename = "name"` and `skip`.
pub(crate) fn parse_field_options(attrs: &[Attribute]) -> syn::Result<FieldOptions> {
    let mut options = FieldOptions::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident(ATTR)) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let lit: LitStr = meta.value()?.parse()?;
                if lit.value().is_empty() {
                    return Err(error(&lit, "rename must not be empty"));
                }
                options.rename = Some(lit);
                return Ok(());
            }
            if meta.path.is_ident("skip") {
                options.skip = true;
                return Ok(());
            }
            Err(meta.error("[kit] unknown field option, expected `rename = \"...\"` or `skip`"))
        })?;
    }
    if options.skip && options.rename.is_some() {
        return Err(error(
            options.rename.as_ref(),
            "`skip` and `rename` cannot be combined",
        ));
    }
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn field_attrs(field: syn::Field) -> Vec<Attribute> {
        field.attrs
    }

    #[test]
    fn test_field_without_attribute() {
        let attrs = field_attrs(parse_quote! { pub name: String });
        let options = parse_field_options(&attrs).unwrap();
        assert!(options.is_default());
    }

    #[test]
    fn test_field_rename() {
        let attrs = field_attrs(parse_quote! {
            #[record(rename = "full_name")]
            pub name: String
        });
        let options = parse_field_options(&attrs).unwrap();
        assert_eq!(options.rename.unwrap().value(), "full_name");
        assert!(!options.skip);
    }

    #[test]
    fn test_field_skip() {
        let attrs = field_attrs(parse_quote! {
            #[record(skip)]
            pub token: String
        });
        assert!(parse_field_options(&attrs).unwrap().skip);
    }

    #[test]
    fn test_unrelated_attributes_are_ignored() {
        let attrs = field_attrs(parse_quote! {
            #[doc = "the name"]
            #[serde(rename = "n")]
            pub name: String
        });
        assert!(parse_field_options(&attrs).unwrap().is_default());
    }

    #[test]
    fn test_field_errors() {
        let unknown = field_attrs(parse_quote! { #[record(flatten)] pub a: u8 });
        assert!(parse_field_options(&unknown).is_err());

        let empty = field_attrs(parse_quote! { #[record(rename = "")] pub a: u8 });
        assert!(parse_field_options(&empty).is_err());

        let both = field_attrs(parse_quote! { #[record(skip, rename = "b")] pub a: u8 });
        let err = parse_field_options(&both).unwrap_err();
        assert!(err.to_string().contains("cannot be combined"));
    }

    #[test]
    fn test_container_crate_path() {
        let input: syn::DeriveInput = parse_quote! {
            #[record(crate = "::kit")]
            struct S;
        };
        let options = parse_container_options(&input.attrs).unwrap();
        let path = options.krate.unwrap();
        assert!(path.leading_colon.is_some());
        assert_eq!(path.segments.len(), 1);
        assert_eq!(path.segments[0].ident, "kit");
    }

    #[test]
    fn test_container_unknown_option() {
        let input: syn::DeriveInput = parse_quote! {
            #[record(rename_all = "camelCase")]
            struct S;
        };
        assert!(parse_container_options(&input.attrs).is_err());
    }
}
