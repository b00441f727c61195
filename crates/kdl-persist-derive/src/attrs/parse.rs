//! Attribute parsing functions.
//!
//! Uses manual `parse_nested_meta` for every `#[persist(...)]` attribute.

use syn::meta::ParseNestedMeta;
use syn::punctuated::Punctuated;
use syn::{Attribute, Field, Ident, Lit, LitStr, Path, Token, Visibility};

use super::container::ContainerAttrs;
use super::field::FieldAttrs;
use super::types::{CapabilityHint, EnumMode, Reach, RenameStrategy, SplitBehavior};

pub const ATTRIBUTE: &str = "persist";

/// Parse struct-level attributes from `#[persist(...)]`.
pub fn parse_container_attrs(attrs: &[Attribute]) -> syn::Result<ContainerAttrs> {
    let mut result = ContainerAttrs::default();

    for attr in attrs {
        if !attr.path().is_ident(ATTRIBUTE) {
            continue;
        }
        attr.parse_nested_meta(|meta| parse_container_meta(&meta, &mut result))?;
    }

    Ok(result)
}

fn parse_container_meta(meta: &ParseNestedMeta, result: &mut ContainerAttrs) -> syn::Result<()> {
    let ident = meta.path.get_ident().map(|i| i.to_string());

    match ident.as_deref() {
        Some("load") => result.load = Some(parse_method_name(meta)?),
        Some("save") => result.save = Some(parse_method_name(meta)?),
        Some("load_vis") => result.load_vis = Some(parse_visibility(meta)?),
        Some("save_vis") => result.save_vis = Some(parse_visibility(meta)?),
        Some("rename_all") => {
            let s = string_value(meta)?;
            result.rename_all = parse_rename_strategy(&s.value()).ok_or_else(|| {
                syn::Error::new_spanned(
                    &s,
                    "invalid rename_all value, expected one of: kebab-case, snake_case, camelCase, PascalCase, lowercase, UPPERCASE, none",
                )
            })?;
        }
        Some("crate") => {
            let s = string_value(meta)?;
            result.krate = Some(s.parse_with(Path::parse_mod_style)?);
        }
        Some("nodes") => result.nodes.extend(parse_type_list(meta)?),
        Some("qualified_nodes") => result.qualified_nodes.extend(parse_type_list(meta)?),
        Some("leaves") => result.leaves.extend(parse_type_list(meta)?),
        Some("collections") => result.collections.extend(parse_type_list(meta)?),
        Some("dictionaries") => result.dictionaries.extend(parse_type_list(meta)?),
        _ => return Err(meta.error("unknown persist container attribute")),
    }

    Ok(())
}

/// Parse field-level attributes from `#[persist(...)]`.
pub fn parse_field_attrs(field: &Field) -> syn::Result<FieldAttrs> {
    let mut result = FieldAttrs::default();

    for attr in &field.attrs {
        if !attr.path().is_ident(ATTRIBUTE) {
            continue;
        }
        attr.parse_nested_meta(|meta| parse_field_meta(&meta, &mut result))?;
    }

    Ok(result)
}

fn parse_field_meta(meta: &ParseNestedMeta, result: &mut FieldAttrs) -> syn::Result<()> {
    let ident = meta.path.get_ident().map(|i| i.to_string());

    match ident.as_deref() {
        Some("name") => {
            let s = string_value(meta)?;
            result.span = Some(s.span());
            result.name = Some(s.value());
        }
        Some("required") => result.required = true,
        Some("skip") => result.skip = true,
        Some("enum_mode") => {
            let s = string_value(meta)?;
            result.enum_mode = parse_enum_mode(&s.value()).ok_or_else(|| {
                syn::Error::new_spanned(
                    &s,
                    "invalid enum_mode, expected one of: name, name-ignore-case, value",
                )
            })?;
        }
        Some("split") => {
            let s = string_value(meta)?;
            result.split = parse_split_behavior(&s.value()).ok_or_else(|| {
                syn::Error::new_spanned(
                    &s,
                    "invalid split, expected one of: none, trim, remove-empty, trim-remove-empty",
                )
            })?;
        }
        Some("value_separator") => result.value_separator = Some(char_value(meta)?),
        Some("collection_separator") => result.collection_separator = Some(char_value(meta)?),
        Some("key_value_separator") => result.key_value_separator = Some(char_value(meta)?),
        Some("leaf") => set_hint(meta, result, CapabilityHint::Leaf)?,
        Some("collection") => set_hint(meta, result, CapabilityHint::Collection)?,
        Some("dictionary") => set_hint(meta, result, CapabilityHint::Dictionary)?,
        Some("node") => {
            let reach = if meta.input.peek(Token![=]) {
                let s = string_value(meta)?;
                match s.value().as_str() {
                    "direct" => Reach::Direct,
                    "qualified" => Reach::Qualified,
                    _ => {
                        return Err(syn::Error::new_spanned(
                            &s,
                            "invalid node reach, expected one of: direct, qualified",
                        ))
                    }
                }
            } else {
                Reach::Direct
            };
            set_hint(meta, result, CapabilityHint::Node(reach))?;
        }
        _ => return Err(meta.error("unknown persist field attribute")),
    }

    Ok(())
}

fn set_hint(meta: &ParseNestedMeta, result: &mut FieldAttrs, hint: CapabilityHint) -> syn::Result<()> {
    if result.hint.is_some() {
        return Err(meta.error("only one of leaf, node, collection, dictionary may be given"));
    }
    result.hint = Some(hint);
    Ok(())
}

fn string_value(meta: &ParseNestedMeta) -> syn::Result<LitStr> {
    meta.value()?.parse()
}

/// A single character, written either as `','` or `","`.
fn char_value(meta: &ParseNestedMeta) -> syn::Result<char> {
    let lit: Lit = meta.value()?.parse()?;
    match &lit {
        Lit::Char(c) => Ok(c.value()),
        Lit::Str(s) => {
            let value = s.value();
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(c),
                _ => Err(syn::Error::new_spanned(s, "separator must be a single character")),
            }
        }
        _ => Err(syn::Error::new_spanned(lit, "expected a character literal")),
    }
}

fn parse_method_name(meta: &ParseNestedMeta) -> syn::Result<Ident> {
    let s = string_value(meta)?;
    s.parse::<Ident>().map_err(|_| {
        syn::Error::new_spanned(
            &s,
            format!("`{}` is not a valid method name", s.value()),
        )
    })
}

fn parse_visibility(meta: &ParseNestedMeta) -> syn::Result<Visibility> {
    let s = string_value(meta)?;
    match s.value().as_str() {
        "" | "private" => Ok(Visibility::Inherited),
        _ => s.parse::<Visibility>(),
    }
}

fn parse_type_list(meta: &ParseNestedMeta) -> syn::Result<Vec<Path>> {
    let content;
    syn::parenthesized!(content in meta.input);
    let paths = Punctuated::<Path, Token![,]>::parse_terminated_with(&content, Path::parse_mod_style)?;
    Ok(paths.into_iter().collect())
}

pub fn parse_rename_strategy(s: &str) -> Option<RenameStrategy> {
    match s {
        "kebab-case" => Some(RenameStrategy::KebabCase),
        "snake_case" => Some(RenameStrategy::SnakeCase),
        "camelCase" => Some(RenameStrategy::CamelCase),
        "PascalCase" => Some(RenameStrategy::PascalCase),
        "lowercase" => Some(RenameStrategy::Lowercase),
        "UPPERCASE" => Some(RenameStrategy::Uppercase),
        "none" => Some(RenameStrategy::None),
        _ => None,
    }
}

fn parse_enum_mode(s: &str) -> Option<EnumMode> {
    match s {
        "name" => Some(EnumMode::Name),
        "name-ignore-case" => Some(EnumMode::NameIgnoreCase),
        "value" => Some(EnumMode::Value),
        _ => None,
    }
}

fn parse_split_behavior(s: &str) -> Option<SplitBehavior> {
    match s {
        "none" => Some(SplitBehavior::None),
        "trim" => Some(SplitBehavior::Trim),
        "remove-empty" => Some(SplitBehavior::RemoveEmpty),
        "trim-remove-empty" => Some(SplitBehavior::TrimAndRemoveEmpty),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse::Parser;
    use syn::{parse_quote, DeriveInput};

    #[test]
    fn unknown_keys_are_rejected() {
        let input: DeriveInput = parse_quote! {
            #[persist(colour = "red")]
            struct Settings;
        };
        let err = parse_container_attrs(&input.attrs).unwrap_err();
        assert!(err.to_string().contains("unknown persist container attribute"));
    }

    #[test]
    fn type_lists_accept_paths() {
        let input: DeriveInput = parse_quote! {
            #[persist(collections(Tags, crate::model::Ring), dictionaries(Lookup))]
            struct Settings;
        };
        let attrs = parse_container_attrs(&input.attrs).unwrap();
        assert_eq!(attrs.collections.len(), 2);
        assert_eq!(attrs.dictionaries.len(), 1);
    }

    #[test]
    fn invalid_method_names_are_rejected() {
        let input: DeriveInput = parse_quote! {
            #[persist(load = "not a name")]
            struct Settings;
        };
        assert!(parse_container_attrs(&input.attrs).is_err());
    }

    #[test]
    fn separators_must_be_single_characters() {
        let field: syn::Field = syn::Field::parse_named
            .parse2(quote::quote! { #[persist(value_separator = "::")] size: u8 })
            .unwrap();
        let err = parse_field_attrs(&field).unwrap_err();
        assert!(err.to_string().contains("single character"));

        let field: syn::Field = syn::Field::parse_named
            .parse2(quote::quote! { #[persist(value_separator = "|")] size: u8 })
            .unwrap();
        assert_eq!(parse_field_attrs(&field).unwrap().value_separator, Some('|'));
    }

    #[test]
    fn conflicting_hints_are_rejected() {
        let field: syn::Field = syn::Field::parse_named
            .parse2(quote::quote! { #[persist(leaf, node)] value: Thing })
            .unwrap();
        assert!(parse_field_attrs(&field).is_err());
    }
}
