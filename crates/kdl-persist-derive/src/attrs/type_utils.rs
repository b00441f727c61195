//! Type analysis utilities for field types.

use std::collections::BTreeSet;

use proc_macro2::{TokenStream, TokenTree};
use quote::ToTokens;
use syn::{GenericArgument, Path, PathArguments, Type, TypePath};

/// The path of a plain (non-qualified) path type.
pub fn type_path(ty: &Type) -> Option<&Path> {
    match ty {
        Type::Path(TypePath { qself: None, path }) => Some(path),
        Type::Group(group) => type_path(&group.elem),
        Type::Paren(paren) => type_path(&paren.elem),
        _ => None,
    }
}

/// Segment identifiers of a path, without generic arguments.
pub fn path_idents(path: &Path) -> Vec<String> {
    path.segments.iter().map(|s| s.ident.to_string()).collect()
}

/// Check if a type is `Option<T>`.
pub fn is_option_type(ty: &Type) -> bool {
    type_path(ty)
        .and_then(|path| path.segments.last())
        .map(|s| s.ident == "Option" && type_arguments(ty).len() == 1)
        .unwrap_or(false)
}

/// Extract `T` from `Option<T>`.
pub fn extract_option_inner(ty: &Type) -> Option<&Type> {
    if is_option_type(ty) {
        type_arguments(ty).into_iter().next()
    } else {
        None
    }
}

/// Type arguments of the last path segment, in order.
pub fn type_arguments(ty: &Type) -> Vec<&Type> {
    let Some(segment) = type_path(ty).and_then(|path| path.segments.last()) else {
        return Vec::new();
    };
    match &segment.arguments {
        PathArguments::AngleBracketed(args) => args
            .args
            .iter()
            .filter_map(|arg| match arg {
                GenericArgument::Type(inner) => Some(inner),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Does `path` name `name` either bare or through one of the `canonical`
/// module paths?
pub fn path_matches(path: &Path, name: &str, canonical: &[&[&str]]) -> bool {
    let idents = path_idents(path);
    match idents.as_slice() {
        [single] => single == name,
        [prefix @ .., last] if last == name => canonical
            .iter()
            .any(|module| module.len() == prefix.len() && module.iter().zip(prefix).all(|(a, b)| a == b)),
        _ => false,
    }
}

/// Every identifier mentioned anywhere in `tokens`.
pub fn collect_idents(tokens: TokenStream, out: &mut BTreeSet<String>) {
    for tree in tokens {
        match tree {
            TokenTree::Ident(ident) => {
                out.insert(ident.to_string());
            }
            TokenTree::Group(group) => collect_idents(group.stream(), out),
            _ => {}
        }
    }
}

pub fn type_idents(ty: &Type, out: &mut BTreeSet<String>) {
    collect_idents(ty.to_token_stream(), out);
}
