//! Import collection for generated units.

use std::collections::BTreeSet;

use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;

/// Standard library imports sort ahead of everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Tier {
    Std,
    Other,
}

/// A single `use` item.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Import {
    tier: Tier,
    path: String,
    /// `use path as _;`, bringing a trait's methods into scope without
    /// binding its name.
    anonymous: bool,
}

impl Import {
    pub fn named(segments: &[String]) -> Self {
        Self::new(segments, false)
    }

    pub fn anonymous(segments: &[String]) -> Self {
        Self::new(segments, true)
    }

    fn new(segments: &[String], anonymous: bool) -> Self {
        let tier = match segments.first().map(String::as_str) {
            Some("std" | "core" | "alloc") => Tier::Std,
            _ => Tier::Other,
        };
        Self {
            tier,
            path: segments.join("::"),
            anonymous,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// The name this import binds, if any.
    pub fn binding(&self) -> Option<&str> {
        if self.anonymous {
            None
        } else {
            self.path.rsplit("::").next()
        }
    }
}

/// Tokens for `segments` as an absolute path. Paths rooted at `crate`,
/// `self` or `super` are left as written.
pub fn path_tokens(segments: &[String]) -> TokenStream {
    let idents = segments.iter().map(|s| Ident::new(s, Span::call_site()));
    match segments.first().map(String::as_str) {
        Some("crate" | "self" | "super") => quote! { #(#idents)::* },
        _ => quote! { #(:: #idents)* },
    }
}

/// The ordered set of imports a generated unit needs.
#[derive(Debug, Clone, Default)]
pub struct NamespaceCollector {
    imports: BTreeSet<Import>,
}

impl NamespaceCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, import: Import) -> bool {
        self.imports.insert(import)
    }

    /// Path currently bound to `name` by a named import.
    pub fn bound(&self, name: &str) -> Option<&str> {
        self.imports
            .iter()
            .find(|import| import.binding() == Some(name))
            .map(Import::path)
    }

    /// Imports in emission order: `std`, `core` and `alloc` first, then the
    /// rest, each tier sorted by path.
    pub fn iter(&self) -> impl Iterator<Item = &Import> {
        self.imports.iter()
    }

    pub fn to_use_items(&self) -> TokenStream {
        let items = self.iter().map(|import| {
            let segments: Vec<String> = import.path.split("::").map(String::from).collect();
            let path = path_tokens(&segments);
            if import.anonymous {
                quote! { use #path as _; }
            } else {
                quote! { use #path; }
            }
        });
        quote! { #(#items)* }
    }
}
