//! Per-invocation generation state.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;
use syn::Path;

use crate::namespaces::{path_tokens, Import, NamespaceCollector};

/// Cooperative cancellation flag shared between a caller and a generation run.
#[derive(Debug, Clone, Default)]
pub struct Cancellation(Arc<AtomicBool>);

impl Cancellation {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug)]
pub enum GenerateError {
    Cancelled,
    Invalid(syn::Error),
}

impl GenerateError {
    pub fn to_compile_error(&self) -> TokenStream {
        match self {
            GenerateError::Cancelled => {
                syn::Error::new(Span::call_site(), "Persist generation was cancelled").to_compile_error()
            }
            GenerateError::Invalid(err) => err.to_compile_error(),
        }
    }
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::Cancelled => f.write_str("generation cancelled"),
            GenerateError::Invalid(err) => write!(f, "{err}"),
        }
    }
}

impl From<syn::Error> for GenerateError {
    fn from(err: syn::Error) -> Self {
        GenerateError::Invalid(err)
    }
}

/// Runtime items generated code may refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeItem {
    Node,
    LoadError,
    PersistNode,
    RequiredFields,
    Codec,
    ParseOptions,
    WriteOptions,
    EnumMode,
    SplitBehavior,
}

impl RuntimeItem {
    fn segments(self, krate: &[String]) -> Vec<String> {
        let (module, name): (Option<&str>, &str) = match self {
            RuntimeItem::Node => (None, "Node"),
            RuntimeItem::LoadError => (None, "LoadError"),
            RuntimeItem::PersistNode => (None, "PersistNode"),
            RuntimeItem::RequiredFields => (None, "RequiredFields"),
            RuntimeItem::Codec => (None, "codec"),
            RuntimeItem::ParseOptions => (Some("codec"), "ParseOptions"),
            RuntimeItem::WriteOptions => (Some("codec"), "WriteOptions"),
            RuntimeItem::EnumMode => (Some("codec"), "EnumMode"),
            RuntimeItem::SplitBehavior => (Some("codec"), "SplitBehavior"),
        };
        let mut segments = krate.to_vec();
        segments.extend(module.map(String::from));
        segments.push(name.to_string());
        segments
    }
}

/// Standard library items generated code names explicitly, so a local
/// `Result` alias or similar cannot change their meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdItem {
    Result,
    Default,
}

impl StdItem {
    fn segments(self) -> Vec<String> {
        let path: &[&str] = match self {
            StdItem::Result => &["core", "result", "Result"],
            StdItem::Default => &["core", "default", "Default"],
        };
        path.iter().map(|s| s.to_string()).collect()
    }
}

/// State for one struct's generation run.
///
/// Imports are recorded lazily, only for items the emitted code actually uses.
/// A short name is used only when it cannot clash with an identifier in the
/// user's own tokens or with another import; otherwise the full path is
/// emitted instead.
pub struct GenerationContext<'a> {
    krate: Vec<String>,
    namespaces: NamespaceCollector,
    reserved: BTreeSet<String>,
    cancellation: &'a Cancellation,
}

impl<'a> GenerationContext<'a> {
    pub fn new(krate: &Path, reserved: BTreeSet<String>, cancellation: &'a Cancellation) -> Self {
        Self {
            krate: krate.segments.iter().map(|s| s.ident.to_string()).collect(),
            namespaces: NamespaceCollector::new(),
            reserved,
            cancellation,
        }
    }

    pub fn check_cancelled(&self) -> Result<(), GenerateError> {
        if self.cancellation.is_cancelled() {
            Err(GenerateError::Cancelled)
        } else {
            Ok(())
        }
    }

    pub fn runtime(&mut self, item: RuntimeItem) -> TokenStream {
        let segments = item.segments(&self.krate);
        self.import(&segments)
    }

    pub fn std_item(&mut self, item: StdItem) -> TokenStream {
        self.import(&item.segments())
    }

    /// Name `PersistNode` and make its methods callable with method syntax.
    pub fn persist_node_trait(&mut self) -> TokenStream {
        let segments = RuntimeItem::PersistNode.segments(&self.krate);
        let tokens = self.import(&segments);
        if !self.is_imported(&segments) {
            self.namespaces.insert(Import::anonymous(&segments));
        }
        tokens
    }

    fn is_imported(&self, segments: &[String]) -> bool {
        let path = segments.join("::");
        segments
            .last()
            .is_some_and(|name| self.namespaces.bound(name) == Some(path.as_str()))
    }

    fn import(&mut self, segments: &[String]) -> TokenStream {
        let Some(name) = segments.last() else {
            return TokenStream::new();
        };
        let path = segments.join("::");
        let free = match self.namespaces.bound(name) {
            Some(bound) => bound == path,
            None => !self.reserved.contains(name),
        };
        if free {
            self.namespaces.insert(Import::named(segments));
            let ident = Ident::new(name, Span::call_site());
            quote! { #ident }
        } else {
            path_tokens(segments)
        }
    }

    pub fn namespaces(&self) -> &NamespaceCollector {
        &self.namespaces
    }
}
