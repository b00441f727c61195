//! Enum types for `#[persist(...)]` attribute values.
//!
//! These are parsed from string values by helper functions in `parse.rs`.

use proc_macro2::{Ident, Span};

/// Rename strategy for serialized field and variant names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenameStrategy {
    #[default]
    None,
    KebabCase,
    SnakeCase,
    CamelCase,
    PascalCase,
    Lowercase,
    Uppercase,
}

impl RenameStrategy {
    pub fn apply(&self, name: &str) -> String {
        match self {
            RenameStrategy::None => name.to_string(),
            RenameStrategy::KebabCase => words(name).join("-"),
            RenameStrategy::SnakeCase => words(name).join("_"),
            RenameStrategy::CamelCase => {
                let mut out = String::with_capacity(name.len());
                for (index, word) in words(name).iter().enumerate() {
                    if index == 0 {
                        out.push_str(word);
                    } else {
                        out.push_str(&capitalize(word));
                    }
                }
                out
            }
            RenameStrategy::PascalCase => words(name).iter().map(|w| capitalize(w)).collect(),
            RenameStrategy::Lowercase => name.to_lowercase(),
            RenameStrategy::Uppercase => name.to_uppercase(),
        }
    }
}

/// How enumeration values are matched. Mirrors the runtime `EnumMode`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EnumMode {
    #[default]
    Name,
    NameIgnoreCase,
    Value,
}

impl EnumMode {
    pub fn variant(&self) -> Ident {
        let name = match self {
            EnumMode::Name => "Name",
            EnumMode::NameIgnoreCase => "NameIgnoreCase",
            EnumMode::Value => "Value",
        };
        Ident::new(name, Span::call_site())
    }
}

/// Collection split cleanup. Mirrors the runtime `SplitBehavior`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SplitBehavior {
    None,
    Trim,
    RemoveEmpty,
    #[default]
    TrimAndRemoveEmpty,
}

impl SplitBehavior {
    pub fn variant(&self) -> Ident {
        let name = match self {
            SplitBehavior::None => "None",
            SplitBehavior::Trim => "Trim",
            SplitBehavior::RemoveEmpty => "RemoveEmpty",
            SplitBehavior::TrimAndRemoveEmpty => "TrimAndRemoveEmpty",
        };
        Ident::new(name, Span::call_site())
    }
}

/// How a self-serializing node's `PersistNode` impl is invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reach {
    /// Method-call syntax with the trait in scope.
    Direct,
    /// Fully-qualified `<T as PersistNode>::..` call.
    Qualified,
}

/// A capability asserted on a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityHint {
    Leaf,
    Node(Reach),
    Collection,
    Dictionary,
}

/// Split an identifier into lowercase words on `_`, `-` and lower-to-upper
/// case boundaries.
fn words(s: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for c in s.chars() {
        if c == '_' || c == '-' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
        } else if c.is_ascii_uppercase() {
            if prev_lower && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            current.push(c.to_ascii_lowercase());
            prev_lower = false;
        } else {
            current.push(c);
            prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
