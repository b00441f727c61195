//! Derive macros for `kdl-persist`.
//!
//! `#[derive(Persist)]` generates an inherent load method, an inherent save
//! method and a `PersistNode` impl for a struct with named fields.
//! `#[derive(PersistEnum)]` makes a unit enum usable as a leaf value.

mod assemble;
mod attrs;
mod classify;
mod context;
mod enum_gen;
mod load_gen;
mod namespaces;
mod options_gen;
mod save_gen;

use std::collections::BTreeSet;
use std::path::Path;

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::ToTokens;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

use assemble::{assemble, EmittedUnit};
use attrs::{collect_idents, type_idents, FieldMetadata, ObjectMetadata};
use context::{Cancellation, GenerateError, GenerationContext};

/// When set, every generated unit is also written to this directory.
const EMIT_DIR_VAR: &str = "KDL_PERSIST_EMIT_DIR";

#[proc_macro_derive(Persist, attributes(persist))]
pub fn derive_persist(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let unit = match expand_persist(&input, &Cancellation::new()) {
        Ok(unit) => unit,
        Err(err) => return err.to_compile_error().into(),
    };

    if let Some(dir) = std::env::var_os(EMIT_DIR_VAR) {
        if let Err(err) = unit.write_to(Path::new(&dir)) {
            let message = format!("failed to write {} to {}: {err}", unit.file_name, dir.to_string_lossy());
            return syn::Error::new(Span::call_site(), message).to_compile_error().into();
        }
    }
    unit.tokens.into()
}

#[proc_macro_derive(PersistEnum, attributes(persist))]
pub fn derive_persist_enum(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match enum_gen::generate_persist_enum_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Generate the unit for one struct without touching the compiler's token types.
pub(crate) fn expand_persist(input: &DeriveInput, cancellation: &Cancellation) -> Result<EmittedUnit, GenerateError> {
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(&input.ident, "Persist requires a struct with named fields").into())
            }
        },
        _ => return Err(syn::Error::new_spanned(&input.ident, "Persist can only be derived for structs").into()),
    };

    let object = ObjectMetadata::from_derive_input(input)?;
    let fields = named
        .iter()
        .map(|field| FieldMetadata::from_field(field, object.rename_all))
        .collect::<syn::Result<Vec<_>>>()?;

    let mut ctx = GenerationContext::new(&object.krate, reserved_idents(input, &fields), cancellation);
    assemble(&object, &fields, &mut ctx)
}

/// Identifiers a short import could shadow: every ident in the field types,
/// the struct's own name and its generics, bounds and where-clause included.
fn reserved_idents(input: &DeriveInput, fields: &[FieldMetadata]) -> BTreeSet<String> {
    let mut reserved = BTreeSet::new();
    reserved.insert(input.ident.to_string());
    collect_idents(input.generics.to_token_stream(), &mut reserved);
    if let Some(where_clause) = &input.generics.where_clause {
        collect_idents(where_clause.to_token_stream(), &mut reserved);
    }
    for field in fields {
        type_idents(&field.ty, &mut reserved);
    }
    reserved
}
