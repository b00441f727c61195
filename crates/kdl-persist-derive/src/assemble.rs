//! Assembly of the complete generated unit for one struct.

use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};

use proc_macro2::TokenStream;
use quote::quote;

use crate::attrs::{FieldMetadata, ObjectMetadata, RenameStrategy};
use crate::classify::{classify, TypeShape};
use crate::context::{GenerateError, GenerationContext, RuntimeItem, StdItem};
use crate::load_gen::{load_field, touches_tracker};
use crate::save_gen::save_field;

/// The generated source for one struct.
#[derive(Debug, Clone)]
pub struct EmittedUnit {
    /// `<snake_case type name>.persist.rs`
    pub file_name: String,
    pub tokens: TokenStream,
    /// Formatted source text with a generated-file header.
    pub text: String,
}

impl EmittedUnit {
    /// Write the formatted text into `dir`, creating it if needed.
    pub fn write_to(&self, dir: &Path) -> io::Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.text)?;
        Ok(path)
    }
}

pub fn unit_file_name(object: &ObjectMetadata) -> String {
    format!("{}.persist.rs", RenameStrategy::SnakeCase.apply(&object.type_name()))
}

/// Build the load and save methods, the `PersistNode` impl delegating to them,
/// and the imports they need, wrapped in an anonymous const scope.
///
/// Fields are visited in declaration order. Every unsupported field is
/// reported in one combined error.
pub fn assemble(
    object: &ObjectMetadata,
    fields: &[FieldMetadata],
    ctx: &mut GenerationContext,
) -> Result<EmittedUnit, GenerateError> {
    ctx.check_cancelled()?;

    let mut classified = Vec::new();
    let mut errors: Option<syn::Error> = None;
    let mut names = BTreeSet::new();
    for field in fields.iter().filter(|field| !field.skip) {
        ctx.check_cancelled()?;
        let shape = classify(&field.value_ty, field.hint, &object.env);
        let error = if shape == TypeShape::Unsupported {
            let ty = &field.ty;
            Some(syn::Error::new_spanned(
                ty,
                format!(
                    "field `{}` has type `{}` which Persist cannot load or save; declare it with a leaf, node, collection or dictionary hint",
                    field.ident,
                    type_display(ty),
                ),
            ))
        } else if !names.insert(field.name.as_str()) {
            Some(syn::Error::new_spanned(
                &field.ident,
                format!("serialized name `{}` is used by more than one field", field.name),
            ))
        } else {
            None
        };
        match (error, &mut errors) {
            (Some(error), Some(combined)) => combined.combine(error),
            (Some(error), None) => errors = Some(error),
            (None, _) => classified.push((field, shape)),
        }
    }
    if let Some(errors) = errors {
        return Err(errors.into());
    }

    let node = ctx.runtime(RuntimeItem::Node);
    let load_error = ctx.runtime(RuntimeItem::LoadError);
    let result = ctx.std_item(StdItem::Result);

    let load_body = if classified.is_empty() {
        quote! {
            let _ = node;
            ::core::result::Result::Ok(())
        }
    } else {
        let tracker_ty = ctx.runtime(RuntimeItem::RequiredFields);
        let type_name = object.type_name();
        let required = classified
            .iter()
            .filter(|(field, _)| field.required)
            .map(|(field, _)| field.name.as_str());
        let binding = if classified.iter().any(|(field, shape)| touches_tracker(field, shape)) {
            quote! { let mut tracker }
        } else {
            quote! { let tracker }
        };
        let mut statements = Vec::with_capacity(classified.len());
        for (field, shape) in &classified {
            ctx.check_cancelled()?;
            statements.push(load_field(field, shape, ctx));
        }
        quote! {
            #binding = #tracker_ty::new(#type_name, &[#(#required),*]);
            #(#statements)*
            tracker.finish()
        }
    };

    let save_body = if classified.is_empty() {
        quote! { let _ = node; }
    } else {
        let mut statements = Vec::with_capacity(classified.len());
        for (field, shape) in &classified {
            ctx.check_cancelled()?;
            statements.push(save_field(field, shape, ctx));
        }
        quote! { #(#statements)* }
    };

    let persist_node = ctx.runtime(RuntimeItem::PersistNode);
    ctx.check_cancelled()?;

    let ident = &object.ident;
    let (impl_generics, ty_generics, where_clause) = object.generics.split_for_impl();
    let (load_name, load_vis) = (&object.load_name, &object.load_vis);
    let (save_name, save_vis) = (&object.save_name, &object.save_vis);
    let imports = ctx.namespaces().to_use_items();

    let tokens = quote! {
        const _: () = {
            #imports

            impl #impl_generics #ident #ty_generics #where_clause {
                #load_vis fn #load_name(&mut self, node: &#node) -> #result<(), #load_error> {
                    #load_body
                }

                #save_vis fn #save_name(&self, node: &mut #node) {
                    #save_body
                }
            }

            impl #impl_generics #persist_node for #ident #ty_generics #where_clause {
                fn load_node(&mut self, node: &#node) -> #result<(), #load_error> {
                    Self::#load_name(self, node)
                }

                fn save_node(&self, node: &mut #node) {
                    Self::#save_name(self, node)
                }
            }
        };
    };

    let text = format_unit(object, &tokens)?;
    Ok(EmittedUnit {
        file_name: unit_file_name(object),
        tokens,
        text,
    })
}

/// Compact rendering of a type for diagnostics, e.g. `Vec<Mystery>`.
fn type_display(ty: &syn::Type) -> String {
    let mut text = quote!(#ty).to_string();
    for (spaced, tight) in [(" <", "<"), ("< ", "<"), (" >", ">"), (" ,", ","), (" ::", "::"), (":: ", "::"), ("& ", "&")] {
        text = text.replace(spaced, tight);
    }
    text
}

fn format_unit(object: &ObjectMetadata, tokens: &TokenStream) -> syn::Result<String> {
    let file: syn::File = syn::parse2(tokens.clone())?;
    let body = prettyplease::unparse(&file);
    Ok(format!(
        "// @generated by kdl-persist-derive for `{}`. Do not edit.\n\n{}",
        object.type_name(),
        body.replace("\r\n", "\n"),
    ))
}
