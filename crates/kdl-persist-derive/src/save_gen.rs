//! Statements of the generated save method.

use proc_macro2::TokenStream;
use quote::quote;

use crate::attrs::{FieldMetadata, Reach};
use crate::classify::TypeShape;
use crate::context::{GenerationContext, RuntimeItem};
use crate::options_gen::write_options;

/// Save statement for one field. Optional fields holding `None` write nothing.
pub fn save_field(field: &FieldMetadata, shape: &TypeShape, ctx: &mut GenerationContext) -> TokenStream {
    let ident = &field.ident;
    let name = &field.name;
    // Inside an optional guard the field is reached through `value`.
    let access = if field.optional {
        quote! { value }
    } else {
        quote! { &self.#ident }
    };

    let statement = match shape {
        TypeShape::Unsupported => return quote! {},
        TypeShape::DirectAssignable => {
            quote! { node.push_value(#name, ::core::clone::Clone::clone(#access)); }
        }
        TypeShape::SelfSerializingNode(reach) => {
            let persist_node = ctx.persist_node_trait();
            let value_ty = &field.value_ty;
            match reach {
                Reach::Direct => quote! { (#access).save_node(node.push_child(#name)); },
                Reach::Qualified => quote! {
                    <#value_ty as #persist_node>::save_node(#access, node.push_child(#name));
                },
            }
        }
        TypeShape::RawNode => {
            quote! { node.insert_child(::core::clone::Clone::clone(#access).renamed(#name)); }
        }
        written => {
            let options = write_options(field, ctx);
            let codec = ctx.runtime(RuntimeItem::Codec);
            let write = write_call(written, &field.value_ty, &codec, &access, &options);
            quote! { node.push_value(#name, #write); }
        }
    };

    if field.optional {
        quote! {
            if let ::core::option::Option::Some(value) = &self.#ident {
                #statement
            }
        }
    } else {
        statement
    }
}

fn write_call(
    shape: &TypeShape,
    value_ty: &syn::Type,
    codec: &TokenStream,
    access: &TokenStream,
    options: &TokenStream,
) -> TokenStream {
    let element = |ty: &syn::Type| quote! { #codec::write::<#ty> };
    match shape {
        TypeShape::ArrayOf(elem) | TypeShape::RecognizedCollection(_, elem) => {
            let elem = element(elem);
            quote! { #codec::write_seq(#access, #elem, #options) }
        }
        TypeShape::RecognizedDictionary(_, key, value) => {
            let (key, value) = (element(key), element(value));
            quote! { #codec::write_map(#access, #key, #value, #options) }
        }
        TypeShape::GenericCollection(elem) => {
            let write = element(elem);
            quote! { #codec::write_collection::<#value_ty, #elem>(#access, #write, #options) }
        }
        TypeShape::GenericDictionary(key, value) => {
            let (write_key, write_value) = (element(key), element(value));
            quote! {
                #codec::write_dictionary::<#value_ty, #key, #value>(#access, #write_key, #write_value, #options)
            }
        }
        _ => quote! { #codec::write(#access, #options) },
    }
}
