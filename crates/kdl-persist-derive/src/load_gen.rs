//! Statements of the generated load method.

use proc_macro2::TokenStream;
use quote::quote;

use crate::attrs::{FieldMetadata, Reach};
use crate::classify::{CollectionKind, DictionaryKind, TypeShape};
use crate::context::{GenerationContext, RuntimeItem, StdItem};
use crate::options_gen::parse_options;

/// Does loading this field mutate the required-field tracker?
pub fn touches_tracker(field: &FieldMetadata, shape: &TypeShape) -> bool {
    field.required || matches!(shape, TypeShape::SelfSerializingNode(_))
}

/// Load statement for one field.
///
/// Absent entries leave the field untouched. Malformed text is handed to
/// `tracker.reject`, which logs it and leaves the field untouched too.
pub fn load_field(field: &FieldMetadata, shape: &TypeShape, ctx: &mut GenerationContext) -> TokenStream {
    let ident = &field.ident;
    let name = &field.name;
    let satisfy = if field.required {
        quote! { tracker.satisfy(#name); }
    } else {
        quote! {}
    };
    let wrap = |value: TokenStream| {
        if field.optional {
            quote! { ::core::option::Option::Some(#value) }
        } else {
            value
        }
    };

    match shape {
        TypeShape::DirectAssignable => {
            let value = wrap(quote! { text.to_owned() });
            quote! {
                if let ::core::option::Option::Some(text) = node.value(#name) {
                    if !text.is_empty() {
                        self.#ident = #value;
                        #satisfy
                    }
                }
            }
        }
        TypeShape::SelfSerializingNode(reach) => {
            let default = ctx.std_item(StdItem::Default);
            let persist_node = ctx.persist_node_trait();
            let value_ty = &field.value_ty;
            let call = match reach {
                Reach::Direct => quote! { value.load_node(child) },
                Reach::Qualified => quote! { <#value_ty as #persist_node>::load_node(&mut value, child) },
            };
            let value = wrap(quote! { value });
            quote! {
                if let ::core::option::Option::Some(child) = node.child(#name) {
                    let mut value = <#value_ty as #default>::default();
                    if let ::core::result::Result::Err(err) = #call {
                        tracker.nested(#name, err);
                    }
                    self.#ident = #value;
                    #satisfy
                }
            }
        }
        TypeShape::RawNode => {
            let value = wrap(quote! { child.clone() });
            quote! {
                if let ::core::option::Option::Some(child) = node.child(#name) {
                    self.#ident = #value;
                    #satisfy
                }
            }
        }
        TypeShape::Unsupported => quote! {},
        parsed => {
            let options = parse_options(field, ctx);
            let codec = ctx.runtime(RuntimeItem::Codec);
            let (read, text) = match parsed {
                TypeShape::LeafParseable(_) => (quote! { node.value(#name) }, quote! { text }),
                _ => (
                    quote! { node.joined_values(#name, options.collection_separator()) },
                    quote! { &text },
                ),
            };
            let parse = parse_call(parsed, &field.value_ty, &codec, &text);
            let value = wrap(quote! { value });
            quote! {
                {
                    let options = #options;
                    if let ::core::option::Option::Some(text) = #read {
                        if let ::core::option::Option::Some(value) = #parse {
                            self.#ident = #value;
                            #satisfy
                        } else {
                            tracker.reject(#name, #text);
                        }
                    }
                }
            }
        }
    }
}

/// The codec call converting `text` for a parsed shape.
fn parse_call(shape: &TypeShape, value_ty: &syn::Type, codec: &TokenStream, text: &TokenStream) -> TokenStream {
    let element = |ty: &syn::Type| quote! { #codec::try_parse::<#ty> };
    match shape {
        TypeShape::ArrayOf(elem) => {
            let elem = element(elem);
            quote! { #codec::try_parse_array(#text, #elem, options) }
        }
        TypeShape::RecognizedCollection(kind, elem) => {
            let func = match kind {
                CollectionKind::Vec => quote! { try_parse_vec },
                CollectionKind::VecDeque => quote! { try_parse_vec_deque },
                CollectionKind::HashSet => quote! { try_parse_hash_set },
                CollectionKind::BTreeSet => quote! { try_parse_btree_set },
            };
            let elem = element(elem);
            quote! { #codec::#func(#text, #elem, options) }
        }
        TypeShape::RecognizedDictionary(kind, key, value) => {
            let func = match kind {
                DictionaryKind::HashMap => quote! { try_parse_hash_map },
                DictionaryKind::BTreeMap => quote! { try_parse_btree_map },
            };
            let (key, value) = (element(key), element(value));
            quote! { #codec::#func(#text, #key, #value, options) }
        }
        TypeShape::GenericCollection(elem) => {
            let parse = element(elem);
            quote! { #codec::try_parse_collection::<#value_ty, #elem>(#text, #parse, options) }
        }
        TypeShape::GenericDictionary(key, value) => {
            let (parse_key, parse_value) = (element(key), element(value));
            quote! {
                #codec::try_parse_dictionary::<#value_ty, #key, #value>(#text, #parse_key, #parse_value, options)
            }
        }
        _ => quote! { #codec::try_parse::<#value_ty>(#text, options) },
    }
}
