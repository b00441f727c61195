use proc_macro2::TokenStream;
use quote::quote;

use crate::attrs::{EnumMode, FieldMetadata, SplitBehavior};
use crate::context::{GenerationContext, RuntimeItem};

/// Expression for the `&ParseOptions` used when loading `field`.
///
/// Default options share the `ParseOptions::DEFAULT` constant. Otherwise only
/// the overridden fields are written, always in the same order, and the rest
/// come from the default.
pub fn parse_options(field: &FieldMetadata, ctx: &mut GenerationContext) -> TokenStream {
    let options = ctx.runtime(RuntimeItem::ParseOptions);
    if field.has_default_options() {
        return quote! { &#options::DEFAULT };
    }

    let mut overrides = Vec::new();
    if field.enum_mode != EnumMode::default() {
        let mode = ctx.runtime(RuntimeItem::EnumMode);
        let variant = field.enum_mode.variant();
        overrides.push(quote! { enum_mode: #mode::#variant });
    }
    if field.split != SplitBehavior::default() {
        let split = ctx.runtime(RuntimeItem::SplitBehavior);
        let variant = field.split.variant();
        overrides.push(quote! { split: #split::#variant });
    }
    overrides.extend(separator_overrides(field));

    quote! { &#options { #(#overrides,)* ..#options::DEFAULT } }
}

/// Expression for the `&WriteOptions` used when saving `field`. Split
/// behavior only affects parsing and is never written here.
pub fn write_options(field: &FieldMetadata, ctx: &mut GenerationContext) -> TokenStream {
    let options = ctx.runtime(RuntimeItem::WriteOptions);
    let mut overrides = Vec::new();
    if field.enum_mode != EnumMode::default() {
        let mode = ctx.runtime(RuntimeItem::EnumMode);
        let variant = field.enum_mode.variant();
        overrides.push(quote! { enum_mode: #mode::#variant });
    }
    overrides.extend(separator_overrides(field));

    if overrides.is_empty() {
        quote! { &#options::DEFAULT }
    } else {
        quote! { &#options { #(#overrides,)* ..#options::DEFAULT } }
    }
}

fn separator_overrides(field: &FieldMetadata) -> Vec<TokenStream> {
    let mut overrides = Vec::new();
    if let Some(sep) = field.value_separator {
        overrides.push(quote! { value_separator: ::core::option::Option::Some(#sep) });
    }
    if let Some(sep) = field.collection_separator {
        overrides.push(quote! { collection_separator: ::core::option::Option::Some(#sep) });
    }
    if let Some(sep) = field.key_value_separator {
        overrides.push(quote! { key_value_separator: ::core::option::Option::Some(#sep) });
    }
    overrides
}
