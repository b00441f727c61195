use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{Data, DataEnum, DeriveInput, Fields, Ident, LitStr, Path};

use crate::attrs::{parse_rename_strategy, RenameStrategy, ATTRIBUTE, DEFAULT_CRATE};
use crate::namespaces::path_tokens;

#[derive(Debug)]
struct EnumAttrs {
    rename_all: RenameStrategy,
    krate: Path,
}

fn parse_enum_attrs(attrs: &[syn::Attribute]) -> syn::Result<EnumAttrs> {
    let mut rename_all = RenameStrategy::None;
    let mut krate = None;
    for attr in attrs {
        if !attr.path().is_ident(ATTRIBUTE) {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") {
                let lit: LitStr = meta.value()?.parse()?;
                rename_all = parse_rename_strategy(&lit.value()).ok_or_else(|| {
                    syn::Error::new(lit.span(), format!("unknown rename_all value: '{}'", lit.value()))
                })?;
            } else if meta.path.is_ident("crate") {
                let lit: LitStr = meta.value()?.parse()?;
                krate = Some(lit.parse_with(Path::parse_mod_style)?);
            } else {
                return Err(meta.error("unknown enum attribute for PersistEnum"));
            }
            Ok(())
        })?;
    }
    Ok(EnumAttrs {
        rename_all,
        krate: krate.unwrap_or_else(|| Ident::new(DEFAULT_CRATE, Span::call_site()).into()),
    })
}

fn parse_variant_name(attrs: &[syn::Attribute]) -> syn::Result<Option<String>> {
    let mut name = None;
    for attr in attrs {
        if !attr.path().is_ident(ATTRIBUTE) {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let lit: LitStr = meta.value()?.parse()?;
                if lit.value().is_empty() {
                    return Err(syn::Error::new(lit.span(), "variant name must not be empty"));
                }
                name = Some(lit.value());
            } else {
                return Err(meta.error("unknown variant attribute for PersistEnum"));
            }
            Ok(())
        })?;
    }
    Ok(name)
}

pub fn generate_persist_enum_impl(input: &DeriveInput) -> syn::Result<TokenStream> {
    match &input.data {
        Data::Enum(data) => generate_enum_impl(input, data),
        _ => Err(syn::Error::new_spanned(&input.ident, "PersistEnum can only be derived for enums")),
    }
}

fn generate_enum_impl(input: &DeriveInput, data: &DataEnum) -> syn::Result<TokenStream> {
    let enum_name = &input.ident;
    let attrs = parse_enum_attrs(&input.attrs)?;

    let mut variants = Vec::with_capacity(data.variants.len());
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(variant, "PersistEnum can only be derived for unit enums"));
        }
        let name = match parse_variant_name(&variant.attrs)? {
            Some(name) => name,
            None => attrs.rename_all.apply(&variant.ident.to_string()),
        };
        if variants.iter().any(|(_, existing): &(&Ident, String)| *existing == name) {
            return Err(syn::Error::new_spanned(
                &variant.ident,
                format!("variant name `{name}` is used more than once"),
            ));
        }
        variants.push((&variant.ident, name));
    }

    let krate: Vec<String> = attrs.krate.segments.iter().map(|s| s.ident.to_string()).collect();
    let codec = path_tokens(&[krate, vec!["codec".to_string()]].concat());
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let table = variants
        .iter()
        .map(|(ident, name)| quote! { (#name, #enum_name::#ident as i64) });
    let from_index = variants.iter().enumerate().map(|(index, (ident, _))| {
        quote! { #index => ::core::option::Option::Some(Self::#ident), }
    });
    let to_index = variants.iter().enumerate().map(|(index, (ident, _))| {
        quote! { Self::#ident => #index, }
    });
    // An empty enum has no values to match on.
    let variant_index = if variants.is_empty() {
        quote! { match *self {} }
    } else {
        quote! { match self { #(#to_index)* } }
    };

    Ok(quote! {
        const _: () = {
            impl #impl_generics #codec::PersistEnum for #enum_name #ty_generics #where_clause {
                const VARIANTS: &'static [(&'static str, i64)] = &[#(#table),*];

                fn from_variant_index(index: usize) -> ::core::option::Option<Self> {
                    match index {
                        #(#from_index)*
                        _ => ::core::option::Option::None,
                    }
                }

                fn variant_index(&self) -> usize {
                    #variant_index
                }
            }

            impl #impl_generics #codec::ParseValue for #enum_name #ty_generics #where_clause {
                fn parse_value(text: &str, options: &#codec::ParseOptions) -> ::core::option::Option<Self> {
                    #codec::parse_enum(text, options)
                }
            }

            impl #impl_generics #codec::WriteValue for #enum_name #ty_generics #where_clause {
                fn write_value(&self, options: &#codec::WriteOptions) -> ::std::string::String {
                    #codec::write_enum(self, options)
                }
            }
        };
    })
}
