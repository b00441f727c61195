//! Field-level attribute definitions.

use proc_macro2::{Ident, Span};
use syn::ext::IdentExt;
use syn::{Field, Type};

use super::parse::parse_field_attrs;
use super::type_utils::extract_option_inner;
use super::types::{CapabilityHint, EnumMode, RenameStrategy, SplitBehavior};

/// Raw `#[persist(...)]` values found on a field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    pub span: Option<Span>,
    pub name: Option<String>,
    pub required: bool,
    pub enum_mode: EnumMode,
    pub split: SplitBehavior,
    pub value_separator: Option<char>,
    pub collection_separator: Option<char>,
    pub key_value_separator: Option<char>,
    pub hint: Option<CapabilityHint>,
    pub skip: bool,
}

/// One persisted member, with its attributes resolved.
#[derive(Debug, Clone)]
pub struct FieldMetadata {
    pub ident: Ident,
    /// Type as declared on the struct.
    pub ty: Type,
    /// Declared type with one `Option` layer removed.
    pub value_ty: Type,
    pub optional: bool,
    /// Name of the entry in the document.
    pub name: String,
    pub required: bool,
    pub enum_mode: EnumMode,
    pub split: SplitBehavior,
    pub value_separator: Option<char>,
    pub collection_separator: Option<char>,
    pub key_value_separator: Option<char>,
    pub hint: Option<CapabilityHint>,
    pub skip: bool,
}

impl FieldMetadata {
    pub fn from_field(field: &Field, rename_all: RenameStrategy) -> syn::Result<Self> {
        let Some(ident) = field.ident.clone() else {
            return Err(syn::Error::new_spanned(field, "Persist requires named fields"));
        };
        let attrs = parse_field_attrs(field)?;

        let name = match attrs.name {
            Some(name) => name,
            None => rename_all.apply(&ident.unraw().to_string()),
        };
        if name.is_empty() {
            let span = attrs.span.unwrap_or_else(|| ident.span());
            return Err(syn::Error::new(
                span,
                format!("serialized name of field `{ident}` must not be empty"),
            ));
        }

        let (value_ty, optional) = match extract_option_inner(&field.ty) {
            Some(inner) => (inner.clone(), true),
            None => (field.ty.clone(), false),
        };

        Ok(Self {
            ident,
            ty: field.ty.clone(),
            value_ty,
            optional,
            name,
            required: attrs.required,
            enum_mode: attrs.enum_mode,
            split: attrs.split,
            value_separator: attrs.value_separator,
            collection_separator: attrs.collection_separator,
            key_value_separator: attrs.key_value_separator,
            hint: attrs.hint,
            skip: attrs.skip,
        })
    }

    /// Are all conversion options at their codec defaults?
    pub fn has_default_options(&self) -> bool {
        self.enum_mode == EnumMode::default()
            && self.split == SplitBehavior::default()
            && self.value_separator.is_none()
            && self.collection_separator.is_none()
            && self.key_value_separator.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs::types::Reach;
    use syn::{parse_quote, FieldsNamed};

    fn fields(input: FieldsNamed) -> Vec<Field> {
        input.named.into_iter().collect()
    }

    #[test]
    fn option_layer_is_removed() {
        let fields = fields(parse_quote!({ volume: Option<f32>, label: String }));
        let volume = FieldMetadata::from_field(&fields[0], RenameStrategy::None).unwrap();
        assert!(volume.optional);
        let f32_ty: Type = parse_quote!(f32);
        assert_eq!(volume.value_ty, f32_ty);

        let label = FieldMetadata::from_field(&fields[1], RenameStrategy::None).unwrap();
        assert!(!label.optional);
        assert!(label.has_default_options());
    }

    #[test]
    fn names_follow_rename_all_unless_overridden() {
        let fields = fields(parse_quote!({
            max_volume: f32,
            #[persist(name = "lbl")]
            label_text: String,
            r#type: u8,
        }));
        let renamed: Vec<_> = fields
            .iter()
            .map(|f| FieldMetadata::from_field(f, RenameStrategy::KebabCase).unwrap().name)
            .collect();
        assert_eq!(renamed, ["max-volume", "lbl", "type"]);
    }

    #[test]
    fn empty_name_is_an_error() {
        let fields = fields(parse_quote!({
            #[persist(name = "")]
            volume: f32,
        }));
        let err = FieldMetadata::from_field(&fields[0], RenameStrategy::None).unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn renaming_to_nothing_is_an_error() {
        let fields = fields(parse_quote!({ __: u8 }));
        let err = FieldMetadata::from_field(&fields[0], RenameStrategy::KebabCase).unwrap_err();
        assert!(err.to_string().contains("field `__`"));
        assert!(FieldMetadata::from_field(&fields[0], RenameStrategy::None).is_ok());
    }

    #[test]
    fn options_and_hints_are_recorded() {
        let fields = fields(parse_quote!({
            #[persist(required, enum_mode = "value", split = "none", collection_separator = ',', node = "qualified")]
            audio: Audio,
        }));
        let audio = FieldMetadata::from_field(&fields[0], RenameStrategy::None).unwrap();
        assert!(audio.required);
        assert_eq!(audio.enum_mode, EnumMode::Value);
        assert_eq!(audio.split, SplitBehavior::None);
        assert_eq!(audio.collection_separator, Some(','));
        assert_eq!(audio.hint, Some(CapabilityHint::Node(Reach::Qualified)));
        assert!(!audio.has_default_options());
    }
}
