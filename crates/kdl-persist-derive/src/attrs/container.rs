//! Struct-level attribute definitions.

use proc_macro2::{Ident, Span};
use syn::{DeriveInput, Generics, Path, Visibility};

use super::parse::parse_container_attrs;
use super::types::RenameStrategy;
use crate::classify::TypeEnv;

pub const DEFAULT_LOAD_NAME: &str = "load";
pub const DEFAULT_SAVE_NAME: &str = "save";
pub const DEFAULT_CRATE: &str = "kdl_persist";

/// Raw `#[persist(...)]` values found on a struct.
#[derive(Debug, Default)]
pub struct ContainerAttrs {
    pub load: Option<Ident>,
    pub load_vis: Option<Visibility>,
    pub save: Option<Ident>,
    pub save_vis: Option<Visibility>,
    pub rename_all: RenameStrategy,
    pub krate: Option<Path>,
    pub nodes: Vec<Path>,
    pub qualified_nodes: Vec<Path>,
    pub leaves: Vec<Path>,
    pub collections: Vec<Path>,
    pub dictionaries: Vec<Path>,
}

/// Everything the generator needs to know about the annotated type itself.
#[derive(Debug, Clone)]
pub struct ObjectMetadata {
    pub ident: Ident,
    pub generics: Generics,
    pub load_name: Ident,
    pub load_vis: Visibility,
    pub save_name: Ident,
    pub save_vis: Visibility,
    pub rename_all: RenameStrategy,
    /// Path of the runtime crate in generated code.
    pub krate: Path,
    pub env: TypeEnv,
}

impl ObjectMetadata {
    pub fn from_derive_input(input: &DeriveInput) -> syn::Result<Self> {
        let attrs = parse_container_attrs(&input.attrs)?;

        let load_name = attrs
            .load
            .unwrap_or_else(|| Ident::new(DEFAULT_LOAD_NAME, Span::call_site()));
        let save_name = attrs
            .save
            .unwrap_or_else(|| Ident::new(DEFAULT_SAVE_NAME, Span::call_site()));
        if load_name == save_name {
            return Err(syn::Error::new_spanned(
                &save_name,
                format!("load and save methods must have different names, both are `{load_name}`"),
            ));
        }

        let krate = match attrs.krate {
            Some(path) => path,
            None => Ident::new(DEFAULT_CRATE, Span::call_site()).into(),
        };

        let env = TypeEnv {
            runtime: krate.segments.iter().map(|s| s.ident.to_string()).collect(),
            nodes: attrs.nodes,
            qualified_nodes: attrs.qualified_nodes,
            leaves: attrs.leaves,
            collections: attrs.collections,
            dictionaries: attrs.dictionaries,
        };

        Ok(Self {
            ident: input.ident.clone(),
            generics: input.generics.clone(),
            load_name,
            load_vis: attrs.load_vis.unwrap_or(Visibility::Inherited),
            save_name,
            save_vis: attrs.save_vis.unwrap_or(Visibility::Inherited),
            rename_all: attrs.rename_all,
            krate,
            env,
        })
    }

    pub fn type_name(&self) -> String {
        self.ident.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn defaults_are_private_load_and_save() {
        let input: DeriveInput = parse_quote! {
            struct Settings { volume: f32 }
        };
        let object = ObjectMetadata::from_derive_input(&input).unwrap();
        assert_eq!(object.load_name, "load");
        assert_eq!(object.save_name, "save");
        assert_eq!(object.load_vis, Visibility::Inherited);
        assert_eq!(object.save_vis, Visibility::Inherited);
        assert_eq!(object.env.runtime, ["kdl_persist"]);
    }

    #[test]
    fn custom_names_and_visibility() {
        let input: DeriveInput = parse_quote! {
            #[persist(load = "read_from", load_vis = "pub", save = "write_to", save_vis = "pub(crate)")]
            #[persist(crate = "crate::runtime", leaves(Quality), nodes(Audio))]
            struct Settings { volume: f32 }
        };
        let object = ObjectMetadata::from_derive_input(&input).unwrap();
        assert_eq!(object.load_name, "read_from");
        assert_eq!(object.save_name, "write_to");
        assert!(matches!(object.load_vis, Visibility::Public(_)));
        assert!(matches!(object.save_vis, Visibility::Restricted(_)));
        assert_eq!(object.env.runtime, ["crate", "runtime"]);
        assert_eq!(object.env.leaves.len(), 1);
        assert_eq!(object.env.nodes.len(), 1);
    }

    #[test]
    fn identical_method_names_are_rejected() {
        let input: DeriveInput = parse_quote! {
            #[persist(load = "sync", save = "sync")]
            struct Settings { volume: f32 }
        };
        let err = ObjectMetadata::from_derive_input(&input).unwrap_err();
        assert!(err.to_string().contains("different names"));
    }
}
