//! Type-directed strategy selection.
//!
//! A proc macro sees only the tokens of a field type, so capabilities that
//! cannot be read off the syntax come from a [`TypeEnv`]: declarations on the
//! container plus a per-field [`CapabilityHint`].

use syn::{Path, Type};

use crate::attrs::{path_idents, path_matches, type_arguments, type_path, CapabilityHint, Reach};

const PRIMITIVES: &[&str] = &[
    "bool", "char", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128",
    "usize", "f32", "f64",
];

/// Value types the codec converts out of the box, with the module paths
/// they may be spelled through.
const STD_LEAVES: &[(&str, &[&[&str]])] = &[
    ("Duration", &[&["std", "time"], &["core", "time"]]),
    ("PathBuf", &[&["std", "path"]]),
    ("IpAddr", &[&["std", "net"], &["core", "net"]]),
    ("Ipv4Addr", &[&["std", "net"], &["core", "net"]]),
    ("Ipv6Addr", &[&["std", "net"], &["core", "net"]]),
    ("SocketAddr", &[&["std", "net"], &["core", "net"]]),
];

const RUNTIME_LEAVES: &[&str] = &["Vec2", "Vec3", "Vec4", "Color", "Matrix3x2", "Matrix4x4"];

const STRING_PATHS: &[&[&str]] = &[&["std", "string"], &["alloc", "string"]];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    Vec,
    VecDeque,
    HashSet,
    BTreeSet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DictionaryKind {
    HashMap,
    BTreeMap,
}

/// How a field's value is moved between the struct and a document node.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeShape {
    /// Text assigned as-is.
    DirectAssignable,
    LeafParseable(Type),
    /// Fixed-size array of the element type.
    ArrayOf(Type),
    RecognizedCollection(CollectionKind, Type),
    RecognizedDictionary(DictionaryKind, Type, Type),
    /// Any `FromIterator` collection of the element type.
    GenericCollection(Type),
    /// Any `FromIterator<(K, V)>` dictionary.
    GenericDictionary(Type, Type),
    SelfSerializingNode(Reach),
    /// A raw document fragment.
    RawNode,
    Unsupported,
}

/// Capability declarations standing in for semantic type information.
#[derive(Debug, Clone, Default)]
pub struct TypeEnv {
    /// Path segments of the runtime crate.
    pub runtime: Vec<String>,
    pub nodes: Vec<Path>,
    pub qualified_nodes: Vec<Path>,
    pub leaves: Vec<Path>,
    pub collections: Vec<Path>,
    pub dictionaries: Vec<Path>,
}

impl TypeEnv {
    fn declares(list: &[Path], ty: &Type) -> bool {
        let Some(path) = type_path(ty) else {
            return false;
        };
        let idents = path_idents(path);
        list.iter().any(|declared| {
            let declared = path_idents(declared);
            if declared.len() == 1 || idents.len() == 1 {
                declared.last() == idents.last()
            } else {
                declared == idents
            }
        })
    }

    fn is_runtime_item(&self, path: &Path, name: &str) -> bool {
        let runtime: Vec<&str> = self.runtime.iter().map(String::as_str).collect();
        let mut codec = runtime.clone();
        codec.push("codec");
        path_matches(path, name, &[runtime.as_slice(), codec.as_slice()])
    }
}

/// Pick the conversion strategy for a field value type.
///
/// `ty` must already have its `Option` layer removed. The checks run in a fixed
/// priority order and the first match wins.
pub fn classify(ty: &Type, hint: Option<CapabilityHint>, env: &TypeEnv) -> TypeShape {
    if crate::attrs::is_option_type(ty) {
        return TypeShape::Unsupported;
    }
    if is_string(ty) {
        return TypeShape::DirectAssignable;
    }
    if is_leaf(ty, env) || hint == Some(CapabilityHint::Leaf) {
        return TypeShape::LeafParseable(ty.clone());
    }
    if let Type::Array(array) = ty {
        return if is_element(&array.elem, env) {
            TypeShape::ArrayOf((*array.elem).clone())
        } else {
            TypeShape::Unsupported
        };
    }

    let args = type_arguments(ty);
    if let Some(kind) = collection_kind(ty) {
        if let [element] = args.as_slice() {
            if is_element(element, env) {
                return TypeShape::RecognizedCollection(kind, (*element).clone());
            }
        }
    }
    if let Some(kind) = dictionary_kind(ty) {
        if let [key, value] = args.as_slice() {
            if is_element(key, env) && is_element(value, env) {
                return TypeShape::RecognizedDictionary(kind, (*key).clone(), (*value).clone());
            }
        }
    }
    if hint == Some(CapabilityHint::Collection) || TypeEnv::declares(&env.collections, ty) {
        if let Some(element) = args.first() {
            if is_element(element, env) {
                return TypeShape::GenericCollection((*element).clone());
            }
        }
    }
    if hint == Some(CapabilityHint::Dictionary) || TypeEnv::declares(&env.dictionaries, ty) {
        if let [key, value, ..] = args.as_slice() {
            if is_element(key, env) && is_element(value, env) {
                return TypeShape::GenericDictionary((*key).clone(), (*value).clone());
            }
        }
    }
    match hint {
        Some(CapabilityHint::Node(reach)) => return TypeShape::SelfSerializingNode(reach),
        _ if TypeEnv::declares(&env.qualified_nodes, ty) => {
            return TypeShape::SelfSerializingNode(Reach::Qualified)
        }
        _ if TypeEnv::declares(&env.nodes, ty) => {
            return TypeShape::SelfSerializingNode(Reach::Direct)
        }
        _ => {}
    }
    if type_path(ty).is_some_and(|path| env.is_runtime_item(path, "Node")) {
        return TypeShape::RawNode;
    }
    TypeShape::Unsupported
}

fn is_string(ty: &Type) -> bool {
    type_path(ty).is_some_and(|path| {
        path.segments.iter().all(|s| s.arguments.is_none()) && path_matches(path, "String", STRING_PATHS)
    })
}

fn is_leaf(ty: &Type, env: &TypeEnv) -> bool {
    let Some(path) = type_path(ty) else {
        return false;
    };
    if let Some(ident) = path.get_ident() {
        if PRIMITIVES.iter().any(|p| ident == p) {
            return true;
        }
    }
    STD_LEAVES
        .iter()
        .any(|(name, canonical)| path_matches(path, name, canonical))
        || RUNTIME_LEAVES.iter().any(|name| env.is_runtime_item(path, name))
        || TypeEnv::declares(&env.leaves, ty)
}

/// Collection elements and dictionary keys/values: text or leaf values.
/// Field hints never apply here.
fn is_element(ty: &Type, env: &TypeEnv) -> bool {
    is_string(ty) || is_leaf(ty, env)
}

fn collection_kind(ty: &Type) -> Option<CollectionKind> {
    let path = type_path(ty)?;
    let kinds: &[(&str, &[&[&str]], CollectionKind)] = &[
        ("Vec", &[&["std", "vec"], &["alloc", "vec"]], CollectionKind::Vec),
        ("VecDeque", &[&["std", "collections"], &["alloc", "collections"]], CollectionKind::VecDeque),
        ("HashSet", &[&["std", "collections"]], CollectionKind::HashSet),
        ("BTreeSet", &[&["std", "collections"], &["alloc", "collections"]], CollectionKind::BTreeSet),
    ];
    kinds
        .iter()
        .find(|(name, canonical, _)| path_matches(path, name, canonical))
        .map(|(_, _, kind)| *kind)
}

fn dictionary_kind(ty: &Type) -> Option<DictionaryKind> {
    let path = type_path(ty)?;
    if path_matches(path, "HashMap", &[&["std", "collections"]]) {
        Some(DictionaryKind::HashMap)
    } else if path_matches(path, "BTreeMap", &[&["std", "collections"], &["alloc", "collections"]]) {
        Some(DictionaryKind::BTreeMap)
    } else {
        None
    }
}
