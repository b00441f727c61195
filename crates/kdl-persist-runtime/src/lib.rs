//! Runtime support for `#[derive(Persist)]`: the document model, KDL text
//! reading and writing, the value codec and required-field tracking.

pub mod codec;
pub mod error;
pub mod parse;
pub mod render;
pub mod required;
pub mod types;

pub use codec::{
    Color, EnumMode, Matrix3x2, Matrix4x4, ParseOptions, ParseValue, SplitBehavior, Vec2, Vec3,
    Vec4, WriteOptions, WriteValue,
};
pub use error::{DocumentError, LoadError, PersistError};
pub use parse::parse_document;
pub use render::{escape_string, is_valid_identifier, render_document, render_key, render_node};
pub use required::RequiredFields;
pub use types::{Entry, Node};

/// A type that loads itself from, and saves itself into, a document fragment.
///
/// `#[derive(Persist)]` implements this by delegating to the generated
/// inherent load and save methods.
pub trait PersistNode {
    fn load_node(&mut self, node: &Node) -> Result<(), LoadError>;

    fn save_node(&self, node: &mut Node);
}

impl<T: PersistNode + ?Sized> PersistNode for Box<T> {
    fn load_node(&mut self, node: &Node) -> Result<(), LoadError> {
        (**self).load_node(node)
    }

    fn save_node(&self, node: &mut Node) {
        (**self).save_node(node)
    }
}

/// Parse KDL text and load a fresh `T` from its top-level entries.
pub fn load_str<T: PersistNode + Default>(contents: &str) -> Result<T, PersistError> {
    let mut value = T::default();
    load_into(&mut value, contents)?;
    Ok(value)
}

/// Parse KDL text and load it over an existing value.
///
/// Fields absent from the document keep their current values. A missing
/// required field is reported after every other field has been applied.
pub fn load_into<T: PersistNode + ?Sized>(value: &mut T, contents: &str) -> Result<(), PersistError> {
    let root = parse_document(contents)?;
    value.load_node(&root)?;
    Ok(())
}

/// Save `value` and render it as KDL text.
pub fn to_kdl_string<T: PersistNode + ?Sized>(value: &T) -> String {
    let mut root = Node::new();
    value.save_node(&mut root);
    render_document(&root)
}
