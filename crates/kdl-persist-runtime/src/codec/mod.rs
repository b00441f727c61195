//! String ⇄ value conversion used by generated load/save methods.
//!
//! Scalars go through [`ParseValue`]/[`WriteValue`]. Collection shapes split
//! their text on the collection separator and hand each item to an element
//! parser; dictionaries additionally split each item on the key/value
//! separator.

mod enums;
mod math;
mod options;
mod scalar;

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::Hash;

pub use enums::{PersistEnum, parse_enum, write_enum};
pub use math::{Color, Matrix3x2, Matrix4x4, Vec2, Vec3, Vec4};
pub use options::{
    DEFAULT_COLLECTION_SEPARATOR, DEFAULT_KEY_VALUE_SEPARATOR, DEFAULT_VALUE_SEPARATOR, EnumMode,
    ParseOptions, SplitBehavior, WriteOptions,
};

/// A value parseable from a single text token.
pub trait ParseValue: Sized {
    fn parse_value(text: &str, options: &ParseOptions) -> Option<Self>;
}

/// A value writable as a single text token.
pub trait WriteValue {
    fn write_value(&self, options: &WriteOptions) -> String;
}

pub fn try_parse<T: ParseValue>(text: &str, options: &ParseOptions) -> Option<T> {
    T::parse_value(text, options)
}

pub fn write<T: WriteValue + ?Sized>(value: &T, options: &WriteOptions) -> String {
    value.write_value(options)
}

fn parse_items<C, T>(
    text: &str,
    element: impl Fn(&str, &ParseOptions) -> Option<T>,
    options: &ParseOptions,
) -> Option<C>
where
    C: FromIterator<T>,
{
    options
        .split
        .split(text, options.collection_separator())
        .map(|item| element(item, options))
        .collect()
}

fn parse_entries<C, K, V>(
    text: &str,
    key: impl Fn(&str, &ParseOptions) -> Option<K>,
    value: impl Fn(&str, &ParseOptions) -> Option<V>,
    options: &ParseOptions,
) -> Option<C>
where
    C: FromIterator<(K, V)>,
{
    let trim = options.split.trims();
    options
        .split
        .split(text, options.collection_separator())
        .map(|item| {
            let (raw_key, raw_value) = item.split_once(options.key_value_separator())?;
            let (raw_key, raw_value) = if trim {
                (raw_key.trim(), raw_value.trim())
            } else {
                (raw_key, raw_value)
            };
            Some((key(raw_key, options)?, value(raw_value, options)?))
        })
        .collect()
}

pub fn try_parse_vec<T>(
    text: &str,
    element: impl Fn(&str, &ParseOptions) -> Option<T>,
    options: &ParseOptions,
) -> Option<Vec<T>> {
    parse_items(text, element, options)
}

pub fn try_parse_vec_deque<T>(
    text: &str,
    element: impl Fn(&str, &ParseOptions) -> Option<T>,
    options: &ParseOptions,
) -> Option<VecDeque<T>> {
    parse_items(text, element, options)
}

pub fn try_parse_hash_set<T: Eq + Hash>(
    text: &str,
    element: impl Fn(&str, &ParseOptions) -> Option<T>,
    options: &ParseOptions,
) -> Option<HashSet<T>> {
    parse_items(text, element, options)
}

pub fn try_parse_btree_set<T: Ord>(
    text: &str,
    element: impl Fn(&str, &ParseOptions) -> Option<T>,
    options: &ParseOptions,
) -> Option<BTreeSet<T>> {
    parse_items(text, element, options)
}

/// Parse exactly `N` elements.
pub fn try_parse_array<T, const N: usize>(
    text: &str,
    element: impl Fn(&str, &ParseOptions) -> Option<T>,
    options: &ParseOptions,
) -> Option<[T; N]> {
    let items: Vec<T> = parse_items(text, element, options)?;
    items.try_into().ok()
}

pub fn try_parse_hash_map<K: Eq + Hash, V>(
    text: &str,
    key: impl Fn(&str, &ParseOptions) -> Option<K>,
    value: impl Fn(&str, &ParseOptions) -> Option<V>,
    options: &ParseOptions,
) -> Option<HashMap<K, V>> {
    parse_entries(text, key, value, options)
}

pub fn try_parse_btree_map<K: Ord, V>(
    text: &str,
    key: impl Fn(&str, &ParseOptions) -> Option<K>,
    value: impl Fn(&str, &ParseOptions) -> Option<V>,
    options: &ParseOptions,
) -> Option<BTreeMap<K, V>> {
    parse_entries(text, key, value, options)
}

/// Parse into any collection buildable from its elements.
pub fn try_parse_collection<C, T>(
    text: &str,
    element: impl Fn(&str, &ParseOptions) -> Option<T>,
    options: &ParseOptions,
) -> Option<C>
where
    C: FromIterator<T>,
{
    parse_items(text, element, options)
}

/// Parse into any dictionary buildable from key/value pairs.
pub fn try_parse_dictionary<D, K, V>(
    text: &str,
    key: impl Fn(&str, &ParseOptions) -> Option<K>,
    value: impl Fn(&str, &ParseOptions) -> Option<V>,
    options: &ParseOptions,
) -> Option<D>
where
    D: FromIterator<(K, V)>,
{
    parse_entries(text, key, value, options)
}

pub fn write_seq<'a, T: 'a>(
    items: impl IntoIterator<Item = &'a T>,
    element: impl Fn(&T, &WriteOptions) -> String,
    options: &WriteOptions,
) -> String {
    join_items(items.into_iter().map(|item| element(item, options)), options)
}

pub fn write_map<'a, K: 'a, V: 'a>(
    entries: impl IntoIterator<Item = (&'a K, &'a V)>,
    key: impl Fn(&K, &WriteOptions) -> String,
    value: impl Fn(&V, &WriteOptions) -> String,
    options: &WriteOptions,
) -> String {
    join_items(
        entries
            .into_iter()
            .map(|(k, v)| join_entry(key(k, options), value(v, options), options)),
        options,
    )
}

/// Write any collection whose shared reference iterates its elements.
pub fn write_collection<C, T>(
    collection: &C,
    element: impl Fn(&T, &WriteOptions) -> String,
    options: &WriteOptions,
) -> String
where
    for<'a> &'a C: IntoIterator<Item = &'a T>,
{
    join_items(
        collection.into_iter().map(|item| element(item, options)),
        options,
    )
}

/// Write any dictionary whose shared reference iterates `(&K, &V)` pairs.
pub fn write_dictionary<D, K, V>(
    dictionary: &D,
    key: impl Fn(&K, &WriteOptions) -> String,
    value: impl Fn(&V, &WriteOptions) -> String,
    options: &WriteOptions,
) -> String
where
    for<'a> &'a D: IntoIterator<Item = (&'a K, &'a V)>,
{
    join_items(
        dictionary
            .into_iter()
            .map(|(k, v)| join_entry(key(k, options), value(v, options), options)),
        options,
    )
}

fn join_entry(key: String, value: String, options: &WriteOptions) -> String {
    let mut entry = key;
    entry.push(options.key_value_separator());
    entry.push_str(&value);
    entry
}

fn join_items(items: impl Iterator<Item = String>, options: &WriteOptions) -> String {
    let separator = options.collection_separator();
    let mut out = String::new();
    for (index, item) in items.enumerate() {
        if index > 0 {
            out.push(separator);
        }
        out.push_str(&item);
    }
    out
}
