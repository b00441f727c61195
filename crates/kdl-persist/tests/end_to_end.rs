use std::collections::BTreeMap;

use kdl_persist::{
    load_file, load_into, load_str, parse_document, save_file, to_kdl_string, LoadError, Node, Persist,
    PersistEnum, PersistError, PersistNode, Vec2,
};
use proptest::prelude::*;

#[derive(Debug, Default, Clone, PartialEq, Persist)]
struct Basic {
    #[persist(required)]
    int_value: i32,
    label: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Persist)]
struct Window {
    #[persist(required)]
    width: u32,
    #[persist(required)]
    height: u32,
    title: String,
}

#[derive(Debug, Default, Clone, PartialEq, Persist)]
struct Audio {
    #[persist(required)]
    volume: f32,
    muted: bool,
}

#[derive(Debug, Default, Clone, PartialEq, Persist)]
#[persist(nodes(Audio))]
struct Settings {
    name: String,
    audio: Option<Audio>,
    ports: Vec<u16>,
}

fn missing(err: PersistError) -> (String, Vec<String>) {
    match err {
        PersistError::Load(LoadError::MissingRequired { type_name, fields }) => (type_name, fields),
        other => panic!("expected a missing-required error, got {other:?}"),
    }
}

#[test]
fn loads_the_basic_example() {
    let basic: Basic = load_str("int_value \"5\"\nlabel \"x\"").unwrap();
    assert_eq!(
        basic,
        Basic {
            int_value: 5,
            label: Some("x".into())
        }
    );
}

#[test]
fn missing_required_leaf_keeps_its_default() {
    let mut basic = Basic::default();
    let err = load_into(&mut basic, "label \"hi\"").unwrap_err();
    assert_eq!(missing(err), ("Basic".to_string(), vec!["int_value".into()]));
    assert_eq!(basic.int_value, 0);
    assert_eq!(basic.label.as_deref(), Some("hi"));
}

#[derive(Debug, Default, PartialEq, Persist)]
struct Five {
    a: u8,
    b: i16,
    c: f32,
    d: bool,
    e: String,
}

#[test]
fn one_malformed_value_does_not_block_the_rest() {
    let five: Five = load_str("a \"1\"\nb \"-2\"\nc \"not a float\"\nd \"TRUE\"\ne \"five\"").unwrap();
    assert_eq!(
        five,
        Five {
            a: 1,
            b: -2,
            c: 0.0,
            d: true,
            e: "five".into(),
        }
    );
}

#[test]
fn every_missing_required_field_is_reported() {
    let mut window = Window::default();
    let err = load_into(&mut window, "title \"main\"").unwrap_err();
    assert_eq!(missing(err), ("Window".to_string(), vec!["width".into(), "height".into()]));
    assert_eq!(window.title, "main");
}

#[test]
fn malformed_values_leave_fields_untouched() {
    let mut window = Window {
        width: 7,
        ..Window::default()
    };
    let err = load_into(&mut window, "width \"wide\"\nheight \"3\"").unwrap_err();
    assert_eq!(missing(err).1, vec!["width".to_string()]);
    assert_eq!(window.width, 7);
    assert_eq!(window.height, 3);
}

#[test]
fn absent_entries_keep_current_values() {
    let mut basic = Basic {
        int_value: 1,
        label: Some("kept".into()),
    };
    basic.load(&parse_document("int_value \"2\"").unwrap()).unwrap();
    assert_eq!(basic.int_value, 2);
    assert_eq!(basic.label.as_deref(), Some("kept"));
}

#[test]
fn absent_optional_node_stays_none_and_is_not_saved() {
    let settings: Settings = load_str("name \"desk\"\nports \"80\"\nports \"443\"").unwrap();
    assert_eq!(settings.audio, None);
    assert_eq!(settings.ports, vec![80, 443]);

    let text = to_kdl_string(&settings);
    assert_eq!(text, "name \"desk\"\nports \"80;443\"\n");
}

#[test]
fn nested_nodes_round_trip() {
    let settings = Settings {
        name: "desk".into(),
        audio: Some(Audio {
            volume: 0.5,
            muted: true,
        }),
        ports: vec![22],
    };
    let text = to_kdl_string(&settings);
    assert_eq!(
        text,
        "name \"desk\"\naudio {\n    volume \"0.5\"\n    muted \"true\"\n}\nports \"22\"\n"
    );
    assert_eq!(load_str::<Settings>(&text).unwrap(), settings);
}

#[test]
fn nested_missing_fields_use_dotted_paths() {
    let mut settings = Settings::default();
    let err = load_into(&mut settings, "audio {\n    muted #true\n}").unwrap_err();
    assert_eq!(missing(err), ("Settings".to_string(), vec!["audio.volume".into()]));
    assert_eq!(
        settings.audio,
        Some(Audio {
            volume: 0.0,
            muted: true
        })
    );
}

#[derive(Debug, Default, Clone, PartialEq, Persist)]
struct WithRaw {
    extra: Option<Node>,
}

#[test]
fn raw_nodes_are_kept_verbatim() {
    let raw: WithRaw = load_str("extra {\n    a \"1\"\n    b \"2\"\n}").unwrap();
    let extra = raw.extra.clone().unwrap();
    assert_eq!(extra.name, "extra");
    assert_eq!(extra.value("b"), Some("2"));

    let text = to_kdl_string(&raw);
    assert_eq!(text, "extra {\n    a \"1\"\n    b \"2\"\n}\n");
    assert_eq!(to_kdl_string(&WithRaw::default()), "");
}

#[derive(Debug, Default, Clone, PartialEq)]
struct Ring<T>(Vec<T>);

impl<T> FromIterator<T> for Ring<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Ring(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a Ring<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
struct Table<K, V>(Vec<(K, V)>);

impl<K, V> FromIterator<(K, V)> for Table<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Table(iter.into_iter().collect())
    }
}

fn split_pair<K, V>(pair: &(K, V)) -> (&K, &V) {
    (&pair.0, &pair.1)
}

impl<'a, K, V> IntoIterator for &'a Table<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = std::iter::Map<std::slice::Iter<'a, (K, V)>, fn(&'a (K, V)) -> (&'a K, &'a V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().map(split_pair as fn(&'a (K, V)) -> (&'a K, &'a V))
    }
}

#[derive(Debug, Default, Clone, PartialEq, Persist)]
#[persist(collections(Ring), dictionaries(Table))]
struct Custom {
    ring: Ring<u16>,
    #[persist(key_value_separator = '=', collection_separator = ',')]
    table: Table<String, i64>,
}

#[test]
fn declared_generic_containers() {
    let custom: Custom = load_str("ring \"3; 1; 2\"\ntable \"b=2,a=-1\"").unwrap();
    assert_eq!(custom.ring, Ring(vec![3, 1, 2]));
    assert_eq!(custom.table, Table(vec![("b".into(), 2), ("a".into(), -1)]));

    let text = to_kdl_string(&custom);
    assert_eq!(text, "ring \"3;1;2\"\ntable \"b=2,a=-1\"\n");
}

#[derive(Debug, Default, PartialEq)]
struct Secret {
    token: String,
    inherent_calls: usize,
}

// Shares its names with the trait methods, so only fully qualified calls reach the trait.
impl Secret {
    #[allow(dead_code)]
    fn load_node(&mut self) {
        self.inherent_calls += 1;
    }
}

impl PersistNode for Secret {
    fn load_node(&mut self, node: &Node) -> Result<(), LoadError> {
        if let Some(token) = node.value("token") {
            self.token = token.chars().rev().collect();
        }
        Ok(())
    }

    fn save_node(&self, node: &mut Node) {
        node.push_value("token", self.token.chars().rev().collect::<String>());
    }
}

#[derive(Debug, Default, PartialEq, Persist)]
#[persist(qualified_nodes(Secret))]
struct Vault {
    secret: Secret,
}

#[test]
fn qualified_nodes_call_the_trait() {
    let vault: Vault = load_str("secret {\n    token \"cba\"\n}").unwrap();
    assert_eq!(vault.secret.token, "abc");
    assert_eq!(vault.secret.inherent_calls, 0);
    assert_eq!(to_kdl_string(&vault), "secret {\n    token \"cba\"\n}\n");
}

#[derive(Debug, Default, Clone, PartialEq, Persist)]
#[persist(load = "read_from", load_vis = "pub", save = "write_into", save_vis = "pub(crate)")]
struct Renamed {
    value: u8,
    #[persist(skip)]
    scratch: Vec<Node>,
}

#[test]
fn custom_method_names() {
    let mut renamed = Renamed::default();
    renamed
        .read_from(&Node::new().with_value("value", "9").with_value("scratch", "x"))
        .unwrap();
    assert_eq!(renamed.value, 9);
    assert!(renamed.scratch.is_empty());

    let mut node = Node::new();
    renamed.write_into(&mut node);
    assert_eq!(node, Node::new().with_value("value", "9"));

    // The trait delegates to the renamed methods.
    let mut through_trait = Renamed::default();
    PersistNode::load_node(&mut through_trait, &node).unwrap();
    assert_eq!(through_trait, renamed);
}

#[derive(Debug, Default, Clone, Copy, PartialEq, PersistEnum)]
#[persist(rename_all = "kebab-case")]
enum Quality {
    #[default]
    Low,
    VeryHigh = 10,
}

#[derive(Debug, Default, Clone, PartialEq, Persist)]
#[persist(leaves(Quality), rename_all = "kebab-case")]
struct Render {
    quality: Quality,
    #[persist(enum_mode = "value")]
    fallback_quality: Quality,
    #[persist(enum_mode = "name-ignore-case")]
    preferred: Option<Quality>,
    #[persist(value_separator = ' ')]
    origin: Vec2,
    #[persist(split = "none", collection_separator = ',')]
    tags: Vec<String>,
}

#[test]
fn enums_separators_and_renaming() {
    let text = "quality \"very-high\"\nfallback-quality \"10\"\npreferred \"VERY-HIGH\"\norigin \"1.5 2\"\ntags \"a, b\"";
    let render: Render = load_str(text).unwrap();
    assert_eq!(
        render,
        Render {
            quality: Quality::VeryHigh,
            fallback_quality: Quality::VeryHigh,
            preferred: Some(Quality::VeryHigh),
            origin: Vec2::new(1.5, 2.0),
            tags: vec!["a".into(), " b".into()],
        }
    );

    assert_eq!(
        to_kdl_string(&render),
        "quality \"very-high\"\nfallback-quality \"10\"\npreferred \"very-high\"\norigin \"1.5 2\"\ntags \"a, b\"\n"
    );
}

#[test]
fn files_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("window.kdl");
    let window = Window {
        width: 800,
        height: 600,
        title: "main".into(),
    };
    save_file(&window, &path).unwrap();
    assert_eq!(load_file::<Window>(&path).unwrap(), window);

    let err = load_file::<Window>(dir.path().join("absent.kdl")).unwrap_err();
    assert!(matches!(err, PersistError::Io(_)));
}

#[test]
fn invalid_documents_are_reported() {
    let err = load_str::<Basic>("int_value {").unwrap_err();
    assert!(matches!(err, PersistError::Document(_)));
}

#[derive(Debug, Default, Clone, PartialEq, Persist)]
struct Everything {
    #[persist(required)]
    id: i64,
    title: String,
    subtitle: Option<String>,
    enabled: bool,
    ratio: f64,
    ids: Vec<u32>,
    weights: BTreeMap<String, i32>,
}

fn everything() -> impl Strategy<Value = Everything> {
    (
        any::<i64>(),
        "[ -~]{0,16}",
        proptest::option::of("[ -~]{1,16}"),
        any::<bool>(),
        -1.0e12f64..1.0e12,
        proptest::collection::vec(any::<u32>(), 0..6),
        proptest::collection::btree_map("[a-z]{1,8}", any::<i32>(), 0..5),
    )
        .prop_map(|(id, title, subtitle, enabled, ratio, ids, weights)| Everything {
            id,
            title,
            subtitle,
            enabled,
            ratio,
            ids,
            weights,
        })
}

proptest! {
    #[test]
    fn saved_structs_load_back(value in everything()) {
        let text = to_kdl_string(&value);
        let loaded: Everything = load_str(&text).unwrap();
        prop_assert_eq!(loaded, value);
    }
}
