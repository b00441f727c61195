/// A single entry of a [`Node`]: either a named text value or a nested fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Value { name: String, text: String },
    Child(Node),
}

impl Entry {
    pub fn name(&self) -> &str {
        match self {
            Entry::Value { name, .. } => name,
            Entry::Child(node) => &node.name,
        }
    }
}

/// A document fragment.
///
/// Entries keep insertion order and names may repeat: repeated values carry
/// collection elements, repeated children are tolerated and the first one wins
/// for single-fragment lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    pub name: String,
    entries: Vec<Entry>,
}

impl Node {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Return this fragment under another name.
    pub fn renamed(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_value(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.push_value(name, text);
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.insert_child(child);
        self
    }

    pub fn push_value(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.entries.push(Entry::Value {
            name: name.into(),
            text: text.into(),
        });
    }

    /// Append an empty child fragment and return it for filling.
    pub fn push_child(&mut self, name: impl Into<String>) -> &mut Node {
        self.insert_child(Node::named(name))
    }

    pub fn insert_child(&mut self, child: Node) -> &mut Node {
        self.entries.push(Entry::Child(child));
        match self.entries.last_mut() {
            Some(Entry::Child(node)) => node,
            _ => unreachable!("a child entry was just pushed"),
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First value stored under `name`.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.entries.iter().find_map(|entry| match entry {
            Entry::Value { name: key, text } if key == name => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries.iter().filter_map(move |entry| match entry {
            Entry::Value { name: key, text } if key == name => Some(text.as_str()),
            _ => None,
        })
    }

    /// All values stored under `name` joined by `separator`, or `None` when
    /// the name does not occur.
    pub fn joined_values(&self, name: &str, separator: char) -> Option<String> {
        let mut values = self.values(name);
        let first = values.next()?;
        let mut joined = first.to_string();
        for value in values {
            joined.push(separator);
            joined.push_str(value);
        }
        Some(joined)
    }

    /// First child fragment named `name`.
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children().find(|child| child.name == name)
    }

    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.entries.iter().filter_map(|entry| match entry {
            Entry::Child(node) => Some(node),
            Entry::Value { .. } => None,
        })
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.children().filter(move |child| child.name == name)
    }
}
