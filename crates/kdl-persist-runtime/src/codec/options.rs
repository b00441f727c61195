pub const DEFAULT_VALUE_SEPARATOR: char = ',';
pub const DEFAULT_COLLECTION_SEPARATOR: char = ';';
pub const DEFAULT_KEY_VALUE_SEPARATOR: char = ':';

/// How enumeration values are matched and written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumMode {
    /// Variant name, case-sensitive.
    #[default]
    Name,
    /// Variant name, ASCII case-insensitive on parse.
    NameIgnoreCase,
    /// Numeric discriminant.
    Value,
}

/// How split collection text is cleaned up before element parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitBehavior {
    None,
    Trim,
    RemoveEmpty,
    #[default]
    TrimAndRemoveEmpty,
}

impl SplitBehavior {
    pub fn trims(self) -> bool {
        matches!(self, SplitBehavior::Trim | SplitBehavior::TrimAndRemoveEmpty)
    }

    pub fn removes_empty(self) -> bool {
        matches!(self, SplitBehavior::RemoveEmpty | SplitBehavior::TrimAndRemoveEmpty)
    }

    /// Split `text` on `separator` applying this behavior.
    pub fn split<'a>(self, text: &'a str, separator: char) -> impl Iterator<Item = &'a str> + 'a {
        text.split(separator)
            .map(move |part| if self.trims() { part.trim() } else { part })
            .filter(move |part| !(self.removes_empty() && part.is_empty()))
    }
}

/// Options consulted while parsing text. `None` separators fall back to the
/// codec defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    pub enum_mode: EnumMode,
    pub split: SplitBehavior,
    pub value_separator: Option<char>,
    pub collection_separator: Option<char>,
    pub key_value_separator: Option<char>,
}

impl ParseOptions {
    pub const DEFAULT: ParseOptions = ParseOptions {
        enum_mode: EnumMode::Name,
        split: SplitBehavior::TrimAndRemoveEmpty,
        value_separator: None,
        collection_separator: None,
        key_value_separator: None,
    };

    pub fn value_separator(&self) -> char {
        self.value_separator.unwrap_or(DEFAULT_VALUE_SEPARATOR)
    }

    pub fn collection_separator(&self) -> char {
        self.collection_separator.unwrap_or(DEFAULT_COLLECTION_SEPARATOR)
    }

    pub fn key_value_separator(&self) -> char {
        self.key_value_separator.unwrap_or(DEFAULT_KEY_VALUE_SEPARATOR)
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Options consulted while writing values to text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    pub enum_mode: EnumMode,
    pub value_separator: Option<char>,
    pub collection_separator: Option<char>,
    pub key_value_separator: Option<char>,
}

impl WriteOptions {
    pub const DEFAULT: WriteOptions = WriteOptions {
        enum_mode: EnumMode::Name,
        value_separator: None,
        collection_separator: None,
        key_value_separator: None,
    };

    pub fn value_separator(&self) -> char {
        self.value_separator.unwrap_or(DEFAULT_VALUE_SEPARATOR)
    }

    pub fn collection_separator(&self) -> char {
        self.collection_separator.unwrap_or(DEFAULT_COLLECTION_SEPARATOR)
    }

    pub fn key_value_separator(&self) -> char {
        self.key_value_separator.unwrap_or(DEFAULT_KEY_VALUE_SEPARATOR)
    }
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::SplitBehavior;

    #[test]
    fn split_behaviors() {
        let text = " a ;; b";
        let collect = |b: SplitBehavior| b.split(text, ';').collect::<Vec<_>>();

        assert_eq!(collect(SplitBehavior::None), vec![" a ", "", " b"]);
        assert_eq!(collect(SplitBehavior::Trim), vec!["a", "", "b"]);
        assert_eq!(collect(SplitBehavior::RemoveEmpty), vec![" a ", " b"]);
        assert_eq!(collect(SplitBehavior::TrimAndRemoveEmpty), vec!["a", "b"]);
    }
}
