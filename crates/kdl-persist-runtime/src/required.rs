use crate::error::LoadError;

/// Per-load bookkeeping used by generated load methods.
///
/// Tracks which required fields were populated and collects missing fields
/// reported by nested nodes, so a single [`LoadError`] can name every problem
/// once the whole node has been scanned.
#[derive(Debug)]
pub struct RequiredFields {
    type_name: &'static str,
    required: &'static [&'static str],
    satisfied: Vec<&'static str>,
    nested: Vec<String>,
}

impl RequiredFields {
    pub fn new(type_name: &'static str, required: &'static [&'static str]) -> Self {
        Self {
            type_name,
            required,
            satisfied: Vec::new(),
            nested: Vec::new(),
        }
    }

    pub fn satisfy(&mut self, name: &'static str) {
        if !self.satisfied.contains(&name) {
            self.satisfied.push(name);
        }
    }

    /// Record a value that could not be converted. The field keeps its prior
    /// value and, when required, stays unsatisfied.
    pub fn reject(&self, name: &'static str, text: &str) {
        log::debug!(
            "{}: ignoring malformed value {text:?} for `{name}`",
            self.type_name
        );
    }

    /// Fold the missing fields of a nested node into this tracker as
    /// `name.child` paths.
    pub fn nested(&mut self, name: &'static str, error: LoadError) {
        for field in error.missing_fields() {
            self.nested.push(format!("{name}.{field}"));
        }
    }

    pub fn is_satisfied(&self, name: &str) -> bool {
        self.satisfied.iter().any(|field| *field == name)
    }

    /// Missing fields in declaration order, followed by nested paths in the
    /// order they were reported.
    pub fn missing(&self) -> Vec<String> {
        self.required
            .iter()
            .filter(|name| !self.satisfied.contains(*name))
            .map(|name| name.to_string())
            .chain(self.nested.iter().cloned())
            .collect()
    }

    pub fn finish(self) -> Result<(), LoadError> {
        let fields = self.missing();
        if fields.is_empty() {
            Ok(())
        } else {
            Err(LoadError::MissingRequired {
                type_name: self.type_name.to_string(),
                fields,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RequiredFields;
    use crate::error::LoadError;

    #[test]
    fn reports_all_missing_fields_together() {
        let mut tracker = RequiredFields::new("Settings", &["a", "b", "c"]);
        tracker.satisfy("b");
        tracker.reject("c", "not-a-number");

        let err = tracker.finish().unwrap_err();
        assert_eq!(err.missing_fields(), ["a", "c"]);
        assert_eq!(err.to_string(), "Settings: missing required fields: a, c");
    }

    #[test]
    fn nested_misses_are_prefixed() {
        let mut tracker = RequiredFields::new("Outer", &[]);
        tracker.nested(
            "audio",
            LoadError::MissingRequired {
                type_name: "Audio".into(),
                fields: vec!["volume".into()],
            },
        );

        let err = tracker.finish().unwrap_err();
        assert_eq!(err.missing_fields(), ["audio.volume"]);
    }

    #[test]
    fn satisfied_tracker_finishes_cleanly() {
        let mut tracker = RequiredFields::new("Settings", &["a"]);
        tracker.satisfy("a");
        assert!(tracker.is_satisfied("a"));
        assert!(tracker.finish().is_ok());
    }
}
