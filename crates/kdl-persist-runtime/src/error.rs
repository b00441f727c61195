use thiserror::Error;

/// Failure reported by a generated load method once the whole node was scanned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("{type_name}: missing required fields: {}", fields.join(", "))]
    MissingRequired {
        type_name: String,
        fields: Vec<String>,
    },
}

impl LoadError {
    /// Serialized names of every required field that was not populated.
    pub fn missing_fields(&self) -> &[String] {
        match self {
            LoadError::MissingRequired { fields, .. } => fields,
        }
    }
}

/// The document text is not valid KDL.
#[derive(Debug, Clone, Error)]
#[error("invalid KDL document: {message}")]
pub struct DocumentError {
    pub message: String,
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
