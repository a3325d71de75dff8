//! Validation diagnostics

/// A structural problem found in a table.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Field path the error refers to, e.g. `columns[2].name`
    pub field: String,
    /// Error message
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}
