//! Error types for the filter controller

/// A filter field name outside the seven known fields
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown filter field: '{name}'")]
pub struct InvalidFieldError {
    /// The rejected name
    pub name: String,
}

impl InvalidFieldError {
    /// Create error for a rejected name
    #[inline]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
