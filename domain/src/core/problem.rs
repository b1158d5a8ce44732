//! Problem value object

use serde::{Deserialize, Serialize};

/// A free-text problem description to be coordinated (Value Object)
///
/// Represents the raw input that will be classified into domains and
/// routed to one or more specialists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    content: String,
}

impl Problem {
    /// Create a new problem
    ///
    /// # Panics
    /// Panics if the content is empty or only whitespace
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        assert!(!content.trim().is_empty(), "Problem cannot be empty");
        Self { content }
    }

    /// Try to create a new problem, returning None if invalid
    pub fn try_new(content: impl Into<String>) -> Option<Self> {
        let content = content.into();
        if content.trim().is_empty() {
            None
        } else {
            Some(Self { content })
        }
    }

    /// Get the problem content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Problem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl From<&str> for Problem {
    fn from(s: &str) -> Self {
        Problem::new(s)
    }
}

impl From<String> for Problem {
    fn from(s: String) -> Self {
        Problem::new(s)
    }
}
