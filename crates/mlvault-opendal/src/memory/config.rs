//! In-memory backend configuration.

use serde::{Deserialize, Serialize};

/// In-memory storage configuration.
///
/// Objects live in process memory and vanish on drop; intended for smoke
/// tests and local development, not production use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Logical bucket name reported for stored locations.
    pub name: String,
}

impl MemoryConfig {
    /// Creates a new in-memory configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
