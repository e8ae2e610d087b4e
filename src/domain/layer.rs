//! Layer domain model

use super::ids::LayerId;
use serde::{Deserialize, Serialize};

/// A named geometry dataset backed by a storage table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    /// Unique identifier
    pub id: LayerId,

    /// The name of the table referenced by this layer
    pub table_name: String,

    /// The human-readable name for this layer
    pub name: String,

    /// Frontend markup and styling, passed through untouched
    #[serde(default)]
    pub markup: serde_json::Value,
}

impl Layer {
    /// Creates a layer with empty markup
    pub fn new(id: LayerId, table_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            table_name: table_name.into(),
            name: name.into(),
            markup: serde_json::Value::Null,
        }
    }

    /// Name used for the exported layer; identical to the table name
    pub fn slug(&self) -> &str {
        &self.table_name
    }
}
