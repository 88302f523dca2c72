//! Field-level ledger updates addressed by dot-separated key paths.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CoreError, CoreResult};

/// A single field assignment, addressed by a dot-separated key path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldUpdate {
    /// Nested key path, e.g. `hits.value` or `conditions.afraid`.
    pub path: String,
    /// The new value for that field.
    pub value: Value,
}

/// An ordered set of field-level updates to a character's ledger.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerPatch {
    updates: Vec<FieldUpdate>,
}

impl LedgerPatch {
    /// Create an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an assignment. Later assignments to the same path win.
    pub fn set(&mut self, path: impl Into<String>, value: impl Into<Value>) {
        self.updates.push(FieldUpdate {
            path: path.into(),
            value: value.into(),
        });
    }

    /// Builder form of [`LedgerPatch::set`].
    pub fn with(mut self, path: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(path, value);
        self
    }

    /// The updates in application order.
    pub fn updates(&self) -> &[FieldUpdate] {
        &self.updates
    }

    /// Number of updates.
    pub fn len(&self) -> usize {
        self.updates.len()
    }

    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }

    /// Apply every update to a raw ledger object.
    ///
    /// Missing intermediate objects are created. An intermediate value that is
    /// not an object (legacy scalar data) is replaced by an object.
    pub fn apply_to(&self, ledger: &mut Map<String, Value>) -> CoreResult<()> {
        // Validate every path first so a bad patch leaves the ledger untouched.
        for update in &self.updates {
            validate_path(&update.path)?;
        }
        for update in &self.updates {
            set_path(ledger, &update.path, update.value.clone())?;
        }
        Ok(())
    }
}

fn validate_path(path: &str) -> CoreResult<()> {
    if path.split('.').any(|segment| segment.trim().is_empty()) {
        return Err(CoreError::InvalidPath(path.to_string()));
    }
    Ok(())
}

fn set_path(root: &mut Map<String, Value>, path: &str, value: Value) -> CoreResult<()> {
    let segments: Vec<&str> = path.split('.').collect();
    let Some((last, parents)) = segments.split_last() else {
        return Err(CoreError::InvalidPath(path.to_string()));
    };

    let mut node = root;
    for segment in parents {
        let entry = node
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        node = entry
            .as_object_mut()
            .ok_or_else(|| CoreError::InvalidPath(path.to_string()))?;
    }
    node.insert(last.to_string(), value);
    Ok(())
}
