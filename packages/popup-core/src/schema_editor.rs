//! Schema editor: an ordered list of uniquely named fields.
//!
//! The editor never exposes the mapping through a getter. Every mutation that
//! changes the field list recomputes the full [`SchemaMapping`] and hands it
//! to the listener supplied at construction.

use std::fmt;

use extract_client::{FieldType, SchemaMapping};
use tracing::debug;
use uuid::Uuid;

/// Stable identity of a field, independent of its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldId(Uuid);

impl FieldId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One schema entry while editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    id: FieldId,
    name: String,
}

impl Field {
    pub fn id(&self) -> FieldId {
        self.id
    }

    /// Trimmed, non-empty name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

type Listener = Box<dyn FnMut(&SchemaMapping) + Send>;

/// Editor for the extraction schema.
///
/// Names are trimmed before they are stored or compared; comparison is
/// case-sensitive. Rejected edits leave the field list untouched and do not
/// notify.
pub struct SchemaEditor {
    fields: Vec<Field>,
    pending_name: String,
    listener: Listener,
}

impl SchemaEditor {
    /// Create an empty editor.
    pub fn new(listener: impl FnMut(&SchemaMapping) + Send + 'static) -> Self {
        Self::initialize(&SchemaMapping::new(), listener)
    }

    /// Seed the editor from an existing mapping, in its iteration order.
    ///
    /// Each entry gets a fresh id. Keys go through the same rules as
    /// [`add_field`](Self::add_field): they are trimmed, and blank or
    /// duplicate names are dropped. Seeding does not notify.
    pub fn initialize(
        existing: &SchemaMapping,
        listener: impl FnMut(&SchemaMapping) + Send + 'static,
    ) -> Self {
        let mut fields: Vec<Field> = Vec::with_capacity(existing.len());
        for raw_name in existing.keys() {
            let name = raw_name.trim();
            if name.is_empty() || fields.iter().any(|f| f.name == name) {
                debug!(field = raw_name.as_str(), "Dropped seeded field");
                continue;
            }
            fields.push(Field {
                id: FieldId::generate(),
                name: name.to_string(),
            });
        }

        Self {
            fields,
            pending_name: String::new(),
            listener: Box::new(listener),
        }
    }

    /// Current fields, in display order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field_named(&self, name: &str) -> Option<&Field> {
        let name = name.trim();
        self.fields.iter().find(|f| f.name == name)
    }

    /// Text typed into the "new field name" input.
    pub fn pending_name(&self) -> &str {
        &self.pending_name
    }

    pub fn set_pending_name(&mut self, text: impl Into<String>) {
        self.pending_name = text.into();
    }

    /// Add a field from the pending input. The input is cleared only when the
    /// field is accepted.
    pub fn add_pending(&mut self) -> Option<FieldId> {
        let raw = self.pending_name.clone();
        self.add_field(&raw)
    }

    /// Append a field named `raw_name` (trimmed).
    ///
    /// Returns `None` without notifying when the trimmed name is empty or
    /// already taken by any field.
    pub fn add_field(&mut self, raw_name: &str) -> Option<FieldId> {
        let name = raw_name.trim();
        if name.is_empty() || self.fields.iter().any(|f| f.name == name) {
            debug!(field = name, "Rejected field add");
            return None;
        }

        let id = FieldId::generate();
        self.fields.push(Field {
            id,
            name: name.to_string(),
        });
        self.pending_name.clear();
        self.notify();
        Some(id)
    }

    /// Rename a field in place.
    ///
    /// Rejected (returns `false`, no notification) when the trimmed name is
    /// empty, another field already uses it, or `id` is unknown. Renaming a
    /// field to its current name is accepted.
    pub fn rename_field(&mut self, id: FieldId, raw_name: &str) -> bool {
        let name = raw_name.trim();
        if name.is_empty() || self.fields.iter().any(|f| f.id != id && f.name == name) {
            debug!(%id, field = name, "Rejected field rename");
            return false;
        }

        let Some(field) = self.fields.iter_mut().find(|f| f.id == id) else {
            return false;
        };
        field.name = name.to_string();
        self.notify();
        true
    }

    /// Remove a field. Unknown ids are ignored silently.
    pub fn remove_field(&mut self, id: FieldId) -> bool {
        let Some(index) = self.fields.iter().position(|f| f.id == id) else {
            return false;
        };
        self.fields.remove(index);
        self.notify();
        true
    }

    fn notify(&mut self) {
        let mapping: SchemaMapping = self
            .fields
            .iter()
            .map(|f| (f.name.clone(), FieldType::String))
            .collect();
        (self.listener)(&mapping);
    }
}

impl fmt::Debug for SchemaEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaEditor")
            .field("fields", &self.fields)
            .field("pending_name", &self.pending_name)
            .finish_non_exhaustive()
    }
}
