//! Field descriptor for struct schemas.

use crate::schema::Schema;

/// One member of a struct schema: `(name, index, schema)`.
///
/// Immutable after construction. Equality and hashing cover all three
/// components. The index is the field's position in the owning struct's
/// declaration order and is unique within that struct.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    name: String,
    index: usize,
    schema: Schema,
}

impl Field {
    /// Create a new field descriptor.
    pub fn new(name: impl Into<String>, index: usize, schema: Schema) -> Self {
        Self {
            name: name.into(),
            index,
            schema,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}
