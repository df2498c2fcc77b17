use crate::{errors::ConfigurationError, schema::field::FieldSpec};
use std::collections::HashMap;

/// The filterable fields of one logical record type.
///
/// Field declaration order is preserved; lookups go through a name index.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSchema {
    name: String,
    fields: Vec<FieldSpec>,
    index: HashMap<String, usize>,
}

impl ModelSchema {
    pub fn new(
        name: impl Into<String>,
        fields: impl IntoIterator<Item = FieldSpec>,
    ) -> Result<Self, ConfigurationError> {
        let name = name.into();
        let mut ordered = Vec::new();
        let mut index = HashMap::new();

        for field in fields {
            if field.name().trim().is_empty() {
                return Err(ConfigurationError::EmptyFieldName { model: name });
            }
            if index.contains_key(field.name()) {
                return Err(ConfigurationError::DuplicateField {
                    model: name,
                    field: field.name().to_string(),
                });
            }
            index.insert(field.name().to_string(), ordered.len());
            ordered.push(field);
        }

        Ok(Self {
            name,
            fields: ordered,
            index,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.index.get(name).map(|&i| &self.fields[i])
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(FieldSpec::name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
