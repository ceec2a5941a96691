//! Bibliography record data structures

/// A single field of a record (key-value pair), key kept as written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub key: String,
    pub value: String,
}

/// One bibliography entry as loaded from the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub cite_key: String,
    /// Lower-cased entry type, e.g. `article`
    pub entry_type: String,
    pub fields: Vec<Field>,
}

impl Record {
    /// Create a record with no fields
    pub fn new(cite_key: impl Into<String>, entry_type: impl AsRef<str>) -> Self {
        Self {
            cite_key: cite_key.into(),
            entry_type: entry_type.as_ref().to_lowercase(),
            fields: Vec::new(),
        }
    }

    /// Append a field. Earlier fields win on lookup when keys repeat.
    pub fn add_field(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.push(Field {
            key: key.into(),
            value: value.into(),
        });
    }

    /// Builder-style variant of [`Record::add_field`]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_field(key, value);
        self
    }

    /// Get a field value by key (case-insensitive)
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.key.eq_ignore_ascii_case(key))
            .map(|f| f.value.as_str())
    }

    /// Get a field value, treating an absent field as empty
    pub fn get_or_empty(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    /// True when the field is absent or blank
    pub fn is_blank(&self, key: &str) -> bool {
        self.get_or_empty(key).trim().is_empty()
    }
}
