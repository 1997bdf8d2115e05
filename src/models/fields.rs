//! Immutable field storage shared by all entity variants.

use serde_json::{Map, Value};

use crate::error::AppError;

/// The JSON object an entity was constructed from.
///
/// Lookups of absent fields fail with [`AppError::MissingField`] so that API
/// schema drift surfaces immediately. Accessors are split by how absence is
/// treated:
///
/// - [`get`](Fields::get) / [`str`](Fields::str): the field must exist and be set
/// - [`nullable_str`](Fields::nullable_str): must exist, `null` reads as `None`
/// - [`optional`](Fields::optional) / [`optional_str`](Fields::optional_str):
///   absent and `null` both read as `None`
#[derive(Debug, Clone, PartialEq)]
pub struct Fields {
    entity: &'static str,
    map: Map<String, Value>,
}

impl Fields {
    /// Wraps a JSON object for the named entity variant.
    pub fn new(entity: &'static str, map: Map<String, Value>) -> Self {
        Self { entity, map }
    }

    /// Name of the entity variant, used in error messages.
    pub fn entity(&self) -> &'static str {
        self.entity
    }

    /// The raw object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.map
    }

    /// Returns true if the field exists, even when `null`.
    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// Gets a field that must be present.
    pub fn get(&self, name: &str) -> Result<&Value, AppError> {
        self.map.get(name).ok_or_else(|| AppError::MissingField {
            entity: self.entity,
            field: name.to_string(),
        })
    }

    /// Gets a field, treating absence and `null` alike.
    pub fn optional(&self, name: &str) -> Option<&Value> {
        self.map.get(name).filter(|v| !v.is_null())
    }

    /// Gets a string field that must be present and non-null.
    pub fn str(&self, name: &str) -> Result<&str, AppError> {
        let value = self.get(name)?;
        value.as_str().ok_or_else(|| self.invalid(name, "a string"))
    }

    /// Gets a string field that must be present but may be `null`.
    pub fn nullable_str(&self, name: &str) -> Result<Option<&str>, AppError> {
        match self.get(name)? {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s)),
            _ => Err(self.invalid(name, "a string")),
        }
    }

    /// Gets a string field that may be absent or `null`.
    pub fn optional_str(&self, name: &str) -> Result<Option<&str>, AppError> {
        match self.optional(name) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(_) => Err(self.invalid(name, "a string")),
        }
    }

    /// The entity's `id`, which doubles as its slug in API paths.
    pub fn id(&self) -> Result<&str, AppError> {
        self.str("id")
    }

    pub(crate) fn invalid(&self, name: &str, expected: &'static str) -> AppError {
        AppError::InvalidField {
            entity: self.entity,
            field: name.to_string(),
            expected,
        }
    }
}
