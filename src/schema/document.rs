use std::path::Path;

use fs_extra::file::{read_to_string, write_all};
use serde_json::{json, Map, Value};

use super::SchemaFetchError;

use crate::consts::DATASOURCE_PARAMETER;

/// Swagger definition document
///
/// Kept as a raw JSON value: the document belongs to the remote API
/// and only the few fields the proxy rewrite touches are interpreted
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDocument(Value);

impl SchemaDocument {
    #[inline]
    pub fn new(document: Value) -> Self {
        Self(document)
    }

    /// Read a previously stored definition file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SchemaFetchError> {
        Ok(Self(serde_json::from_str(&read_to_string(path.as_ref())?)?))
    }

    /// Store the document, overwriting any previous file content
    ///
    /// Identical documents produce byte-identical files
    pub fn store(&self, path: impl AsRef<Path>) -> Result<(), SchemaFetchError> {
        Ok(write_all(path.as_ref(), &serde_json::to_string_pretty(&self.0)?)?)
    }

    /// Rewrite the document to target the proxy endpoint
    ///
    /// Overwrites the `host` and `basePath` fields and removes the `enum`
    /// constraint from the shared datasource parameter, as the proxy expects
    /// a character id there instead of one of the declared server names.
    /// Applying the same patch twice changes nothing
    pub fn patch(&mut self, host: impl AsRef<str>, base_path: impl AsRef<str>) -> Result<(), SchemaFetchError> {
        let Some(root) = self.0.as_object_mut() else {
            return Err(SchemaFetchError::NotAnObject);
        };

        if !root.contains_key("host") {
            return Err(SchemaFetchError::MissingNode("host"));
        }

        if !root.contains_key("basePath") {
            return Err(SchemaFetchError::MissingNode("basePath"));
        }

        root.insert(String::from("host"), json!(host.as_ref()));
        root.insert(String::from("basePath"), json!(base_path.as_ref()));

        let datasource = root.get_mut("parameters")
            .and_then(Value::as_object_mut)
            .and_then(|parameters| parameters.get_mut(DATASOURCE_PARAMETER))
            .and_then(Value::as_object_mut)
            .ok_or(SchemaFetchError::MissingNode("parameters.datasource"))?;

        datasource.remove("enum");

        Ok(())
    }

    #[inline]
    pub fn host(&self) -> Option<&str> {
        self.0.get("host").and_then(Value::as_str)
    }

    #[inline]
    pub fn base_path(&self) -> Option<&str> {
        self.0.get("basePath").and_then(Value::as_str)
    }

    /// Declared paths with their operations
    #[inline]
    pub fn paths(&self) -> Option<&Map<String, Value>> {
        self.0.get("paths").and_then(Value::as_object)
    }

    #[inline]
    pub fn get(&self) -> &Value {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> Value {
        self.0
    }
}
