//! Structured document access
//!
//! Typed, path-aware field lookup over parsed JSON objects. Both codecs use
//! it so that every failure names the logical path of the offending field
//! (`metadata.record_count`, `records.cpu[2].value`).

use serde_json::{Map, Value};

use crate::error::{EmberError, Result};

/// A JSON object together with its logical path in the document
pub(crate) struct Fields<'a> {
    map: &'a Map<String, Value>,
    path: String,
}

impl<'a> Fields<'a> {
    /// Parse `bytes` and require the top-level value to be an object
    pub(crate) fn parse(bytes: &[u8]) -> Result<Value> {
        serde_json::from_slice(bytes).map_err(|e| EmberError::MalformedDocument(e.to_string()))
    }

    /// Wrap the document root
    pub(crate) fn root(value: &'a Value) -> Result<Self> {
        value
            .as_object()
            .map(|map| Self {
                map,
                path: String::new(),
            })
            .ok_or_else(|| {
                EmberError::MalformedDocument("top-level value is not an object".to_string())
            })
    }

    /// Wrap a nested value found at `path`
    pub(crate) fn nested(value: &'a Value, path: String) -> Result<Self> {
        match value.as_object() {
            Some(map) => Ok(Self { map, path }),
            None => Err(EmberError::mismatch(path, "object")),
        }
    }

    /// Logical path of a direct child of this object
    pub(crate) fn child_path(&self, name: &str) -> String {
        if self.path.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.path, name)
        }
    }

    fn get(&self, name: &str) -> Result<(&'a Value, String)> {
        let path = self.child_path(name);
        match self.map.get(name) {
            Some(value) => Ok((value, path)),
            None => Err(EmberError::missing(path)),
        }
    }

    pub(crate) fn i64(&self, name: &str) -> Result<i64> {
        let (value, path) = self.get(name)?;
        value
            .as_i64()
            .ok_or_else(|| EmberError::mismatch(path, "integer"))
    }

    pub(crate) fn u64(&self, name: &str) -> Result<u64> {
        let (value, path) = self.get(name)?;
        value
            .as_u64()
            .ok_or_else(|| EmberError::mismatch(path, "non-negative integer"))
    }

    /// Any JSON number is accepted as a real
    pub(crate) fn f64(&self, name: &str) -> Result<f64> {
        let (value, path) = self.get(name)?;
        value
            .as_f64()
            .ok_or_else(|| EmberError::mismatch(path, "number"))
    }

    pub(crate) fn str(&self, name: &str) -> Result<&'a str> {
        let (value, path) = self.get(name)?;
        value
            .as_str()
            .ok_or_else(|| EmberError::mismatch(path, "string"))
    }

    pub(crate) fn object(&self, name: &str) -> Result<Fields<'a>> {
        let (value, path) = self.get(name)?;
        Fields::nested(value, path)
    }

    /// Entries in document order
    pub(crate) fn entries(&self) -> impl Iterator<Item = (&'a String, &'a Value)> {
        self.map.iter()
    }
}
