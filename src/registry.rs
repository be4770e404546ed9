//! Loader registry
//!
//! An immutable name -> loader mapping built once at startup. Lookups are
//! pure reads and safe under unbounded concurrent access; there are no
//! writers after construction. Introspection descriptors are computed once
//! here and cached, since loader signatures are static for the process
//! lifetime.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::loaders::Loader;

/// Declared type of a loader parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Bool,
    Int,
    Str,
    IntList,
}

impl ParamType {
    /// Human-readable label used in introspection payloads.
    pub fn label(&self) -> &'static str {
        match self {
            ParamType::Bool => "boolean",
            ParamType::Int => "integer",
            ParamType::Str => "string",
            ParamType::IntList => "integer list",
        }
    }

    /// Whether the supplied JSON value matches this type.
    pub fn admits(&self, value: &Value) -> bool {
        match self {
            ParamType::Bool => value.is_boolean(),
            ParamType::Int => value.as_i64().is_some(),
            ParamType::Str => value.is_string(),
            ParamType::IntList => value
                .as_array()
                .map(|items| items.iter().all(|v| v.as_i64().is_some()))
                .unwrap_or(false),
        }
    }
}

/// A declared loader parameter.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub name: &'static str,
    pub ty: ParamType,
    pub default: Option<Value>,
    pub required: bool,
}

impl ParamSpec {
    /// A parameter the caller must supply.
    pub fn required(name: &'static str, ty: ParamType) -> Self {
        Self {
            name,
            ty,
            default: None,
            required: true,
        }
    }

    /// A parameter with a default the loader applies when it is absent.
    pub fn optional(name: &'static str, ty: ParamType, default: Value) -> Self {
        Self {
            name,
            ty,
            default: Some(default),
            required: false,
        }
    }
}

/// A registered loader: name, documentation, declared parameters and the
/// callable itself.
pub struct LoaderEntry {
    pub name: &'static str,
    pub doc: &'static str,
    pub params: Vec<ParamSpec>,
    pub loader: Arc<dyn Loader>,
}

impl LoaderEntry {
    pub fn new(
        name: &'static str,
        doc: &'static str,
        params: Vec<ParamSpec>,
        loader: Arc<dyn Loader>,
    ) -> Self {
        Self {
            name,
            doc,
            params,
            loader,
        }
    }
}

impl std::fmt::Debug for LoaderEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoaderEntry")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish()
    }
}

/// Introspection payload for a single parameter.
#[derive(Debug, Clone, Serialize)]
pub struct ParamDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub type_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

/// Introspection payload for a single loader.
#[derive(Debug, Clone, Serialize)]
pub struct LoaderDescriptor {
    pub name: String,
    pub doc: String,
    pub parameters: Vec<ParamDescriptor>,
}

impl LoaderDescriptor {
    fn describe(entry: &LoaderEntry) -> Self {
        Self {
            name: entry.name.to_string(),
            doc: entry.doc.lines().next().unwrap_or("").to_string(),
            parameters: entry
                .params
                .iter()
                .map(|spec| ParamDescriptor {
                    name: spec.name.to_string(),
                    type_label: spec.ty.label().to_string(),
                    default: spec.default.clone(),
                })
                .collect(),
        }
    }
}

/// The immutable loader registry.
pub struct Registry {
    entries: HashMap<&'static str, Arc<LoaderEntry>>,
    descriptors: Vec<LoaderDescriptor>,
}

impl Registry {
    /// Build a registry from a fixed entry table.
    ///
    /// Names must be unique; a duplicate in the table is a programmer error.
    pub fn new(entries: Vec<LoaderEntry>) -> Self {
        let mut map = HashMap::with_capacity(entries.len());
        let mut descriptors = Vec::with_capacity(entries.len());

        for entry in entries {
            descriptors.push(LoaderDescriptor::describe(&entry));
            let previous = map.insert(entry.name, Arc::new(entry));
            debug_assert!(previous.is_none(), "duplicate loader name");
        }

        Self {
            entries: map,
            descriptors,
        }
    }

    /// Resolve a loader by name.
    pub fn resolve(&self, name: &str) -> Option<&Arc<LoaderEntry>> {
        self.entries.get(name)
    }

    /// Cached introspection descriptors, in registration order.
    pub fn descriptors(&self) -> &[LoaderDescriptor] {
        &self.descriptors
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
