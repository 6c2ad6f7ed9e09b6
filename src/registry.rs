//! The node schema registry: node kinds, their fields and aliases.

use std::collections::BTreeMap;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::validator::Validator;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FieldSpec {
    #[serde(default)]
    pub validate: Option<Validator>,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub default: Option<serde_json::Value>,
}

impl FieldSpec {
    /// Whether the field may be left out at construction time.
    #[inline]
    pub fn is_omittable(&self) -> bool {
        self.optional || self.default.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeKind {
    pub name: String,
    pub builder_keys: Vec<String>,
    pub fields: IndexMap<String, FieldSpec>,
    pub aliases: Vec<String>,
}

impl NodeKind {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.get(name)
    }

    /// All fields, builder keys first in construction order,
    /// then the rest sorted by name.
    pub fn fields_in_order(&self) -> Vec<(&str, &FieldSpec)> {
        let mut fields: Vec<_> = self
            .fields
            .iter()
            .map(|(name, spec)| (name.as_str(), spec))
            .collect();
        fields.sort_by_key(|&(name, _)| {
            let position = self.builder_keys.iter().position(|key| key == name);
            (position.unwrap_or(usize::MAX), name)
        });
        fields
    }

    /// Fields in construction order.
    ///
    /// Every builder key is checked against the field table when
    /// the registry is loaded, so this never skips a key.
    pub fn builder_fields(&self) -> impl Iterator<Item = (&str, &FieldSpec)> + '_ {
        self.builder_keys
            .iter()
            .filter_map(|key| self.fields.get(key).map(|spec| (key.as_str(), spec)))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Tables {
    builder_keys: IndexMap<String, Vec<String>>,
    #[serde(default)]
    node_fields: IndexMap<String, IndexMap<String, FieldSpec>>,
    #[serde(default)]
    alias_keys: IndexMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registry {
    kinds: BTreeMap<String, NodeKind>,
}

impl Registry {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path).map_err(|err| Error::io(path, err))?;
        Self::from_json(&src)
    }

    pub fn from_json(src: &str) -> Result<Self> {
        Self::from_tables(serde_json::from_str(src)?)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Self::from_tables(serde_json::from_value(value)?)
    }

    fn from_tables(tables: Tables) -> Result<Self> {
        let Tables {
            builder_keys,
            mut node_fields,
            mut alias_keys,
        } = tables;

        let mut registry = Registry::default();
        for (name, builder_keys) in builder_keys {
            let Some(fields) = node_fields.swap_remove(&name) else {
                return Err(Error::MissingFields { kind: name });
            };
            if let Some(field) = builder_keys.iter().find(|key| !fields.contains_key(*key)) {
                return Err(Error::UnknownBuilderKey {
                    kind: name,
                    field: field.clone(),
                });
            }
            let aliases = alias_keys.swap_remove(&name).unwrap_or_default();
            registry.insert(NodeKind {
                name,
                builder_keys,
                fields,
                aliases,
            });
        }

        Ok(registry)
    }

    pub fn insert(&mut self, kind: NodeKind) {
        self.kinds.insert(kind.name.clone(), kind);
    }

    pub fn get(&self, name: &str) -> Option<&NodeKind> {
        self.kinds.get(name)
    }

    /// Node kinds sorted by name.
    pub fn kinds(&self) -> impl Iterator<Item = &NodeKind> + '_ {
        self.kinds.values()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}
