//! Provider schema loading.
//!
//! Reads the JSON emitted by `terraform providers schema -json` and projects it
//! down to the set of resource types that accept a labels attribute.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::de::IgnoredAny;
use thiserror::Error;

/// Provider keys tried, in order, when no extra keys are configured.
pub const DEFAULT_PROVIDER_KEYS: &[&str] = &[
    "registry.terraform.io/hashicorp/google",
    "hashicorp/google",
    "google",
];

/// Attribute names that carry resource labels.
pub const LABEL_ATTRIBUTES: &[&str] = &["labels", "resource_labels"];

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to read provider schema {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid provider schema {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Default, Deserialize)]
pub struct ProviderSchemaDump {
    #[serde(default)]
    pub provider_schemas: BTreeMap<String, ProviderSchema>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProviderSchema {
    #[serde(default)]
    pub resource_schemas: BTreeMap<String, ResourceSchema>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResourceSchema {
    #[serde(default)]
    pub block: SchemaBlock,
}

#[derive(Debug, Default, Deserialize)]
pub struct SchemaBlock {
    #[serde(default)]
    pub attributes: BTreeMap<String, IgnoredAny>,
}

impl SchemaBlock {
    pub fn supports_labels(&self) -> bool {
        LABEL_ATTRIBUTES
            .iter()
            .any(|attr| self.attributes.contains_key(*attr))
    }
}

impl ProviderSchema {
    pub fn label_supporting_types(&self) -> impl Iterator<Item = &str> {
        self.resource_schemas
            .iter()
            .filter(|(_, schema)| schema.block.supports_labels())
            .map(|(resource_type, _)| resource_type.as_str())
    }
}

/// Ordered provider key candidates. The first key present in the dump wins.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderKeys(Vec<String>);

impl ProviderKeys {
    /// Extra keys are tried before the defaults.
    pub fn with_extra(extra: impl IntoIterator<Item = String>) -> Self {
        let mut keys: Vec<String> = extra.into_iter().collect();
        for key in DEFAULT_PROVIDER_KEYS {
            if !keys.iter().any(|k| k == key) {
                keys.push((*key).to_string());
            }
        }
        Self(keys)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for ProviderKeys {
    fn default() -> Self {
        Self::with_extra(Vec::new())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProviderMatch {
    Found {
        key: String,
        resource_types: BTreeSet<String>,
    },
    NotFound {
        available: Vec<String>,
    },
}

impl ProviderMatch {
    /// The label-supporting set. Empty when no provider matched.
    pub fn into_resource_types(self) -> BTreeSet<String> {
        match self {
            ProviderMatch::Found { resource_types, .. } => resource_types,
            ProviderMatch::NotFound { .. } => BTreeSet::new(),
        }
    }
}

impl ProviderSchemaDump {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn select_provider(&self, keys: &ProviderKeys) -> Option<(&str, &ProviderSchema)> {
        keys.iter().find_map(|key| {
            self.provider_schemas
                .get_key_value(key)
                .map(|(k, schema)| (k.as_str(), schema))
        })
    }

    pub fn label_supporting(&self, keys: &ProviderKeys) -> ProviderMatch {
        match self.select_provider(keys) {
            Some((key, provider)) => ProviderMatch::Found {
                key: key.to_string(),
                resource_types: provider
                    .label_supporting_types()
                    .map(str::to_string)
                    .collect(),
            },
            None => ProviderMatch::NotFound {
                available: self.provider_schemas.keys().cloned().collect(),
            },
        }
    }
}

pub fn load_schema(path: &Path) -> Result<ProviderSchemaDump, SchemaError> {
    let raw = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    ProviderSchemaDump::from_json(&raw).map_err(|source| SchemaError::Json {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_label_supporting_resources(
    path: &Path,
    keys: &ProviderKeys,
) -> Result<ProviderMatch, SchemaError> {
    let dump = load_schema(path)?;
    let matched = dump.label_supporting(keys);

    match &matched {
        ProviderMatch::Found {
            key,
            resource_types,
        } => tracing::info!(
            provider = %key,
            count = resource_types.len(),
            "label-supporting resource types loaded"
        ),
        ProviderMatch::NotFound { available } => tracing::warn!(
            available = ?available,
            "no known provider key in schema"
        ),
    }

    Ok(matched)
}
