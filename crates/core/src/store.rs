// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Document store model as returned by the remote API

use crate::status::{classify, Refreshability, StoreStatus};
use serde::{Deserialize, Deserializer, Serialize};

/// Label used when a store has no name
pub const UNNAMED_STORE: &str = "Unnamed Store";

/// A remote document store. `id` is the only identity key; the remaining
/// fields are snapshots that may change between observations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentStore {
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub total_chunks: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_chars: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub loaders: Vec<Loader>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vector_store_config: Option<VectorStoreConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedding_config: Option<EmbeddingConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<String>,
}

/// Document loader attached to a store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Loader {
    pub id: String,
    pub loader_name: String,
    pub status: String,
    pub config: LoaderConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoaderConfig {
    pub source: Option<String>,
    pub source_type: Option<String>,
    pub file_type: Option<String>,
    pub url: Option<String>,
    pub directory_path: Option<String>,
    pub recursive: Option<bool>,
    pub text_splitter: Option<TextSplitter>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextSplitter {
    pub chunk_size: Option<u64>,
    pub chunk_overlap: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorStoreConfig {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub name: String,
}

impl DocumentStore {
    /// Name for display, falling back to a placeholder
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            UNNAMED_STORE
        } else {
            &self.name
        }
    }

    pub fn store_status(&self) -> StoreStatus {
        StoreStatus::parse(&self.status)
    }

    pub fn refreshability(&self) -> Refreshability {
        classify(&self.status)
    }

    /// One-line label: `name (ID: abcdef12..., Status: UPSERTED)`
    pub fn label(&self) -> String {
        let short_id: String = self.id.chars().take(8).collect();
        let status = if self.status.is_empty() {
            "UNKNOWN"
        } else {
            &self.status
        };
        format!(
            "{} (ID: {}..., Status: {})",
            self.display_name(),
            short_id,
            status
        )
    }

    pub fn target(&self) -> RefreshTarget {
        RefreshTarget {
            id: self.id.clone(),
            name: self.display_name().to_string(),
            initial_chunks: self.total_chunks,
        }
    }
}

/// A store selected for refresh, snapshotted before the refresh starts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshTarget {
    pub id: String,
    pub name: String,
    pub initial_chunks: u64,
}

impl RefreshTarget {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            initial_chunks: 0,
        }
    }
}

// The API sends `null` for unset scalars as often as it omits them
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
