// SPDX-License-Identifier: MIT OR Apache-2.0
//! Typed view of the documents the Jsonnet library emits.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::FilerError;

/// Encoding applied to a manifest's `contentEncoded` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingStrategy {
    /// Content is rendered as a YAML document.
    Yaml,
    /// Content is rendered as indented JSON.
    Json,
}

/// Identifying metadata for a generated file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    /// Logical name of the file.
    pub name: String,
}

/// A file manifest as emitted by `jf.File` in the packaged library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileManifest {
    /// Manifest schema identifier.
    pub api_version: String,
    /// Manifest kind, always `File`.
    pub kind: String,
    /// Identifying metadata.
    pub metadata: ObjectMeta,
    /// Structured content before encoding.
    pub content: Value,
    /// Content rendered with the selected strategy.
    pub content_encoded: String,
    /// Strategy used to produce `content_encoded`.
    pub encoding_strategy: EncodingStrategy,
}

impl FileManifest {
    /// `apiVersion` the library stamps on every manifest.
    pub const API_VERSION: &'static str = "jsonnet-filer.zeet.co/v1alpha1";
    /// `kind` the library stamps on every manifest.
    pub const KIND: &'static str = "File";

    /// Parse a manifest from the interpreter's JSON output.
    pub fn from_json(text: &str) -> Result<Self, FilerError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Decode `content_encoded` back into a value using the declared
    /// strategy.
    ///
    /// Useful for equivalence checks: go-jsonnet's YAML manifester always
    /// quotes scalars, so encoded strings cannot be compared verbatim
    /// against output from other YAML emitters.
    pub fn decode_content(&self) -> Result<Value, FilerError> {
        match self.encoding_strategy {
            EncodingStrategy::Yaml => Ok(serde_yaml::from_str(&self.content_encoded)?),
            EncodingStrategy::Json => Ok(serde_json::from_str(&self.content_encoded)?),
        }
    }
}
