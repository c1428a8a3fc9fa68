//! New-generation module record - nested document format.
//!
//! A module is self-contained: no `extends`, no cross-record dependency.
//! Its `name` comes from the final segment of the route, never from the
//! file body, so two files with identical contents under different paths
//! still get distinct names.

use serde::Deserialize;

use super::JsonMap;
use super::page::{Block, sanitize_blocks, sanitize_keywords, trim_in_place};

/// Module record, decoded from one nested-document content file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Module {
    /// Normalized path the record is filed under. Stamped by the walker.
    #[serde(skip)]
    pub resource_path: String,

    /// Derived from the route's final segment after decode.
    #[serde(skip)]
    pub name: String,

    pub description: String,
    pub keywords: Vec<String>,
    pub blocks: Vec<Block>,

    /// Remaining nested fields, kept as raw JSON for the presentation
    /// layer. Opaque to the resolution engine.
    #[serde(flatten)]
    pub extra: JsonMap,
}

impl Module {
    /// Post-resolution normalization pass. Idempotent.
    pub fn sanitize(&mut self) {
        trim_in_place(&mut self.description);
        sanitize_keywords(&mut self.keywords);
        sanitize_blocks(&mut self.blocks);
    }
}
