//! Rule catalogs.
//!
//! A catalog is pure data: an ordered list of `(pattern, response, priority)`
//! entries plus an optional default reply. Catalogs are written in TOML and
//! compiled into [`Rule`]s, with declarative response forms turned into
//! [`Response::Dynamic`](crate::Response::Dynamic) closures.
//!
//! ```toml
//! default_reply = "Я Вас не дуже розумію."
//!
//! [[rules]]
//! pattern = "Ні"
//! priority = 100
//! response = "Будь ласка, не будьте так небагатослівні..."
//!
//! [[rules]]
//! pattern = "(* ?->a бентежить ?->b *)"
//! priority = 90
//! response = { template = "Як давно Вас бентежить {b}?", fallback = "Як давно Ви так почуваєтеся?" }
//! ```
//!
//! The default personality ships embedded in the binary (`data/catalog.toml`)
//! and is available through [`Catalog::embedded`].

#[path = "catalog/producers.rs"]
mod producers;
#[path = "catalog/schema.rs"]
mod schema;

use crate::Rule;
use crate::engine::CompiledPattern;
use crate::error::CatalogError;
use schema::CatalogFile;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

const EMBEDDED_CATALOG: &str = include_str!("../data/catalog.toml");

/// Settings applied while compiling a catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Seed for `choices` responses. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

/// A loaded, validated rule catalog in file order.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub default_reply: Option<String>,
    pub rules: Vec<Rule>,
}

impl Catalog {
    /// The built-in catalog.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::embedded_with(LoadOptions::default())
    }

    pub fn embedded_with(options: LoadOptions) -> Result<Self, CatalogError> {
        Self::from_toml_str_with(EMBEDDED_CATALOG, options)
    }

    pub fn from_toml_str(source: &str) -> Result<Self, CatalogError> {
        Self::from_toml_str_with(source, LoadOptions::default())
    }

    pub fn from_toml_str_with(source: &str, options: LoadOptions) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(source)?;
        let mut rules = Vec::with_capacity(file.rules.len());

        for (index, entry) in file.rules.into_iter().enumerate() {
            let pattern = CompiledPattern::parse(&entry.pattern);
            let invalid =
                |reason: String| CatalogError::InvalidRule { index, pattern: entry.pattern.clone(), reason };

            if pattern.tokens.is_empty() {
                return Err(invalid("pattern is empty".to_string()));
            }
            if !pattern.is_supported() {
                warn!(index, pattern = %entry.pattern, "pattern uses unsupported syntax and will never match");
            }
            for name in pattern.duplicate_captures() {
                warn!(index, pattern = %entry.pattern, name, "variable captured more than once; last capture wins");
            }

            let captures: Vec<&str> = pattern.capture_names().collect();
            let seed = options.seed.map(|s| s.wrapping_add(index as u64));
            let response = producers::build(entry.response, &captures, seed).map_err(invalid)?;

            rules.push(Rule { pattern: entry.pattern, response, priority: entry.priority });
        }

        debug!(rules = rules.len(), "catalog loaded");
        Ok(Catalog { default_reply: file.default_reply, rules })
    }

    /// Load a catalog from a TOML file.
    pub fn from_path(path: impl AsRef<Path>, options: LoadOptions) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let source =
            fs::read_to_string(path).map_err(|source| CatalogError::Io { path: path.to_path_buf(), source })?;
        debug!(path = %path.display(), "reading catalog");
        Self::from_toml_str_with(&source, options)
    }
}
