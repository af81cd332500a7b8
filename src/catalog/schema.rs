//! TOML shape of a catalog file.

use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct CatalogFile {
    #[serde(default)]
    pub default_reply: Option<String>,
    #[serde(default)]
    pub rules: Vec<RuleEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RuleEntry {
    pub pattern: String,
    pub response: ResponseEntry,
    #[serde(default)]
    pub priority: i32,
}

/// A response is either plain text or one of the table forms below.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ResponseEntry {
    Text(String),
    Template(TemplateEntry),
    Lookup(LookupEntry),
    Choices(ChoicesEntry),
}

/// `{ template = "… {b} …", fallback = "…" }`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct TemplateEntry {
    pub template: String,
    pub fallback: String,
}

/// `{ var = "a", table = { "люблю" = "…" }, default = "…" }`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct LookupEntry {
    pub var: String,
    pub table: BTreeMap<String, String>,
    pub default: String,
}

/// `{ choices = ["…", "…"] }`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ChoicesEntry {
    pub choices: Vec<String>,
}
