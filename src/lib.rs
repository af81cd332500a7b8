//! A rule-based phatic dialog engine.
//!
//! Replies are picked by matching normalized input against an ordered set of
//! token patterns. Patterns mix literal tokens with `*` (any number of
//! tokens), `?` (exactly one token) and `?->x` (exactly one token, captured as
//! `x`). Pure-literal rules are answered from a fast exact-match tier before
//! any wildcard rule is considered.
//!
//! ```
//! use phatic::{Engine, Response, Rule};
//!
//! let engine = Engine::new(vec![
//!     Rule::new("Ні", "Будь ласка, не будьте так небагатослівні...", 100),
//!     Rule::new("(Я ?->a *)", Response::dynamic(|vars| format!("Чому {}?", vars.get("a").map_or("так", String::as_str))), 60),
//!     Rule::new("*", "Продовжуйте, я слухаю.", -1000),
//! ]);
//!
//! assert_eq!(engine.respond("ні"), "Будь ласка, не будьте так небагатослівні...");
//! assert_eq!(engine.respond("Я люблю яблука"), "Чому люблю?");
//! assert_eq!(engine.respond("погода"), "Продовжуйте, я слухаю.");
//! ```

#[macro_use]
mod macros;
mod api;
mod catalog;
mod engine;
mod error;
mod normalize;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

pub use api::{
    CandidateSummary, DEFAULT_REPLY, Engine, Options, RespondDetails, RespondVerbose, RuleSummary, default_engine,
};
pub use catalog::{Catalog, LoadOptions};
pub use engine::{Match, MatchLimits, Tier, match_pattern};
pub use error::{CatalogError, MatchError};
pub use normalize::{normalize, tokenize};

// --- Rule model ---------------------------------------------------------------

/// Variables captured by `?->x` tokens during a single match attempt.
pub type Bindings = BTreeMap<String, String>;

/// A reply function over captured variables.
pub type Producer = Arc<dyn Fn(&Bindings) -> String + Send + Sync>;

/// What a rule answers with once selected.
#[derive(Clone)]
pub enum Response {
    /// Returned verbatim.
    Static(String),
    /// Called with the bindings of the winning match (empty for rules that
    /// capture nothing). Must produce a reply for any bindings, including an
    /// empty map.
    Dynamic(Producer),
}

impl Response {
    /// Wrap a closure as a [`Response::Dynamic`].
    pub fn dynamic<F>(f: F) -> Self
    where
        F: Fn(&Bindings) -> String + Send + Sync + 'static,
    {
        Response::Dynamic(Arc::new(f))
    }

    /// Produce the reply text for `bindings`.
    pub fn produce(&self, bindings: &Bindings) -> String {
        match self {
            Response::Static(text) => text.clone(),
            Response::Dynamic(producer) => producer(bindings),
        }
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Static(text) => f.debug_tuple("Static").field(text).finish(),
            Response::Dynamic(_) => f.write_str("Dynamic(<function>)"),
        }
    }
}

impl From<&str> for Response {
    fn from(text: &str) -> Self {
        Response::Static(text.to_string())
    }
}

impl From<String> for Response {
    fn from(text: String) -> Self {
        Response::Static(text)
    }
}

/// A dialog rule: a token pattern, the response it produces and its priority
/// (higher = preferred; ties keep catalog order).
#[derive(Debug, Clone)]
pub struct Rule {
    pub pattern: String,
    pub response: Response,
    pub priority: i32,
}

impl Rule {
    pub fn new(pattern: impl Into<String>, response: impl Into<Response>, priority: i32) -> Self {
        Rule { pattern: pattern.into(), response: response.into(), priority }
    }
}
