//! Matching and selection engine.
//!
//! This module is the internal core behind [`crate::Engine`]. It is split into
//! focused submodules under `src/engine/`:
//!
//! ## How the parts work together
//!
//! ```text
//! rules (catalog order) ──┐
//!                         │  CompiledRules::new        (compiled_rules.rs)
//!                         │   - CompiledPattern::parse (pattern.rs)
//!                         │   - stable sort by priority
//!                         └───────────────┬──────────
//!                                         │
//! input ── normalize ─────────────────────┼─ Responder::run (responder.rs)
//!                                         │
//!            (1) literal tier    ── exact lookup in RuleIndex::literal
//!            (2) wildcard tier   ── match_tokens per rule      (matcher.rs)
//!            (3) universal tier  ── RuleIndex::universal
//!            (4) default reply   ── Options::default_reply
//!                                         │
//!                                         v
//!                                   RespondRun (metrics.rs)
//! ```
//!
//! ## Responsibilities by module
//!
//! - `pattern.rs`: classifies pattern tokens (`*`, `?`, `?->x`, literals,
//!   unsupported syntax) and precomputes per-position length requirements.
//! - `matcher.rs`: the backtracking matcher with binding rollback and a step
//!   budget.
//! - `compiled_rules.rs`: sorts rules once and builds the tier indexes.
//! - `responder.rs`: runs the tiers for one input.
//! - `metrics.rs`: timing and counters for one respond call.
//!
//! ## Debugging
//!
//! Every evaluated rule is reported through `tracing` at `trace` level and the
//! selected tier at `debug` level; run the binary with `RUST_LOG=phatic=trace`
//! to see them.

#[path = "engine/compiled_rules.rs"]
mod compiled_rules;
#[path = "engine/matcher.rs"]
mod matcher;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/pattern.rs"]
mod pattern;
#[path = "engine/responder.rs"]
mod responder;

pub(crate) use compiled_rules::CompiledRules;
pub use matcher::{Match, MatchLimits, match_pattern};
pub(crate) use metrics::RespondRun;
pub(crate) use pattern::CompiledPattern;
pub(crate) use responder::Responder;
pub use responder::Tier;
