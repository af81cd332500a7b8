//! Respond-call metrics.
//!
//! Collected on every call; they are cheap (a few counters and `Instant`
//! reads). Only [`crate::Engine::respond_verbose`] surfaces them.

use super::compiled_rules::RuleId;
use super::responder::Tier;
use crate::Bindings;
use std::time::Duration;

// --- Metrics -----------------------------------------------------------------

#[derive(Debug, Default, Clone)]
pub struct RespondMetrics {
    /// Total elapsed time for [`Responder::run`](super::Responder::run).
    pub total: Duration,
    /// Time spent in the literal lookup.
    pub literal: Duration,
    /// Time spent matching wildcard rules.
    pub wildcard: Duration,
    /// Number of wildcard rules handed to the matcher.
    pub rules_evaluated: usize,
    /// Matcher steps summed over all evaluated rules.
    pub matcher_steps: usize,
    /// Rules whose match attempt ran out of budget.
    pub aborted: Vec<RuleId>,
}

/// A wildcard rule that matched, with its bindings.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub rule: RuleId,
    pub bindings: Bindings,
}

/// Responder output bundled with how it was reached.
#[derive(Debug, Clone)]
pub struct RespondRun {
    pub normalized: String,
    pub reply: String,
    pub tier: Tier,
    /// Winning rule, `None` for [`Tier::Default`].
    pub rule: Option<RuleId>,
    pub bindings: Bindings,
    /// Every wildcard match in priority order (first one won, if any).
    pub candidates: Vec<Candidate>,
    pub metrics: RespondMetrics,
}
