use crate::catalog::Catalog;
use crate::engine::{CompiledRules, MatchLimits, RespondRun, Responder, Tier};
use crate::error::CatalogError;
use crate::{Bindings, Rule};
use std::time::Duration;
use tracing::debug;

/// Reply used when no rule applies and the catalog defines no catch-all.
pub const DEFAULT_REPLY: &str = "Я Вас не дуже розумію.";

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct Options {
    /// Search bounds for each wildcard match attempt.
    pub limits: MatchLimits,
    /// Reply for the hard-fallback tier.
    pub default_reply: String,
}

impl Default for Options {
    fn default() -> Self {
        Options { limits: MatchLimits::default(), default_reply: DEFAULT_REPLY.to_string() }
    }
}

/// A rule-based responder.
///
/// Rules are sorted once at construction (priority descending, catalog order
/// on ties) and never change afterwards; `respond` only reads them, so an
/// `Engine` can be shared freely between threads.
#[derive(Debug, Clone)]
pub struct Engine {
    compiled: CompiledRules,
    options: Options,
}

/// Compact description of a rule for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSummary {
    pub pattern: String,
    pub priority: i32,
    /// Position in the catalog the engine was built from.
    pub order: usize,
}

/// A wildcard rule that matched the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSummary {
    pub rule: RuleSummary,
    pub bindings: Bindings,
}

/// How a reply was selected. Returned by [`Engine::respond_verbose`].
#[derive(Debug, Clone)]
pub struct RespondDetails {
    /// The input after normalization.
    pub normalized: String,
    pub tier: Tier,
    /// Winning rule (`None` when the default reply was used).
    pub rule: Option<RuleSummary>,
    pub bindings: Bindings,
    /// All wildcard matches, highest priority first.
    pub candidates: Vec<CandidateSummary>,
    /// Wildcard rules handed to the matcher.
    pub rules_evaluated: usize,
    pub matcher_steps: usize,
    /// Patterns whose match attempt ran out of budget.
    pub aborted: Vec<String>,
    pub total: Duration,
    pub literal: Duration,
    pub wildcard: Duration,
}

/// Result of [`Engine::respond_verbose`].
#[derive(Debug, Clone)]
pub struct RespondVerbose {
    pub reply: String,
    pub details: RespondDetails,
}

impl Engine {
    /// Build an engine with default [`Options`].
    pub fn new(rules: Vec<Rule>) -> Self {
        Self::with_options(rules, Options::default())
    }

    pub fn with_options(rules: Vec<Rule>, options: Options) -> Self {
        let compiled = CompiledRules::new(rules);
        debug!(
            rules = compiled.len(),
            literal = compiled.index.literal.len(),
            wildcard = compiled.index.wildcard.len(),
            universal = compiled.index.universal.is_some(),
            "engine built"
        );
        Engine { compiled, options }
    }

    /// Build an engine from a loaded catalog. The catalog's `default_reply`,
    /// when set, replaces [`DEFAULT_REPLY`].
    pub fn from_catalog(catalog: Catalog) -> Self {
        let mut options = Options::default();
        if let Some(reply) = catalog.default_reply {
            options.default_reply = reply;
        }
        Self::with_options(catalog.rules, options)
    }

    /// Reply to `input`. Never fails.
    pub fn respond(&self, input: &str) -> String {
        self.run(input).reply
    }

    /// Reply to `input` and report how the reply was selected.
    pub fn respond_verbose(&self, input: &str) -> RespondVerbose {
        let run = self.run(input);

        let details = RespondDetails {
            tier: run.tier,
            rule: run.rule.map(|id| self.summary(id)),
            candidates: run
                .candidates
                .iter()
                .map(|c| CandidateSummary { rule: self.summary(c.rule), bindings: c.bindings.clone() })
                .collect(),
            rules_evaluated: run.metrics.rules_evaluated,
            matcher_steps: run.metrics.matcher_steps,
            aborted: run.metrics.aborted.iter().map(|&id| self.compiled.get(id).rule.pattern.clone()).collect(),
            total: run.metrics.total,
            literal: run.metrics.literal,
            wildcard: run.metrics.wildcard,
            normalized: run.normalized,
            bindings: run.bindings,
        };

        RespondVerbose { reply: run.reply, details }
    }

    /// Rules in evaluation order (priority descending, catalog order on ties).
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.compiled.rules.iter().map(|r| &r.rule)
    }

    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compiled.len() == 0
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    fn run(&self, input: &str) -> RespondRun {
        Responder::new(input, &self.compiled, self.options.limits, &self.options.default_reply).run()
    }

    fn summary(&self, id: usize) -> RuleSummary {
        let entry = self.compiled.get(id);
        RuleSummary { pattern: entry.rule.pattern.clone(), priority: entry.rule.priority, order: entry.order }
    }
}

/// Engine over the embedded default catalog.
///
/// # Example
/// ```
/// let engine = phatic::default_engine().unwrap();
/// assert_eq!(engine.respond("ні"), "Будь ласка, не будьте так небагатослівні...");
/// ```
pub fn default_engine() -> Result<Engine, CatalogError> {
    Ok(Engine::from_catalog(Catalog::embedded()?))
}
