//! Tiered reply selection.
//!
//! One `Responder` handles one input. It never mutates the compiled rules,
//! so any number of responders can share the same [`CompiledRules`].
//!
//! ```text
//! normalize(input)
//!   │
//!   ├─(1) literal   index.literal[normalized]            ─┐
//!   ├─(2) wildcard  match_tokens for each index.wildcard  │ first hit wins
//!   ├─(3) universal index.universal                       │
//!   └─(4) default   Options::default_reply               ─┘
//! ```
//!
//! The literal tier runs before any wildcard rule regardless of priority: a
//! canned exchange always beats a pattern, even a higher-priority one.

use super::compiled_rules::{CompiledRules, RuleId};
use super::matcher::{MatchLimits, match_tokens};
use super::metrics::{Candidate, RespondMetrics, RespondRun};
use crate::Bindings;
use crate::normalize::normalize;
use std::fmt;
use std::time::Instant;
use tracing::{debug, trace, warn};

/// Which selection tier produced the reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// A pure-literal pattern equal to the normalized input.
    Literal,
    /// The highest-priority matching wildcard pattern.
    Wildcard,
    /// The catch-all `*` rule.
    Universal,
    /// No rule applied; the configured default reply.
    Default,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Tier::Literal => "literal",
            Tier::Wildcard => "wildcard",
            Tier::Universal => "universal",
            Tier::Default => "default",
        })
    }
}

#[derive(Debug)]
pub struct Responder<'a> {
    input: &'a str,
    compiled: &'a CompiledRules,
    limits: MatchLimits,
    default_reply: &'a str,
}

impl<'a> Responder<'a> {
    pub fn new(input: &'a str, compiled: &'a CompiledRules, limits: MatchLimits, default_reply: &'a str) -> Self {
        Responder { input, compiled, limits, default_reply }
    }

    /// Select a rule for the input and produce the reply.
    pub fn run(self) -> RespondRun {
        let total_start = Instant::now();
        let mut metrics = RespondMetrics::default();
        let normalized = normalize(self.input);

        let literal_start = Instant::now();
        let literal_hit = self.compiled.index.literal.get(&normalized).copied();
        metrics.literal = literal_start.elapsed();

        if let Some(id) = literal_hit {
            return self.finish(normalized, Tier::Literal, Some(id), Bindings::new(), Vec::new(), metrics, total_start);
        }

        let wildcard_start = Instant::now();
        let candidates = self.match_wildcards(&normalized, &mut metrics);
        metrics.wildcard = wildcard_start.elapsed();

        // Wildcard ids are already in priority order, so the first candidate wins.
        if let Some(first) = candidates.first() {
            let (id, bindings) = (first.rule, first.bindings.clone());
            return self.finish(normalized, Tier::Wildcard, Some(id), bindings, candidates, metrics, total_start);
        }

        if let Some(id) = self.compiled.index.universal {
            return self.finish(normalized, Tier::Universal, Some(id), Bindings::new(), candidates, metrics, total_start);
        }

        self.finish(normalized, Tier::Default, None, Bindings::new(), candidates, metrics, total_start)
    }

    fn match_wildcards(&self, normalized: &str, metrics: &mut RespondMetrics) -> Vec<Candidate> {
        let tokens: Vec<String> = normalized.split_whitespace().map(str::to_owned).collect();
        let mut candidates = Vec::new();

        for &id in &self.compiled.index.wildcard {
            let entry = self.compiled.get(id);
            metrics.rules_evaluated += 1;

            match match_tokens(&entry.pattern, &tokens, self.limits) {
                Ok(outcome) => {
                    metrics.matcher_steps += outcome.steps;
                    trace!(
                        pattern = %entry.rule.pattern,
                        priority = entry.rule.priority,
                        matched = outcome.matched,
                        bindings = ?outcome.bindings,
                        steps = outcome.steps,
                        "evaluated rule"
                    );
                    if outcome.matched {
                        candidates.push(Candidate { rule: id, bindings: outcome.bindings });
                    }
                }
                Err(err) => {
                    metrics.matcher_steps += self.limits.max_steps;
                    metrics.aborted.push(id);
                    warn!(pattern = %entry.rule.pattern, %err, "rule skipped");
                }
            }
        }

        candidates
    }

    #[allow(clippy::too_many_arguments)]
    fn finish(
        &self,
        normalized: String,
        tier: Tier,
        rule: Option<RuleId>,
        bindings: Bindings,
        candidates: Vec<Candidate>,
        mut metrics: RespondMetrics,
        total_start: Instant,
    ) -> RespondRun {
        let reply = match rule {
            Some(id) => self.compiled.get(id).rule.response.produce(&bindings),
            None => self.default_reply.to_string(),
        };
        metrics.total = total_start.elapsed();

        debug!(
            input = %normalized,
            %tier,
            pattern = rule.map(|id| self.compiled.get(id).rule.pattern.as_str()),
            candidates = candidates.len(),
            "selected reply"
        );

        RespondRun { normalized, reply, tier, rule, bindings, candidates, metrics }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Response, Rule};

    const APOLOGY: &str = "Я Вас не дуже розумію.";

    fn run(rules: Vec<Rule>, input: &str) -> RespondRun {
        let compiled = CompiledRules::new(rules);
        Responder::new(input, &compiled, MatchLimits::default(), APOLOGY).run()
    }

    #[test]
    fn literal_tier_beats_higher_priority_wildcards() {
        let out = run(vec![Rule::new("* так *", "wildcard", 1_000), Rule::new("Так", "literal", -1)], "так");
        assert_eq!(out.tier, Tier::Literal);
        assert_eq!(out.reply, "literal");
        assert_eq!(out.metrics.rules_evaluated, 0);
    }

    #[test]
    fn wildcard_tier_collects_every_match_in_priority_order() {
        let out = run(
            vec![
                Rule::new("(* люблю *)", "love", 85),
                Rule::new("(Я ?->a *)", Response::dynamic(|vars| format!("a={}", vars["a"])), 60),
                Rule::new("*", "any", -1000),
            ],
            "Я люблю яблука",
        );

        assert_eq!(out.tier, Tier::Wildcard);
        assert_eq!(out.reply, "love");
        assert_eq!(out.candidates.len(), 3);
        assert!(out.bindings.is_empty());
        assert_eq!(out.candidates[1].bindings["a"], "люблю");
    }

    #[test]
    fn budget_exhaustion_skips_only_that_rule() {
        let compiled = CompiledRules::new(vec![Rule::new("* * * * z", "never", 10), Rule::new("*", "any", -1000)]);
        let out = Responder::new("a b c d e f g h", &compiled, MatchLimits { max_steps: 3 }, APOLOGY).run();

        assert_eq!(out.metrics.aborted, vec![0]);
        assert_eq!(out.tier, Tier::Wildcard);
        assert_eq!(out.reply, "any");
    }

    #[test]
    fn universal_tier_catches_what_the_matcher_gave_up_on() {
        let compiled = CompiledRules::new(vec![Rule::new("*", "any", -1000)]);
        let out = Responder::new("a b", &compiled, MatchLimits { max_steps: 1 }, APOLOGY).run();

        assert_eq!(out.metrics.aborted, vec![0]);
        assert_eq!(out.tier, Tier::Universal);
        assert_eq!(out.reply, "any");
    }

    #[test]
    fn default_reply_when_nothing_matches() {
        let out = run(vec![Rule::new("привіт", "hi", 0), Rule::new("* a", "a", 0)], "b");
        assert_eq!(out.tier, Tier::Default);
        assert_eq!(out.rule, None);
        assert_eq!(out.reply, APOLOGY);
    }

    #[test]
    fn empty_input_hits_star() {
        let out = run(vec![Rule::new("*", "any", -1000)], "   ");
        assert_eq!(out.tier, Tier::Wildcard);
        assert_eq!(out.reply, "any");
    }
}
