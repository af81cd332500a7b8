//! Rule compilation and indexing.
//!
//! This module holds the *static* side of the engine: the structures derived
//! once from the rule list when an [`crate::Engine`] is built.
//!
//! 1. **Compile**: every pattern is parsed into a [`CompiledPattern`].
//! 2. **Sort**: rules are ordered by priority, highest first. The sort is
//!    stable, so rules with equal priority keep their catalog order.
//! 3. **Index**: rules are split by tier.
//!
//! ## Invariants
//!
//! - `RuleId` is an index into `CompiledRules::rules` (sorted order).
//! - `RuleIndex::literal` maps a normalized pattern to the *first* literal
//!   rule with that text in sorted order; later duplicates are unreachable.
//! - Rules with unsupported syntax appear in no tier index.
//! - `RuleIndex::wildcard` is in sorted order, so the first wildcard match is
//!   also the highest-priority one.

use super::pattern::CompiledPattern;
use crate::Rule;
use std::collections::HashMap;
use tracing::warn;

/// Rule identifier (index into the sorted rules vector).
pub(crate) type RuleId = usize;

#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub rule: Rule,
    pub pattern: CompiledPattern,
    /// Position in the catalog as supplied to the engine.
    pub order: usize,
}

#[derive(Default, Debug, Clone)]
pub struct RuleIndex {
    pub literal: HashMap<String, RuleId>,
    pub wildcard: Vec<RuleId>,
    pub universal: Option<RuleId>,
}

/// Sorted, compiled rule set with tier indexes.
#[derive(Debug, Clone)]
pub struct CompiledRules {
    pub rules: Vec<CompiledRule>,
    pub index: RuleIndex,
}

impl CompiledRules {
    pub fn new(rules: Vec<Rule>) -> Self {
        let mut compiled: Vec<CompiledRule> = rules
            .into_iter()
            .enumerate()
            .map(|(order, rule)| CompiledRule { pattern: CompiledPattern::parse(&rule.pattern), rule, order })
            .collect();

        // `sort_by` is stable: equal priorities keep catalog order.
        compiled.sort_by(|a, b| b.rule.priority.cmp(&a.rule.priority));

        let mut index = RuleIndex::default();
        for (id, entry) in compiled.iter().enumerate() {
            // Unsupported patterns are kept for diagnostics but indexed in no tier.
            if !entry.pattern.is_supported() {
                warn!(pattern = %entry.rule.pattern, "pattern uses unsupported syntax and will never match");
                continue;
            }

            if entry.pattern.is_literal() {
                index.literal.entry(entry.pattern.normalized.clone()).or_insert(id);
            } else {
                index.wildcard.push(id);
            }

            if entry.pattern.is_universal() && index.universal.is_none() {
                index.universal = Some(id);
            }
        }

        CompiledRules { rules: compiled, index }
    }

    pub fn get(&self, id: RuleId) -> &CompiledRule {
        &self.rules[id]
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }
}
