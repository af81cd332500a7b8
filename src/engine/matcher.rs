//! Backtracking token matcher.
//!
//! The matcher aligns a [`CompiledPattern`] against a token sequence with two
//! cursors (`p` into the pattern, `i` into the input). Matches are
//! whole-sequence: the pattern must consume every input token.
//!
//! ```text
//! pattern: [ я ][ ?->a ][ *            ]
//! input:   [ я ][ люблю ][ яблука ][ … ]
//!            p=0  p=1      p=2 tries spans n..=0, longest first
//! ```
//!
//! `*` is the only branching point. On failure of a branch every binding it
//! wrote is rolled back, so a failed attempt always reports empty bindings and
//! a successful one only carries bindings from the winning alignment.
//!
//! Worst-case cost is exponential in the number of `*` tokens. Each call to
//! `step` is counted against [`MatchLimits::max_steps`]; running out aborts
//! the attempt with [`MatchError::BudgetExhausted`]. Recursion depth is bounded
//! by the pattern length since every call advances `p`.

use super::pattern::{CompiledPattern, PatternToken};
use crate::error::MatchError;
use crate::normalize::tokenize;
use crate::Bindings;
use tracing::warn;

/// Search bounds for a single match attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchLimits {
    /// Maximum number of matcher steps (pattern positions visited).
    pub max_steps: usize,
}

impl Default for MatchLimits {
    fn default() -> Self {
        MatchLimits { max_steps: 100_000 }
    }
}

/// Result of [`match_pattern`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Match {
    pub matched: bool,
    pub bindings: Bindings,
}

/// A completed attempt, with the work it took.
#[derive(Debug, Clone, Default)]
pub(crate) struct MatchOutcome {
    pub matched: bool,
    pub bindings: Bindings,
    pub steps: usize,
}

/// Match `pattern` against `input`, normalizing both.
///
/// Unsupported pattern syntax and an exhausted search budget both report
/// `matched == false` with no bindings.
///
/// ```
/// let m = phatic::match_pattern("(Я ?->a *)", "Я люблю яблука");
/// assert!(m.matched);
/// assert_eq!(m.bindings["a"], "люблю");
/// ```
pub fn match_pattern(pattern: &str, input: &str) -> Match {
    let compiled = CompiledPattern::parse(pattern);
    let tokens = tokenize(input);
    match match_tokens(&compiled, &tokens, MatchLimits::default()) {
        Ok(outcome) => Match { matched: outcome.matched, bindings: outcome.bindings },
        Err(err) => {
            warn!(pattern, %err, "match attempt aborted");
            Match::default()
        }
    }
}

/// Match a compiled pattern against normalized input tokens.
pub(crate) fn match_tokens(
    pattern: &CompiledPattern,
    input: &[String],
    limits: MatchLimits,
) -> Result<MatchOutcome, MatchError> {
    if !pattern.is_supported() {
        return Ok(MatchOutcome::default());
    }
    if pattern.is_fixed_length() && input.len() != pattern.required_from(0) {
        return Ok(MatchOutcome::default());
    }

    let mut matcher = Matcher { pattern, input, limits, steps: 0, bindings: Bindings::new() };
    let matched = matcher.step(0, 0)?;
    let bindings = if matched { matcher.bindings } else { Bindings::new() };

    Ok(MatchOutcome { matched, bindings, steps: matcher.steps })
}

struct Matcher<'a> {
    pattern: &'a CompiledPattern,
    input: &'a [String],
    limits: MatchLimits,
    steps: usize,
    bindings: Bindings,
}

impl Matcher<'_> {
    fn step(&mut self, p: usize, i: usize) -> Result<bool, MatchError> {
        self.steps += 1;
        if self.steps > self.limits.max_steps {
            return Err(MatchError::BudgetExhausted { limit: self.limits.max_steps });
        }

        let tokens = &self.pattern.tokens;
        if p == tokens.len() {
            return Ok(i == self.input.len());
        }

        // Not enough input left for the mandatory tokens ahead.
        let remaining = self.input.len() - i;
        if remaining < self.pattern.required_from(p) {
            return Ok(false);
        }

        match &tokens[p] {
            PatternToken::Star => {
                let max_span = remaining - self.pattern.required_from(p + 1);
                for span in (0..=max_span).rev() {
                    if self.step(p + 1, i + span)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            PatternToken::One => {
                if i >= self.input.len() {
                    return Ok(false);
                }
                self.step(p + 1, i + 1)
            }
            PatternToken::Capture(name) => {
                let Some(token) = self.input.get(i) else {
                    return Ok(false);
                };
                // Last write wins; restore whatever was there if this branch fails.
                let previous = self.bindings.insert(name.clone(), token.clone());
                if self.step(p + 1, i + 1)? {
                    return Ok(true);
                }
                match previous {
                    Some(value) => self.bindings.insert(name.clone(), value),
                    None => self.bindings.remove(name),
                };
                Ok(false)
            }
            PatternToken::Literal(literal) => match self.input.get(i) {
                Some(token) if token == literal => self.step(p + 1, i + 1),
                _ => Ok(false),
            },
            PatternToken::Unsupported(_) => Ok(false),
        }
    }
}
