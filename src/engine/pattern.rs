//! Pattern compilation.
//!
//! A pattern string is tokenized with the same normalizer as user input and
//! every token is classified once, so the matcher never re-parses strings in
//! its hot loop.
//!
//! | token form                    | kind          | consumes          |
//! |-------------------------------|---------------|-------------------|
//! | `*`                           | `Star`        | zero or more      |
//! | `?`                           | `One`         | exactly one       |
//! | `?->x` (`x` one ASCII letter) | `Capture(x)`  | exactly one       |
//! | `<x>`, any other `?…` form    | `Unsupported` | never matches     |
//! | anything else                 | `Literal`     | one equal token   |
//!
//! ## Invariants
//!
//! - `required.len() == tokens.len() + 1` and `required[i]` is the minimum
//!   number of input tokens that `tokens[i..]` can consume.
//! - Tier membership is decided on the normalized pattern *string*: any `*` or
//!   `?` character anywhere (even inside a literal such as `значення?`) moves a
//!   rule out of the literal tier.

use crate::normalize::normalize;

bitflags::bitflags! {
    /// Coarse features of a compiled pattern.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PatternFlags: u8 {
        const HAS_STAR    = 1 << 0;
        const HAS_ONE     = 1 << 1;
        const HAS_CAPTURE = 1 << 2;
        const UNSUPPORTED = 1 << 3;

        const WILDCARD = Self::HAS_STAR.bits() | Self::HAS_ONE.bits() | Self::HAS_CAPTURE.bits();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternToken {
    Literal(String),
    Star,
    One,
    Capture(String),
    Unsupported(String),
}

impl PatternToken {
    /// Classify an already-normalized token.
    ///
    /// Any token starting with `?` other than `?` itself and `?->x` is
    /// unsupported, so `?!` or `?->ab` make the whole pattern unmatchable.
    /// `<name>` is unsupported too. A `?` later in a token (`значення?`) is
    /// literal text.
    pub fn classify(token: &str) -> Self {
        match token {
            "*" => PatternToken::Star,
            "?" => PatternToken::One,
            _ => {
                if let Some(caps) = regex!(r"^\?->([a-z])$").captures(token) {
                    return PatternToken::Capture(caps[1].to_string());
                }
                let bare_capture = token.len() > 2 && token.starts_with('<') && token.ends_with('>');
                if bare_capture || token.starts_with('?') {
                    return PatternToken::Unsupported(token.to_string());
                }
                PatternToken::Literal(token.to_string())
            }
        }
    }

    fn min_len(&self) -> usize {
        match self {
            PatternToken::Star => 0,
            _ => 1,
        }
    }
}

/// A pattern parsed into tokens plus the metadata the engine indexes on.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pub normalized: String,
    pub tokens: Vec<PatternToken>,
    pub flags: PatternFlags,
    required: Vec<usize>,
}

impl CompiledPattern {
    pub fn parse(pattern: &str) -> Self {
        let normalized = normalize(pattern);
        let tokens: Vec<PatternToken> = normalized.split_whitespace().map(PatternToken::classify).collect();

        let mut flags = PatternFlags::empty();
        for token in &tokens {
            flags |= match token {
                PatternToken::Star => PatternFlags::HAS_STAR,
                PatternToken::One => PatternFlags::HAS_ONE,
                PatternToken::Capture(_) => PatternFlags::HAS_CAPTURE,
                PatternToken::Unsupported(_) => PatternFlags::UNSUPPORTED,
                PatternToken::Literal(_) => PatternFlags::empty(),
            };
        }

        let mut required = vec![0; tokens.len() + 1];
        for (idx, token) in tokens.iter().enumerate().rev() {
            required[idx] = required[idx + 1] + token.min_len();
        }

        CompiledPattern { normalized, tokens, flags, required }
    }

    /// True when the pattern has no wildcard token and no `*` or `?` inside
    /// any literal either, so it is answered by exact string comparison.
    pub fn is_literal(&self) -> bool {
        !self.flags.intersects(PatternFlags::WILDCARD) && !self.normalized.contains(['*', '?'])
    }

    /// True when every match consumes exactly `required_from(0)` tokens.
    pub fn is_fixed_length(&self) -> bool {
        !self.flags.contains(PatternFlags::HAS_STAR)
    }

    /// True for the catch-all pattern consisting of a single `*`.
    pub fn is_universal(&self) -> bool {
        self.normalized == "*"
    }

    pub fn is_supported(&self) -> bool {
        !self.flags.contains(PatternFlags::UNSUPPORTED)
    }

    /// Minimum number of input tokens needed by `tokens[idx..]`.
    pub fn required_from(&self, idx: usize) -> usize {
        self.required[idx]
    }

    /// Capture names in pattern order (duplicates included).
    pub fn capture_names(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().filter_map(|t| match t {
            PatternToken::Capture(name) => Some(name.as_str()),
            _ => None,
        })
    }

    /// Capture names that appear more than once.
    pub fn duplicate_captures(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        let mut dups = Vec::new();
        for name in self.capture_names() {
            if seen.contains(&name) {
                if !dups.contains(&name) {
                    dups.push(name);
                }
            } else {
                seen.push(name);
            }
        }
        dups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_tokens() {
        assert_eq!(PatternToken::classify("*"), PatternToken::Star);
        assert_eq!(PatternToken::classify("?"), PatternToken::One);
        assert_eq!(PatternToken::classify("?->a"), PatternToken::Capture("a".into()));
        assert_eq!(PatternToken::classify("<a>"), PatternToken::Unsupported("<a>".into()));
        assert_eq!(PatternToken::classify("?->ab"), PatternToken::Unsupported("?->ab".into()));
        assert_eq!(PatternToken::classify("?x"), PatternToken::Unsupported("?x".into()));
        assert_eq!(PatternToken::classify("значення?"), PatternToken::Literal("значення?".into()));
        assert_eq!(PatternToken::classify("<3"), PatternToken::Literal("<3".into()));
    }

    #[test]
    fn capture_names_are_case_insensitive() {
        let pattern = CompiledPattern::parse("(Я ?->A *)");
        assert_eq!(pattern.capture_names().collect::<Vec<_>>(), vec!["a"]);
        assert!(pattern.flags.contains(PatternFlags::HAS_CAPTURE | PatternFlags::HAS_STAR));
    }

    #[test]
    fn tier_classification_uses_normalized_string() {
        assert!(CompiledPattern::parse("Ви не відверті зі мною").is_literal());
        assert!(!CompiledPattern::parse("Це має для вас велике значення?").is_literal());
        assert!(!CompiledPattern::parse("(* комп'ютер *)").is_literal());
        assert!(CompiledPattern::parse(" ( * ) ").is_universal());
        assert!(!CompiledPattern::parse("* *").is_universal());
    }

    #[test]
    fn wildcard_flags_rule_out_the_literal_tier() {
        let pattern = CompiledPattern::parse("я ? тут");
        assert!(pattern.flags.intersects(PatternFlags::WILDCARD));
        assert!(pattern.is_fixed_length());
        assert!(!pattern.is_literal());

        let keyword = CompiledPattern::parse("значення?");
        assert!(!keyword.flags.intersects(PatternFlags::WILDCARD));
        assert!(!keyword.is_literal());
        assert!(!CompiledPattern::parse("* a").is_fixed_length());
    }

    #[test]
    fn required_counts_skip_stars() {
        let pattern = CompiledPattern::parse("* ?->a бентежить ?->b *");
        let required: Vec<usize> = (0..=pattern.tokens.len()).map(|i| pattern.required_from(i)).collect();
        assert_eq!(required, vec![3, 3, 2, 1, 0, 0]);
    }

    #[test]
    fn unsupported_tokens_flag_the_pattern() {
        let pattern = CompiledPattern::parse("hello <name>");
        assert!(!pattern.is_supported());
        assert!(CompiledPattern::parse("hello ?->n").is_supported());
    }

    #[test]
    fn duplicate_captures_are_reported_once() {
        let pattern = CompiledPattern::parse("?->a ?->b ?->a ?->a");
        assert_eq!(pattern.duplicate_captures(), vec!["a"]);
        assert!(CompiledPattern::parse("?->a ?->b").duplicate_captures().is_empty());
    }
}
