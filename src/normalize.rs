//! Text canonicalization shared by patterns and user input.
//!
//! Both sides of every comparison go through [`normalize`], so matching is
//! insensitive to case, surrounding parentheses and whitespace layout while
//! keeping all other punctuation significant.

/// Canonicalize `text`: drop `(`/`)`, trim, collapse whitespace runs
/// (including NBSP) to a single space and lowercase.
///
/// Parentheses go first so that removing them can never leave a doubled or
/// trailing space behind; this keeps the function idempotent.
///
/// ```
/// assert_eq!(phatic::normalize("  HeLLo\u{a0}  (World)  "), "hello world");
/// ```
pub fn normalize(text: &str) -> String {
    let without_parens = text.replace(['(', ')'], "");
    let collapsed = regex!(r"[\s\u{00A0}]+").replace_all(without_parens.trim(), " ");
    collapsed.to_lowercase()
}

/// Normalize `text` and split it into tokens. Never yields empty tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text).split_whitespace().map(str::to_owned).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_trims_collapses_and_strips_parens() {
        let nbsp = '\u{00A0}';
        assert_eq!(normalize(&format!("  HeLLo{nbsp}  (World)  ")), "hello world");
    }

    #[test]
    fn keeps_punctuation_and_folds_cyrillic() {
        assert_eq!(normalize("Привіт, Світ!"), "привіт, світ!");
        assert_eq!(normalize("КОМП'ЮТЕР"), "комп'ютер");
    }

    #[test]
    fn tokenize_drops_empty_tokens() {
        assert_eq!(tokenize("  A  (B)   C  "), vec!["a", "b", "c"]);
        assert!(tokenize("").is_empty());
        assert!(tokenize(" ( ) \u{00A0} ").is_empty());
    }

    #[test]
    fn normalize_is_idempotent() {
        let samples = [
            "",
            "   ",
            "a ( b",
            "(Я ?->a *)",
            "  Квадрат  гіпотенузи\u{00A0}дорівнює   сумі квадратів катетів. ",
            "Invite me if you come, come, come",
            "(( x ))  y\t\nz",
            "İstanbul",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn parens_inside_tokens_are_removed_not_split() {
        assert_eq!(tokenize("(a)b c(d)"), vec!["ab", "cd"]);
    }
}
