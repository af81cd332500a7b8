use phatic::{Bindings, RespondDetails, Tier};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

/// Print how a reply was selected. Goes to stderr so stdout keeps only replies.
pub fn print_details(details: &RespondDetails, color: bool) {
    let palette = ansi::Palette::new(color);
    eprintln!("\n{}", palette.bold(palette.paint(format!("⚙  Input: \"{}\"", details.normalized), ansi::CYAN)));

    eprintln!("\n{}", palette.paint("━━━ Selection ━━━", ansi::GRAY));
    let tier = match details.tier {
        Tier::Default => palette.paint(details.tier.to_string(), ansi::YELLOW),
        _ => palette.paint(details.tier.to_string(), ansi::GREEN),
    };
    eprintln!("  {} {}", palette.dim("tier:"), tier);
    match &details.rule {
        Some(rule) => {
            eprintln!(
                "  {} {}  {} {}  {} #{}",
                palette.dim("rule:"),
                palette.paint(&rule.pattern, ansi::CYAN),
                palette.dim("│ priority:"),
                palette.paint(rule.priority.to_string(), ansi::YELLOW),
                palette.dim("│ catalog"),
                rule.order
            );
            if !details.bindings.is_empty() {
                eprintln!("  {} {}", palette.dim("vars:"), fmt_bindings(&details.bindings));
            }
        }
        None => eprintln!("{}", palette.dim("  No rule matched; default reply used")),
    }

    if !details.candidates.is_empty() {
        eprintln!("\n{}", palette.paint("━━━ Wildcard candidates ━━━", ansi::GRAY));
        for (idx, candidate) in details.candidates.iter().enumerate() {
            eprintln!(
                "  {} {} {}",
                palette.paint(format!("[{}]", idx), ansi::GRAY),
                palette.paint(format!("{:>6}", candidate.rule.priority), ansi::YELLOW),
                palette.paint(&candidate.rule.pattern, ansi::BLUE),
            );
            if !candidate.bindings.is_empty() {
                eprintln!("        {}", palette.dim(fmt_bindings(&candidate.bindings)));
            }
        }
    }

    if !details.aborted.is_empty() {
        eprintln!("\n{}", palette.paint("Search budget exhausted for:", ansi::YELLOW));
        for pattern in &details.aborted {
            eprintln!("  • {}", pattern);
        }
    }

    eprintln!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    eprintln!(
        "  Total: {}  │  Literal: {}  │  Wildcard: {} ({} rules, {} steps)",
        palette.paint(format!("{:?}", details.total), ansi::GREEN),
        palette.dim(format!("{:?}", details.literal)),
        palette.paint(format!("{:?}", details.wildcard), ansi::CYAN),
        details.rules_evaluated,
        details.matcher_steps,
    );
    eprintln!();
}

fn fmt_bindings(bindings: &Bindings) -> String {
    bindings.iter().map(|(name, value)| format!("{name}={value:?}")).collect::<Vec<_>>().join(" ")
}
