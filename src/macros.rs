#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// Build a [`Rule`](crate::Rule) inline.
///
/// ```
/// use phatic::rule;
///
/// let fixed = rule!(pattern: "Ні", priority: 100, response: "Будь ласка, не будьте так небагатослівні...");
/// let echo = rule!(pattern: "(Я ?->a *)", priority: 60, reply: |vars| {
///     format!("Чому саме {}?", vars.get("a").map_or("це", |s| s.as_str()))
/// });
/// assert_eq!(fixed.priority, 100);
/// assert_eq!(echo.priority, 60);
/// ```
#[macro_export]
macro_rules! rule {
    (
        pattern: $pattern:expr
        $(, priority: $priority:expr)?
        , reply: |$vars:ident| $body:expr
        $(,)?
    ) => {{
        $crate::Rule {
            pattern: ($pattern).to_string(),
            response: $crate::Response::dynamic(move |$vars: &$crate::Bindings| -> String { $body }),
            priority: { 0 $(+ $priority)? },
        }
    }};
    (
        pattern: $pattern:expr
        $(, priority: $priority:expr)?
        , response: $response:expr
        $(,)?
    ) => {{
        $crate::Rule {
            pattern: ($pattern).to_string(),
            response: $crate::Response::Static(($response).to_string()),
            priority: { 0 $(+ $priority)? },
        }
    }};
}
