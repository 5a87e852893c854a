//! Command extraction from raw chat text.

/// Strip a leading directive keyword.
///
/// Returns the trimmed remainder when `text` starts with `directive`
/// (case-insensitive) followed by whitespace and at least one more
/// character; `None` otherwise.
///
/// ```
/// use ak_core::dispatch::command::strip_directive;
///
/// assert_eq!(strip_directive("Run screen process", "run"), Some("screen process"));
/// assert_eq!(strip_directive("running late", "run"), None);
/// assert_eq!(strip_directive("run", "run"), None);
/// ```
pub fn strip_directive<'a>(text: &'a str, directive: &str) -> Option<&'a str> {
    let text = text.trim_start();
    let (head, rest) = text.split_once(char::is_whitespace)?;
    if !head.eq_ignore_ascii_case(directive) {
        return None;
    }
    let rest = rest.trim();
    (!rest.is_empty()).then_some(rest)
}

/// Drop a leading `@mention` addressed to the orchestrator, if present.
pub fn strip_mention<'a>(text: &'a str, mention: &str) -> &'a str {
    let text = text.trim_start();
    match text.split_once(char::is_whitespace) {
        Some((head, rest)) if head.eq_ignore_ascii_case(mention) => rest.trim_start(),
        None if text.eq_ignore_ascii_case(mention) => "",
        _ => text,
    }
}
