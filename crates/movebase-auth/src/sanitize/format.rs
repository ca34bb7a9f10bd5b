//! Format validation and filename scrubbing.

use validator::ValidateEmail;

/// Validates an email address format.
pub fn is_valid_email(input: &str) -> bool {
    input.validate_email()
}

/// Validates a phone number shape: optional leading `+`, 7–15 digits,
/// with spaces, dashes, dots, and parentheses tolerated as grouping.
pub fn is_valid_phone(input: &str) -> bool {
    let trimmed = input.trim();
    let rest = trimmed.strip_prefix('+').unwrap_or(trimmed);

    let mut digits = 0usize;
    for c in rest.chars() {
        match c {
            '0'..='9' => digits += 1,
            ' ' | '-' | '.' | '(' | ')' => {}
            _ => return false,
        }
    }
    (7..=15).contains(&digits)
}

/// Validates a URL: `http`/`https` only, with a nonempty host. Every
/// other scheme (`javascript:`, `data:`, `file:`, ...) is rejected
/// outright rather than sanitized.
pub fn is_valid_url(input: &str) -> bool {
    let rest = if let Some(rest) = strip_prefix_ci(input, "https://") {
        rest
    } else if let Some(rest) = strip_prefix_ci(input, "http://") {
        rest
    } else {
        return false;
    };

    let host = rest.split(['/', '?', '#']).next().unwrap_or("");
    !host.is_empty() && !host.contains(char::is_whitespace) && !rest.contains(char::is_whitespace)
}

/// Scrubs a filename: path separators and traversal sequences are
/// stripped, control characters dropped, whitespace collapsed to
/// underscores, length capped.
pub fn sanitize_filename(input: &str) -> String {
    let no_traversal = input.replace("..", "");

    let sanitized: String = no_traversal
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else if c.is_whitespace() {
                '_'
            } else {
                '\0'
            }
        })
        .filter(|c| *c != '\0')
        .take(200)
        .collect();

    let trimmed = sanitized.trim_matches('.').to_string();
    if trimmed.is_empty() {
        "unnamed_file".to_string()
    } else {
        trimmed
    }
}

fn strip_prefix_ci<'a>(input: &'a str, prefix: &str) -> Option<&'a str> {
    let n = prefix.len();
    if input.len() >= n && input.as_bytes()[..n].eq_ignore_ascii_case(prefix.as_bytes()) {
        // The matched bytes are ASCII, so n is a char boundary.
        Some(&input[n..])
    } else {
        None
    }
}
