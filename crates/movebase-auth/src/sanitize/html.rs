//! HTML and free-text scrubbing for untrusted strings.

/// Escapes HTML-significant characters into entities.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            other => out.push(other),
        }
    }
    out
}

/// Removes HTML tags from a string. `<script>` and `<style>` elements
/// are removed together with their contents; every other tag is
/// stripped leaving its text behind.
pub fn strip_html_tags(input: &str) -> String {
    let without_script = strip_element(input, "script");
    let without_style = strip_element(&without_script, "style");

    let mut out = String::with_capacity(without_style.len());
    let mut in_tag = false;
    for c in without_style.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

/// Scrubs a free-text field: trims, drops control characters, strips
/// tags, and removes inline event handlers and `javascript:`/`data:`
/// URI schemes.
pub fn sanitize_string(input: &str) -> String {
    let stripped = strip_html_tags(input.trim());

    let mut cleaned: String = stripped
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect();

    cleaned = strip_scheme(&cleaned, "javascript:");
    cleaned = strip_scheme(&cleaned, "data:");
    strip_event_handlers(&cleaned)
}

/// Removes `<name ...>...</name>` elements with their contents,
/// ASCII-case-insensitively. Unclosed elements are removed to the end.
fn strip_element(input: &str, name: &str) -> String {
    let open = format!("<{name}");
    let close = format!("</{name}>");
    let mut out = String::with_capacity(input.len());
    let mut pos = 0;

    while let Some(start) = find_ci(input, &open, pos) {
        out.push_str(&input[pos..start]);
        match find_ci(input, &close, start) {
            Some(end) => pos = end + close.len(),
            None => {
                pos = input.len();
                break;
            }
        }
    }
    out.push_str(&input[pos..]);
    out
}

/// Removes every occurrence of a URI scheme prefix, case-insensitively,
/// so `javascript:alert(1)` degrades to the harmless remainder.
fn strip_scheme(input: &str, scheme: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pos = 0;
    while let Some(start) = find_ci(input, scheme, pos) {
        out.push_str(&input[pos..start]);
        pos = start + scheme.len();
    }
    out.push_str(&input[pos..]);
    out
}

/// Removes inline event handler attributes: an `on<letters>` word
/// immediately followed by `=`.
fn strip_event_handlers(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;

    while i < bytes.len() {
        if (bytes[i] == b'o' || bytes[i] == b'O')
            && i + 1 < bytes.len()
            && (bytes[i + 1] == b'n' || bytes[i + 1] == b'N')
            && (i == 0 || !bytes[i - 1].is_ascii_alphanumeric())
        {
            let mut j = i + 2;
            while j < bytes.len() && bytes[j].is_ascii_alphabetic() {
                j += 1;
            }
            let mut k = j;
            while k < bytes.len() && bytes[k].is_ascii_whitespace() {
                k += 1;
            }
            if j > i + 2 && k < bytes.len() && bytes[k] == b'=' {
                i = k + 1;
                continue;
            }
        }
        // bytes[i] may start a multi-byte char; push the full char.
        let ch_len = input[i..].chars().next().map(char::len_utf8).unwrap_or(1);
        out.push_str(&input[i..i + ch_len]);
        i += ch_len;
    }
    out
}

/// Byte-offset ASCII-case-insensitive substring search.
fn find_ci(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    let haystack_bytes = haystack.as_bytes();
    let needle_bytes = needle.as_bytes();
    if needle_bytes.is_empty() || from >= haystack_bytes.len() {
        return None;
    }
    haystack_bytes[from..]
        .windows(needle_bytes.len())
        .position(|window| window.eq_ignore_ascii_case(needle_bytes))
        .map(|offset| from + offset)
}
