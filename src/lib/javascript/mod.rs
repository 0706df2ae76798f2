//! Inline JavaScript helpers.
use crate::html::{Attrs, HTML, Literal, Render, builder::cdata_section, escape};

/// Make `code` safe to put inside a single- or double-quoted JavaScript
/// string.
///
/// Backslashes and quotes are backslash-escaped, every line break becomes
/// `\n`, and `</` becomes `<\/` so the string cannot close a `<script>`.
pub fn escape_javascript(code: &str) -> String {
    let mut out = String::with_capacity(code.len() + 8);
    let mut chars = code.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push_str("\\n");
            }
            '<' if chars.peek() == Some(&'/') => {
                chars.next();
                out.push_str("<\\/");
            }
            _ => out.push(ch),
        }
    }
    out
}

/// `code` inside a commented CDATA section.
pub fn javascript_cdata_section(code: &str) -> Literal {
    cdata_section(code)
}

/// `<script type="text/javascript">` around `code`.
pub fn javascript_tag(code: &str, attrs: &Attrs) -> Literal {
    HTML.javascript(&[&code], attrs)
}

/// Link that runs `function` when clicked instead of navigating.
///
/// ```
/// use webhelpers::{html::Attrs, javascript::link_to_function};
///
/// assert_eq!(
///     link_to_function("Greeting", "alert('Hello World!')", Attrs::new()),
///     "<a href=\"#\" onclick=\"alert('Hello World!'); return false;\">Greeting</a>"
/// );
/// ```
pub fn link_to_function(label: impl Render, function: &str, attrs: Attrs) -> Literal {
    let attrs = Attrs::new()
        .set("href", "#")
        .set("onclick", format!("{function}; return false;").as_str())
        .merge(attrs);
    HTML.element("a", Some(&escape(&label)), &attrs)
}

/// `<input type="button">` that runs `function` when clicked.
pub fn button_to_function(label: &str, function: &str, attrs: Attrs) -> Literal {
    let attrs = Attrs::new()
        .set("onclick", format!("{function}; ").as_str())
        .merge(attrs)
        .set("type", "button")
        .set("value", label);
    HTML.element("input", None, &attrs)
}

#[cfg(test)]
mod tests;
