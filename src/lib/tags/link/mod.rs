use crate::html::{Attrs, HTML, Literal, Render, escape};

/// Hyperlink to `url`. An empty label falls back to the URL itself.
///
/// The URL is not modified apart from attribute escaping; the label is
/// escaped unless it is already a [`Literal`].
pub fn link_to(label: impl Render, url: &str, attrs: Attrs) -> Literal {
    let attrs = attrs.set("href", url);
    let label = escape(&label);
    let label = if label.is_empty() {
        escape(url)
    } else {
        label
    };
    HTML.element("a", Some(&label), &attrs)
}

/// Like [`link_to`], but just the (escaped) label when `condition` is false.
pub fn link_to_if(condition: bool, label: impl Render, url: &str, attrs: Attrs) -> Literal {
    if condition {
        link_to(label, url, attrs)
    } else {
        escape(&label)
    }
}

/// Like [`link_to`], but just the (escaped) label when `condition` is true.
pub fn link_to_unless(condition: bool, label: impl Render, url: &str, attrs: Attrs) -> Literal {
    link_to_if(!condition, label, url, attrs)
}
