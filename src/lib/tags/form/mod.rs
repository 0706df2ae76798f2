//! Form field helpers.
//!
//! Every field takes an [`Attrs`] for extra attributes. The helper's own
//! attributes (`type`, `name`, `value`) win over anything passed in, while
//! `id` defaults to the field name only when the caller did not set one.
use tracing::warn;

use crate::html::{Attrs, HTML, Literal, Render, escape};

/// One `<option>` of a select box.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

impl From<&str> for SelectOption {
    fn from(both: &str) -> Self {
        Self::new(both, both)
    }
}

impl From<String> for SelectOption {
    fn from(both: String) -> Self {
        Self::new(both.clone(), both)
    }
}

impl From<(&str, &str)> for SelectOption {
    fn from((label, value): (&str, &str)) -> Self {
        Self::new(label, value)
    }
}

impl From<(String, String)> for SelectOption {
    fn from((label, value): (String, String)) -> Self {
        Self::new(label, value)
    }
}

/// Opening `<form>` tag.
///
/// Browsers only submit GET and POST, so any other method is sent as POST
/// with the real verb in a hidden `_method` field.
pub fn form(url: &str, method: &str, multipart: bool, attrs: Attrs) -> Literal {
    let mut attrs = attrs;
    if multipart {
        attrs.insert("enctype", "multipart/form-data");
    }

    let method_tag = if method.eq_ignore_ascii_case("GET") || method.eq_ignore_ascii_case("POST") {
        attrs.insert("method", method);
        Literal::empty()
    } else {
        attrs.insert("method", "POST");
        let hidden = Attrs::new()
            .set("type", "hidden")
            .set("id", "_method")
            .set("name", "_method")
            .set("value", method);
        HTML.element("input", None, &hidden)
    };
    attrs.insert("action", url);

    HTML.open("form", &attrs) + method_tag
}

pub fn end_form() -> Literal {
    Literal::new("</form>")
}

fn input(kind: &str, name: &str, value: &dyn Render, attrs: Attrs) -> Literal {
    let mut attrs = attrs.set("type", kind).set("name", name).set("value", value);
    attrs.insert_default("id", name);
    HTML.element("input", None, &attrs)
}

/// `<input type="text">`. A `None` value leaves out the `value` attribute.
pub fn text(name: &str, value: impl Render, attrs: Attrs) -> Literal {
    input("text", name, &value, attrs)
}

pub fn hidden(name: &str, value: impl Render, attrs: Attrs) -> Literal {
    input("hidden", name, &value, attrs)
}

/// File upload field. The enclosing form must be multipart.
pub fn file(name: &str, value: impl Render, attrs: Attrs) -> Literal {
    input("file", name, &value, attrs)
}

pub fn password(name: &str, value: impl Render, attrs: Attrs) -> Literal {
    input("password", name, &value, attrs)
}

/// Multi-line text area. A `size` attribute of the form `COLSxROWS` is
/// split into `cols` and `rows`.
pub fn textarea(name: &str, content: impl Render, attrs: Attrs) -> Literal {
    let mut attrs = attrs.set("name", name);
    attrs.insert_default("id", name);

    if let Some(size) = attrs.take("size") {
        match parse_size(size.as_str()) {
            Some((cols, rows)) => {
                attrs.insert("cols", cols);
                attrs.insert("rows", rows);
            }
            None => warn!(size = %size, "ignoring textarea size that is not COLSxROWS"),
        }
    }

    HTML.element("textarea", Some(&escape(&content)), &attrs)
}

/// Parse `WxH`-style sizes used by `textarea` and `image`.
pub(crate) fn parse_size(size: &str) -> Option<(u32, u32)> {
    let (first, second) = size.split_once('x')?;
    Some((first.trim().parse().ok()?, second.trim().parse().ok()?))
}

pub fn checkbox(name: &str, value: impl Render, checked: bool, attrs: Attrs) -> Literal {
    let attrs = if checked {
        attrs.flag("checked", true)
    } else {
        attrs
    };
    input("checkbox", name, &value, attrs)
}

/// Radio button. The id is `name_value`, with the value made safe for ids,
/// unless the caller passes its own.
pub fn radio(name: &str, value: impl Render, checked: bool, attrs: Attrs) -> Literal {
    let mut attrs = if checked {
        attrs.flag("checked", true)
    } else {
        attrs
    };
    let id = format!("{name}_{}", safe_id_component(&value.to_text()));
    attrs.insert_default("id", id.as_str());
    input("radio", name, &value, attrs)
}

/// Whitespace becomes `_`, anything but word characters and `-` is dropped,
/// and the result is lowercased.
pub fn safe_id_component(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

/// Submit button. Unlike the other fields it gets no default `id`.
pub fn submit(value: &str, name: &str, attrs: Attrs) -> Literal {
    let attrs = attrs
        .set("type", "submit")
        .set("name", name)
        .set("value", value);
    HTML.element("input", None, &attrs)
}

/// `<option>` tags, one per line, with the `selected` values marked.
pub fn options_for_select(options: &[SelectOption], selected: &[&str]) -> Literal {
    let rendered = options.iter().map(|option| {
        let attrs = Attrs::new()
            .set("value", option.value.as_str())
            .flag("selected", selected.contains(&option.value.as_str()));
        HTML.element("option", Some(&escape(option.label.as_str())), &attrs)
    });
    Literal::new("\n").join(rendered)
}

/// Drop-down select box.
pub fn select(name: &str, selected: &[&str], options: &[SelectOption], attrs: Attrs) -> Literal {
    let attrs = attrs.set("name", name);
    let mut body = Literal::new("\n");
    body += options_for_select(options, selected);
    body += Literal::new("\n");
    HTML.element("select", Some(&body), &attrs)
}
