//! The tag builder.
//!
//! [`tag`] assembles a complete element from a name, content and [`Attrs`].
//! [`HtmlBuilder::get`] is the name-keyed factory on top of it: it hands out an
//! [`Unfinished`] element that only needs content and attributes. A few names
//! (`comment`, `script`/`javascript`, `literal`) resolve to elements with
//! their own construction rules.
use std::collections::BTreeMap;

use color_eyre::eyre::eyre;
use tracing::trace;

use super::{Literal, Render, escape};

/// Elements that never have children or a closing tag.
pub const VOID_TAGS: &[&str] = &[
    "area", "base", "basefont", "br", "col", "frame", "hr", "img", "input", "isindex", "link",
    "meta", "param",
];

/// Elements laid out on their own lines by the pretty builder.
pub const BLOCK_TAGS: &[&str] = &[
    "applet",
    "blockquote",
    "body",
    "br",
    "dd",
    "div",
    "dl",
    "dt",
    "fieldset",
    "form",
    "frameset",
    "head",
    "hr",
    "html",
    "iframe",
    "map",
    "menu",
    "noframes",
    "noscript",
    "object",
    "ol",
    "optgroup",
    "p",
    "param",
    "script",
    "select",
    "table",
    "tbody",
    "tfoot",
    "thead",
    "tr",
    "ul",
    "var",
];

pub fn is_void(name: &str) -> bool {
    VOID_TAGS.contains(&name)
}

pub fn is_block(name: &str) -> bool {
    BLOCK_TAGS.contains(&name)
}

/// Attribute value that means "leave this attribute out".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Exclude;

impl Render for Exclude {
    fn to_text(&self) -> std::borrow::Cow<'_, str> {
        std::borrow::Cow::Borrowed("")
    }

    fn is_absent(&self) -> bool {
        true
    }
}

/// The attributes of a tag, rendered in name order.
///
/// Values are escaped when they are set. A single trailing `_` is dropped from
/// names, so `class_` renders as `class`. Setting an absent value (`None` or
/// [`Exclude`]) removes the attribute.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attrs {
    values: BTreeMap<String, Literal>,
    contents: Option<Vec<Literal>>,
}

fn attr_name(name: &str) -> &str {
    name.strip_suffix('_').unwrap_or(name)
}

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, name: &str, value: impl Render) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Render) {
        let name = attr_name(name);
        if value.is_absent() {
            self.values.remove(name);
        } else {
            self.values.insert(name.to_owned(), escape(&value));
        }
    }

    /// Boolean attribute: `true` renders as `name="name"`, `false` removes it.
    pub fn flag(mut self, name: &str, on: bool) -> Self {
        self.insert_flag(name, on);
        self
    }

    pub fn insert_flag(&mut self, name: &str, on: bool) {
        let name = attr_name(name);
        if on {
            self.values.insert(name.to_owned(), Literal::new(name));
        } else {
            self.values.remove(name);
        }
    }

    pub fn exclude(mut self, name: &str) -> Self {
        self.values.remove(attr_name(name));
        self
    }

    /// Set a value only when the attribute is not present yet.
    pub fn insert_default(&mut self, name: &str, value: impl Render) {
        if !self.contains(name) {
            self.insert(name, value);
        }
    }

    /// Content to use instead of positional content.
    pub fn contents(mut self, items: &[&dyn Render]) -> Self {
        self.contents = Some(items.iter().map(|item| escape(*item)).collect());
        self
    }

    /// Overlay `other` on top of these attributes.
    pub fn merge(mut self, other: Attrs) -> Self {
        self.values.extend(other.values);
        if other.contents.is_some() {
            self.contents = other.contents;
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(attr_name(name)).map(Literal::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(attr_name(name))
    }

    /// Remove an attribute and return its (escaped) value.
    pub fn take(&mut self, name: &str) -> Option<Literal> {
        self.values.remove(attr_name(name))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.contents.is_none()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Literal)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn write_to(&self, out: &mut Literal) {
        for (name, value) in &self.values {
            out.push_markup(" ");
            out.push_markup(name);
            out.push_markup("=\"");
            out.push_markup(value.as_str());
            out.push_markup("\"");
        }
    }
}

impl<K: AsRef<str>, V: Render> FromIterator<(K, V)> for Attrs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Attrs::new();
        for (name, value) in iter {
            attrs.insert(name.as_ref(), value);
        }
        attrs
    }
}

/// Produces tags in one of two layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HtmlBuilder {
    pretty: bool,
}

/// The compact builder: no whitespace is added around any element.
pub static HTML: HtmlBuilder = HtmlBuilder::compact();

/// Build a complete tag with the compact builder.
pub fn tag(name: &str, content: &[&dyn Render], attrs: &Attrs) -> color_eyre::Result<Literal> {
    HTML.tag(name, content, attrs)
}

impl HtmlBuilder {
    pub const fn compact() -> Self {
        Self { pretty: false }
    }

    /// Block elements go on their own lines.
    pub const fn pretty() -> Self {
        Self { pretty: true }
    }

    /// Build a complete tag.
    ///
    /// Fails when both positional content and [`Attrs::contents`] are given,
    /// or when content is given to a void element.
    pub fn tag(
        &self,
        name: &str,
        content: &[&dyn Render],
        attrs: &Attrs,
    ) -> color_eyre::Result<Literal> {
        let body = match (&attrs.contents, content) {
            (Some(_), [_, ..]) => {
                return Err(eyre!(
                    "<{name}>: positional content cannot be combined with attribute contents"
                ));
            }
            (Some(items), []) => concat_markup(items),
            (None, items) => items.iter().map(|item| escape(*item)).collect(),
        };

        let body = (!body.is_empty()).then_some(body);
        if body.is_some() && is_void(name) {
            return Err(eyre!("<{name}> is a void element and cannot have content"));
        }

        Ok(self.element(name, body.as_ref(), attrs))
    }

    /// Look up the unfinished element for a tag name.
    ///
    /// Names are case-insensitive; names starting with `_` are reserved.
    pub fn get(&self, name: &str) -> color_eyre::Result<Unfinished> {
        if name.starts_with('_') {
            return Err(eyre!("tag name {name:?} is reserved"));
        }

        let name = name.to_lowercase();
        trace!(tag = %name, "resolving unfinished tag");
        let special = match name.as_str() {
            "comment" => Some(Unfinished::Comment),
            "script" | "javascript" => Some(Unfinished::Script(*self)),
            "literal" => Some(Unfinished::Literal),
            _ => None,
        };
        Ok(special.unwrap_or(Unfinished::Tag {
            name,
            builder: *self,
        }))
    }

    /// Concatenate values, escaping each one.
    pub fn concat(&self, items: &[&dyn Render]) -> Literal {
        items.iter().map(|item| escape(*item)).collect()
    }

    /// Trust raw markup as-is.
    pub fn literal(&self, markup: &str) -> Literal {
        Literal::new(markup)
    }

    /// `<!--...-->` around the concatenated text of `parts`.
    pub fn comment(&self, parts: &[&dyn Render]) -> Literal {
        let mut out = Literal::new("<!--");
        for part in parts {
            out.push_markup(&part.to_text());
        }
        out.push_markup("-->");
        out
    }

    /// Inline script, with the code shielded in a CDATA section.
    pub fn javascript(&self, code: &[&dyn Render], attrs: &Attrs) -> Literal {
        let mut attrs = attrs.clone();
        attrs.insert_default("type", "text/javascript");

        let joined = code
            .iter()
            .map(|part| part.to_text().into_owned())
            .collect::<Vec<_>>()
            .join("\n");
        let body = (!joined.is_empty()).then(|| cdata_section(&joined));
        self.element("script", body.as_ref(), &attrs)
    }

    /// Render an element. Void elements without a body self-close.
    pub(crate) fn element(&self, name: &str, body: Option<&Literal>, attrs: &Attrs) -> Literal {
        let block = self.pretty && is_block(name);
        let mut out = Literal::new("<");
        out.push_markup(name);
        attrs.write_to(&mut out);

        match body {
            None if is_void(name) => {
                out.push_markup(" />");
                if block {
                    out.push_markup("\n");
                }
            }
            body => {
                out.push_markup(">");
                if block {
                    out.push_markup("\n");
                }
                if let Some(body) = body {
                    out.push_markup(body.as_str());
                }
                if block {
                    out.push_markup("\n");
                }
                out.push_markup("</");
                out.push_markup(name);
                out.push_markup(">");
                if block {
                    out.push_markup("\n");
                }
            }
        }
        out
    }

    /// Just the opening tag, for elements closed elsewhere (e.g. `<form>`).
    pub(crate) fn open(&self, name: &str, attrs: &Attrs) -> Literal {
        let mut out = Literal::new("<");
        out.push_markup(name);
        attrs.write_to(&mut out);
        out.push_markup(">");
        out
    }
}

/// Wrap script text so an HTML parser leaves it alone.
pub(crate) fn cdata_section(code: &str) -> Literal {
    Literal::new(format!("\n//<![CDATA[\n{code}\n//]]>\n"))
}

fn concat_markup(items: &[Literal]) -> Literal {
    items.iter().cloned().collect()
}

/// An element that still needs its content and attributes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Unfinished {
    Tag { name: String, builder: HtmlBuilder },
    Comment,
    Script(HtmlBuilder),
    Literal,
}

impl Unfinished {
    /// Finish the element.
    ///
    /// Comments and literals take no attributes; giving them any is an error.
    pub fn call(&self, content: &[&dyn Render], attrs: &Attrs) -> color_eyre::Result<Literal> {
        match self {
            Unfinished::Tag { name, builder } => builder.tag(name, content, attrs),
            Unfinished::Script(builder) => Ok(builder.javascript(content, attrs)),
            Unfinished::Comment if attrs.is_empty() => Ok(HTML.comment(content)),
            Unfinished::Literal if attrs.is_empty() => Ok(content
                .iter()
                .map(|part| Literal::new(part.to_text()))
                .collect()),
            Unfinished::Comment | Unfinished::Literal => {
                Err(eyre!("{} does not take attributes", self.name()))
            }
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Unfinished::Tag { name, .. } => name,
            Unfinished::Comment => "comment",
            Unfinished::Script(_) => "script",
            Unfinished::Literal => "literal",
        }
    }
}

#[cfg(test)]
mod tests;
