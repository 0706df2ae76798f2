//! Links and buttons that go somewhere: `mailto:` links and one-button forms.
use std::fmt::Write;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::{
    config::{AssetContext, IMAGES_DIR},
    html::{Attrs, HTML, Literal, escape},
    javascript::escape_javascript,
};

/// Everything but ASCII letters, digits and `_.-` is percent-encoded in mail
/// headers; spaces become `%20`, not `+`.
const HEADER_VALUE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'_').remove(b'.').remove(b'-');

/// How [`mail_to`] hides the address from harvesters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encoding {
    /// Character entities for the displayed text, `%xx` escapes in the href.
    Hex,
    /// The whole link is written out by an inline script.
    Javascript,
}

/// Optional parts of a `mailto:` link.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MailOptions {
    pub cc: Option<String>,
    pub bcc: Option<String>,
    pub subject: Option<String>,
    pub body: Option<String>,
    /// Shown instead of `@` in the link text.
    pub replace_at: Option<String>,
    /// Shown instead of `.` in the link text.
    pub replace_dot: Option<String>,
    pub encoding: Option<Encoding>,
}

/// `mailto:` link for `address`, labelled `name` or the address itself.
///
/// ```
/// use webhelpers::{html::Attrs, urls::{Encoding, MailOptions, mail_to}};
///
/// let options = MailOptions { encoding: Some(Encoding::Hex), ..Default::default() };
/// assert_eq!(
///     mail_to("me@domain.com", Some("My email"), &options, Attrs::new()),
///     "<a href=\"&#109;&#97;&#105;&#108;&#116;&#111;&#58;%6d%65@%64%6f%6d%61%69%6e.%63%6f%6d\">My email</a>"
/// );
/// ```
pub fn mail_to(address: &str, name: Option<&str>, options: &MailOptions, attrs: Attrs) -> Literal {
    let mut shown = address.to_string();
    if let Some(at) = &options.replace_at {
        shown = shown.replace('@', at);
    }
    if let Some(dot) = &options.replace_dot {
        shown = shown.replace('.', dot);
    }

    let (mut href, shown) = match options.encoding {
        Some(Encoding::Hex) => {
            let mut href = Literal::new(entities("mailto:"));
            href += hex_escape_word_chars(address);
            (href, Literal::new(entities(&shown)))
        }
        _ => (escape(&format!("mailto:{address}")), escape(&shown)),
    };
    let query = header_query(options);
    if !query.is_empty() {
        href += format!("?{query}");
    }

    let label = match name {
        Some(name) if !name.is_empty() => escape(name),
        _ => shown,
    };
    let link = HTML.element("a", Some(&label), &attrs.set("href", href));

    match options.encoding {
        Some(Encoding::Javascript) => {
            let script = js_unescape_payload(&format!("document.write('{link}');"));
            HTML.javascript(&[&format!("eval(unescape('{script}'))")], &Attrs::new())
        }
        _ => link,
    }
}

/// `cc`, `bcc`, `subject` and `body`, in that order.
fn header_query(options: &MailOptions) -> String {
    let headers = [
        ("cc", &options.cc),
        ("bcc", &options.bcc),
        ("subject", &options.subject),
        ("body", &options.body),
    ];
    headers
        .into_iter()
        .filter_map(|(key, value)| {
            let value = value.as_deref().filter(|v| !v.is_empty())?;
            Some(format!("{key}={}", utf8_percent_encode(value, HEADER_VALUE)))
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// `&#NN;` for every character.
fn entities(text: &str) -> String {
    text.chars().fold(String::new(), |mut out, ch| {
        let _ = write!(out, "&#{};", u32::from(ch));
        out
    })
}

/// `%xx` for word characters; everything else is left as is.
fn hex_escape_word_chars(text: &str) -> String {
    text.chars().fold(String::new(), |mut out, ch| {
        if ch.is_alphanumeric() || ch == '_' {
            let _ = write!(out, "%{:x}", u32::from(ch));
        } else {
            out.push(ch);
        }
        out
    })
}

/// Encode every character for JavaScript's `unescape`.
fn js_unescape_payload(text: &str) -> String {
    text.encode_utf16().fold(String::new(), |mut out, unit| {
        let _ = if unit <= 0xff {
            write!(out, "%{unit:x}")
        } else {
            write!(out, "%u{unit:04x}")
        };
        out
    })
}

/// Form with a single submit button, for actions that should not be
/// reachable through a plain link.
///
/// Methods other than GET are posted; PUT and DELETE carry the real verb in a
/// hidden `_method` field. A `confirm` attribute becomes a confirmation
/// prompt, and `type="image"` together with `src` makes an image button.
/// Remaining attributes go on the `<input>`.
pub fn button_to(label: &str, url: &str, method: &str, attrs: Attrs) -> Literal {
    AssetContext::default().button_to(label, url, method, attrs)
}

impl AssetContext {
    /// [`button_to`] with image sources resolved under this mount path.
    pub fn button_to(&self, label: &str, url: &str, method: &str, attrs: Attrs) -> Literal {
        let mut attrs = attrs;
        let label = if label.is_empty() { url } else { label };

        if let Some(message) = attrs.take("confirm") {
            let onclick = format!("return confirm('{}');", escape_javascript(message.as_str()));
            attrs.insert("onclick", Literal::new(onclick));
        }

        let method_tag = if method.eq_ignore_ascii_case("PUT") || method.eq_ignore_ascii_case("DELETE")
        {
            let hidden = Attrs::new()
                .set("type", "hidden")
                .set("id", "_method")
                .set("name", "_method")
                .set("value", method);
            HTML.element("input", None, &hidden)
        } else {
            Literal::empty()
        };
        let form_method = if method.eq_ignore_ascii_case("GET") {
            "GET"
        } else {
            "POST"
        };

        let image = attrs.get("type") == Some("image");
        match attrs.take("src") {
            Some(src) if image => {
                // `src` was escaped when it was set, so the path stays markup.
                let path = self.compute_public_path(src.as_str(), Some(IMAGES_DIR), Some("png"));
                attrs.insert("src", Literal::new(path));
                attrs.insert_default("alt", label);
            }
            Some(src) => attrs.insert("src", src),
            None => {}
        }
        if !(image && attrs.contains("src")) {
            attrs.insert("type", "submit");
        }
        attrs.insert("value", label);

        let mut body = method_tag;
        body += HTML.element("input", None, &attrs);
        let div = HTML.element("div", Some(&body), &Attrs::new());
        let form_attrs = Attrs::new()
            .set("action", url)
            .set("class", "button-to")
            .set("method", form_method);
        HTML.element("form", Some(&div), &form_attrs)
    }
}
