//! Text transforms: truncation, excerpts, highlighting and auto-linking.
//!
//! Helpers that produce markup ([`highlight`], [`simple_format`],
//! [`auto_link`]) escape plain-text input first and return a [`Literal`];
//! pass a [`Literal`] to have existing markup kept as-is.
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::html::{Attrs, HTML, Literal, Render, escape, escape_str};

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?x)
        ( <\w+.*?> | [^=!:'"/] | ^ )                # leading tag, punctuation or start
        ( https?:// | www\. )                       # protocol
        (
          [-\w]+ (?: \.[-\w]+ )*                    # domain
          (?: :\d+ )?                               # port
          (?: / (?: (?: [~\w+%-] | [,.;:][^\s$] )+ )? )*  # path
          (?: \?[\w+%&=.;-]+ )?                     # query
          (?: \#[\w-]* )?                           # anchor
        )
        ( [.,"'?!;:] | \s | < | $ )                 # trailing text
        "#,
    )
    .expect("URL pattern compiles")
});

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\w.!#$%+-]+@[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)+").expect("email pattern compiles")
});

static OPEN_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^<a\s").expect("link pattern compiles"));

static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<a\b.*?>(.*?)</a>").expect("link pattern compiles"));

static PARAGRAPH_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\n+").expect("paragraph pattern compiles"));

/// Default markup for [`highlight`]. `\1` stands for the matched phrase.
pub const DEFAULT_HIGHLIGHTER: &str = r#"<strong class="highlight">\1</strong>"#;

/// Which kinds of links [`auto_link`] creates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LinkMode {
    #[default]
    All,
    Urls,
    EmailAddresses,
}

/// Shorten `text` to at most `length` characters, ending in `ellipsis` when
/// anything was cut. An ellipsis longer than `length` is itself cut down.
pub fn truncate(text: &str, length: usize, ellipsis: &str) -> String {
    if text.chars().count() <= length {
        return text.to_string();
    }
    let ellipsis_len = ellipsis.chars().count();
    if ellipsis_len > length {
        return ellipsis.chars().take(length).collect();
    }
    let keep = length - ellipsis_len;
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(ellipsis);
    out
}

/// The first occurrence of `phrase` with up to `radius` characters on either
/// side, or `""` if the phrase does not occur. Matching ignores case and the
/// surrounding context never crosses a line break.
pub fn excerpt(
    text: &str,
    phrase: &str,
    radius: usize,
    ellipsis: &str,
) -> color_eyre::Result<String> {
    if text.is_empty() || phrase.is_empty() {
        return Ok(text.to_string());
    }

    let pattern = format!("(?i){}", regex::escape(phrase));
    let Some(found) = Regex::new(&pattern)?.find(text) else {
        return Ok(String::new());
    };

    let start = text[..found.start()]
        .char_indices()
        .rev()
        .take_while(|&(_, ch)| ch != '\n')
        .take(radius)
        .last()
        .map_or(found.start(), |(i, _)| i);
    let end = text[found.end()..]
        .char_indices()
        .take_while(|&(_, ch)| ch != '\n')
        .take(radius)
        .last()
        .map_or(found.end(), |(i, ch)| found.end() + i + ch.len_utf8());

    let mut out = String::with_capacity(end - start + 2 * ellipsis.len());
    if start > 0 {
        out.push_str(ellipsis);
    }
    out.push_str(&text[start..end]);
    if end < text.len() {
        out.push_str(ellipsis);
    }
    Ok(out)
}

/// Wrap every occurrence of `phrase` in `<strong class="highlight">`.
pub fn highlight(text: impl Render, phrase: &str) -> color_eyre::Result<Literal> {
    highlight_with(text, phrase, &Literal::new(DEFAULT_HIGHLIGHTER))
}

/// Like [`highlight`] with custom markup; `\1` in `highlighter` is replaced
/// by the matched text.
pub fn highlight_with(
    text: impl Render,
    phrase: &str,
    highlighter: &Literal,
) -> color_eyre::Result<Literal> {
    let markup = escape(&text);
    if phrase.is_empty() {
        return Ok(markup);
    }

    let pattern = format!("(?i){}", regex::escape(&escape_str(phrase)));
    let highlighted = Regex::new(&pattern)?.replace_all(markup.as_str(), |caps: &Captures| {
        highlighter.as_str().replace(r"\1", &caps[0])
    });
    Ok(Literal::new(highlighted))
}

/// Remove `<a>` tags, keeping their content.
pub fn strip_links(html: &str) -> String {
    LINK_RE.replace_all(html, "$1").into_owned()
}

/// Turn blank lines into paragraphs and single newlines into `<br />`.
///
/// `\r\n` and lone `\r` count as newlines.
pub fn simple_format(text: impl Render) -> Literal {
    let markup = escape(&text);
    let normalized = markup.as_str().replace("\r\n", "\n").replace('\r', "\n");

    let paragraphs: Vec<String> = PARAGRAPH_BREAK_RE
        .split(&normalized)
        .map(break_lines)
        .collect();
    Literal::new(format!("<p>{}</p>", paragraphs.join("</p>\n\n<p>")))
}

/// `\n` between two non-newline characters becomes `\n<br />`.
fn break_lines(paragraph: &str) -> String {
    let lines: Vec<&str> = paragraph.split('\n').collect();
    let mut out = String::with_capacity(paragraph.len());
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            out.push('\n');
            if !lines[i - 1].is_empty() && !line.is_empty() {
                out.push_str("<br />");
            }
        }
        out.push_str(line);
    }
    out
}

/// Turn URLs and/or e-mail addresses into links.
///
/// `attrs` are added to URL links. Text already inside an `<a>` tag is left
/// alone, and `www.` addresses link to `http://www.`.
pub fn auto_link(text: impl Render, mode: LinkMode, attrs: &Attrs) -> Literal {
    let markup = escape(&text);
    if markup.is_empty() {
        return markup;
    }

    match mode {
        LinkMode::All => link_email_addresses(&link_urls(markup.as_str(), attrs)),
        LinkMode::Urls => Literal::new(link_urls(markup.as_str(), attrs)),
        LinkMode::EmailAddresses => link_email_addresses(markup.as_str()),
    }
}

fn link_urls(markup: &str, attrs: &Attrs) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut copied = 0;
    let mut at = 0;

    while let Some(caps) = URL_RE.captures_at(markup, at) {
        let (Some(lead), Some(proto), Some(rest)) = (caps.get(1), caps.get(2), caps.get(3)) else {
            break;
        };
        // The trailing character is only a boundary check; leave it for the
        // next match to use as its leading character.
        let end = caps.get(4).map_or(rest.end(), |trail| trail.start());

        out.push_str(&markup[copied..lead.end()]);
        if OPEN_LINK_RE.is_match(lead.as_str()) {
            out.push_str(&markup[lead.end()..end]);
        } else {
            let href = match proto.as_str() {
                "www." => format!("http://www.{}", rest.as_str()),
                proto => format!("{proto}{}", rest.as_str()),
            };
            let label = Literal::new(&markup[proto.start()..rest.end()]);
            let link_attrs = attrs.clone().set("href", Literal::new(href));
            out.push_str(HTML.element("a", Some(&label), &link_attrs).as_str());
        }
        copied = end;
        at = end;
    }

    out.push_str(&markup[copied..]);
    out
}

fn link_email_addresses(markup: &str) -> Literal {
    let linked = EMAIL_RE.replace_all(markup, |caps: &Captures| {
        let address = &caps[0];
        let start = caps.get(0).map_or(0, |m| m.start());
        // Part of a URL or an existing mailto: link.
        if markup[..start].ends_with([':', '/']) {
            return address.to_string();
        }
        let attrs = Attrs::new().set("href", Literal::new(format!("mailto:{address}")));
        HTML.element("a", Some(&Literal::new(address)), &attrs)
            .into_string()
    });
    Literal::new(linked)
}
