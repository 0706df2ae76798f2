//! Markup languages to HTML.
use std::sync::LazyLock;

use pulldown_cmark::{Options, Parser, html};
use regex::{Captures, Regex};
use tracing::debug;

use crate::html::{Literal, escape_str};

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^h([1-6])\.\s+").expect("heading pattern compiles"));
static STRONG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*\n]+)\*").expect("strong pattern compiles"));
static EM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|\W)_([^_\n]+)_(\W|$)").expect("emphasis pattern compiles"));
static CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@([^@\n]+)@").expect("code pattern compiles"));
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&quot;([^\n]+?)&quot;:([^\s<]*[\w/])").expect("link pattern compiles")
});
static BLOCK_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t]*\n").expect("block pattern compiles"));

/// Render Markdown (CommonMark with tables, footnotes, strikethrough and
/// task lists).
///
/// Raw HTML in the source is passed through, so only convert trusted text.
pub fn markdown(text: &str) -> Literal {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(text, options);
    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, parser);
    Literal::new(out)
}

/// Render a subset of Textile.
///
/// Blocks are separated by blank lines and may start with `h1.`..`h6.`,
/// `p.` or `bq.`; blocks whose lines all start with `* ` or `# ` become
/// lists. Inline, `*strong*`, `_em_`, `@code@` and `"label":url` are
/// recognised. The source is escaped first, so raw HTML is not passed
/// through, and links only go to `http(s)`, `mailto` or relative targets.
pub fn textilize(text: &str) -> Literal {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let escaped = escape_str(&normalized);

    let blocks: Vec<String> = BLOCK_BREAK_RE
        .split(escaped.trim())
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(render_block)
        .collect();
    Literal::new(blocks.join("\n"))
}

fn render_block(block: &str) -> String {
    if let Some(caps) = HEADING_RE.captures(block) {
        let level = &caps[1];
        let body = &block[caps[0].len()..];
        return format!("<h{level}>{}</h{level}>", inline(body));
    }
    if let Some(body) = block.strip_prefix("bq. ") {
        return format!("<blockquote>\n<p>{}</p>\n</blockquote>", lines(body));
    }
    if let Some(body) = block.strip_prefix("p. ") {
        return format!("<p>{}</p>", lines(body));
    }
    if let Some(list) = list_block(block, "* ", "ul").or_else(|| list_block(block, "# ", "ol")) {
        return list;
    }
    format!("<p>{}</p>", lines(block))
}

fn list_block(block: &str, marker: &str, tag: &str) -> Option<String> {
    let items = block
        .lines()
        .map(|line| line.trim_start().strip_prefix(marker))
        .collect::<Option<Vec<_>>>()?;
    let items: Vec<String> = items
        .into_iter()
        .map(|item| format!("\t<li>{}</li>", inline(item.trim())))
        .collect();
    Some(format!("<{tag}>\n{}\n</{tag}>", items.join("\n")))
}

/// Inline markup with single newlines turned into `<br />`.
fn lines(body: &str) -> String {
    body.lines()
        .map(|line| inline(line.trim_end()))
        .collect::<Vec<_>>()
        .join("<br />\n")
}

fn inline(text: &str) -> String {
    let text = CODE_RE.replace_all(text, "<code>$1</code>");
    let text = LINK_RE.replace_all(&text, |caps: &Captures| {
        let url = &caps[2];
        if is_safe_target(url) {
            format!(r#"<a href="{url}">{}</a>"#, &caps[1])
        } else {
            debug!(%url, "textile link target not linked");
            caps[0].to_string()
        }
    });
    let text = STRONG_RE.replace_all(&text, "<strong>$1</strong>");
    emphasize(&text)
}

/// `http(s)`, `mailto` and scheme-less targets; any other scheme stays text.
fn is_safe_target(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    if ["http://", "https://", "mailto:"]
        .iter()
        .any(|scheme| lower.starts_with(scheme))
    {
        return true;
    }
    let path_end = url.find(['/', '?', '#']).unwrap_or(url.len());
    !url[..path_end].contains(':')
}

fn emphasize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut at = 0;

    while let Some(caps) = EM_RE.captures_at(text, at) {
        let (Some(lead), Some(body), Some(trail)) = (caps.get(1), caps.get(2), caps.get(3)) else {
            break;
        };
        out.push_str(&text[copied..lead.end()]);
        out.push_str("<em>");
        out.push_str(body.as_str());
        out.push_str("</em>");
        // The closing boundary may open the next run.
        copied = trail.start();
        at = trail.start();
    }

    out.push_str(&text[copied..]);
    out
}
