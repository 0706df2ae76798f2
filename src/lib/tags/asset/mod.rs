//! Tags that point at static assets: images, scripts, stylesheets and feeds.
//!
//! Bare file names resolve into the conventional asset directories, absolute
//! paths are only prefixed with the mount path, and fully-qualified URLs are
//! left alone.
use std::path::Path;

use tracing::warn;

use super::form::parse_size;
use crate::{
    config::{
        AssetContext, DEFAULT_STYLESHEET_MEDIA, IMAGES_DIR, JAVASCRIPT_EXT, JAVASCRIPTS_DIR,
        STYLESHEET_EXT, STYLESHEETS_DIR,
    },
    html::{Attrs, HTML, Literal},
};

const IMAGE_EXT: &str = "png";

impl AssetContext {
    /// Public URL for an asset.
    ///
    /// `ext` is appended when the file name has no extension. Relative
    /// sources go under `root` when one is given.
    pub fn compute_public_path(&self, source: &str, root: Option<&str>, ext: Option<&str>) -> String {
        let source = match ext {
            Some(ext) if Path::new(source).extension().is_none() => format!("{source}.{ext}"),
            _ => source.to_string(),
        };

        if is_qualified_url(&source) {
            return source;
        }
        match root {
            Some(root) if !source.starts_with('/') => {
                format!("{}/{root}/{source}", self.script_name)
            }
            _ => format!("{}{source}", self.script_name),
        }
    }

    /// `<img>` tag. The alt text defaults to the title-cased file stem.
    ///
    /// A `size` attribute of the form `WIDTHxHEIGHT` is split into `width`
    /// and `height`.
    pub fn image(&self, source: &str, alt: Option<&str>, attrs: Attrs) -> Literal {
        let mut attrs = attrs.set(
            "src",
            self.compute_public_path(source, Some(IMAGES_DIR), Some(IMAGE_EXT))
                .as_str(),
        );

        match alt {
            Some(alt) if !alt.is_empty() => attrs.insert("alt", alt),
            _ => attrs.insert("alt", title_case(file_stem(source)).as_str()),
        }

        if let Some(size) = attrs.take("size") {
            match parse_size(size.as_str()) {
                Some((width, height)) => {
                    attrs.insert("width", width);
                    attrs.insert("height", height);
                }
                None => warn!(size = %size, "ignoring image size that is not WIDTHxHEIGHT"),
            }
        }

        HTML.element("img", None, &attrs)
    }

    /// One `<script src>` tag per source, separated by newlines.
    pub fn javascript_link(&self, sources: &[&str], attrs: Attrs) -> Literal {
        let tags = sources.iter().map(|source| {
            let src = self.compute_public_path(source, Some(JAVASCRIPTS_DIR), Some(JAVASCRIPT_EXT));
            let tag_attrs = Attrs::new()
                .set("type", "text/javascript")
                .set("src", src.as_str())
                .merge(attrs.clone());
            HTML.element("script", None, &tag_attrs)
        });
        Literal::new("\n").join(tags)
    }

    /// One stylesheet `<link>` per source, separated by newlines.
    pub fn stylesheet_link(&self, sources: &[&str], attrs: Attrs) -> Literal {
        let defaults = Attrs::new()
            .set("rel", "Stylesheet")
            .set("type", "text/css")
            .set("media", DEFAULT_STYLESHEET_MEDIA)
            .merge(attrs.exclude("href"));

        let tags = sources.iter().map(|source| {
            let href = self.compute_public_path(source, Some(STYLESHEETS_DIR), Some(STYLESHEET_EXT));
            let tag_attrs = defaults.clone().set("href", href.as_str());
            HTML.element("link", None, &tag_attrs)
        });
        Literal::new("\n").join(tags)
    }

    /// `<link rel="alternate">` for feed auto-discovery.
    ///
    /// `rss` and `atom` expand to their MIME types and set the title to the
    /// upper-cased feed name. Any other type is used verbatim.
    pub fn auto_discovery_link(&self, source: &str, feed_type: &str, attrs: Attrs) -> Literal {
        let lower = feed_type.to_lowercase();
        let (title, mime) = match lower.as_str() {
            "rss" | "atom" => (lower.to_uppercase(), format!("application/{lower}+xml")),
            _ => (String::new(), feed_type.to_string()),
        };

        let tag_attrs = Attrs::new()
            .set("rel", "alternate")
            .set("type", mime.as_str())
            .set("title", title.as_str())
            .merge(attrs.exclude("href").exclude("type"))
            .set("href", self.compute_public_path(source, None, None).as_str());
        HTML.element("link", None, &tag_attrs)
    }
}

/// Whether `source` has a scheme followed by something (`http://x`, `mailto:x`).
fn is_qualified_url(source: &str) -> bool {
    let Some((scheme, rest)) = source.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        && !rest.is_empty()
}

fn file_stem(source: &str) -> &str {
    Path::new(source)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(source)
}

/// Capitalise the first letter of every run of letters, lowercase the rest.
pub(crate) fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for ch in s.chars() {
        if in_word {
            out.extend(ch.to_lowercase());
        } else {
            out.extend(ch.to_uppercase());
        }
        in_word = ch.is_alphabetic();
    }
    out
}
