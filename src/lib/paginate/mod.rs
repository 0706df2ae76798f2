//! Splitting a collection into pages, and the pager that links them.
//!
//! Page numbers start at 1. Item indexes ([`Page::first_item`],
//! [`Page::last_item`]) are 0-based positions in the whole collection.
use std::{ops::Deref, ops::Range, sync::LazyLock};

use color_eyre::eyre::eyre;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::{Captures, Regex};
use tracing::debug;

use crate::{
    config::{PAGER_FORMAT, PAGER_ITEMS_PER_PAGE, PAGER_LINK_VAR},
    html::{Attrs, HTML, Literal, escape},
};

/// Query keys and values keep ASCII letters, digits and `_.-~`.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~');

static RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"~(\d+)~").expect("range pattern compiles"));
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(?:(\$)|\{(\w+)\}|(\w+))").expect("token pattern compiles")
});

/// A collection that can be paged through.
pub trait PageSource {
    type Item;

    fn item_count(&self) -> usize;

    /// The items at `range`, which always lies within `0..item_count()`.
    fn fetch(&self, range: Range<usize>) -> Vec<Self::Item>;
}

impl<T: Clone> PageSource for [T] {
    type Item = T;

    fn item_count(&self) -> usize {
        self.len()
    }

    fn fetch(&self, range: Range<usize>) -> Vec<T> {
        self[range].to_vec()
    }
}

impl<T: Clone> PageSource for Vec<T> {
    type Item = T;

    fn item_count(&self) -> usize {
        self.len()
    }

    fn fetch(&self, range: Range<usize>) -> Vec<T> {
        self[range].to_vec()
    }
}

/// One page of a collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: usize,
    pub items_per_page: usize,
    pub item_count: usize,
    pub page_count: usize,
    pub first_page: Option<usize>,
    pub last_page: Option<usize>,
    pub first_item: Option<usize>,
    pub last_item: Option<usize>,
    pub previous_page: Option<usize>,
    pub next_page: Option<usize>,
}

impl<T> Page<T> {
    /// Page `current_page` of `source`.
    ///
    /// Out-of-range page numbers are clamped to the first or last page. An
    /// empty collection has no pages: the requested number is kept and
    /// everything else is `None`.
    pub fn new<S>(source: &S, current_page: usize, items_per_page: usize) -> color_eyre::Result<Self>
    where
        S: PageSource<Item = T> + ?Sized,
    {
        if items_per_page == 0 {
            return Err(eyre!("a page must hold at least one item"));
        }

        let item_count = source.item_count();
        if item_count == 0 {
            return Ok(Self {
                items: Vec::new(),
                current_page,
                items_per_page,
                item_count,
                page_count: 0,
                first_page: None,
                last_page: None,
                first_item: None,
                last_item: None,
                previous_page: None,
                next_page: None,
            });
        }

        let page_count = (item_count - 1) / items_per_page + 1;
        let (first_page, last_page) = (1, page_count);
        let current_page = current_page.clamp(first_page, last_page);
        let first_item = (current_page - 1) * items_per_page;
        let last_item = (first_item + items_per_page - 1).min(item_count - 1);

        Ok(Self {
            items: source.fetch(first_item..last_item + 1),
            current_page,
            items_per_page,
            item_count,
            page_count,
            first_page: Some(first_page),
            last_page: Some(last_page),
            first_item: Some(first_item),
            last_item: Some(last_item),
            previous_page: (current_page > first_page).then(|| current_page - 1),
            next_page: (current_page < last_page).then(|| current_page + 1),
        })
    }

    /// [`Page::new`] with the default page size.
    pub fn with_default_size<S>(source: &S, current_page: usize) -> color_eyre::Result<Self>
    where
        S: PageSource<Item = T> + ?Sized,
    {
        Self::new(source, current_page, PAGER_ITEMS_PER_PAGE)
    }

    /// Navigation links using [`PagerOptions::url`] with the page number in
    /// the `link_var` query parameter.
    pub fn pager(&self, options: &PagerOptions) -> Literal {
        self.pager_with(options, |page| options.page_url(page))
    }

    /// Navigation links with URLs from `url_for`.
    ///
    /// The format is trusted markup. `~N~` expands to the pages within `N`
    /// of the current one, with links to the first and last page and `..`
    /// where pages are skipped. `$name` tokens are replaced by page data
    /// (`$current_page`, `$page_count`, `$item_count`, ...) or by links
    /// (`$link_first`, `$link_previous`, `$link_next`, `$link_last`);
    /// unknown tokens are left alone and `$$` is a dollar sign.
    ///
    /// Nothing is shown when there are no pages, or just one page unless
    /// [`PagerOptions::show_if_single_page`] is set.
    pub fn pager_with(&self, options: &PagerOptions, url_for: impl Fn(usize) -> String) -> Literal {
        let (Some(first_page), Some(last_page)) = (self.first_page, self.last_page) else {
            return Literal::empty();
        };
        if self.page_count == 1 && !options.show_if_single_page {
            return Literal::empty();
        }

        let link = |page: usize, text: &Literal| {
            let url = url_for(page);
            debug!(page, url = %url, "pager link");
            let attrs = options.link_attr.clone().set("href", url.as_str());
            HTML.element("a", Some(text), &attrs)
        };

        let nav = Nav {
            current: self.current_page,
            first: first_page,
            last: last_page,
        };
        let ranged = RANGE_RE.replace_all(&options.format, |caps: &Captures| {
            let radius = caps[1].parse().unwrap_or(usize::MAX);
            nav.range(radius, options, &link).into_string()
        });

        let number = |n: Option<usize>| n.map(|n| n.to_string()).unwrap_or_default();
        let substituted = TOKEN_RE.replace_all(&ranged, |caps: &Captures| {
            if caps.get(1).is_some() {
                return "$".to_string();
            }
            let Some(name) = caps.get(2).or_else(|| caps.get(3)) else {
                return caps[0].to_string();
            };
            match name.as_str() {
                "first_page" => number(self.first_page),
                "last_page" => number(self.last_page),
                "current_page" => self.current_page.to_string(),
                "page_count" => self.page_count.to_string(),
                "items_per_page" => self.items_per_page.to_string(),
                "first_item" => number(self.first_item),
                "last_item" => number(self.last_item),
                "item_count" => self.item_count.to_string(),
                "link_first" if self.current_page > first_page => {
                    link(first_page, &options.symbol_first).into_string()
                }
                "link_last" if self.current_page < last_page => {
                    link(last_page, &options.symbol_last).into_string()
                }
                "link_previous" => self
                    .previous_page
                    .map(|page| link(page, &options.symbol_previous).into_string())
                    .unwrap_or_default(),
                "link_next" => self
                    .next_page
                    .map(|page| link(page, &options.symbol_next).into_string())
                    .unwrap_or_default(),
                "link_first" | "link_last" => String::new(),
                _ => caps[0].to_string(),
            }
        });
        Literal::new(substituted)
    }
}

impl<T> Deref for Page<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

struct Nav {
    current: usize,
    first: usize,
    last: usize,
}

impl Nav {
    fn range(
        &self,
        radius: usize,
        options: &PagerOptions,
        link: &impl Fn(usize, &Literal) -> Literal,
    ) -> Literal {
        let leftmost = self.first.max(self.current.saturating_sub(radius));
        let rightmost = self.last.min(self.current.saturating_add(radius));
        let dotdot = || wrap_span(&options.dotdot_attr, Literal::new(".."));

        let mut items = Vec::new();
        if self.current != self.first && self.first < leftmost {
            items.push(link(self.first, &escape(&self.first)));
        }
        if leftmost - self.first > 1 {
            items.push(dotdot());
        }
        for page in leftmost..=rightmost {
            let text = escape(&page);
            if page == self.current {
                items.push(wrap_span(&options.curpage_attr, text));
            } else {
                items.push(link(page, &text));
            }
        }
        if self.last - rightmost > 1 {
            items.push(dotdot());
        }
        if self.current != self.last && rightmost < self.last {
            items.push(link(self.last, &escape(&self.last)));
        }

        escape(options.separator.as_str()).join(items)
    }
}

/// `text` in a `<span>` with `attrs`, or bare when there are no attributes.
fn wrap_span(attrs: &Attrs, text: Literal) -> Literal {
    if attrs.is_empty() {
        text
    } else {
        HTML.element("span", Some(&text), attrs)
    }
}

/// How [`Page::pager`] renders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PagerOptions {
    pub format: String,
    /// Base URL the page parameter is appended to.
    pub url: String,
    pub link_var: String,
    /// Extra query parameters, placed before the page parameter.
    pub params: Vec<(String, String)>,
    pub separator: String,
    pub show_if_single_page: bool,
    pub symbol_first: Literal,
    pub symbol_last: Literal,
    pub symbol_previous: Literal,
    pub symbol_next: Literal,
    pub link_attr: Attrs,
    pub curpage_attr: Attrs,
    pub dotdot_attr: Attrs,
}

impl Default for PagerOptions {
    fn default() -> Self {
        Self {
            format: PAGER_FORMAT.to_string(),
            url: String::new(),
            link_var: PAGER_LINK_VAR.to_string(),
            params: Vec::new(),
            separator: " ".to_string(),
            show_if_single_page: false,
            symbol_first: Literal::new("&lt;&lt;"),
            symbol_last: Literal::new("&gt;&gt;"),
            symbol_previous: Literal::new("&lt;"),
            symbol_next: Literal::new("&gt;"),
            link_attr: Attrs::new().set("class", "pager_link"),
            curpage_attr: Attrs::new().set("class", "pager_curpage"),
            dotdot_attr: Attrs::new().set("class", "pager_dotdot"),
        }
    }
}

impl PagerOptions {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// URL of `page`: the base URL plus the query parameters.
    pub fn page_url(&self, page: usize) -> String {
        let page = page.to_string();
        let query = self
            .params
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .chain([(self.link_var.as_str(), page.as_str())])
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(key, QUERY_COMPONENT),
                    utf8_percent_encode(value, QUERY_COMPONENT)
                )
            })
            .collect::<Vec<_>>()
            .join("&");
        let joiner = if self.url.contains('?') { '&' } else { '?' };
        format!("{}{joiner}{query}", self.url)
    }
}
