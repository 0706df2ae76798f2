//! HTML literals, escaping, and the tag builder.
//!
//! A [`Literal`] is markup that is already safe to put on a page. Every other
//! value goes through [`escape`] on its way into a literal, so composing
//! literals with plain values never lets unescaped text through. The
//! [`Render`] trait is the capability check `escape` relies on: values that
//! return markup from [`Render::to_markup`] are trusted as-is, everything else
//! is converted to text and escaped.
use std::borrow::Cow;

pub mod builder;
pub mod literal;

pub use builder::{
    Attrs, BLOCK_TAGS, Exclude, HTML, HtmlBuilder, Unfinished, VOID_TAGS, is_block, is_void, tag,
};
pub use literal::Literal;

/// Anything that can be placed into markup.
pub trait Render {
    /// Markup the value vouches for. `None` means the text must be escaped.
    fn to_markup(&self) -> Option<Literal> {
        None
    }

    /// The plain string form of the value.
    fn to_text(&self) -> Cow<'_, str>;

    /// Whether the value stands for "nothing at all" (e.g. `None`).
    fn is_absent(&self) -> bool {
        false
    }
}

/// Turn any value into a literal.
///
/// Absent values become the empty literal, values exposing markup are passed
/// through untouched, and everything else is escaped.
pub fn escape<T: Render + ?Sized>(value: &T) -> Literal {
    if value.is_absent() {
        return Literal::empty();
    }
    match value.to_markup() {
        Some(markup) => markup,
        None => Literal::new(escape_str(&value.to_text())),
    }
}

/// Like [`escape`], but ignores any markup a value vouches for.
///
/// Escaping a [`Literal`] this way escapes it a second time.
pub fn escape_forced<T: Render + ?Sized>(value: &T) -> Literal {
    if value.is_absent() {
        return Literal::empty();
    }
    Literal::new(escape_str(&value.to_text()))
}

/// Escape `&`, `<`, `>` and `"` in a string.
pub fn escape_str(s: &str) -> Cow<'_, str> {
    if !s.contains(|c| matches!(c, '&' | '<' | '>' | '"')) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() + 16);
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

impl Render for str {
    fn to_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl Render for String {
    fn to_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl Render for Cow<'_, str> {
    fn to_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_ref())
    }
}

impl<T: Render + ?Sized> Render for &T {
    fn to_markup(&self) -> Option<Literal> {
        (**self).to_markup()
    }

    fn to_text(&self) -> Cow<'_, str> {
        (**self).to_text()
    }

    fn is_absent(&self) -> bool {
        (**self).is_absent()
    }
}

impl<T: Render> Render for Option<T> {
    fn to_markup(&self) -> Option<Literal> {
        self.as_ref().and_then(Render::to_markup)
    }

    fn to_text(&self) -> Cow<'_, str> {
        match self {
            Some(value) => value.to_text(),
            None => Cow::Borrowed(""),
        }
    }

    fn is_absent(&self) -> bool {
        self.as_ref().is_none_or(Render::is_absent)
    }
}

macro_rules! render_via_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Render for $ty {
                fn to_text(&self) -> Cow<'_, str> {
                    Cow::Owned(self.to_string())
                }
            }
        )*
    };
}

render_via_display!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, char, bool,
);
