use std::{
    borrow::Cow,
    collections::BTreeMap,
    fmt,
    ops::{Add, AddAssign, Mul},
};

use color_eyre::eyre::eyre;

use super::{Render, escape};

/// Markup that is already safe to emit.
///
/// Every operation that brings new values into a literal (`+`, `+=`,
/// [`Literal::join`], [`Literal::format`]) escapes those values first, so the
/// result is always a literal again. A plain value on the left goes through
/// [`escape`] first: `escape(text) + literal`.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Literal(String);

impl Literal {
    /// Wrap markup the caller asserts is safe. Nothing is escaped.
    pub fn new(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    pub const fn empty() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Append a value, escaping it unless it is markup itself.
    pub fn push<T: Render + ?Sized>(&mut self, value: &T) {
        self.0.push_str(escape(value).as_str());
    }

    /// Append markup without escaping.
    pub(crate) fn push_markup(&mut self, markup: &str) {
        self.0.push_str(markup);
    }

    pub fn repeat(&self, count: usize) -> Self {
        Self(self.0.repeat(count))
    }

    /// Join items with this literal as the separator, escaping each item.
    pub fn join<I>(&self, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Render,
    {
        let mut out = Self::empty();
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                out.push_markup(&self.0);
            }
            out.push(&item);
        }
        out
    }

    /// Percent-style interpolation with positional operands.
    ///
    /// Supports `%s` (escaped value), `%d`/`%i` (integer) and `%%`.
    pub fn format(&self, args: &[&dyn Render]) -> color_eyre::Result<Self> {
        let mut operands = args.iter();
        let out = interpolate(&self.0, |key| match key {
            Some(key) => Err(eyre!(
                "format requires a mapping for %({key}); use format_named"
            )),
            None => operands
                .next()
                .copied()
                .ok_or_else(|| eyre!("not enough arguments for format string")),
        })?;

        if operands.next().is_some() {
            return Err(eyre!("not all arguments converted during string formatting"));
        }
        Ok(out)
    }

    /// Percent-style interpolation with `%(name)s` operands looked up by key.
    pub fn format_named(&self, args: &BTreeMap<&str, &dyn Render>) -> color_eyre::Result<Self> {
        interpolate(&self.0, |key| match key {
            Some(key) => args
                .get(key)
                .copied()
                .ok_or_else(|| eyre!("missing format key {key:?}")),
            None => Err(eyre!("format_named requires %(name) operands")),
        })
    }
}

fn interpolate<'a, F>(template: &str, mut operand: F) -> color_eyre::Result<Literal>
where
    F: FnMut(Option<&str>) -> color_eyre::Result<&'a dyn Render>,
{
    let mut out = Literal::empty();
    let mut rest = template;

    while let Some(pos) = rest.find('%') {
        out.push_markup(&rest[..pos]);
        let conversion = &rest[pos + 1..];

        let (key, conversion) = if let Some(named) = conversion.strip_prefix('(') {
            let close = named
                .find(')')
                .ok_or_else(|| eyre!("incomplete format key in {template:?}"))?;
            (Some(&named[..close]), &named[close + 1..])
        } else {
            (None, conversion)
        };

        let mut chars = conversion.chars();
        match chars.next() {
            Some('%') if key.is_none() => out.push_markup("%"),
            Some(kind @ ('s' | 'd' | 'i')) => {
                let value = operand(key)?;
                out.push_markup(&convert(kind, value)?);
            }
            Some(other) => return Err(eyre!("unsupported format character {other:?}")),
            None => return Err(eyre!("incomplete format in {template:?}")),
        }
        rest = chars.as_str();
    }

    out.push_markup(rest);
    Ok(out)
}

fn convert(conversion: char, value: &dyn Render) -> color_eyre::Result<String> {
    if conversion == 's' {
        return Ok(escape(value).into_string());
    }

    let text = value.to_text();
    let text = text.trim();
    if let Ok(n) = text.parse::<i128>() {
        return Ok(n.to_string());
    }
    match text.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok((n.trunc() as i128).to_string()),
        _ => Err(eyre!("%{conversion} format: a number is required, not {text:?}")),
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Literal {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Render for Literal {
    fn to_markup(&self) -> Option<Literal> {
        Some(self.clone())
    }

    fn to_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.0)
    }
}

impl<T: Render> Add<T> for Literal {
    type Output = Literal;

    fn add(mut self, rhs: T) -> Literal {
        self.push(&rhs);
        self
    }
}

impl<T: Render> AddAssign<T> for Literal {
    fn add_assign(&mut self, rhs: T) {
        self.push(&rhs);
    }
}

impl Mul<usize> for Literal {
    type Output = Literal;

    fn mul(self, count: usize) -> Literal {
        self.repeat(count)
    }
}

impl FromIterator<Literal> for Literal {
    fn from_iter<I: IntoIterator<Item = Literal>>(iter: I) -> Self {
        let mut out = Literal::empty();
        for item in iter {
            out.push_markup(item.as_str());
        }
        out
    }
}

impl PartialEq<str> for Literal {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Literal {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl PartialEq<Literal> for &str {
    fn eq(&self, other: &Literal) -> bool {
        *self == other.0
    }
}

#[cfg(test)]
mod tests;
