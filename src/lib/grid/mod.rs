//! Table rows built from a list of records.
//!
//! A [`Grid`] serializes each record to a JSON object and renders one `<tr>`
//! per record plus a header row. Only the rows are produced, so the caller
//! wraps them in whatever `<table>` markup it needs. Rows alternate between
//! the `even` and `odd` classes and every cell carries a `c<N>` class for its
//! 1-based column position.
use std::{
    borrow::Cow,
    collections::{BTreeMap, BTreeSet},
};

use color_eyre::{Section, eyre::eyre};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{trace, warn};

use crate::{
    html::{Attrs, HTML, Literal, Render, escape},
    tags::{asset::title_case, model::value_text},
};

/// Column name for the running row number.
pub const NUMBERED: &str = "_numbered";

/// A serialized record, as handed to format callbacks.
pub type Record = Map<String, Value>;

type CellFormat<'a> = Box<dyn Fn(usize, usize, &Record) -> Literal + 'a>;
type RowFormat<'a> = Box<dyn Fn(usize, &Record, &str, Literal) -> Literal + 'a>;
type HeaderUrl<'a> = Box<dyn Fn(&str, OrderDirection) -> String + 'a>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderDirection {
    Asc,
    Dsc,
}

impl OrderDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderDirection::Asc => "asc",
            OrderDirection::Dsc => "dsc",
        }
    }
}

struct Ordering<'a> {
    current: Option<(String, OrderDirection)>,
    url_for: HeaderUrl<'a>,
}

pub struct Grid<'a> {
    records: Vec<Record>,
    columns: Vec<String>,
    labels: BTreeMap<String, String>,
    formats: BTreeMap<String, CellFormat<'a>>,
    row_format: Option<RowFormat<'a>>,
    exclude_ordering: BTreeSet<String>,
    ordering: Option<Ordering<'a>>,
    start_number: usize,
}

impl<'a> Grid<'a> {
    /// A grid showing `columns` of every record.
    ///
    /// Records must serialize to JSON objects. [`NUMBERED`] may be used as a
    /// column to show the row number.
    pub fn new<T: Serialize>(records: &[T], columns: &[&str]) -> color_eyre::Result<Self> {
        let records = records
            .iter()
            .enumerate()
            .map(|(i, record)| {
                match serde_json::to_value(record)
                    .with_note(|| format!("While serializing grid record {i}"))?
                {
                    Value::Object(fields) => Ok(fields),
                    other => Err(eyre!("grid record {i} is not an object: {other}")
                        .with_note(|| "Cells are looked up by column name")),
                }
            })
            .collect::<color_eyre::Result<Vec<_>>>()?;

        let mut labels = BTreeMap::new();
        labels.insert(NUMBERED.to_string(), "no.".to_string());

        Ok(Self {
            records,
            columns: columns.iter().map(|c| c.to_string()).collect(),
            labels,
            formats: BTreeMap::new(),
            row_format: None,
            exclude_ordering: BTreeSet::from([NUMBERED.to_string()]),
            ordering: None,
            start_number: 1,
        })
    }

    /// Header text for `column`. Unlabelled columns show their name title-cased.
    pub fn label(mut self, column: &str, label: impl Into<String>) -> Self {
        self.labels.insert(column.to_string(), label.into());
        self
    }

    /// Render the cells of `column` with `format(column_number, row_index, record)`.
    ///
    /// The callback returns the whole `<td>`. Columns with a format need not
    /// exist in the records.
    pub fn format(
        mut self,
        column: &str,
        format: impl Fn(usize, usize, &Record) -> Literal + 'a,
    ) -> Self {
        self.formats.insert(column.to_string(), Box::new(format));
        self
    }

    /// Render whole rows with `format(row_index, record, class, cells)`.
    pub fn row_format(
        mut self,
        format: impl Fn(usize, &Record, &str, Literal) -> Literal + 'a,
    ) -> Self {
        self.row_format = Some(Box::new(format));
        self
    }

    /// Number shown in the [`NUMBERED`] column of the first row.
    pub fn start_number(mut self, start: usize) -> Self {
        self.start_number = start;
        self
    }

    /// Make headers links that reorder the grid.
    ///
    /// `current` is the column and direction the records are sorted by.
    /// `url_for(column, direction)` builds each header's link; clicking the
    /// current column flips an ascending order, any other column sorts
    /// ascending.
    pub fn ordering(
        mut self,
        current: Option<(&str, OrderDirection)>,
        url_for: impl Fn(&str, OrderDirection) -> String + 'a,
    ) -> Self {
        self.ordering = Some(Ordering {
            current: current.map(|(column, dir)| (column.to_string(), dir)),
            url_for: Box::new(url_for),
        });
        self
    }

    /// Keep `column`'s header a plain label even when ordering is on.
    pub fn exclude_ordering(mut self, column: &str) -> Self {
        self.exclude_ordering.insert(column.to_string());
        self
    }

    /// Header row followed by one row per record.
    pub fn render(&self) -> Literal {
        let header = HTML.element(
            "tr",
            Some(&self.headers()),
            &Attrs::new().set("class", "header"),
        );
        let rows = self.records.iter().enumerate().map(|(i, record)| {
            let class = if i % 2 == 0 { "even" } else { "odd" };
            let cells = self.cells(i, record);
            match &self.row_format {
                Some(format) => format(i, record, class, cells),
                None => HTML.element("tr", Some(&cells), &Attrs::new().set("class", class)),
            }
        });
        std::iter::once(header).chain(rows).collect()
    }

    fn headers(&self) -> Literal {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let number = i + 1;
                let label = match self.labels.get(column) {
                    Some(label) => escape(label.as_str()),
                    None => escape(title_case(&column.replace('_', " ")).as_str()),
                };
                match &self.ordering {
                    Some(ordering) if !self.exclude_ordering.contains(column) => {
                        ordered_header(ordering, number, column, label)
                    }
                    _ => header_cell(number, column, label),
                }
            })
            .collect()
    }

    fn cells(&self, i: usize, record: &Record) -> Literal {
        self.columns
            .iter()
            .enumerate()
            .map(|(col, column)| {
                if let Some(format) = self.formats.get(column) {
                    return format(col + 1, i, record);
                }
                let text = if column == NUMBERED {
                    Some((i + self.start_number).to_string())
                } else {
                    match record.get(column) {
                        Some(value) => value_text(value),
                        None => {
                            warn!(column = %column, row = i, "grid record has no such field");
                            None
                        }
                    }
                };
                cell(col + 1, text.as_deref().unwrap_or(""))
            })
            .collect()
    }
}

impl Render for Grid<'_> {
    fn to_markup(&self) -> Option<Literal> {
        Some(self.render())
    }

    fn to_text(&self) -> Cow<'_, str> {
        Cow::Owned(self.render().into_string())
    }
}

fn cell(number: usize, text: &str) -> Literal {
    let attrs = Attrs::new().set("class", format!("c{number}").as_str());
    HTML.element("td", Some(&escape(text)), &attrs)
}

fn class_name(column: &str) -> &str {
    if column == NUMBERED { "numbered" } else { column }
}

fn header_cell(number: usize, column: &str, label: Literal) -> Literal {
    let class = format!("c{number} {}", class_name(column));
    HTML.element("td", Some(&label), &Attrs::new().set("class", class.as_str()))
}

fn ordered_header(ordering: &Ordering<'_>, number: usize, column: &str, label: Literal) -> Literal {
    let current = ordering
        .current
        .as_ref()
        .filter(|(ordered, _)| ordered == column)
        .map(|(_, dir)| *dir);
    let next = match current {
        Some(OrderDirection::Asc) => OrderDirection::Dsc,
        _ => OrderDirection::Asc,
    };
    let href = (ordering.url_for)(column, next);
    trace!(column, %href, "grid header link");
    let link = HTML.element("a", Some(&label), &Attrs::new().set("href", href.as_str()));

    let Some(dir) = current else {
        return header_cell(number, column, link);
    };
    let marker = HTML.element(
        "span",
        Some(&Literal::empty()),
        &Attrs::new().set("class", "marker"),
    );
    let class = format!("c{number} ordering {} {}", dir.as_str(), class_name(column));
    HTML.element(
        "td",
        Some(&(link + marker)),
        &Attrs::new().set("class", class.as_str()),
    )
}

#[cfg(test)]
mod tests;
