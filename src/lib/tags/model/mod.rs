//! Form fields filled in from a record.
//!
//! [`ModelTags`] serializes any `Serialize` record to a JSON object and reads
//! field values from it by name. The same form can be used to create a new
//! record: [`ModelTags::new_record`] has no values, and each field falls back
//! to the default registered with [`ModelTags::with_default`].
use std::{collections::BTreeMap, fmt::Write};

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use color_eyre::{Section, eyre::eyre};
use serde::Serialize;
use serde_json::Value;
use tracing::trace;

use super::form::{self, SelectOption, safe_id_component};
use crate::{
    config::DEFAULT_DATE_FORMAT,
    html::{Attrs, Literal},
};

#[derive(Clone, Debug)]
pub struct ModelTags {
    record: Option<Value>,
    defaults: BTreeMap<String, Value>,
    date_format: String,
    id_format: Option<String>,
}

impl ModelTags {
    /// Fields for an existing record.
    ///
    /// `null` and `""` count as "no record", same as [`ModelTags::new_record`].
    pub fn new<T: Serialize + ?Sized>(record: &T) -> color_eyre::Result<Self> {
        let record = serde_json::to_value(record)
            .with_note(|| "While serializing the record for form fields")?;
        let record = match record {
            Value::Null => None,
            Value::String(s) if s.is_empty() => None,
            other => Some(other),
        };
        Ok(Self {
            record,
            ..Self::new_record()
        })
    }

    /// Fields for a record that does not exist yet.
    pub fn new_record() -> Self {
        Self {
            record: None,
            defaults: BTreeMap::new(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            id_format: None,
        }
    }

    /// strftime format for [`ModelTags::date`].
    pub fn date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// Format for generated `id` attributes; `{}` is replaced by the field name.
    pub fn id_format(mut self, format: impl Into<String>) -> Self {
        self.id_format = Some(format.into());
        self
    }

    /// Value used for `name` when there is no record.
    pub fn with_default(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.defaults.insert(name.to_string(), value.into());
        self
    }

    pub fn is_new_record(&self) -> bool {
        self.record.is_none()
    }

    /// Checked when the field is truthy. Submits `1` unless `value` is set.
    pub fn checkbox(&self, name: &str, attrs: Attrs) -> color_eyre::Result<Literal> {
        let mut attrs = self.with_id(name, attrs);
        let value = attrs.take("value").unwrap_or_else(|| Literal::new("1"));
        let checked = is_truthy(&self.value(name)?);
        Ok(form::checkbox(name, value, checked, attrs))
    }

    /// Text field holding a date rendered with the date format.
    ///
    /// A default of `"today"` fills in the current date for new records.
    pub fn date(&self, name: &str, attrs: Attrs) -> color_eyre::Result<Literal> {
        let attrs = self.with_id(name, attrs);
        let text = match self.value(name)? {
            Value::String(s) if s == "today" => self.format_date(Local::now().date_naive())?,
            Value::String(s) => match parse_date(&s) {
                Some(date) => self.format_date(date)?,
                None => String::new(),
            },
            _ => String::new(),
        };
        Ok(form::text(name, text.as_str(), attrs))
    }

    pub fn file(&self, name: &str, attrs: Attrs) -> color_eyre::Result<Literal> {
        let attrs = self.with_id(name, attrs);
        let value = value_text(&self.value(name)?);
        Ok(form::file(name, value, attrs))
    }

    pub fn hidden(&self, name: &str, attrs: Attrs) -> color_eyre::Result<Literal> {
        let attrs = self.with_id(name, attrs);
        let value = value_text(&self.value(name)?);
        Ok(form::hidden(name, value, attrs))
    }

    pub fn password(&self, name: &str, attrs: Attrs) -> color_eyre::Result<Literal> {
        let attrs = self.with_id(name, attrs);
        let value = value_text(&self.value(name)?);
        Ok(form::password(name, value, attrs))
    }

    /// Radio button, selected when the field equals `checked_value`.
    ///
    /// An explicit or generated id gets `_<checked_value>` appended so each
    /// button in the group stays unique.
    pub fn radio(
        &self,
        name: &str,
        checked_value: &str,
        attrs: Attrs,
    ) -> color_eyre::Result<Literal> {
        let mut attrs = self.with_id(name, attrs);
        if let Some(id) = attrs.take("id") {
            let id = format!("{id}_{}", safe_id_component(checked_value));
            attrs.insert("id", Literal::new(id));
        }
        let current = value_text(&self.value(name)?);
        let checked = current.as_deref() == Some(checked_value);
        Ok(form::radio(name, checked_value, checked, attrs))
    }

    /// Select box with the field's value (or array of values) selected.
    pub fn select(
        &self,
        name: &str,
        options: &[SelectOption],
        attrs: Attrs,
    ) -> color_eyre::Result<Literal> {
        let attrs = self.with_id(name, attrs);
        let selected: Vec<String> = match self.value(name)? {
            Value::Array(values) => values.iter().filter_map(value_text).collect(),
            value => value_text(&value).into_iter().collect(),
        };
        let selected: Vec<&str> = selected.iter().map(String::as_str).collect();
        Ok(form::select(name, &selected, options, attrs))
    }

    pub fn text(&self, name: &str, attrs: Attrs) -> color_eyre::Result<Literal> {
        let attrs = self.with_id(name, attrs);
        let value = value_text(&self.value(name)?);
        Ok(form::text(name, value, attrs))
    }

    pub fn textarea(&self, name: &str, attrs: Attrs) -> color_eyre::Result<Literal> {
        let attrs = self.with_id(name, attrs);
        let content = value_text(&self.value(name)?);
        Ok(form::textarea(name, content, attrs))
    }

    /// Current value of a field, or its default for new records.
    fn value(&self, name: &str) -> color_eyre::Result<Value> {
        let Some(record) = &self.record else {
            trace!(field = name, "no record, using default");
            return Ok(self
                .defaults
                .get(name)
                .cloned()
                .unwrap_or_else(|| Value::String(String::new())));
        };

        record
            .get(name)
            .cloned()
            .ok_or_else(|| eyre!("record has no field {name:?}"))
            .with_note(|| "Fields are looked up by name in the serialized record")
    }

    fn with_id(&self, name: &str, attrs: Attrs) -> Attrs {
        let mut attrs = attrs;
        if let Some(format) = &self.id_format {
            attrs.insert_default("id", format.replace("{}", name).as_str());
        }
        attrs
    }

    fn format_date(&self, date: NaiveDate) -> color_eyre::Result<String> {
        let mut out = String::new();
        write!(out, "{}", date.format(&self.date_format))
            .map_err(|_| eyre!("invalid date format {:?}", self.date_format))?;
        Ok(out)
    }
}

/// Dates serialize as strings; accept the common ISO 8601 shapes.
fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
}

pub(crate) fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
