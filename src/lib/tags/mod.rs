//! Helpers producing common HTML tags: form fields, links, and asset tags.
//!
//! Each helper takes an [`Attrs`](crate::html::Attrs) for extra attributes;
//! attributes are always rendered in name order.
pub mod asset;
pub mod form;
pub mod link;
pub mod model;

pub use form::{
    SelectOption, checkbox, end_form, file, form, hidden, options_for_select, password, radio,
    safe_id_component, select, submit, text, textarea,
};
pub use link::{link_to, link_to_if, link_to_unless};
pub use model::ModelTags;
