//! View helpers for server-rendered HTML.
//!
//! [`html`] is the core: the [`Literal`](html::Literal) type for markup that
//! is already safe, the [`escape`](html::escape) function, and the tag
//! builder. The other modules build on it to produce form fields, links,
//! formatted text, record grids, pagers and so on.
pub mod config;
pub mod containers;
pub mod converters;
pub mod date;
pub mod grid;
pub mod html;
pub mod javascript;
pub mod number;
pub mod paginate;
pub mod tags;
pub mod text;
pub mod urls;
