//! Copy a rectangular selection of table cells as delimited text.
//!
//! A selection is reconstructed into a [`grid::LogicalGrid`], optionally
//! transposed, and rendered by [`serialize::serialize`] using a
//! [`serialize::FormatConfig`] built from the persisted [`config::Settings`].

pub mod clipboard;
pub mod command;
pub mod config;
pub mod copier;
pub mod error;
pub mod fileio;
pub mod grid;
pub mod selection;
pub mod serialize;
pub mod table;
pub mod util;

pub use error::{CopyError, Result};
