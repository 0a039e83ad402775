//! swatch - Single-pixel PNG data URI generator
//!
//! A library for turning CSS-style rgba() colour expressions into
//! minimal single-pixel PNG streams and data URIs for embedding
//! directly in stylesheets.

pub mod cli;
pub mod colour;
pub mod datauri;
pub mod error;
pub mod output;
pub mod png;

pub use colour::Colour;
pub use datauri::{css_url, data_uri};
pub use error::{Result, SwatchError};
pub use png::{encode_pixel, reduce, reduce_bytes, ReduceSummary, KEPT_CHUNKS, PNG_SIGNATURE};
