//! Data URI formatting for encoded PNG bytes.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Format PNG bytes as a `data:image/png;base64,...` URI.
pub fn data_uri(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png))
}

/// Wrap the data URI as a CSS `url(...)` value, ready to paste into a
/// stylesheet.
pub fn css_url(png: &[u8]) -> String {
    format!("url({})", data_uri(png))
}
