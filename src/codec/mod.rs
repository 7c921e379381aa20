//! Text and URL decoding helpers shared by the extractors and the cursor resolver
//!
//! Everything here is pure: malformed input produces `None` or is passed
//! through untouched, never an error.

mod escape;
mod number;
mod query;

pub use escape::{decode_css_url, decode_escapes, decode_html_entities};
pub use number::parse_int;
pub use query::{filter_query_params, ParamFilter};
