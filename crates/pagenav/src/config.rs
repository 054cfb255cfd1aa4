//! Output settings for the `pagenav` driver.

use std::env;

/// How replay results are reported.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PagenavConfig {
    /// Print one JSON object per step instead of a text line
    pub json_output: bool,
    /// Print the document, inline styles included, after the last step
    pub dump_dom: bool,
}

impl PagenavConfig {
    #[inline]
    #[must_use]
    pub const fn new(json_output: bool, dump_dom: bool) -> Self {
        Self {
            json_output,
            dump_dom,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// - `PAGENAV_JSON`: set to "1" for JSON lines (default: text)
    /// - `PAGENAV_DUMP_DOM`: set to "1" to print the final document
    #[inline]
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(flag("PAGENAV_JSON"), flag("PAGENAV_DUMP_DOM"))
    }
}

fn flag(name: &str) -> bool {
    env::var(name).ok().is_some_and(|val| val.trim() == "1")
}
