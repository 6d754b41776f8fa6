//! Option strings: [`CropOptions`] from a compact `key=value&...` form.
//!
//! Handy for configuring a cropper from a URL, a data attribute or a CLI
//! flag. Parsing never fails; anything that can't be used is reported as a
//! [`ParseWarning`] and skipped.
//!
//! | Key | Value |
//! |---|---|
//! | `aspect`, `ratio` | `16:9`, `16/9` or `1.777` |
//! | `minw`, `minwidth`, `minh`, `minheight` | pixels, `0` or more, optional `px` |
//! | `maxw`, `maxwidth`, `maxh`, `maxheight` | pixels, more than `0`, optional `px` |
//! | `disabled`, `locked`, `keepselection` | `true`/`1`/`yes`/`on`, `false`/`0`/`no`/`off`, or no value for `true` |
//!
//! Keys are case-insensitive, pairs are percent-decoded, and when a key
//! repeats the last value wins.
//!
//! ```
//! use cropkit::query;
//!
//! let result = query::parse("aspect=16:9&minw=64&locked");
//! assert!(result.warnings.is_empty());
//! assert_eq!(result.options.aspect, Some(16.0 / 9.0));
//! assert_eq!(result.options.min_width, 64.0);
//! assert!(result.options.locked);
//! ```

mod parse;

use alloc::string::String;
use alloc::vec::Vec;

use crate::options::CropOptions;

/// Result of parsing an option string.
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Parsed options; unset keys keep their defaults.
    pub options: CropOptions,
    /// Non-fatal parse warnings.
    pub warnings: Vec<ParseWarning>,
}

/// Non-fatal warning from option string parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// A key appeared more than once (last value wins).
    DuplicateKey { key: &'static str, value: String },
    /// A key that isn't an option.
    KeyNotRecognized { key: String, value: String },
    /// A known key whose value could not be used.
    ValueInvalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Parse an option string (with or without a leading `?`).
pub fn parse(query: &str) -> ParseResult {
    let (options, warnings) = parse::parse_query(query);
    ParseResult { options, warnings }
}
