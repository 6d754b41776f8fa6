//! Tokenizer and value parsers for option strings.

use alloc::string::String;
use alloc::vec::Vec;

use super::ParseWarning;
use crate::options::CropOptions;

/// Every recognised key, before defaults are filled in.
#[derive(Debug, Default)]
struct Fields {
    aspect: Option<f64>,
    min_width: Option<f64>,
    min_height: Option<f64>,
    max_width: Option<f64>,
    max_height: Option<f64>,
    disabled: Option<bool>,
    locked: Option<bool>,
    keep_selection: Option<bool>,
}

impl Fields {
    fn into_options(self) -> CropOptions {
        let defaults = CropOptions::new();
        CropOptions {
            aspect: self.aspect,
            min_width: self.min_width.unwrap_or(defaults.min_width),
            min_height: self.min_height.unwrap_or(defaults.min_height),
            max_width: self.max_width,
            max_height: self.max_height,
            disabled: self.disabled.unwrap_or(defaults.disabled),
            locked: self.locked.unwrap_or(defaults.locked),
            keep_selection: self.keep_selection.unwrap_or(defaults.keep_selection),
        }
    }
}

/// Parse an option string into options + warnings.
pub(crate) fn parse_query(query: &str) -> (CropOptions, Vec<ParseWarning>) {
    let mut fields = Fields::default();
    let mut warnings = Vec::new();

    for pair in split_query(query) {
        let (raw_key, raw_value) = split_pair(pair);
        let key = percent_decode(raw_key).to_ascii_lowercase();
        let value = percent_decode(raw_value);
        dispatch_key(&key, &value, &mut fields, &mut warnings);
    }

    (fields.into_options(), warnings)
}

fn dispatch_key(key: &str, value: &str, fields: &mut Fields, warnings: &mut Vec<ParseWarning>) {
    let w = warnings;
    match key {
        "aspect" | "ratio" => {
            let parsed = parse_aspect(value);
            let reason = "expected W:H, W/H or a positive number";
            check(&mut fields.aspect, parsed, "aspect", value, reason, w);
        }
        "minw" | "minwidth" => {
            let parsed = parse_size(value).filter(|&v| v >= 0.0);
            check(&mut fields.min_width, parsed, "minw", value, "expected pixels >= 0", w);
        }
        "minh" | "minheight" => {
            let parsed = parse_size(value).filter(|&v| v >= 0.0);
            check(&mut fields.min_height, parsed, "minh", value, "expected pixels >= 0", w);
        }
        "maxw" | "maxwidth" => {
            let parsed = parse_size(value).filter(|&v| v > 0.0);
            check(&mut fields.max_width, parsed, "maxw", value, "expected pixels > 0", w);
        }
        "maxh" | "maxheight" => {
            let parsed = parse_size(value).filter(|&v| v > 0.0);
            check(&mut fields.max_height, parsed, "maxh", value, "expected pixels > 0", w);
        }
        "disabled" => {
            check(&mut fields.disabled, parse_flag(value), "disabled", value, BOOL_REASON, w);
        }
        "locked" => {
            check(&mut fields.locked, parse_flag(value), "locked", value, BOOL_REASON, w);
        }
        "keepselection" | "keep_selection" => {
            let parsed = parse_flag(value);
            check(&mut fields.keep_selection, parsed, "keepselection", value, BOOL_REASON, w);
        }
        _ => w.push(ParseWarning::KeyNotRecognized {
            key: String::from(key),
            value: String::from(value),
        }),
    }
}

const BOOL_REASON: &str = "expected true|false|1|0|yes|no|on|off";

/// Store a parsed value, warning on duplicates; warn instead when the value
/// didn't parse.
fn check<T>(
    field: &mut Option<T>,
    parsed: Option<T>,
    key: &'static str,
    value: &str,
    reason: &'static str,
    warnings: &mut Vec<ParseWarning>,
) {
    match parsed {
        Some(v) => {
            if field.is_some() {
                warnings.push(ParseWarning::DuplicateKey {
                    key,
                    value: String::from(value),
                });
            }
            *field = Some(v);
        }
        None => warnings.push(ParseWarning::ValueInvalid {
            key,
            value: String::from(value),
            reason,
        }),
    }
}

// ---- Value parsers ----

fn parse_f64(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Pixel size with an optional `px` suffix.
fn parse_size(s: &str) -> Option<f64> {
    let s = s.trim();
    let s = s
        .strip_suffix("px")
        .or_else(|| s.strip_suffix("PX"))
        .unwrap_or(s);
    parse_f64(s)
}

/// `W:H`, `W/H` or a plain ratio; must come out finite and positive.
fn parse_aspect(s: &str) -> Option<f64> {
    let ratio = match s.split_once([':', '/']) {
        Some((w, h)) => parse_f64(w)? / parse_f64(h)?,
        None => parse_f64(s)?,
    };
    (ratio.is_finite() && ratio > 0.0).then_some(ratio)
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// A boolean, where a bare key (`locked` or `locked=`) means `true`.
fn parse_flag(s: &str) -> Option<bool> {
    if s.trim().is_empty() {
        Some(true)
    } else {
        parse_bool(s)
    }
}

// ---- Tokenizer ----

/// Split on '&' (or ';'), dropping empty pairs.
fn split_query(query: &str) -> impl Iterator<Item = &str> {
    let query = query.strip_prefix('?').unwrap_or(query);
    query.split(['&', ';']).filter(|s| !s.trim().is_empty())
}

/// Split a single "key=value" pair on the first '='.
fn split_pair(pair: &str) -> (&str, &str) {
    let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
    (key.trim(), value)
}

/// Percent-decode a component. '+' is a space; malformed escapes are kept
/// as-is and invalid UTF-8 is replaced.
fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                if let (Some(hi), Some(lo)) = (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                    out.push(hi << 4 | lo);
                    i += 3;
                } else {
                    out.push(b'%');
                    i += 1;
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
