//! The `KEY=VALUE` line format
//!
//! ```text
//! # comment lines are ignored
//! KEY1=value1
//! KEY2=value with = signs is fine
//! KEY3=
//! ```
//!
//! Lines starting with `#` and blank lines are skipped. Every other line is
//! split on its first `=`: the key is kept verbatim and the value is trimmed.
//! There is no quoting or escaping.

use crate::set::ConfigSet;
use crate::{Error, Result};

/// Marks a comment line.
pub const COMMENT_PREFIX: char = '#';

/// Separates a key from its value.
pub const SEPARATOR: char = '=';

/// A non-comment, non-blank line without a separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedLine {
    /// 1-based line number.
    pub line: usize,
    pub content: String,
}

/// Parse settings text into a [`ConfigSet`].
///
/// Duplicate keys resolve to the last occurrence.
pub fn parse(text: &str) -> std::result::Result<ConfigSet, MalformedLine> {
    let mut set = ConfigSet::new();

    for (idx, line) in text.split('\n').enumerate() {
        if line.starts_with(COMMENT_PREFIX) || line.trim().is_empty() {
            continue;
        }

        let Some((key, value)) = line.split_once(SEPARATOR) else {
            return Err(MalformedLine {
                line: idx + 1,
                content: line.to_string(),
            });
        };

        set.insert(key, value.trim());
    }

    Ok(set)
}

/// Render a [`ConfigSet`] as one `key=value` line per entry.
pub fn serialize(set: &ConfigSet) -> String {
    let mut out = String::new();
    for (key, value) in set {
        out.push_str(key);
        out.push(SEPARATOR);
        out.push_str(value);
        out.push('\n');
    }
    out
}

/// Check that an entry survives a write/parse cycle as a single entry.
pub fn validate_entry(key: &str, value: &str) -> Result<()> {
    let reason = if key.contains(['\n', '\r']) {
        Some("key contains a line break")
    } else if value.contains(['\n', '\r']) {
        Some("value contains a line break")
    } else if key.contains(SEPARATOR) {
        Some("key contains '='")
    } else if key.starts_with(COMMENT_PREFIX) {
        Some("key starts with '#'")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(Error::InvalidEntry {
            key: key.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}
