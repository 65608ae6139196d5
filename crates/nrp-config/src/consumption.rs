//! Config consumption map and unused-key guard.
//!
//! "Consumed pointers" are JSON Pointer prefixes. A leaf under any consumed
//! prefix is considered consumed; any other leaf is reported as unused.
//!
//! - prefix "/duration" consumes "/duration/tick_offset"
//! - prefix "/decoders/builds" consumes "/decoders/builds/0"
//!
//! The list must match what [`ParserSettings::from_config_json`] actually reads.
//!
//! [`ParserSettings::from_config_json`]: crate::ParserSettings::from_config_json

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::BTreeSet;

pub const CONSUMED_POINTERS: &[&str] = &[
    "/duration/tick_offset",
    "/duration/ticks_per_second",
    "/duration/core_unit_type",
    "/heroes/attribute_id",
    "/heroes/fallback_excluded_modes",
    "/enrichment/battletags",
    "/decoders/builds",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnusedKeyPolicy {
    Warn,
    Fail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnusedKeyReport {
    /// Consumed JSON-pointer prefixes used for this analysis (sorted, unique)
    pub consumed_prefixes: Vec<String>,
    /// Unused leaf pointers (sorted)
    pub unused_leaf_pointers: Vec<String>,
}

impl UnusedKeyReport {
    pub fn is_clean(&self) -> bool {
        self.unused_leaf_pointers.is_empty()
    }
}

/// Produce an unused-key report for a merged config.
/// With `UnusedKeyPolicy::Fail`, unused keys are an error.
pub fn report_unused_keys(config_json: &Value, policy: UnusedKeyPolicy) -> Result<UnusedKeyReport> {
    let consumed_prefixes: Vec<String> = CONSUMED_POINTERS
        .iter()
        .map(|p| canonical_prefix(p))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let unused_leaf_pointers: Vec<String> = leaf_pointers(config_json)
        .into_iter()
        .filter(|leaf| !consumed_prefixes.iter().any(|cp| is_prefix_pointer(cp, leaf)))
        .collect();

    let report = UnusedKeyReport {
        consumed_prefixes,
        unused_leaf_pointers,
    };

    if policy == UnusedKeyPolicy::Fail && !report.is_clean() {
        let shown = report.unused_leaf_pointers.iter().take(UNUSED_PREVIEW);
        bail!(
            "CONFIG_UNUSED_KEYS: {} unused config leaf key(s) detected. \
            Remove them or fix their spelling: {}",
            report.unused_leaf_pointers.len(),
            shown.map(String::as_str).collect::<Vec<_>>().join(", ")
        );
    }

    Ok(report)
}

/// How many unused pointers a Fail error names.
const UNUSED_PREVIEW: usize = 12;

/// Rooted, without a trailing separator. Blank means the whole document.
fn canonical_prefix(raw: &str) -> String {
    let body = raw.trim().trim_matches('/');
    format!("/{body}")
}

/// "/a/b" consumes "/a/b" and "/a/b/c" but NOT "/a/bc".
fn is_prefix_pointer(prefix: &str, leaf: &str) -> bool {
    if prefix == "/" || leaf == prefix {
        return true;
    }
    leaf.strip_prefix(prefix)
        .is_some_and(|rest| rest.starts_with('/'))
}

/// Every scalar and every empty array, as a sorted set of JSON Pointers.
/// Empty objects contribute nothing.
fn leaf_pointers(root: &Value) -> BTreeSet<String> {
    let mut leaves = BTreeSet::new();
    let mut pending: Vec<(String, &Value)> = vec![(String::new(), root)];

    while let Some((path, node)) = pending.pop() {
        match node {
            Value::Object(map) => {
                pending.extend(
                    map.iter()
                        .map(|(key, child)| (format!("{path}/{}", pointer_token(key)), child)),
                );
            }
            Value::Array(items) if !items.is_empty() => {
                pending.extend(
                    items
                        .iter()
                        .enumerate()
                        .map(|(i, child)| (format!("{path}/{i}"), child)),
                );
            }
            _ if path.is_empty() => {
                leaves.insert("/".to_string());
            }
            _ => {
                leaves.insert(path);
            }
        }
    }
    leaves
}

/// RFC 6901 escaping: `~` first, then `/`.
fn pointer_token(key: &str) -> Cow<'_, str> {
    if key.contains(['~', '/']) {
        Cow::Owned(key.replace('~', "~0").replace('/', "~1"))
    } else {
        Cow::Borrowed(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_requires_segment_boundary() {
        assert!(is_prefix_pointer("/a/b", "/a/b"));
        assert!(is_prefix_pointer("/a/b", "/a/b/c"));
        assert!(!is_prefix_pointer("/a/b", "/a/bc"));
        assert!(is_prefix_pointer("/", "/anything"));
    }

    #[test]
    fn leaves_escape_pointer_tokens() {
        let v = serde_json::json!({"a/b": {"c~d": 1}, "list": [true, false], "none": []});
        let out: Vec<String> = leaf_pointers(&v).into_iter().collect();
        assert_eq!(out, vec!["/a~1b/c~0d", "/list/0", "/list/1", "/none"]);
    }

    #[test]
    fn scalar_document_is_the_root_leaf() {
        let out: Vec<String> = leaf_pointers(&Value::from(3)).into_iter().collect();
        assert_eq!(out, vec!["/"]);
        assert!(leaf_pointers(&serde_json::json!({})).is_empty());
    }

    #[test]
    fn prefixes_are_rooted_without_trailing_slash() {
        assert_eq!(canonical_prefix(" duration/ "), "/duration");
        assert_eq!(canonical_prefix("/decoders/builds"), "/decoders/builds");
        assert_eq!(canonical_prefix(""), "/");
        assert_eq!(canonical_prefix("/"), "/");
    }

    #[test]
    fn fail_message_lists_unused_pointers() {
        let v = serde_json::json!({"duration": {"tick_ofset": 1}, "extra": 2});
        let err = report_unused_keys(&v, UnusedKeyPolicy::Fail).unwrap_err().to_string();
        assert!(err.starts_with("CONFIG_UNUSED_KEYS: 2 unused"), "{err}");
        assert!(err.ends_with("/duration/tick_ofset, /extra"), "{err}");
    }
}
