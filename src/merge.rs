//! Merging of one mapping document into another.
//!
//! The root mapping of the source document is merged into the root mapping of
//! the destination document:
//!
//! * Keys which exist in both documents have their destination value replaced
//!   by a copy of the source value. The destination key keeps its formatting.
//! * Keys which only exist in the source are appended to the end of the
//!   destination mapping, in source order.
//! * Everything else in the destination is left untouched.
//!
//! Keys are compared by their string value, so `key`, `'key'` and `"key"` all
//! identify the same entry. Source keys which are not strings are skipped.
//!
//! # Examples
//!
//! ```
//! use yamlmerge::{merge, yaml};
//!
//! let source = yaml::from_slice("b: 20\nc: 30\n")?;
//! let mut destination = yaml::from_slice("a: 1 # one\nb: 2 # two\n")?;
//!
//! let report = merge::merge(&source, &mut destination)?;
//!
//! assert_eq!(destination.to_string(), "a: 1 # one\nb: 20 # two\nc: 30\n");
//! assert_eq!(report, merge::Report { replaced: 1, appended: 1, skipped: 0 });
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

use core::fmt;
use std::collections::HashMap;

use bstr::BString;
use thiserror::Error;

use crate::yaml::{Document, Mapping};

/// Identifies one of the two documents taking part in a merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The document keys are taken from.
    Source,
    /// The document keys are merged into.
    Destination,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Source => f.write_str("source"),
            Side::Destination => f.write_str("destination"),
        }
    }
}

/// Error raised when merging documents.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The root of a document is not a mapping.
    #[error("{side} YAML is not a mapping")]
    NotAMapping {
        /// The document whose root is not a mapping.
        side: Side,
    },
}

/// Summary of what a merge did to the destination.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    /// Number of destination values which were replaced.
    pub replaced: usize,
    /// Number of entries which were appended to the destination.
    pub appended: usize,
    /// Number of source entries which were skipped since their key is not a
    /// string.
    pub skipped: usize,
}

/// Merge the root mapping of `source` into the root mapping of `destination`.
///
/// # Errors
///
/// Errors with [`Error::NotAMapping`] if the root of either document is not a
/// mapping. The source is checked first, and the destination is never
/// modified if an error is returned.
///
/// # Examples
///
/// ```
/// use yamlmerge::{merge, yaml};
///
/// let source = yaml::from_slice("- not a mapping")?;
/// let mut destination = yaml::from_slice("key: value")?;
///
/// let error = merge::merge(&source, &mut destination).unwrap_err();
/// assert_eq!(error.to_string(), "source YAML is not a mapping");
/// assert_eq!(destination.to_string(), "key: value");
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
pub fn merge(source: &Document, destination: &mut Document) -> Result<Report, Error> {
    let source = source.as_ref().as_mapping().ok_or(Error::NotAMapping {
        side: Side::Source,
    })?;

    let mut index = destination
        .as_ref()
        .as_mapping()
        .map(index)
        .ok_or(Error::NotAMapping {
            side: Side::Destination,
        })?;

    let mut target = destination
        .as_mut()
        .into_mapping_mut()
        .ok_or(Error::NotAMapping {
            side: Side::Destination,
        })?;

    let mut report = Report::default();

    for entry in source {
        let Some(key) = entry.key_str() else {
            tracing::debug!(key = %entry.key(), "skipping entry with a non-string key");
            report.skipped += 1;
            continue;
        };

        if let Some(&n) = index.get(key) {
            target.replace_value(n, &entry);
            tracing::debug!(%key, "replaced value");
            report.replaced += 1;
        } else {
            let n = target.push_entry(&entry);
            index.insert(key.to_owned(), n);
            tracing::debug!(%key, "appended entry");
            report.appended += 1;
        }
    }

    Ok(report)
}

/// Index the string keys of a mapping by their position. Later duplicates
/// win.
fn index(mapping: Mapping<'_>) -> HashMap<BString, usize> {
    let mut index = HashMap::with_capacity(mapping.len());

    for (n, entry) in mapping.iter().enumerate() {
        if let Some(key) = entry.key_str() {
            index.insert(key.to_owned(), n);
        }
    }

    index
}

#[cfg(test)]
mod tests {
    use anyhow::{Context, Result};

    use super::{merge, Error, Report, Side};
    use crate::yaml;

    fn merged(source: &str, destination: &str) -> Result<(String, Report)> {
        let source = yaml::from_slice(source)?;
        let mut destination = yaml::from_slice(destination)?;
        let report = merge(&source, &mut destination)?;
        Ok((destination.to_string(), report))
    }

    #[test]
    fn replace_and_append() -> Result<()> {
        let (out, report) = merged(
            "name: \"new\"\nversion: 2\nadded: yes\n",
            "# header\nname: old # keep\n\nversion: 1\nother: [1, 2]\n",
        )?;

        assert_eq!(
            out,
            "# header\nname: \"new\" # keep\n\nversion: 2\nother: [1, 2]\nadded: yes\n"
        );

        assert_eq!(
            report,
            Report {
                replaced: 2,
                appended: 1,
                skipped: 0
            }
        );

        Ok(())
    }

    #[test]
    fn key_identity_ignores_quoting() -> Result<()> {
        let (out, _) = merged("\"a\": 2\nb: 3", "'a': 1\n\"b\": 2\n")?;
        assert_eq!(out, "'a': 2\n\"b\": 3\n");
        Ok(())
    }

    #[test]
    fn duplicate_destination_keys_last_wins() -> Result<()> {
        let (out, report) = merged("a: 3", "a: 1\na: 2\n")?;
        assert_eq!(out, "a: 1\na: 3\n");
        assert_eq!(report.replaced, 1);
        Ok(())
    }

    #[test]
    fn duplicate_source_keys_append_once() -> Result<()> {
        let (out, report) = merged("x: 1\nx: 2\n", "a: 0\n")?;
        assert_eq!(out, "a: 0\nx: 2\n");
        assert_eq!(report.appended, 1);
        assert_eq!(report.replaced, 1);
        Ok(())
    }

    #[test]
    fn non_string_keys_are_skipped() -> Result<()> {
        let (out, report) = merged("1: one\ntrue: yes\nkey: value\n", "1: uno\n")?;
        assert_eq!(out, "1: uno\nkey: value\n");
        assert_eq!(report.skipped, 2);
        assert_eq!(report.appended, 1);
        Ok(())
    }

    #[test]
    fn empty_source_mapping_is_a_noop() -> Result<()> {
        let input = "# comment\na: 1 # trailing\n";
        let (out, report) = merged("{}", input)?;
        assert_eq!(out, input);
        assert_eq!(report, Report::default());
        Ok(())
    }

    #[test]
    fn merging_into_itself_is_idempotent() -> Result<()> {
        let input = "a: 1\nb:\n  - x\n  - y\nc: {d: e}\n";
        let (out, report) = merged(input, input)?;
        assert_eq!(out, input);
        assert_eq!(report.replaced, 3);
        Ok(())
    }

    #[test]
    fn nested_values_are_reindented() -> Result<()> {
        let (out, _) = merged("  key:\n    - a\n    - b", "key: 1\n")?;
        assert_eq!(out, "key:\n  - a\n  - b\n");

        let (out, _) = merged("key:\n  inner: 1\n", "root: 0\n")?;
        assert_eq!(out, "root: 0\nkey:\n  inner: 1\n");
        Ok(())
    }

    #[test]
    fn line_comment_stays_with_last_entry() -> Result<()> {
        let (out, _) = merged("b: 2\n", "a: 1 # c\n")?;
        assert_eq!(out, "a: 1 # c\nb: 2\n");

        let (out, _) = merged("k: v\n", "a: 1\t# tab comment")?;
        assert_eq!(out, "a: 1\t# tab comment\nk: v");

        let (out, _) = merged("b: 2\n", "a: 1 # c\n...\n")?;
        assert_eq!(out, "a: 1 # c\nb: 2\n...\n");

        let (out, _) = merged("b: 2\n", "a: # empty\n")?;
        assert_eq!(out, "a: # empty\nb: 2\n");
        Ok(())
    }

    #[test]
    fn kept_block_scalar_survives_append() -> Result<()> {
        let (out, _) = merged("k: v\n", "a: |+\n  text\n\n\n")?;
        assert_eq!(out, "a: |+\n  text\n\n\nk: v\n");

        let doc = yaml::from_slice(&out)?;
        let root = doc.as_ref().as_mapping().context("missing root mapping")?;
        assert_eq!(root.get("a").and_then(|v| v.as_str()), Some("text\n\n\n"));
        Ok(())
    }

    #[test]
    fn comment_moves_to_key_line() -> Result<()> {
        let (out, _) = merged("a:\n  n: 9\n", "a: 1 # c\nb: 2\n")?;
        assert_eq!(out, "a: # c\n  n: 9\nb: 2\n");

        let (out, _) = merged("a: |\n  text\n", "a: 1 # c\n")?;
        assert_eq!(out, "a: | # c\n  text\n");

        let (out, _) = merged("a: | # src\n  text\n", "a: 1 # c\n")?;
        assert_eq!(out, "a: | # src\n  text\n");

        let (out, _) = merged("a: [1, 2]\n", "a: 1 # c\n")?;
        assert_eq!(out, "a: [1, 2] # c\n");
        Ok(())
    }

    #[test]
    fn appended_entry_keeps_its_comment() -> Result<()> {
        let (out, _) = merged("k: v # src comment\n", "a: 1\n")?;
        assert_eq!(out, "a: 1\nk: v # src comment\n");

        let (out, _) = merged("{k: v, j: w}", "a: 1\n")?;
        assert_eq!(out, "a: 1\nk: v\nj: w\n");
        Ok(())
    }

    #[test]
    fn flow_destination() -> Result<()> {
        let (out, _) = merged("b: 3\nc: 4", "{a: 1, b: 2}\n")?;
        assert_eq!(out, "{a: 1, b: 3, c: 4}\n");
        Ok(())
    }

    #[test]
    fn not_a_mapping() -> Result<()> {
        let source = yaml::from_slice("- 1")?;
        let mut destination = yaml::from_slice("a: 1")?;
        let error = merge(&source, &mut destination).unwrap_err();
        assert!(matches!(
            error,
            Error::NotAMapping {
                side: Side::Source
            }
        ));

        let source = yaml::from_slice("a: 2")?;
        let mut destination = yaml::from_slice("just a string")?;
        let error = merge(&source, &mut destination).unwrap_err();
        assert!(matches!(
            error,
            Error::NotAMapping {
                side: Side::Destination
            }
        ));
        assert_eq!(destination.to_string(), "just a string");

        let source = yaml::from_slice("# nothing here\n")?;
        let mut destination = yaml::from_slice("a: 1")?;
        assert!(merge(&source, &mut destination).is_err());
        Ok(())
    }
}
