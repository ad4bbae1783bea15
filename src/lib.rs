//! Format-preserving merging of YAML documents.
//!
//! The keys of a *source* mapping document are merged into a *destination*
//! mapping document. Keys which exist in both have their values replaced by
//! the source values, while new keys are appended to the end of the
//! destination. Everything else about the destination, including comments,
//! blank lines, quoting style, indentation and key order, is left untouched.
//!
//! See the corresponding module for detailed documentation on how to use:
//!
//! * [Parsing and editing YAML][yaml].
//! * [Merging documents][merge].
//! * [Merging files][files].
//!
//! <br>
//!
//! ## Working with documents
//!
//! A document is deserialized into a large object from which all access and
//! mutation must occur. This makes the API a bit harder to use than your
//! typical serialization library but is necessary to ensure that it has access
//! to all the necessary data to perform format-preserving editing.
//!
//! One particular complication is that each method which provides mutable
//! access to the document needs to have two variations: `as_<something>_mut`
//! and `into_<something>_mut`. If we look at [`ValueMut::as_mapping_mut`] and
//! [`ValueMut::into_mapping_mut`] the difference is that the latter consumes
//! `self` and returns a mutator with its associated lifetime.
//!
//! <br>
//!
//! ## Examples
//!
//! ```
//! use yamlmerge::{merge, yaml};
//!
//! let source = yaml::from_slice("name: \"new\"\nextra: true\n")?;
//!
//! let mut destination = yaml::from_slice(
//!     r#"
//!     # service settings
//!     'name': old # the name
//!     port: 8080
//!     "#,
//! )?;
//!
//! let report = merge::merge(&source, &mut destination)?;
//! assert_eq!(report.replaced, 1);
//! assert_eq!(report.appended, 1);
//!
//! assert_eq!(
//!     destination.to_string(),
//!     r#"
//!     # service settings
//!     'name': "new" # the name
//!     port: 8080
//!     extra: true
//!     "#
//! );
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! [`ValueMut::as_mapping_mut`]: crate::yaml::ValueMut::as_mapping_mut
//! [`ValueMut::into_mapping_mut`]: crate::yaml::ValueMut::into_mapping_mut

#![deny(missing_docs)]
#![allow(clippy::module_inception)]
#![allow(clippy::module_name_repetitions)]

pub mod files;
pub mod merge;
pub mod yaml;

mod base;
