//! Support for format-preserving YAML editing.
//!
//! YAML is parsed with [`from_slice`], which returns a [`Document`]. Documents
//! are serialized through their [`std::fmt::Display`] and
//! [`Document::write_to`] implementations.
//!
//! Every node remembers the whitespace and comments which precede it, and
//! scalars remember the exact way in which they were written. Serializing a
//! document which has not been modified produces the input byte for byte.
//!
//! ## Specification compliance
//!
//! This parser does not strictly adhere to the [YAML specification].
//!
//! In particular:
//! * Neither input nor output is required to be UTF-8.
//! * Anchors (`&name`) and tags (`!tag`) are kept as part of the whitespace
//!   which precedes a value, while aliases (`*name`) are values of their own.
//! * Only a single document is supported.
//!
//! The key here is that editing performed by this crate is non-destructive.
//! If the input is valid YAML, then so is the edited output.
//!
//! # Examples
//!
//! ```
//! use yamlmerge::yaml;
//!
//! let doc = yaml::from_slice("32")?;
//! assert_eq!(doc.as_ref().as_u32(), Some(32));
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! [YAML specification]: https://yaml.org/


mod parsing;
use self::parsing::Parser;

mod any;
pub use self::any::Any;

mod data;
pub use self::data::Id;

mod error;
pub use self::error::{Error, ErrorKind};

mod document;
pub use self::document::Document;

mod number;
pub use self::number::Number;

mod raw;

mod string;
pub use self::string::String;

mod value;
pub use self::value::{Null, StringKind, Value};

mod value_mut;
pub use self::value_mut::ValueMut;

pub mod sequence;
#[doc(inline)]
pub use self::sequence::Sequence;

pub mod mapping;
#[doc(inline)]
pub use self::mapping::{Mapping, MappingMut};

/// Parse a YAML document.
///
/// # Errors
///
/// Errors in case the document cannot be parsed as YAML.
///
/// ```
/// use yamlmerge::yaml;
///
/// let error = yaml::from_slice("key: \"unterminated").unwrap_err();
/// assert_eq!(error.kind(), yaml::ErrorKind::UnterminatedString);
/// assert_eq!(error.span(), 5..18);
/// ```
pub fn from_slice<D>(input: D) -> Result<Document, Error>
where
    D: AsRef<[u8]>,
{
    let parser = Parser::new(input.as_ref());
    parser.parse()
}
