use core::fmt;
use std::io;

use bstr::{BStr, ByteSlice};

use crate::yaml::data::{Data, Id};
use crate::yaml::raw::Raw;
use crate::yaml::{Any, Mapping, Number, Sequence, String};

/// The kind of a null value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Null {
    /// A keyword `null` value.
    Keyword,
    /// A tilde `~` null value.
    Tilde,
    /// A empty null value.
    Empty,
}

impl Null {
    pub(crate) fn write_to<O>(self, o: &mut O) -> io::Result<()>
    where
        O: ?Sized + io::Write,
    {
        match self {
            Null::Keyword => o.write_all(b"null"),
            Null::Tilde => o.write_all(b"~"),
            // empty values count as null.
            Null::Empty => Ok(()),
        }
    }
}

/// The lexical style of a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StringKind {
    /// A bare string without quotes, like `string`.
    Bare,
    /// A single-quoted string, like `'string'`.
    SingleQuoted,
    /// A double-quoted string, like `"string"`.
    DoubleQuoted,
    /// A literal block, starting with `|`.
    Literal,
    /// A folded block, starting with `>`.
    Folded,
}

/// A value inside of the document.
///
/// # Examples
///
/// ```
/// use yamlmerge::yaml;
///
/// let doc = yaml::from_slice("string")?;
/// assert_eq!(doc.as_ref().as_str(), Some("string"));
///
/// let doc = yaml::from_slice("\"a double-quoted string\"")?;
/// assert_eq!(doc.as_ref().as_str(), Some("a double-quoted string"));
///
/// let doc = yaml::from_slice("'a single-quoted string'")?;
/// assert_eq!(doc.as_ref().as_str(), Some("a single-quoted string"));
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy)]
pub struct Value<'a> {
    pub(crate) data: &'a Data,
    pub(crate) id: Id,
}

impl<'a> Value<'a> {
    pub(crate) fn new(data: &'a Data, id: Id) -> Self {
        Self { data, id }
    }

    /// Get the opaque [`Id`] associated with this value.
    #[must_use]
    #[inline]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Discriminate the kind of the value.
    ///
    /// # Examples
    ///
    /// ```
    /// use yamlmerge::yaml;
    ///
    /// let doc = yaml::from_slice("'quoted': [1, 2]")?;
    /// let root = doc.as_ref().as_mapping().ok_or("missing root")?;
    /// let entry = root.entry(0).ok_or("missing entry")?;
    ///
    /// assert!(matches!(entry.key().into_any(), yaml::Any::String(..)));
    /// assert!(matches!(entry.value().into_any(), yaml::Any::Sequence(..)));
    /// # Ok::<_, Box<dyn std::error::Error>>(())
    /// ```
    #[must_use]
    pub fn into_any(self) -> Any<'a> {
        match self.data.raw(self.id) {
            Raw::Null(null) => Any::Null(*null),
            Raw::Boolean(value) => Any::Bool(*value),
            Raw::Number(raw) => Any::Number(Number::new(self.data, raw)),
            Raw::String(raw) => Any::String(String::new(self.data, raw)),
            Raw::Alias(name) => Any::Alias(self.data.str(*name)),
            Raw::Mapping(..) => Any::Mapping(Mapping::new(self.data, self.id)),
            Raw::Sequence(..) => Any::Sequence(Sequence::new(self.data, self.id)),
            Raw::MappingItem(item) => Value::new(self.data, item.value).into_any(),
            Raw::SequenceItem(item) => Value::new(self.data, item.value).into_any(),
        }
    }

    /// Discriminate the kind of the value without consuming it.
    #[must_use]
    #[inline]
    pub fn as_any(&self) -> Any<'a> {
        self.into_any()
    }

    /// Get the value as a [`BStr`].
    ///
    /// # Examples
    ///
    /// ```
    /// use yamlmerge::yaml;
    ///
    /// let doc = yaml::from_slice("'It''s a string'")?;
    /// assert_eq!(doc.as_ref().as_bstr(), Some("It's a string".into()));
    /// # Ok::<_, Box<dyn std::error::Error>>(())
    /// ```
    #[must_use]
    pub fn as_bstr(&self) -> Option<&'a BStr> {
        match self.data.raw(self.id) {
            Raw::String(raw) => Some(self.data.str(raw.string)),
            _ => None,
        }
    }

    /// Get the value as a [`str`]. Strings which are not valid UTF-8 return
    /// [`None`].
    #[must_use]
    pub fn as_str(&self) -> Option<&'a str> {
        self.as_bstr()?.to_str().ok()
    }

    /// Get the value as a [`bool`].
    ///
    /// # Examples
    ///
    /// ```
    /// use yamlmerge::yaml;
    ///
    /// let doc = yaml::from_slice("true")?;
    /// assert_eq!(doc.as_ref().as_bool(), Some(true));
    /// # Ok::<_, Box<dyn std::error::Error>>(())
    /// ```
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self.data.raw(self.id) {
            Raw::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    /// Test if the value is null in any of its forms.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self.data.raw(self.id), Raw::Null(..))
    }

    /// Get the value as a [`Number`].
    #[must_use]
    pub fn as_number(&self) -> Option<Number<'a>> {
        match self.data.raw(self.id) {
            Raw::Number(raw) => Some(Number::new(self.data, raw)),
            _ => None,
        }
    }

    /// Get the value as a [`u32`].
    #[must_use]
    pub fn as_u32(&self) -> Option<u32> {
        self.as_number()?.as_u32()
    }

    /// Get the value as a [`u64`].
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        self.as_number()?.as_u64()
    }

    /// Get the value as an [`i64`].
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.as_number()?.as_i64()
    }

    /// Get the value as a [`f64`].
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        self.as_number()?.as_f64()
    }

    /// Get the value as a [`Mapping`].
    ///
    /// # Examples
    ///
    /// ```
    /// use yamlmerge::yaml;
    ///
    /// let doc = yaml::from_slice("one: 1\ntwo: 2")?;
    /// let root = doc.as_ref().as_mapping().ok_or("missing root mapping")?;
    /// assert_eq!(root.len(), 2);
    /// # Ok::<_, Box<dyn std::error::Error>>(())
    /// ```
    #[must_use]
    pub fn as_mapping(&self) -> Option<Mapping<'a>> {
        match self.data.raw(self.id) {
            Raw::Mapping(..) => Some(Mapping::new(self.data, self.id)),
            _ => None,
        }
    }

    /// Get the value as a [`Sequence`].
    #[must_use]
    pub fn as_sequence(&self) -> Option<Sequence<'a>> {
        match self.data.raw(self.id) {
            Raw::Sequence(..) => Some(Sequence::new(self.data, self.id)),
            _ => None,
        }
    }
}

/// Values are displayed without the whitespace that precedes them.
///
/// # Examples
///
/// ```
/// use yamlmerge::yaml;
///
/// let doc = yaml::from_slice("key:   [1,  2] # comment")?;
/// let root = doc.as_ref().as_mapping().ok_or("missing root")?;
/// let value = root.get("key").ok_or("missing key")?;
/// assert_eq!(value.to_string(), "[1,  2]");
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = Vec::new();

        if self.data.raw(self.id).write_to(self.data, &mut buf).is_err() {
            return Err(fmt::Error);
        }

        BStr::new(&buf).fmt(f)
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.into_any() {
            Any::Null(null) => null.fmt(f),
            Any::Bool(value) => value.fmt(f),
            Any::Number(number) => number.fmt(f),
            Any::String(string) => string.fmt(f),
            Any::Alias(name) => write!(f, "*{name}"),
            Any::Mapping(mapping) => mapping.fmt(f),
            Any::Sequence(sequence) => sequence.fmt(f),
        }
    }
}
