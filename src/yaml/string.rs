use core::fmt;
use core::ops::Deref;

use bstr::BStr;

use crate::yaml::data::Data;
use crate::yaml::raw::RawString;
use crate::yaml::StringKind;

/// A YAML string.
///
/// The string is accessed through a [`BStr`] coercion, since strings might
/// contain non-utf8 data.
///
/// Use utilities such as [`bstr::ByteSlice::to_str`] to coerce it into a
/// [`str`].
///
/// # Examples
///
/// ```
/// use bstr::ByteSlice;
/// use yamlmerge::yaml;
///
/// let a = yaml::from_slice(r#""Hello\n World""#)?;
///
/// let yaml::Any::String(a) = a.as_ref().into_any() else {
///     panic!("expected string");
/// };
///
/// assert_eq!(a.kind(), yaml::StringKind::DoubleQuoted);
/// assert_eq!(a.to_str()?, "Hello\n World");
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
pub struct String<'a> {
    data: &'a Data,
    raw: &'a RawString,
}

impl<'a> String<'a> {
    pub(crate) fn new(data: &'a Data, raw: &'a RawString) -> Self {
        Self { data, raw }
    }

    /// The lexical style of the string.
    #[must_use]
    #[inline]
    pub fn kind(&self) -> StringKind {
        self.raw.kind
    }

    /// The decoded contents of the string.
    #[must_use]
    #[inline]
    pub fn as_bstr(&self) -> &'a BStr {
        self.data.str(self.raw.string)
    }

    /// Get the raw contents of the string, as it was written in the document.
    ///
    /// # Examples
    ///
    /// ```
    /// use yamlmerge::yaml;
    ///
    /// let doc = yaml::from_slice(r#""Hello\n World""#)?;
    /// let yaml::Any::String(a) = doc.as_ref().into_any() else {
    ///     panic!("expected string");
    /// };
    /// assert_eq!(a.as_raw(), "\"Hello\\n World\"");
    ///
    /// let doc = yaml::from_slice("'Hello World'")?;
    /// let yaml::Any::String(b) = doc.as_ref().into_any() else {
    ///     panic!("expected string");
    /// };
    /// assert_eq!(b.as_raw(), "'Hello World'");
    /// # Ok::<_, Box<dyn std::error::Error>>(())
    /// ```
    #[must_use]
    #[inline]
    pub fn as_raw(&self) -> &'a BStr {
        self.data.str(self.raw.original)
    }
}

impl Deref for String<'_> {
    type Target = BStr;

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.data.str(self.raw.string)
    }
}

impl fmt::Debug for String<'_> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.data.str(self.raw.string).fmt(f)
    }
}
