use core::fmt;

use bstr::BStr;

use crate::yaml::data::Data;
use crate::yaml::raw::RawNumber;

macro_rules! as_number {
    ($name:ident, $ty:ty, $doc:literal, $lit:literal) => {
        #[doc = concat!("Try and get the value as a ", $doc, ".")]
        ///
        /// # Examples
        ///
        /// ```
        /// use yamlmerge::yaml;
        ///
        #[doc = concat!("let doc = yaml::from_slice(\"", stringify!($lit), "\")?;")]
        /// let value = doc.as_ref().as_number().ok_or("expected a number")?;
        #[doc = concat!("assert_eq!(value.", stringify!($name), "(), Some(", stringify!($lit), "));")]
        /// # Ok::<_, Box<dyn std::error::Error>>(())
        /// ```
        #[must_use]
        pub fn $name(&self) -> Option<$ty> {
            lexical_core::parse(self.as_raw()).ok()
        }
    };
}

/// A YAML number.
///
/// Numbers keep the exact text they were written as, the value is only
/// decoded when it is accessed through one of the `as_*` methods.
pub struct Number<'a> {
    data: &'a Data,
    raw: &'a RawNumber,
}

impl<'a> Number<'a> {
    pub(crate) fn new(data: &'a Data, raw: &'a RawNumber) -> Self {
        Self { data, raw }
    }

    /// The number as it was written.
    #[must_use]
    #[inline]
    pub fn as_raw(&self) -> &'a BStr {
        self.data.str(self.raw.string)
    }

    as_number!(as_u32, u32, "32-bit unsigned integer", 42);
    as_number!(as_u64, u64, "64-bit unsigned integer", 42);
    as_number!(as_i64, i64, "64-bit signed integer", -42);
    as_number!(as_f64, f64, "64-bit float", 10.5);
}

impl fmt::Display for Number<'_> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_raw().fmt(f)
    }
}

impl fmt::Debug for Number<'_> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_raw().fmt(f)
    }
}
