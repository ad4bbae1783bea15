use bstr::BStr;

use crate::yaml::{Mapping, Null, Number, Sequence, String};

/// An enum which helps to externally discriminate the interior type of a
/// [`Value`].
///
/// See [`Value::into_any`].
///
/// [`Value`]: crate::yaml::Value
/// [`Value::into_any`]: crate::yaml::Value::into_any
#[non_exhaustive]
pub enum Any<'a> {
    /// A null value, in any of its forms.
    Null(Null),
    /// A boolean.
    Bool(bool),
    /// A number.
    Number(Number<'a>),
    /// A string in any style.
    String(String<'a>),
    /// An alias to an anchor, with the given name.
    Alias(&'a BStr),
    /// The type is a [`Mapping`].
    Mapping(Mapping<'a>),
    /// The type is a [`Sequence`].
    Sequence(Sequence<'a>),
}
