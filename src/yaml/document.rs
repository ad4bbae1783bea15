use core::fmt;
use std::io;

use bstr::BStr;

use crate::yaml::data::{Data, Id, StringId};
use crate::yaml::raw;
use crate::yaml::{Value, ValueMut};

/// A whitespace preserving YAML document.
///
/// Serializing a document which has not been modified produces exactly the
/// input it was parsed from.
///
/// # Examples
///
/// ```
/// use yamlmerge::yaml;
///
/// let input = "# settings\n'name': \"example\" # quoted\n\nlimits: {cpu: 2}\n";
/// let doc = yaml::from_slice(input)?;
/// assert_eq!(doc.to_string(), input);
/// assert_eq!(doc.to_vec(), input.as_bytes());
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone)]
pub struct Document {
    suffix: StringId,
    root: Id,
    pub(crate) data: Data,
}

impl Document {
    /// Construct a new document.
    pub(crate) fn new(suffix: StringId, root: Id, data: Data) -> Self {
        Self { suffix, root, data }
    }

    /// Get the root value of a document.
    ///
    /// # Examples
    ///
    /// ```
    /// use yamlmerge::yaml;
    ///
    /// let doc = yaml::from_slice("32")?;
    /// assert_eq!(doc.as_ref().as_u32(), Some(32));
    /// # Ok::<_, Box<dyn std::error::Error>>(())
    /// ```
    #[must_use]
    #[inline]
    pub fn as_ref(&self) -> Value<'_> {
        Value::new(&self.data, self.root)
    }

    /// Get the root value of a document mutably.
    #[inline]
    pub fn as_mut(&mut self) -> ValueMut<'_> {
        ValueMut::new(&mut self.data, self.root)
    }

    /// Get a value by its [`Id`].
    ///
    /// # Panics
    ///
    /// Values can panic if the identifier is not valid for this document.
    #[must_use]
    #[inline]
    pub fn value(&self, id: Id) -> Value<'_> {
        Value::new(&self.data, id)
    }

    /// Write the document to the given output.
    ///
    /// # Errors
    ///
    /// Errors if the output could not be written to.
    pub fn write_to<O>(&self, mut o: O) -> io::Result<()>
    where
        O: io::Write,
    {
        raw::write_value(&self.data, self.root, &mut o)?;
        o.write_all(self.data.str(self.suffix))?;
        Ok(())
    }

    /// Serialize the document into a vector of bytes.
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        let mut out = Vec::new();
        // writing to a vector never fails.
        let _ = self.write_to(&mut out);
        out
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        BStr::new(&self.to_vec()).fmt(f)
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("suffix", &self.suffix)
            .field("root", &self.as_ref())
            .finish_non_exhaustive()
    }
}
