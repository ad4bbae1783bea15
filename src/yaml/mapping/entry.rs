use core::fmt;

use bstr::BStr;

use crate::yaml::data::{Data, Id, StringId};
use crate::yaml::raw::{Raw, RawMappingKind};
use crate::yaml::Value;

/// A single key and value pair in a [`Mapping`].
///
/// Entries are what gets copied between documents with
/// [`MappingMut::replace_value`] and [`MappingMut::push_entry`].
///
/// [`Mapping`]: crate::yaml::Mapping
/// [`MappingMut::replace_value`]: crate::yaml::MappingMut::replace_value
/// [`MappingMut::push_entry`]: crate::yaml::MappingMut::push_entry
#[derive(Clone, Copy)]
pub struct Entry<'a> {
    pub(crate) data: &'a Data,
    pub(crate) mapping: Id,
    pub(crate) item: Id,
}

impl<'a> Entry<'a> {
    #[inline]
    pub(crate) fn new(data: &'a Data, mapping: Id, item: Id) -> Self {
        Self {
            data,
            mapping,
            item,
        }
    }

    /// The key node of the entry.
    #[must_use]
    #[inline]
    pub fn key(&self) -> Value<'a> {
        Value::new(self.data, self.data.mapping_item(self.item).key)
    }

    /// The value node of the entry.
    #[must_use]
    #[inline]
    pub fn value(&self) -> Value<'a> {
        Value::new(self.data, self.data.mapping_item(self.item).value)
    }

    /// The decoded key, if the key is a string in any style.
    ///
    /// Keys which are numbers, booleans, nulls or aliases return [`None`].
    ///
    /// # Examples
    ///
    /// ```
    /// use bstr::BStr;
    /// use yamlmerge::yaml;
    ///
    /// let doc = yaml::from_slice("'quoted': 1\nbare: 2\n3: three")?;
    /// let root = doc.as_ref().as_mapping().ok_or("missing root")?;
    /// let keys = root.iter().map(|e| e.key_str()).collect::<Vec<_>>();
    ///
    /// assert_eq!(keys, [Some(BStr::new("quoted")), Some(BStr::new("bare")), None]);
    /// # Ok::<_, Box<dyn std::error::Error>>(())
    /// ```
    #[must_use]
    pub fn key_str(&self) -> Option<&'a BStr> {
        match self.data.raw(self.data.mapping_item(self.item).key) {
            Raw::String(raw) => Some(self.data.str(raw.string)),
            _ => None,
        }
    }

    /// Column of the mapping the entry belongs to.
    #[inline]
    pub(crate) fn indent(&self) -> usize {
        self.data.mapping(self.mapping).indent
    }

    /// Whitespace and comment on the line of an entry in a block mapping.
    pub(crate) fn line_tail(&self) -> Option<StringId> {
        match self.data.mapping(self.mapping).kind {
            RawMappingKind::Block => self.data.mapping_item(self.item).tail,
            RawMappingKind::Flow { .. } => None,
        }
    }

    /// Whitespace between the key and the `:`.
    #[inline]
    pub(crate) fn separator(&self) -> StringId {
        self.data.mapping_item(self.item).separator
    }
}

impl fmt::Debug for Entry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Entry")
            .field(&self.key())
            .field(&self.value())
            .finish()
    }
}
