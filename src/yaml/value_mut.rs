use crate::yaml::data::{Data, Id};
use crate::yaml::raw::Raw;
use crate::yaml::{MappingMut, Value};

/// A mutable value inside of a document.
pub struct ValueMut<'a> {
    data: &'a mut Data,
    pub(crate) id: Id,
}

impl<'a> ValueMut<'a> {
    pub(crate) fn new(data: &'a mut Data, id: Id) -> Self {
        Self { data, id }
    }

    /// Get the opaque [`Id`] associated with this value.
    #[must_use]
    #[inline]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Coerce a mutable value as an immutable [Value].
    #[must_use]
    #[inline]
    pub fn as_ref(&self) -> Value<'_> {
        Value::new(self.data, self.id)
    }

    /// Get the value as a [`MappingMut`] with the lifetime of the current
    /// reference.
    ///
    /// # Examples
    ///
    /// ```
    /// use yamlmerge::yaml;
    ///
    /// let mut doc = yaml::from_slice("one: 1")?;
    /// let mut value = doc.as_mut();
    /// assert!(value.as_mapping_mut().is_some());
    ///
    /// let mut doc = yaml::from_slice("- 1")?;
    /// let mut value = doc.as_mut();
    /// assert!(value.as_mapping_mut().is_none());
    /// # Ok::<_, Box<dyn std::error::Error>>(())
    /// ```
    pub fn as_mapping_mut(&mut self) -> Option<MappingMut<'_>> {
        match self.data.raw(self.id) {
            Raw::Mapping(..) => Some(MappingMut::new(self.data, self.id)),
            _ => None,
        }
    }

    /// Convert the value into a [`MappingMut`] with the lifetime of the
    /// underlying document.
    ///
    /// # Examples
    ///
    /// ```
    /// use yamlmerge::yaml;
    ///
    /// let mut doc = yaml::from_slice("one: 1")?;
    /// let root = doc.as_mut().into_mapping_mut().ok_or("missing root mapping")?;
    /// assert_eq!(root.as_ref().len(), 1);
    /// # Ok::<_, Box<dyn std::error::Error>>(())
    /// ```
    pub fn into_mapping_mut(self) -> Option<MappingMut<'a>> {
        match self.data.raw(self.id) {
            Raw::Mapping(..) => Some(MappingMut::new(self.data, self.id)),
            _ => None,
        }
    }
}
