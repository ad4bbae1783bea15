use core::fmt;

use crate::yaml::data::{Data, Id};
use crate::yaml::sequence::Iter;
use crate::yaml::Value;

/// Accessor for a sequence.
///
/// # Examples
///
/// ```
/// use yamlmerge::yaml;
///
/// let doc = yaml::from_slice(
///     r#"
///     - one
///     - two
///     - - three
///       - four
///     "#,
/// )?;
///
/// let root = doc.as_ref().as_sequence().ok_or("missing root sequence")?;
/// assert_eq!(root.len(), 3);
/// assert_eq!(root.get(0).and_then(|v| v.as_str()), Some("one"));
///
/// let inner = root.get(2).and_then(|v| v.as_sequence()).ok_or("missing inner sequence")?;
/// assert!(inner.iter().flat_map(|v| v.as_str()).eq(["three", "four"]));
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy)]
pub struct Sequence<'a> {
    data: &'a Data,
    pub(crate) id: Id,
}

impl<'a> Sequence<'a> {
    pub(crate) fn new(data: &'a Data, id: Id) -> Self {
        Self { data, id }
    }

    /// Get the opaque [`Id`] associated with this sequence.
    #[must_use]
    #[inline]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Get the length of the sequence.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.data.sequence(self.id).items.len()
    }

    /// Test if the sequence is empty.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.sequence(self.id).items.is_empty()
    }

    /// Get a value from the sequence by its index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Value<'a>> {
        let item = *self.data.sequence(self.id).items.get(index)?;
        let item = self.data.sequence_item(item);
        Some(Value::new(self.data, item.value))
    }

    /// Returns an iterator over the [Sequence].
    #[must_use]
    #[inline]
    pub fn iter(&self) -> Iter<'a> {
        Iter::new(self.data, &self.data.sequence(self.id).items)
    }
}

impl fmt::Display for Sequence<'_> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Value::new(self.data, self.id).fmt(f)
    }
}

impl fmt::Debug for Sequence<'_> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for Sequence<'a> {
    type Item = Value<'a>;
    type IntoIter = Iter<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
