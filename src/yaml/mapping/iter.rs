use core::slice;

use crate::yaml::data::{Data, Id};
use crate::yaml::mapping::Entry;

/// An immutable iterator over a [`Mapping`][crate::yaml::mapping::Mapping].
///
/// See [`Mapping::iter`][crate::yaml::mapping::Mapping::iter].
pub struct Iter<'a> {
    data: &'a Data,
    mapping: Id,
    iter: slice::Iter<'a, Id>,
}

impl<'a> Iter<'a> {
    #[inline]
    pub(crate) fn new(data: &'a Data, mapping: Id) -> Self {
        Self {
            data,
            mapping,
            iter: data.mapping(mapping).items.iter(),
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = Entry<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let item = *self.iter.next()?;
        Some(Entry::new(self.data, self.mapping, item))
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        let item = *self.iter.nth(n)?;
        Some(Entry::new(self.data, self.mapping, item))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let item = *self.iter.next_back()?;
        Some(Entry::new(self.data, self.mapping, item))
    }
}

impl ExactSizeIterator for Iter<'_> {}
