use std::borrow::Cow;
use std::collections::hash_map::{self, HashMap};
use std::fmt;
use std::hash::Hash;
use std::iter;
use std::num::NonZeroUsize;

use bstr::BStr;
use twox_hash::xxh3::{Hash128, HasherExt};

use crate::yaml::raw::{
    self, Raw, RawMapping, RawMappingItem, RawMappingKind, RawSequence, RawSequenceItem,
    RawSequenceKind,
};

/// The unique hash of a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub(crate) struct StringId(u128);

impl fmt::Display for StringId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// An opaque identifier for a value inside of a [`Document`].
///
/// Is constructed through [`Value::id`] or [`Mapping::id`] and can be
/// converted into a [`Value`] again through [`Document::value`].
///
/// Identifiers are only meaningful for the document they were taken from.
///
/// [`Value::id`]: crate::yaml::Value::id
/// [`Mapping::id`]: crate::yaml::Mapping::id
/// [`Value`]: crate::yaml::Value
/// [`Document`]: crate::yaml::Document
/// [`Document::value`]: crate::yaml::Document::value
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Id(NonZeroUsize);

impl Id {
    #[inline]
    fn get(self) -> usize {
        self.0.get().wrapping_sub(1)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.get())
    }
}

#[derive(Debug, Clone)]
struct Entry {
    raw: Raw,
    /// Whitespace, comments and node properties which precede the value.
    prefix: StringId,
}

/// Moves lines of copied text from one column to another.
///
/// Text which is copied between documents keeps its own line structure, but
/// the lines have to be shifted if the collection it is placed in starts at a
/// different column than the one it was taken from.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Reindent {
    from: usize,
    to: usize,
}

impl Reindent {
    #[inline]
    pub(crate) fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    /// Translate a column.
    #[inline]
    pub(crate) fn column(self, column: usize) -> usize {
        column.saturating_sub(self.from).wrapping_add(self.to)
    }

    /// Shift every line which follows a line break in a prefix.
    ///
    /// The first line is left alone, since it continues the line of whatever
    /// precedes the string. Blank lines are left alone. A trailing line break
    /// is followed by the token the prefix belongs to, so indentation is
    /// added after it.
    pub(crate) fn apply(self, string: &[u8]) -> Cow<'_, [u8]> {
        self.shift_lines(string, true)
    }

    /// Shift the lines of scalar text, where a trailing line break ends the
    /// text.
    pub(crate) fn apply_text(self, string: &[u8]) -> Cow<'_, [u8]> {
        self.shift_lines(string, false)
    }

    fn shift_lines(self, string: &[u8], prefix: bool) -> Cow<'_, [u8]> {
        if self.from == self.to || memchr::memchr(raw::NEWLINE, string).is_none() {
            return Cow::Borrowed(string);
        }

        let mut out = Vec::with_capacity(string.len());
        let first = memchr::memchr(raw::NEWLINE, string).map_or(string.len(), |n| n + 1);
        out.extend_from_slice(&string[..first]);

        let mut rest = &string[first..];

        while !rest.is_empty() {
            let end = memchr::memchr(raw::NEWLINE, rest).map_or(rest.len(), |n| n + 1);
            let line = &rest[..end];
            rest = &rest[end..];

            if matches!(line.first(), Some(&(raw::NEWLINE | b'\r'))) {
                out.extend_from_slice(line);
                continue;
            }

            self.shift(&mut out, line);
        }

        // A trailing line break is followed by a token in the first column.
        if prefix && string.last() == Some(&raw::NEWLINE) && self.to > self.from {
            out.extend(iter::repeat(raw::SPACE).take(self.to - self.from));
        }

        Cow::Owned(out)
    }

    fn shift(self, out: &mut Vec<u8>, line: &[u8]) {
        if self.to > self.from {
            out.extend(iter::repeat(raw::SPACE).take(self.to - self.from));
            out.extend_from_slice(line);
        } else {
            let strip = line
                .iter()
                .take(self.from - self.to)
                .take_while(|b| matches!(b, &&(raw::SPACE | b'\t')))
                .count();
            out.extend_from_slice(&line[strip..]);
        }
    }
}

/// Storage for all the values and strings of a document.
#[derive(Clone, Default)]
pub(crate) struct Data {
    strings: HashMap<StringId, Box<[u8]>>,
    slab: slab::Slab<Entry>,
}

impl Data {
    /// Get a string.
    #[inline]
    pub(crate) fn str(&self, id: StringId) -> &BStr {
        let Some(string) = self.strings.get(&id) else {
            panic!("missing string with id {id}");
        };

        BStr::new(string.as_ref())
    }

    /// Insert a string into the string cache.
    pub(crate) fn insert_str<B>(&mut self, string: B) -> StringId
    where
        B: AsRef<[u8]>,
    {
        let mut hasher = Hash128::default();
        string.as_ref().hash(&mut hasher);
        let id = StringId(hasher.finish_ext());

        if let hash_map::Entry::Vacant(e) = self.strings.entry(id) {
            e.insert(string.as_ref().into());
        }

        id
    }

    #[inline]
    pub(crate) fn prefix(&self, id: Id) -> &BStr {
        if let Some(entry) = self.slab.get(id.get()) {
            return self.str(entry.prefix);
        }

        panic!("expected raw at {id}")
    }

    #[inline]
    pub(crate) fn raw(&self, id: Id) -> &Raw {
        if let Some(entry) = self.slab.get(id.get()) {
            return &entry.raw;
        }

        panic!("expected raw at {id}")
    }

    #[inline]
    pub(crate) fn raw_mut(&mut self, id: Id) -> &mut Raw {
        if let Some(entry) = self.slab.get_mut(id.get()) {
            return &mut entry.raw;
        }

        panic!("expected raw at {id}")
    }

    #[inline]
    pub(crate) fn sequence(&self, id: Id) -> &RawSequence {
        if let Some(Entry {
            raw: Raw::Sequence(raw),
            ..
        }) = self.slab.get(id.get())
        {
            return raw;
        }

        panic!("expected sequence at {id}")
    }

    #[inline]
    pub(crate) fn sequence_item(&self, id: Id) -> &RawSequenceItem {
        if let Some(Entry {
            raw: Raw::SequenceItem(raw),
            ..
        }) = self.slab.get(id.get())
        {
            return raw;
        }

        panic!("expected sequence item at {id}")
    }

    #[inline]
    pub(crate) fn mapping(&self, id: Id) -> &RawMapping {
        if let Some(Entry {
            raw: Raw::Mapping(raw),
            ..
        }) = self.slab.get(id.get())
        {
            return raw;
        }

        panic!("expected mapping at {id}")
    }

    #[inline]
    pub(crate) fn mapping_mut(&mut self, id: Id) -> &mut RawMapping {
        if let Some(Entry {
            raw: Raw::Mapping(raw),
            ..
        }) = self.slab.get_mut(id.get())
        {
            return raw;
        }

        panic!("expected mapping at {id}")
    }

    #[inline]
    pub(crate) fn mapping_item(&self, id: Id) -> &RawMappingItem {
        if let Some(Entry {
            raw: Raw::MappingItem(raw),
            ..
        }) = self.slab.get(id.get())
        {
            return raw;
        }

        panic!("expected mapping item at {id}")
    }

    #[inline]
    pub(crate) fn mapping_item_mut(&mut self, id: Id) -> &mut RawMappingItem {
        if let Some(Entry {
            raw: Raw::MappingItem(raw),
            ..
        }) = self.slab.get_mut(id.get())
        {
            return raw;
        }

        panic!("expected mapping item at {id}")
    }

    /// Insert a raw value and return its identifier.
    #[inline]
    pub(crate) fn insert(&mut self, raw: Raw, prefix: StringId) -> Id {
        let index = self.slab.insert(Entry { raw, prefix });
        let index = NonZeroUsize::new(index.wrapping_add(1)).expect("ran out of ids");
        Id(index)
    }

    /// Replace the prefix of a value.
    pub(crate) fn set_prefix(&mut self, id: Id, prefix: StringId) {
        if let Some(entry) = self.slab.get_mut(id.get()) {
            entry.prefix = prefix;
        }
    }

    /// Drop a value recursively.
    pub(crate) fn drop(&mut self, id: Id) {
        let Some(entry) = self.slab.try_remove(id.get()) else {
            return;
        };

        self.drop_kind(entry.raw);
    }

    /// Drop the children of a raw value recursively.
    fn drop_kind(&mut self, raw: Raw) {
        match raw {
            Raw::Mapping(raw) => {
                for item in raw.items {
                    self.drop(item);
                }
            }
            Raw::MappingItem(raw) => {
                self.drop(raw.key);
                self.drop(raw.value);
            }
            Raw::Sequence(raw) => {
                for item in raw.items {
                    self.drop(item);
                }
            }
            Raw::SequenceItem(raw) => {
                self.drop(raw.value);
            }
            Raw::Null(..)
            | Raw::Boolean(..)
            | Raw::Number(..)
            | Raw::String(..)
            | Raw::Alias(..) => {}
        }
    }

    /// Copy a string from another document.
    fn graft_str(&mut self, from: &Data, id: StringId, reindent: Reindent) -> StringId {
        self.insert_str(reindent.apply(from.str(id)))
    }

    /// Deep copy the value `id` from another document into this one,
    /// including its prefix and the lexical form of every node underneath it.
    pub(crate) fn graft(&mut self, from: &Data, id: Id, reindent: Reindent) -> Id {
        let prefix = self.graft_str(from, from.slab[id.get()].prefix, reindent);

        let raw = match from.raw(id) {
            Raw::Null(null) => Raw::Null(*null),
            Raw::Boolean(value) => Raw::Boolean(*value),
            Raw::Number(raw) => Raw::Number(raw::RawNumber::new(
                self.insert_str(from.str(raw.string)),
            )),
            Raw::String(raw) => Raw::String(raw::RawString::new(
                raw.kind,
                self.insert_str(from.str(raw.string)),
                self.insert_str(reindent.apply_text(from.str(raw.original))),
            )),
            Raw::Alias(name) => Raw::Alias(self.insert_str(from.str(*name))),
            Raw::Mapping(raw) => {
                let kind = match raw.kind {
                    RawMappingKind::Block => RawMappingKind::Block,
                    RawMappingKind::Flow { suffix } => RawMappingKind::Flow {
                        suffix: self.graft_str(from, suffix, reindent),
                    },
                };

                let items = raw
                    .items
                    .iter()
                    .map(|item| self.graft(from, *item, reindent))
                    .collect();

                Raw::Mapping(RawMapping {
                    indent: reindent.column(raw.indent),
                    kind,
                    items,
                })
            }
            Raw::MappingItem(raw) => Raw::MappingItem(RawMappingItem {
                key: self.graft(from, raw.key, reindent),
                separator: self.graft_str(from, raw.separator, reindent),
                value: self.graft(from, raw.value, reindent),
                tail: raw.tail.map(|tail| self.graft_str(from, tail, reindent)),
            }),
            Raw::Sequence(raw) => {
                let kind = match raw.kind {
                    RawSequenceKind::Block => RawSequenceKind::Block,
                    RawSequenceKind::Flow { suffix } => RawSequenceKind::Flow {
                        suffix: self.graft_str(from, suffix, reindent),
                    },
                };

                let items = raw
                    .items
                    .iter()
                    .map(|item| self.graft(from, *item, reindent))
                    .collect();

                Raw::Sequence(RawSequence {
                    indent: reindent.column(raw.indent),
                    kind,
                    items,
                })
            }
            Raw::SequenceItem(raw) => Raw::SequenceItem(RawSequenceItem {
                value: self.graft(from, raw.value, reindent),
                tail: raw.tail.map(|tail| self.graft_str(from, tail, reindent)),
            }),
        };

        self.insert(raw, prefix)
    }
}
