use std::iter;
use std::mem;

use bstr::ByteSlice;

use crate::yaml::data::{Data, Id, Reindent, StringId};
use crate::yaml::mapping::Entry;
use crate::yaml::raw::{
    self, Raw, RawMapping, RawMappingItem, RawMappingKind, RawSequence, RawSequenceKind,
};
use crate::yaml::{Mapping, StringKind, ValueMut};

/// Mutator for a mapping.
///
/// Values are copied into the mapping from entries of other documents, which
/// means that they keep the formatting they had where they came from.
///
/// # Examples
///
/// ```
/// use yamlmerge::yaml;
///
/// let source = yaml::from_slice("number2: 30 # updated\nnumber3: \"new\"")?;
/// let source = source.as_ref().as_mapping().ok_or("missing source mapping")?;
///
/// let mut doc = yaml::from_slice("'number1': 10\n'number2': 20\n")?;
/// let mut root = doc.as_mut().into_mapping_mut().ok_or("missing root mapping")?;
///
/// let number2 = source.entry(0).ok_or("missing number2")?;
/// let number3 = source.entry(1).ok_or("missing number3")?;
///
/// assert!(root.replace_value(1, &number2));
/// assert_eq!(root.push_entry(&number3), 2);
///
/// assert_eq!(doc.to_string(), "'number1': 10\n'number2': 30\nnumber3: \"new\"\n");
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
pub struct MappingMut<'a> {
    data: &'a mut Data,
    pub(crate) id: Id,
}

impl<'a> MappingMut<'a> {
    pub(crate) fn new(data: &'a mut Data, id: Id) -> Self {
        Self { data, id }
    }

    /// Coerce a mutable mapping as an immutable [Mapping].
    ///
    /// This is useful to be able to directly use methods only available on
    /// [Mapping].
    #[must_use]
    #[inline]
    pub fn as_ref(&self) -> Mapping<'_> {
        Mapping::new(self.data, self.id)
    }

    /// Coerce a mutable mapping into an immutable [Mapping] with the lifetime
    /// of the current reference.
    #[must_use]
    #[inline]
    pub fn into_ref(self) -> Mapping<'a> {
        Mapping::new(self.data, self.id)
    }

    /// Get a value mutably by its key. If the key is present more than once,
    /// the last one wins.
    ///
    /// # Examples
    ///
    /// ```
    /// use yamlmerge::yaml;
    ///
    /// let mut doc = yaml::from_slice("one: 1\ntwo: [2]")?;
    /// let mut root = doc.as_mut().into_mapping_mut().ok_or("missing root mapping")?;
    ///
    /// assert!(root.get_mut("one").is_some());
    /// assert!(root.get_mut("two").is_some());
    /// assert!(root.get_mut("three").is_none());
    /// # Ok::<_, Box<dyn std::error::Error>>(())
    /// ```
    pub fn get_mut(&mut self, key: &str) -> Option<ValueMut<'_>> {
        let id = self
            .as_ref()
            .iter()
            .rev()
            .find(|e| e.key_str().map_or(false, |k| k == key))?
            .value()
            .id;

        Some(ValueMut::new(self.data, id))
    }

    /// Remove the entry at `index`, returning `false` if there is no such
    /// entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use yamlmerge::yaml;
    ///
    /// let mut doc = yaml::from_slice("one: 1\ntwo: 2\nthree: 3\n")?;
    /// let mut root = doc.as_mut().into_mapping_mut().ok_or("missing root mapping")?;
    ///
    /// assert!(root.remove(0));
    /// assert!(!root.remove(2));
    ///
    /// assert_eq!(doc.to_string(), "two: 2\nthree: 3\n");
    /// # Ok::<_, Box<dyn std::error::Error>>(())
    /// ```
    pub fn remove(&mut self, index: usize) -> bool {
        let items = &mut self.data.mapping_mut(self.id).items;

        if index >= items.len() {
            return false;
        }

        let item = items.remove(index);
        let next = items.first().copied();

        // The first entry takes over the prefix of the removed one so that
        // the mapping doesn't start with a stray line break.
        if let (0, Some(next)) = (index, next) {
            let prefix = self.data.prefix(item).to_vec();
            let prefix = self.data.insert_str(prefix);
            self.data.set_prefix(next, prefix);
        }

        self.data.drop(item);
        true
    }

    /// Replace the value of the entry at `index` with a copy of the value of
    /// `from`, which may belong to a different document.
    ///
    /// The key of the existing entry is left untouched, while the new value
    /// keeps all of its original formatting, including the whitespace between
    /// the `:` and the value. A comment on the line of the entry stays on
    /// that line, which for nested values means right after the `:`.
    ///
    /// Returns `false` if there is no entry at `index`.
    ///
    /// # Examples
    ///
    /// ```
    /// use yamlmerge::yaml;
    ///
    /// let source = yaml::from_slice("key:\n  - one\n  - two")?;
    /// let source = source.as_ref().as_mapping().ok_or("missing source mapping")?;
    /// let entry = source.entry(0).ok_or("missing entry")?;
    ///
    /// let mut doc = yaml::from_slice("\"key\": [] # keep me\nother: 1\n")?;
    /// let mut root = doc.as_mut().into_mapping_mut().ok_or("missing root mapping")?;
    /// assert!(root.replace_value(0, &entry));
    /// assert!(!root.replace_value(2, &entry));
    ///
    /// assert_eq!(doc.to_string(), "\"key\": # keep me\n  - one\n  - two\nother: 1\n");
    /// # Ok::<_, Box<dyn std::error::Error>>(())
    /// ```
    pub fn replace_value(&mut self, index: usize, from: &Entry<'_>) -> bool {
        let Some(&item) = self.data.mapping(self.id).items.get(index) else {
            return false;
        };

        let reindent = Reindent::new(from.indent(), self.data.mapping(self.id).indent);
        let value = self.data.graft(from.data, from.value().id, reindent);
        let removed = mem::replace(&mut self.data.mapping_item_mut(item).value, value);
        self.data.drop(removed);

        if matches!(self.data.mapping(self.id).kind, RawMappingKind::Block) {
            self.move_line_tail(item, value);
        }

        true
    }

    /// Text can't follow a value which ends on a later line than it starts
    /// on, so the comment of the entry moves to the first line of the value,
    /// after the `:` or the block scalar header. The comment is dropped if
    /// that line already has one.
    fn move_line_tail(&mut self, item: Id, value: Id) {
        let Some(tail) = self.data.mapping_item(item).tail else {
            return;
        };

        let block_scalar = match self.data.raw(value) {
            Raw::Mapping(RawMapping {
                kind: RawMappingKind::Block,
                ..
            })
            | Raw::Sequence(RawSequence {
                kind: RawSequenceKind::Block,
                ..
            }) => None,
            Raw::String(raw) if matches!(raw.kind, StringKind::Literal | StringKind::Folded) => {
                Some(raw.original)
            }
            _ => return,
        };

        self.data.mapping_item_mut(item).tail = None;

        let comment = self.data.str(tail).to_vec();

        if !comment.contains(&b'#') {
            return;
        }

        match block_scalar {
            Some(original) => {
                let Some(text) = first_line_comment(self.data.str(original), &comment) else {
                    return;
                };

                let text = self.data.insert_str(text);

                if let Raw::String(raw) = self.data.raw_mut(value) {
                    raw.original = text;
                }
            }
            None => {
                let Some(prefix) = first_line_comment(self.data.prefix(value), &comment) else {
                    return;
                };

                let prefix = self.data.insert_str(prefix);
                self.data.set_prefix(value, prefix);
            }
        }
    }

    /// Append a copy of the entry `from` to the end of the mapping, returning
    /// the index of the new entry.
    ///
    /// Both the key and the value keep the formatting they had in the
    /// document they were copied from. The entry is placed on its own line at
    /// the indentation of the mapping.
    ///
    /// # Examples
    ///
    /// ```
    /// use yamlmerge::yaml;
    ///
    /// let source = yaml::from_slice("'three': 3")?;
    /// let source = source.as_ref().as_mapping().ok_or("missing source mapping")?;
    /// let entry = source.entry(0).ok_or("missing entry")?;
    ///
    /// let mut doc = yaml::from_slice(
    ///     r#"
    ///     one: 1
    ///     two: 2
    ///     "#,
    /// )?;
    ///
    /// let mut root = doc.as_mut().into_mapping_mut().ok_or("missing root mapping")?;
    /// assert_eq!(root.push_entry(&entry), 2);
    ///
    /// assert_eq!(
    ///     doc.to_string(),
    ///     r#"
    ///     one: 1
    ///     two: 2
    ///     'three': 3
    ///     "#
    /// );
    /// # Ok::<_, Box<dyn std::error::Error>>(())
    /// ```
    pub fn push_entry(&mut self, from: &Entry<'_>) -> usize {
        let mapping = self.data.mapping(self.id);
        let reindent = Reindent::new(from.indent(), mapping.indent);
        let kind = mapping.kind;

        let key = self.data.graft(from.data, from.key().id, reindent);
        let value = self.data.graft(from.data, from.value().id, reindent);
        let separator = self.data.insert_str(from.data.str(from.separator()));

        let (prefix, tail) = match kind {
            RawMappingKind::Block => {
                let tail = from
                    .line_tail()
                    .map(|tail| self.data.insert_str(from.data.str(tail)));

                (self.line_prefix(), tail)
            }
            RawMappingKind::Flow { .. } => self.flow_layout(),
        };

        let item = self.data.insert(
            Raw::MappingItem(RawMappingItem {
                key,
                separator,
                value,
                tail,
            }),
            prefix,
        );

        let items = &mut self.data.mapping_mut(self.id).items;
        items.push(item);
        items.len() - 1
    }

    /// Construct the prefix which starts a new line in a block mapping.
    fn line_prefix(&mut self) -> StringId {
        let mapping = self.data.mapping(self.id);

        let last = match mapping.items.last() {
            Some(item) => self.data.prefix(*item),
            None => self.data.prefix(self.id),
        };

        // Reuse the line break and indentation of the last line which
        // precedes a key, so that `\r\n` and indentation stay consistent.
        if let Some(n) = last.rfind_byte(raw::NEWLINE) {
            let start = if n > 0 && last[n - 1] == b'\r' { n - 1 } else { n };
            let prefix = last[start..].to_vec();
            return self.data.insert_str(prefix);
        }

        let mut prefix = vec![raw::NEWLINE];
        prefix.extend(iter::repeat(raw::SPACE).take(mapping.indent));
        self.data.insert_str(prefix)
    }

    /// Construct the prefix and tail of a new item in a flow mapping, adding
    /// a comma to the current last item if it lacks one.
    fn flow_layout(&mut self) -> (StringId, Option<StringId>) {
        let Some(&last) = self.data.mapping(self.id).items.last() else {
            return (self.data.insert_str(""), Some(self.data.insert_str("")));
        };

        let tail = self
            .data
            .mapping_item(last)
            .tail
            .unwrap_or_else(|| self.data.insert_str(""));

        if self.data.str(tail).ends_with(b",") {
            return (self.data.insert_str(" "), Some(tail));
        }

        let comma = self.data.insert_str(",");
        self.data.mapping_item_mut(last).tail = Some(comma);
        (self.data.insert_str(" "), Some(tail))
    }
}

/// Append `comment` to the first line of `text`, unless that line already
/// holds a comment or there is no line break to put it in front of.
fn first_line_comment(text: &[u8], comment: &[u8]) -> Option<Vec<u8>> {
    let n = text.find_byte(raw::NEWLINE)?;
    let n = if n > 0 && text[n - 1] == b'\r' { n - 1 } else { n };
    let line = &text[..n];

    if line.contains(&b'#') {
        return None;
    }

    let line = line.trim_end_with(|c| c == ' ' || c == '\t');

    let mut out = Vec::with_capacity(text.len() + comment.len());
    out.extend_from_slice(line);
    out.extend_from_slice(comment);
    out.extend_from_slice(&text[n..]);
    Some(out)
}
