use std::io;

use crate::yaml::data::{Data, Id, StringId};
use crate::yaml::{Null, StringKind};

/// Newline character used in YAML.
pub(crate) const NEWLINE: u8 = b'\n';
/// Space character used in YAML.
pub(crate) const SPACE: u8 = b' ';

/// A raw value.
#[derive(Debug, Clone)]
pub(crate) enum Raw {
    /// A null value.
    Null(Null),
    /// A boolean value.
    Boolean(bool),
    /// A single number.
    Number(RawNumber),
    /// A string.
    String(RawString),
    /// An alias, like `*name`.
    Alias(StringId),
    /// A mapping.
    Mapping(RawMapping),
    /// A mapping item.
    MappingItem(RawMappingItem),
    /// A sequence.
    Sequence(RawSequence),
    /// A sequence item.
    SequenceItem(RawSequenceItem),
}

impl Raw {
    /// Write the lexical form of the raw value.
    pub(crate) fn write_to<O>(&self, data: &Data, o: &mut O) -> io::Result<()>
    where
        O: ?Sized + io::Write,
    {
        match self {
            Raw::Null(null) => {
                null.write_to(o)?;
            }
            Raw::Boolean(true) => {
                o.write_all(b"true")?;
            }
            Raw::Boolean(false) => {
                o.write_all(b"false")?;
            }
            Raw::Number(raw) => {
                o.write_all(data.str(raw.string))?;
            }
            Raw::String(raw) => {
                o.write_all(data.str(raw.original))?;
            }
            Raw::Alias(name) => {
                o.write_all(b"*")?;
                o.write_all(data.str(*name))?;
            }
            Raw::Mapping(raw) => {
                raw.write_to(data, o)?;
            }
            Raw::MappingItem(raw) => {
                raw.write_to(data, o)?;
            }
            Raw::Sequence(raw) => {
                raw.write_to(data, o)?;
            }
            Raw::SequenceItem(raw) => {
                raw.write_to(data, true, o)?;
            }
        }

        Ok(())
    }
}

/// Write a value preceded by its prefix.
pub(crate) fn write_value<O>(data: &Data, id: Id, o: &mut O) -> io::Result<()>
where
    O: ?Sized + io::Write,
{
    o.write_all(data.prefix(id))?;
    data.raw(id).write_to(data, o)
}

/// Count the number of leading indentation characters.
pub(crate) fn count_indent(line: &[u8]) -> usize {
    line.iter()
        .take_while(|b| matches!(b, &&(SPACE | b'\t')))
        .count()
}

/// A YAML number.
#[derive(Debug, Clone)]
pub(crate) struct RawNumber {
    pub(crate) string: StringId,
}

impl RawNumber {
    #[inline]
    pub(crate) fn new(string: StringId) -> Self {
        Self { string }
    }
}

/// A YAML string.
#[derive(Debug, Clone)]
pub(crate) struct RawString {
    pub(crate) kind: StringKind,
    /// The decoded string.
    pub(crate) string: StringId,
    /// The string as it was written, including quotes or block headers.
    pub(crate) original: StringId,
}

impl RawString {
    #[inline]
    pub(crate) fn new(kind: StringKind, string: StringId, original: StringId) -> Self {
        Self {
            kind,
            string,
            original,
        }
    }
}

/// The kind of a mapping.
#[derive(Debug, Clone, Copy)]
pub(crate) enum RawMappingKind {
    /// An indented mapping, one item per line.
    Block,
    /// A flow mapping delimited by `{` and `}`.
    Flow {
        /// Whitespace between the last item and the closing brace.
        suffix: StringId,
    },
}

/// A YAML mapping.
#[derive(Debug, Clone)]
pub(crate) struct RawMapping {
    /// Column at which the keys of a block mapping start.
    pub(crate) indent: usize,
    pub(crate) kind: RawMappingKind,
    pub(crate) items: Vec<Id>,
}

impl RawMapping {
    fn write_to<O>(&self, data: &Data, o: &mut O) -> io::Result<()>
    where
        O: ?Sized + io::Write,
    {
        match self.kind {
            RawMappingKind::Block => {
                for item in &self.items {
                    write_value(data, *item, o)?;
                }
            }
            RawMappingKind::Flow { suffix } => {
                o.write_all(b"{")?;

                for item in &self.items {
                    write_value(data, *item, o)?;
                }

                o.write_all(data.str(suffix))?;
                o.write_all(b"}")?;
            }
        }

        Ok(())
    }
}

/// An item in a YAML mapping.
#[derive(Debug, Clone)]
pub(crate) struct RawMappingItem {
    pub(crate) key: Id,
    /// Whitespace between the key and the `:`.
    pub(crate) separator: StringId,
    pub(crate) value: Id,
    /// Whitespace and comma following the item in a flow mapping.
    pub(crate) tail: Option<StringId>,
}

impl RawMappingItem {
    fn write_to<O>(&self, data: &Data, o: &mut O) -> io::Result<()>
    where
        O: ?Sized + io::Write,
    {
        write_value(data, self.key, o)?;
        o.write_all(data.str(self.separator))?;
        o.write_all(b":")?;
        write_value(data, self.value, o)?;

        if let Some(tail) = self.tail {
            o.write_all(data.str(tail))?;
        }

        Ok(())
    }
}

/// The kind of a sequence.
#[derive(Debug, Clone, Copy)]
pub(crate) enum RawSequenceKind {
    /// A sequence where each item is marked with `-`.
    Block,
    /// A flow sequence delimited by `[` and `]`.
    Flow {
        /// Whitespace between the last item and the closing bracket.
        suffix: StringId,
    },
}

/// A YAML sequence.
#[derive(Debug, Clone)]
pub(crate) struct RawSequence {
    /// Column at which the `-` markers of a block sequence are placed.
    pub(crate) indent: usize,
    pub(crate) kind: RawSequenceKind,
    pub(crate) items: Vec<Id>,
}

impl RawSequence {
    fn write_to<O>(&self, data: &Data, o: &mut O) -> io::Result<()>
    where
        O: ?Sized + io::Write,
    {
        match self.kind {
            RawSequenceKind::Block => {
                for item in &self.items {
                    o.write_all(data.prefix(*item))?;
                    data.sequence_item(*item).write_to(data, true, o)?;
                }
            }
            RawSequenceKind::Flow { suffix } => {
                o.write_all(b"[")?;

                for item in &self.items {
                    o.write_all(data.prefix(*item))?;
                    data.sequence_item(*item).write_to(data, false, o)?;
                }

                o.write_all(data.str(suffix))?;
                o.write_all(b"]")?;
            }
        }

        Ok(())
    }
}

/// An item in a YAML sequence.
#[derive(Debug, Clone)]
pub(crate) struct RawSequenceItem {
    pub(crate) value: Id,
    /// Whitespace and comma following the item in a flow sequence.
    pub(crate) tail: Option<StringId>,
}

impl RawSequenceItem {
    fn write_to<O>(&self, data: &Data, block: bool, o: &mut O) -> io::Result<()>
    where
        O: ?Sized + io::Write,
    {
        if block {
            o.write_all(b"-")?;
        }

        write_value(data, self.value, o)?;

        if let Some(tail) = self.tail {
            o.write_all(data.str(tail))?;
        }

        Ok(())
    }
}
