use std::iter;

use bstr::ByteSlice;

use crate::base;
use crate::yaml::data::{Data, Id, StringId};
use crate::yaml::error::{Error, ErrorKind};
use crate::yaml::raw::{
    self, Raw, RawMapping, RawMappingItem, RawMappingKind, RawNumber, RawSequence,
    RawSequenceItem, RawSequenceKind, RawString,
};
use crate::yaml::{Document, Null, StringKind};

type Result<T, E = Error> = std::result::Result<T, E>;

const EOF: u8 = b'\0';

/// Flow indicators which terminate values inside of flow collections.
macro_rules! ctl {
    () => {
        b',' | b']' | b'}' | EOF
    };
}

/// Ascii whitespace matching.
macro_rules! ws {
    () => {
        b'\t' | raw::NEWLINE | b'\x0C' | b'\r' | raw::SPACE
    };
}

/// A parsed mapping key. The cursor is left at the `:` which follows it.
struct Key {
    raw: Raw,
    separator: StringId,
}

/// Chomping indicator of a block scalar.
#[derive(Clone, Copy)]
enum Chomp {
    Strip,
    Clip,
    Keep,
}

/// A YAML parser.
#[derive(Clone)]
pub(crate) struct Parser<'a> {
    scratch: Vec<u8>,
    data: Data,
    parser: base::Parser<'a>,
}

impl<'a> Parser<'a> {
    /// Construct a new default parser.
    pub(crate) fn new(input: &'a [u8]) -> Self {
        Self {
            scratch: Vec::new(),
            data: Data::default(),
            parser: base::Parser::new(input),
        }
    }

    /// Parse a single document.
    pub(crate) fn parse(mut self) -> Result<Document> {
        self.skip_ws();

        let directives = self.directives();

        if self.is_document_start() {
            self.parser.bump(3);
            self.skip_ws();
        } else if directives {
            let start = self.parser.pos();
            return Err(Error::new(
                start..self.line_end(start),
                ErrorKind::ExpectedDocumentStart,
            ));
        }

        let prefix = self.data.insert_str(self.parser.string(0));

        let (root, suffix) = if self.parser.is_eof() || self.is_document_end() {
            (self.data.insert(Raw::Null(Null::Empty), prefix), None)
        } else {
            self.value(prefix, None, false)?
        };

        let suffix = match suffix {
            Some(suffix) => suffix,
            None => self.ws(),
        };

        let suffix = if self.is_document_end() {
            let start = self.parser.pos();
            self.parser.bump(3);
            self.skip_ws();

            let mut string = self.data.str(suffix).to_vec();
            string.extend_from_slice(self.parser.string(start));
            self.data.insert_str(string)
        } else {
            suffix
        };

        if !self.parser.is_eof() {
            let kind = if self.is_document_start() || self.is_directive() {
                ErrorKind::MultipleDocuments
            } else {
                ErrorKind::ExpectedEof
            };

            let start = self.parser.pos();
            return Err(Error::new(start..self.line_end(start), kind));
        }

        Ok(Document::new(suffix, root, self.data))
    }

    /// Consume directives like `%YAML 1.2`, returning `true` if there were
    /// any.
    fn directives(&mut self) -> bool {
        let mut any = false;

        while self.is_directive() {
            self.parser.find(raw::NEWLINE);
            self.skip_ws();
            any = true;
        }

        any
    }

    /// Get the byte at the given absolute position.
    #[inline]
    fn byte(&self, n: usize) -> u8 {
        self.parser.get(n).copied().unwrap_or(EOF)
    }

    /// The column of the cursor.
    #[inline]
    fn column(&self) -> usize {
        self.parser.column(self.parser.pos())
    }

    /// Find the end of the line which contains `start`.
    fn line_end(&self, start: usize) -> usize {
        let rest = self.parser.get(start..).unwrap_or_default();

        match memchr::memchr(raw::NEWLINE, rest) {
            Some(n) => start + n,
            None => start + rest.len(),
        }
    }

    /// Test if the cursor is at a `---` marker in the first column.
    fn is_document_start(&self) -> bool {
        self.is_marker(b"---")
    }

    /// Test if the cursor is at a `...` marker in the first column.
    fn is_document_end(&self) -> bool {
        self.is_marker(b"...")
    }

    /// Test if the cursor is at either document marker, both of which end
    /// whatever node is being parsed.
    fn is_document_boundary(&self) -> bool {
        self.is_document_start() || self.is_document_end()
    }

    fn is_marker(&self, marker: &[u8; 3]) -> bool {
        let pos = self.parser.pos();

        self.parser.column(pos) == 0
            && self.parser.get(pos..pos + 3) == Some(&marker[..])
            && matches!(self.parser.peek_at(3), ws!() | EOF)
    }

    /// Test if the cursor is at a directive.
    fn is_directive(&self) -> bool {
        self.parser.peek() == b'%' && self.column() == 0
    }

    /// Test if the cursor is at a block sequence marker.
    #[inline]
    fn is_sequence_marker(&self) -> bool {
        matches!(self.parser.peek2(), (b'-', ws!() | EOF))
    }

    /// Consume whitespace and comments, returning the number of line breaks
    /// consumed.
    fn skip_ws(&mut self) -> u32 {
        let mut nl = 0u32;

        loop {
            match self.parser.peek() {
                b'#' => {
                    self.parser.find(raw::NEWLINE);
                }
                ws!() => {}
                _ => break,
            }

            if self.parser.is_eof() {
                break;
            }

            nl = nl.wrapping_add(u32::from(self.parser.peek() == raw::NEWLINE));
            self.parser.bump(1);
        }

        nl
    }

    /// Consume whitespace.
    fn ws_nl(&mut self) -> (StringId, u32) {
        let start = self.parser.pos();
        let nl = self.skip_ws();
        (self.data.insert_str(self.parser.string(start)), nl)
    }

    /// Consume whitespace.
    fn ws(&mut self) -> StringId {
        self.ws_nl().0
    }

    /// Insert an empty null value.
    fn empty(&mut self, prefix: StringId) -> Id {
        self.data.insert(Raw::Null(Null::Empty), prefix)
    }

    /// Consume a single value.
    ///
    /// `enclosing` is the column of the block collection the value belongs
    /// to, which is used to tell where multi-line values end.
    fn value(
        &mut self,
        prefix: StringId,
        enclosing: Option<usize>,
        inline: bool,
    ) -> Result<(Id, Option<StringId>)> {
        let (prefix, empty) = self.properties(prefix, enclosing, inline);

        if empty {
            return Ok((self.empty(prefix), None));
        }

        let start = self.parser.pos();

        let raw = match self.parser.peek2() {
            (b'-', ws!() | EOF) if !inline => {
                return self.sequence(prefix);
            }
            (b'[', _) => {
                return Ok((self.flow_sequence(prefix)?, None));
            }
            (b'{', _) => {
                return Ok((self.flow_mapping(prefix)?, None));
            }
            (b'"' | b'\'', _) => {
                let string = self.quoted()?;

                if !inline {
                    if let Some(separator) = self.key_separator() {
                        let key = Key {
                            raw: Raw::String(string),
                            separator,
                        };

                        return self.mapping(start, prefix, key);
                    }
                }

                Raw::String(string)
            }
            (b'|' | b'>', _) if !inline => Raw::String(self.block(enclosing)),
            (b'@' | b'`', _) => {
                return Err(Error::new(
                    start..start + 1,
                    ErrorKind::ReservedIndicator,
                ));
            }
            _ if inline => self.flow_plain(start),
            _ => {
                if let Some(key) = self.plain_key(start) {
                    return self.mapping(start, prefix, key);
                }

                self.plain(start, enclosing)
            }
        };

        Ok((self.data.insert(raw, prefix), None))
    }

    /// Consume node properties such as anchors (`&name`) and tags (`!tag`).
    ///
    /// Properties are kept as part of the prefix of the value they belong to.
    /// Returns `true` if the properties belong to an empty value.
    fn properties(
        &mut self,
        prefix: StringId,
        enclosing: Option<usize>,
        inline: bool,
    ) -> (StringId, bool) {
        if !matches!(self.parser.peek(), b'&' | b'!') {
            return (prefix, false);
        }

        let start = self.parser.pos();
        let mut end = start;
        let mut nl = 0;

        while matches!(self.parser.peek(), b'&' | b'!') {
            while !matches!(self.parser.peek(), ws!() | EOF)
                && !(inline && matches!(self.parser.peek(), ctl!()))
            {
                self.parser.bump(1);
            }

            end = self.parser.pos();
            nl = self.skip_ws();
        }

        let empty = self.parser.is_eof()
            || (inline && matches!(self.parser.peek(), ctl!()))
            || (nl > 0 && enclosing.map_or(false, |n| self.column() <= n));

        // Whitespace following the properties of an empty value belongs to
        // whatever comes next.
        if empty {
            self.parser.reset(end);
        }

        let mut string = self.data.str(prefix).to_vec();
        string.extend_from_slice(self.parser.string(start));
        let prefix = self.data.insert_str(string);

        (prefix, empty)
    }

    /// Parse the value of a block mapping or sequence item, which starts right
    /// after its `:` or `-` marker.
    ///
    /// If the value is empty, the whitespace which follows the marker is
    /// returned so that it can be used for whatever comes next.
    fn item_value(&mut self, indent: usize, compact: bool) -> Result<(Id, Option<StringId>)> {
        let (prefix, nl) = self.ws_nl();
        let column = self.column();

        let nested = !self.parser.is_eof()
            && !self.is_document_boundary()
            && (nl == 0
                || column > indent
                || (compact && column == indent && self.is_sequence_marker()));

        if !nested {
            let empty = self.data.insert_str("");
            return Ok((self.empty(empty), Some(prefix)));
        }

        let start = self.parser.pos();
        let (value, ws) = self.value(prefix, Some(indent), false)?;

        if compact && !self.data.prefix(value).contains(&raw::NEWLINE) {
            if let Raw::Mapping(RawMapping {
                kind: RawMappingKind::Block,
                ..
            })
            | Raw::Sequence(RawSequence {
                kind: RawSequenceKind::Block,
                ..
            }) = self.data.raw(value)
            {
                return Err(Error::new(
                    start..self.line_end(start),
                    ErrorKind::BadMappingValue,
                ));
            }
        }

        Ok((value, ws))
    }

    /// Split the whitespace which follows a block item into what remains on
    /// the line of the item, and what starts at the next line break.
    fn split_line(&mut self, ws: StringId) -> (Option<StringId>, StringId) {
        let string = self.data.str(ws).to_vec();

        let mut n = memchr::memchr(raw::NEWLINE, &string).unwrap_or(string.len());

        if n > 0 && string[n - 1] == b'\r' && n < string.len() {
            n -= 1;
        }

        if n == 0 {
            return (None, ws);
        }

        let tail = self.data.insert_str(&string[..n]);
        let rest = self.data.insert_str(&string[n..]);
        (Some(tail), rest)
    }

    /// Parse a block sequence.
    fn sequence(&mut self, prefix: StringId) -> Result<(Id, Option<StringId>)> {
        let indent = self.column();
        let mut items = Vec::new();
        let mut item_prefix = self.data.insert_str("");

        let trailing = loop {
            self.parser.bump(1);

            let (value, ws) = self.item_value(indent, false)?;
            let ws = match ws {
                Some(ws) => ws,
                None => self.ws(),
            };

            let (tail, ws) = self.split_line(ws);
            let item = Raw::SequenceItem(RawSequenceItem { value, tail });
            items.push(self.data.insert(item, item_prefix));

            if self.parser.is_eof() || self.column() != indent || !self.is_sequence_marker() {
                break ws;
            }

            item_prefix = ws;
        };

        let sequence = Raw::Sequence(RawSequence {
            indent,
            kind: RawSequenceKind::Block,
            items,
        });

        Ok((self.data.insert(sequence, prefix), Some(trailing)))
    }

    /// Parse a block mapping, starting with a key which has already been
    /// parsed.
    fn mapping(
        &mut self,
        start: usize,
        prefix: StringId,
        mut key: Key,
    ) -> Result<(Id, Option<StringId>)> {
        let indent = self.parser.column(start);
        let empty = self.data.insert_str("");
        let mut items = Vec::new();
        let mut item_prefix = empty;

        let trailing = loop {
            self.parser.bump(1);

            let key_id = self.data.insert(key.raw, empty);
            let (value, ws) = self.item_value(indent, true)?;
            let ws = match ws {
                Some(ws) => ws,
                None => self.ws(),
            };

            let (tail, ws) = self.split_line(ws);

            let item = Raw::MappingItem(RawMappingItem {
                key: key_id,
                separator: key.separator,
                value,
                tail,
            });

            items.push(self.data.insert(item, item_prefix));

            if self.parser.is_eof() || self.column() != indent {
                break ws;
            }

            let Some(next) = self.mapping_key()? else {
                break ws;
            };

            item_prefix = ws;
            key = next;
        };

        let mapping = Raw::Mapping(RawMapping {
            indent,
            kind: RawMappingKind::Block,
            items,
        });

        Ok((self.data.insert(mapping, prefix), Some(trailing)))
    }

    /// Parse the key of the next item in a block mapping.
    ///
    /// Returns `None` if the line instead holds something which terminates
    /// the mapping, like a sequence or document marker.
    fn mapping_key(&mut self) -> Result<Option<Key>> {
        if self.is_sequence_marker() || self.is_document_boundary() {
            return Ok(None);
        }

        let start = self.parser.pos();

        if matches!(self.parser.peek(), b'@' | b'`') {
            return Err(Error::new(
                start..start + 1,
                ErrorKind::ReservedIndicator,
            ));
        }

        if matches!(self.parser.peek(), b'"' | b'\'') {
            let string = self.quoted()?;

            if let Some(separator) = self.key_separator() {
                return Ok(Some(Key {
                    raw: Raw::String(string),
                    separator,
                }));
            }
        } else if let Some(key) = self.plain_key(start) {
            return Ok(Some(key));
        }

        Err(Error::new(
            start..self.line_end(start),
            ErrorKind::BadMappingSeparator,
        ))
    }

    /// Test if the cursor is at a `:` which is optionally preceded by spaces,
    /// making whatever was just parsed a mapping key.
    fn key_separator(&mut self) -> Option<StringId> {
        let start = self.parser.pos();

        while matches!(self.parser.peek(), raw::SPACE | b'\t') {
            self.parser.bump(1);
        }

        if self.parser.peek() == b':' && matches!(self.parser.peek_at(1), ws!() | EOF) {
            return Some(self.data.insert_str(self.parser.string(start)));
        }

        self.parser.reset(start);
        None
    }

    /// Find a plain mapping key on the current line, leaving the cursor at
    /// its `:` if one is found.
    fn plain_key(&mut self, start: usize) -> Option<Key> {
        let mut n = start;

        loop {
            match self.byte(n) {
                raw::NEWLINE | EOF if self.parser.get(n).map_or(true, |&b| b == raw::NEWLINE) => {
                    return None;
                }
                b':' if matches!(self.byte(n + 1), ws!() | EOF) => break,
                b'#' if n > start && matches!(self.byte(n - 1), raw::SPACE | b'\t') => {
                    return None;
                }
                _ => {}
            }

            n += 1;
        }

        let text = self.parser.get(start..n).unwrap_or_default();
        let end = start + trim_end(text).len();

        let raw = self.classify(start, end);
        let separator = self.data.insert_str(self.parser.get(end..n).unwrap_or_default());
        self.parser.reset(n);
        Some(Key { raw, separator })
    }

    /// Classify a plain scalar spanning `start..end`.
    fn classify(&mut self, start: usize, end: usize) -> Raw {
        let text = self.parser.get(start..end).unwrap_or_default();

        match text {
            b"" => Raw::Null(Null::Empty),
            b"~" => Raw::Null(Null::Tilde),
            b"null" => Raw::Null(Null::Keyword),
            b"true" => Raw::Boolean(true),
            b"false" => Raw::Boolean(false),
            [b'*', name @ ..] if !name.is_empty() && !name.iter().any(u8::is_ascii_whitespace) => {
                Raw::Alias(self.data.insert_str(name))
            }
            text if is_number(text) => Raw::Number(RawNumber::new(self.data.insert_str(text))),
            text => {
                let string = self.data.insert_str(text);
                Raw::String(RawString::new(StringKind::Bare, string, string))
            }
        }
    }

    /// Find the end of a plain scalar on the line starting at `start`,
    /// excluding trailing comments and whitespace.
    fn plain_line_end(&self, start: usize) -> usize {
        let mut n = start;

        loop {
            match self.byte(n) {
                raw::NEWLINE => break,
                EOF if self.parser.get(n).is_none() => break,
                b'#' if n > start && matches!(self.byte(n - 1), raw::SPACE | b'\t') => break,
                _ => {}
            }

            n += 1;
        }

        let text = self.parser.get(start..n).unwrap_or_default();
        start + trim_end(text).len()
    }

    /// Parse a plain scalar in a block context, including any continuation
    /// lines which are indented deeper than the enclosing collection.
    fn plain(&mut self, start: usize, enclosing: Option<usize>) -> Raw {
        let first = self.plain_line_end(start);
        let mut end = first;
        self.parser.reset(end);

        loop {
            let nl = self.skip_whitespace_only();

            if nl == 0
                || self.parser.is_eof()
                || self.parser.peek() == b'#'
                || self.is_document_boundary()
                || enclosing.map_or(false, |n| self.column() <= n)
            {
                break;
            }

            end = self.plain_line_end(self.parser.pos());
            self.parser.reset(end);
        }

        self.parser.reset(end);

        if end == first {
            return self.classify(start, end);
        }

        let original = self.parser.get(start..end).unwrap_or_default();
        fold(&mut self.scratch, original);

        let string = self.data.insert_str(&self.scratch);
        self.scratch.clear();
        let original = self.data.insert_str(original);
        Raw::String(RawString::new(StringKind::Bare, string, original))
    }

    /// Skip whitespace, but not comments, returning the number of line
    /// breaks.
    fn skip_whitespace_only(&mut self) -> u32 {
        let mut nl = 0u32;

        while matches!(self.parser.peek(), ws!()) && !self.parser.is_eof() {
            nl = nl.wrapping_add(u32::from(self.parser.peek() == raw::NEWLINE));
            self.parser.bump(1);
        }

        nl
    }

    /// Parse a plain scalar inside of a flow collection.
    fn flow_plain(&mut self, start: usize) -> Raw {
        loop {
            match self.parser.peek() {
                ctl!() => break,
                b':' if matches!(self.parser.peek_at(1), ws!() | ctl!()) => break,
                b'#' if matches!(self.byte(self.parser.pos().wrapping_sub(1)), ws!()) => break,
                _ => self.parser.bump(1),
            }
        }

        let text = self.parser.string(start);
        let end = start + trim_end(text).len();
        self.parser.reset(end);

        let original = self.parser.string(start);

        if memchr::memchr(raw::NEWLINE, original).is_none() {
            return self.classify(start, end);
        }

        fold(&mut self.scratch, original);
        let string = self.data.insert_str(&self.scratch);
        self.scratch.clear();
        let original = self.data.insert_str(original);
        Raw::String(RawString::new(StringKind::Bare, string, original))
    }

    /// Consume the whitespace and optional comma which follows an item in a
    /// flow collection.
    fn flow_tail(&mut self) -> (StringId, bool) {
        let start = self.parser.pos();
        self.skip_ws();

        let comma = self.parser.peek() == b',';

        if comma {
            self.parser.bump(1);
        }

        (self.data.insert_str(self.parser.string(start)), comma)
    }

    /// Parse a flow sequence.
    fn flow_sequence(&mut self, prefix: StringId) -> Result<Id> {
        let start = self.parser.pos();
        let indent = self.column();
        self.parser.bump(1);

        let mut items = Vec::new();
        let mut item_prefix = self.ws();

        while self.parser.peek() != b']' {
            if self.parser.is_eof() {
                return Err(Error::new(
                    start..self.parser.pos(),
                    ErrorKind::BadSequenceTerminator,
                ));
            }

            let empty = self.data.insert_str("");
            let (value, _) = self.value(empty, None, true)?;
            let (tail, comma) = self.flow_tail();

            let item = Raw::SequenceItem(RawSequenceItem {
                value,
                tail: Some(tail),
            });

            items.push(self.data.insert(item, item_prefix));
            item_prefix = self.ws();

            if !comma {
                if self.parser.peek() != b']' {
                    return Err(Error::new(
                        start..self.parser.pos(),
                        ErrorKind::BadSequenceTerminator,
                    ));
                }

                break;
            }
        }

        self.parser.bump(1);

        let sequence = Raw::Sequence(RawSequence {
            indent,
            kind: RawSequenceKind::Flow {
                suffix: item_prefix,
            },
            items,
        });

        Ok(self.data.insert(sequence, prefix))
    }

    /// Parse a flow mapping.
    fn flow_mapping(&mut self, prefix: StringId) -> Result<Id> {
        let start = self.parser.pos();
        let indent = self.column();
        self.parser.bump(1);

        let empty = self.data.insert_str("");
        let mut items = Vec::new();
        let mut item_prefix = self.ws();

        while self.parser.peek() != b'}' {
            if self.parser.is_eof() {
                return Err(Error::new(
                    start..self.parser.pos(),
                    ErrorKind::BadMappingTerminator,
                ));
            }

            let key_start = self.parser.pos();
            let key = self.flow_key()?;

            if self.parser.peek() != b':' {
                return Err(Error::new(
                    key_start..self.parser.pos(),
                    ErrorKind::BadMappingSeparator,
                ));
            }

            self.parser.bump(1);

            let key_id = self.data.insert(key.raw, empty);
            let value_prefix = self.ws();

            let value = if matches!(self.parser.peek(), ctl!()) {
                self.empty(value_prefix)
            } else {
                self.value(value_prefix, None, true)?.0
            };

            let (tail, comma) = self.flow_tail();

            let item = Raw::MappingItem(RawMappingItem {
                key: key_id,
                separator: key.separator,
                value,
                tail: Some(tail),
            });

            items.push(self.data.insert(item, item_prefix));
            item_prefix = self.ws();

            if !comma {
                if self.parser.peek() != b'}' {
                    return Err(Error::new(
                        start..self.parser.pos(),
                        ErrorKind::BadMappingTerminator,
                    ));
                }

                break;
            }
        }

        self.parser.bump(1);

        let mapping = Raw::Mapping(RawMapping {
            indent,
            kind: RawMappingKind::Flow {
                suffix: item_prefix,
            },
            items,
        });

        Ok(self.data.insert(mapping, prefix))
    }

    /// Parse the key of an item in a flow mapping.
    fn flow_key(&mut self) -> Result<Key> {
        let raw = if matches!(self.parser.peek(), b'"' | b'\'') {
            Raw::String(self.quoted()?)
        } else {
            let start = self.parser.pos();

            loop {
                match self.parser.peek() {
                    ctl!() | raw::NEWLINE => break,
                    b':' if matches!(self.parser.peek_at(1), ws!() | ctl!()) => break,
                    _ => self.parser.bump(1),
                }
            }

            let end = start + trim_end(self.parser.string(start)).len();
            self.parser.reset(end);
            self.classify(start, end)
        };

        let start = self.parser.pos();

        while matches!(self.parser.peek(), raw::SPACE | b'\t') {
            self.parser.bump(1);
        }

        let separator = self.data.insert_str(self.parser.string(start));
        Ok(Key { raw, separator })
    }

    /// Parse a quoted string.
    fn quoted(&mut self) -> Result<RawString> {
        if self.parser.peek() == b'\'' {
            self.single_quoted()
        } else {
            self.double_quoted()
        }
    }

    /// Read a single-quoted string.
    fn single_quoted(&mut self) -> Result<RawString> {
        let original = self.parser.pos();
        self.parser.bump(1);

        loop {
            match self.parser.peek2() {
                (b'\'', b'\'') => {
                    self.parser.bump(2);
                    self.scratch.push(b'\'');
                }
                (b'\'', _) => {
                    break;
                }
                _ if self.parser.is_eof() => {
                    self.scratch.clear();
                    return Err(Error::new(
                        original..self.parser.pos(),
                        ErrorKind::UnterminatedString,
                    ));
                }
                (b, _) => {
                    self.parser.bump(1);
                    self.scratch.push(b);
                }
            }
        }

        self.parser.bump(1);

        let string = self.data.insert_str(&self.scratch);
        self.scratch.clear();
        let original = self.data.insert_str(self.parser.string(original));
        Ok(RawString::new(StringKind::SingleQuoted, string, original))
    }

    /// Read a double-quoted string.
    fn double_quoted(&mut self) -> Result<RawString> {
        let original = self.parser.pos();
        self.parser.bump(1);

        loop {
            match self.parser.peek() {
                b'"' => break,
                b'\\' => {
                    let start = self.parser.pos();
                    self.parser.bump(1);

                    if let Err(error) = self.unescape(start) {
                        self.scratch.clear();
                        return Err(error);
                    }
                }
                _ if self.parser.is_eof() => {
                    self.scratch.clear();
                    return Err(Error::new(
                        original..self.parser.pos(),
                        ErrorKind::UnterminatedString,
                    ));
                }
                b => {
                    self.scratch.push(b);
                    self.parser.bump(1);
                }
            }
        }

        self.parser.bump(1);

        let string = self.data.insert_str(&self.scratch);
        self.scratch.clear();
        let original = self.data.insert_str(self.parser.string(original));
        Ok(RawString::new(StringKind::DoubleQuoted, string, original))
    }

    /// Unescape into the scratch buffer.
    fn unescape(&mut self, start: usize) -> Result<()> {
        let b = match self.parser.peek() {
            b'n' => raw::NEWLINE,
            b'0' => b'\x00',
            b'a' => b'\x07',
            b'b' => b'\x08',
            b't' | b'\t' => b'\x09',
            b'v' => b'\x0b',
            b'f' => b'\x0c',
            b'r' => b'\r',
            b'e' => b'\x1b',
            b' ' => b' ',
            b'"' => b'"',
            b'/' => b'/',
            b'\\' => b'\\',
            b'N' => return self.unescape_char(start, '\u{85}'),
            b'_' => return self.unescape_char(start, '\u{a0}'),
            b'L' => return self.unescape_char(start, '\u{2028}'),
            b'P' => return self.unescape_char(start, '\u{2029}'),
            b'x' => {
                self.parser.bump(1);
                return self.unescape_unicode(start, 2, ErrorKind::BadHexEscape);
            }
            b'u' => {
                self.parser.bump(1);
                return self.unescape_unicode(start, 4, ErrorKind::BadUnicodeEscape);
            }
            b'U' => {
                self.parser.bump(1);
                return self.unescape_unicode(start, 8, ErrorKind::BadUnicodeEscape);
            }
            raw::NEWLINE | b'\r' => {
                // An escaped line break joins the lines without a space.
                self.skip_whitespace_only();
                return Ok(());
            }
            _ => {
                self.parser.bump(1);
                return Err(Error::new(start..self.parser.pos(), ErrorKind::BadEscape));
            }
        };

        self.scratch.push(b);
        self.parser.bump(1);
        Ok(())
    }

    /// Unescape a single character into the scratch buffer.
    fn unescape_char(&mut self, _start: usize, c: char) -> Result<()> {
        self.scratch
            .extend_from_slice(c.encode_utf8(&mut [0; 4]).as_bytes());
        self.parser.bump(1);
        Ok(())
    }

    /// Unescape a unicode character into the scratch buffer.
    fn unescape_unicode(&mut self, start: usize, count: usize, err: ErrorKind) -> Result<()> {
        let mut c: u32 = 0;

        for _ in 0..count {
            c <<= 4;

            c |= match self.parser.peek() {
                b @ b'0'..=b'9' => u32::from(b - b'0'),
                b @ b'a'..=b'f' => u32::from(b - b'a') + 0xa,
                b @ b'A'..=b'F' => u32::from(b - b'A') + 0xa,
                _ => {
                    self.parser.bump(1);
                    return Err(Error::new(start..self.parser.pos(), err));
                }
            };

            self.parser.bump(1);
        }

        let Some(c) = char::from_u32(c) else {
            return Err(Error::new(start..self.parser.pos(), err));
        };

        self.scratch
            .extend_from_slice(c.encode_utf8(&mut [0; 4]).as_bytes());
        Ok(())
    }

    /// Parse a literal (`|`) or folded (`>`) block scalar.
    fn block(&mut self, enclosing: Option<usize>) -> RawString {
        let start = self.parser.pos();

        let kind = if self.parser.peek() == b'>' {
            StringKind::Folded
        } else {
            StringKind::Literal
        };

        self.parser.bump(1);

        let mut chomp = Chomp::Clip;
        let mut explicit = None;

        for _ in 0..2 {
            match self.parser.peek() {
                b'-' => chomp = Chomp::Strip,
                b'+' => chomp = Chomp::Keep,
                b @ b'1'..=b'9' => explicit = Some(usize::from(b - b'0')),
                _ => break,
            }

            self.parser.bump(1);
        }

        // The rest of the header line can only hold a comment.
        self.parser.find(raw::NEWLINE);

        let header = self.parser.pos();
        let min = enclosing.map_or(0, |n| n + 1);
        let mut indent = explicit.map(|n| enclosing.map_or(n, |e| e + n));

        let mut end = header;
        let mut blank_end = header;
        let mut cursor = header;
        let mut blank = 0usize;

        while self.byte(cursor) == raw::NEWLINE && self.parser.get(cursor).is_some() {
            let line_start = cursor + 1;

            if self.parser.get(line_start).is_none() {
                break;
            }

            let line_end = self.line_end(line_start);
            let line = self.parser.get(line_start..line_end).unwrap_or_default();
            let column = raw::count_indent(line);
            cursor = line_end;

            if line[column..].iter().all(u8::is_ascii_whitespace) {
                blank += 1;
                blank_end = line_end;
                continue;
            }

            if column < min || indent.map_or(false, |n| column < n) {
                break;
            }

            indent.get_or_insert(column);
            end = line_end;
            blank_end = line_end;
            blank = 0;
        }

        // Kept trailing line breaks are part of the value, so they stay with
        // the scalar rather than with whatever follows it.
        let raw_end = match chomp {
            Chomp::Keep if self.byte(blank_end) == raw::NEWLINE => blank_end,
            _ => end,
        };

        self.parser.reset(raw_end);

        let indent = indent.unwrap_or(min);
        let content = self.parser.get(header..end).unwrap_or_default();
        let mut lines = content.split(|&b| b == raw::NEWLINE).skip(1).map(|line| {
            let line = line.get(indent..).unwrap_or_default();
            line.strip_suffix(b"\r").unwrap_or(line)
        });

        match kind {
            StringKind::Folded => {
                let mut first = true;
                let mut pending = 0usize;

                for line in lines {
                    if line.is_empty() {
                        pending += 1;
                        continue;
                    }

                    if !first && pending == 0 {
                        self.scratch.push(raw::SPACE);
                    }

                    self.scratch
                        .extend(iter::repeat(raw::NEWLINE).take(pending));
                    self.scratch.extend_from_slice(line);
                    first = false;
                    pending = 0;
                }
            }
            _ => {
                if let Some(line) = lines.next() {
                    self.scratch.extend_from_slice(line);
                }

                for line in lines {
                    self.scratch.push(raw::NEWLINE);
                    self.scratch.extend_from_slice(line);
                }
            }
        }

        let terminated = end > header && self.byte(end) == raw::NEWLINE;

        let newlines = match chomp {
            Chomp::Strip => 0,
            Chomp::Clip => usize::from(terminated),
            Chomp::Keep => usize::from(terminated) + blank,
        };

        self.scratch
            .extend(iter::repeat(raw::NEWLINE).take(newlines));

        let string = self.data.insert_str(&self.scratch);
        self.scratch.clear();
        let original = self.data.insert_str(self.parser.string(start));
        RawString::new(kind, string, original)
    }
}

/// Trim trailing whitespace.
fn trim_end(text: &[u8]) -> &[u8] {
    let n = text
        .iter()
        .rev()
        .take_while(|b| b.is_ascii_whitespace())
        .count();

    &text[..text.len() - n]
}

/// Fold the lines of a multi-line plain scalar into `out`.
///
/// Line breaks between two lines become a single space, while every empty
/// line becomes a line break.
fn fold(out: &mut Vec<u8>, original: &[u8]) {
    let mut first = true;
    let mut pending = 0usize;

    for line in original.split(|&b| b == raw::NEWLINE) {
        let line = line.trim();

        if line.is_empty() {
            pending += 1;
            continue;
        }

        if !first {
            if pending == 0 {
                out.push(raw::SPACE);
            } else {
                out.extend(iter::repeat(raw::NEWLINE).take(pending));
            }
        }

        out.extend_from_slice(line);
        first = false;
        pending = 0;
    }
}

/// Test if a plain scalar is a number.
fn is_number(text: &[u8]) -> bool {
    let digits = match text {
        [b'-' | b'+', rest @ ..] => rest,
        rest => rest,
    };

    let (mantissa, exponent) = match digits.iter().position(|b| matches!(b, b'e' | b'E')) {
        Some(n) => (&digits[..n], Some(&digits[n + 1..])),
        None => (digits, None),
    };

    let mut dot = false;
    let mut any = false;

    for &b in mantissa {
        match b {
            b'0'..=b'9' => any = true,
            b'.' if !dot => dot = true,
            _ => return false,
        }
    }

    if !any {
        return false;
    }

    match exponent {
        None => true,
        Some([b'-' | b'+', rest @ ..]) | Some(rest) => {
            !rest.is_empty() && rest.iter().all(u8::is_ascii_digit)
        }
    }
}
