use core::fmt;
use core::ops::Range;

/// An error raised while parsing YAML.
#[derive(Debug)]
pub struct Error {
    span: Range<usize>,
    kind: ErrorKind,
}

impl Error {
    /// Construct a new error.
    #[inline]
    pub(crate) const fn new(span: Range<usize>, kind: ErrorKind) -> Self {
        Self { span, kind }
    }

    /// Get the range of the input span.
    ///
    /// # Examples
    ///
    /// ```
    /// use yamlmerge::yaml;
    ///
    /// let error = yaml::from_slice("key: [1, 2").unwrap_err();
    /// assert_eq!(error.span(), 5..10);
    /// ```
    #[must_use]
    #[inline]
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Get the kind of the error.
    #[must_use]
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl fmt::Display for Error {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}

impl std::error::Error for Error {}

/// The kind of a parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Expected a mapping separator `:`.
    BadMappingSeparator,
    /// Expected a mapping terminator `}`.
    BadMappingTerminator,
    /// Expected a sequence terminator `]`.
    BadSequenceTerminator,
    /// Bad escape sequence in a double-quoted string.
    BadEscape,
    /// Bad hex escape.
    BadHexEscape,
    /// Bad unicode escape.
    BadUnicodeEscape,
    /// A quoted string is missing its closing quote.
    UnterminatedString,
    /// A block mapping or sequence starts on the same line as the key it is
    /// the value of.
    BadMappingValue,
    /// A plain scalar starts with a reserved indicator, `@` or `` ` ``.
    ReservedIndicator,
    /// Directives are not followed by a `---` marker.
    ExpectedDocumentStart,
    /// The input contains more than one document.
    MultipleDocuments,
    /// Expected end of input.
    ExpectedEof,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::BadMappingSeparator => write!(f, "bad mapping separator"),
            ErrorKind::BadMappingTerminator => write!(f, "bad mapping terminator"),
            ErrorKind::BadSequenceTerminator => write!(f, "bad sequence terminator"),
            ErrorKind::BadEscape => write!(f, "bad escape"),
            ErrorKind::BadHexEscape => write!(f, "bad hex escape"),
            ErrorKind::BadUnicodeEscape => write!(f, "bad unicode escape"),
            ErrorKind::UnterminatedString => write!(f, "unterminated string"),
            ErrorKind::BadMappingValue => {
                write!(f, "block collections are not allowed on the line of their key")
            }
            ErrorKind::ReservedIndicator => write!(f, "reserved indicator"),
            ErrorKind::ExpectedDocumentStart => {
                write!(f, "expected a document start marker after directives")
            }
            ErrorKind::MultipleDocuments => {
                write!(f, "multiple documents in one file are not supported")
            }
            ErrorKind::ExpectedEof => write!(f, "expected end of input"),
        }
    }
}
