use crate::yaml::{self, ErrorKind};

macro_rules! error {
    ($from:expr, $kind:ident, $span:expr) => {
        let error = yaml::from_slice($from).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::$kind, "{:?}", $from);
        assert_eq!(error.span(), $span, "{:?}", $from);
    };
}

#[test]
fn flow_errors() {
    error!("key: [1, 2", BadSequenceTerminator, 5..10);
    error!("[1, 2 : 3]", BadSequenceTerminator, 0..6);
    error!("{a: 1", BadMappingTerminator, 0..5);
    error!("{a 1}", BadMappingSeparator, 1..4);
}

#[test]
fn string_errors() {
    error!("'unterminated", UnterminatedString, 0..13);
    error!("key: \"open", UnterminatedString, 5..10);
}

#[test]
fn block_errors() {
    error!("key: value\nnot a key\n", BadMappingSeparator, 11..20);
    error!("a:\n    b: 1\n  c: 2", ExpectedEof, 14..18);
    error!("a: 1\n---\nb: 2\n", MultipleDocuments, 5..8);
    error!("a: 1\n...\n---\nb: 2\n", MultipleDocuments, 9..12);
    error!("a: 1\n...\n%YAML 1.2\n", MultipleDocuments, 9..18);
    error!("%YAML 1.2\na: 1\n", ExpectedDocumentStart, 10..14);
}

#[test]
fn nested_collection_on_key_line() {
    error!("a: b: c", BadMappingValue, 3..7);
    error!("key: - a", BadMappingValue, 5..8);
    error!("- a: b: c\n", BadMappingValue, 5..9);
}

#[test]
fn reserved_indicators() {
    error!("@foo", ReservedIndicator, 0..1);
    error!("a: `b`", ReservedIndicator, 3..4);
    error!("a: 1\n@b: 2", ReservedIndicator, 5..6);
    error!("[@a]", ReservedIndicator, 1..2);
}

#[test]
fn error_display() {
    let error = yaml::from_slice("[1, 2").unwrap_err();
    assert_eq!(error.to_string(), error.kind().to_string());
}
