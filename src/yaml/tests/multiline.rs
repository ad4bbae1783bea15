use anyhow::{Context, Result};

use crate::yaml;

#[test]
fn string_newlines() -> Result<()> {
    let doc = yaml::from_slice(
        r#"
        first: |
          foo

          bar
          baz
        second: 2
        "#,
    )?;

    let root = doc.as_ref().as_mapping().context("missing root mapping")?;

    assert_eq!(
        root.get("first").and_then(|v| v.as_str()),
        Some("foo\n\nbar\nbaz\n")
    );
    assert_eq!(root.get("second").and_then(|v| v.as_u32()), Some(2));

    assert_eq!(
        doc.to_string(),
        r#"
        first: |
          foo

          bar
          baz
        second: 2
        "#
    );

    Ok(())
}

#[test]
fn folded() -> Result<()> {
    let input = "a: >\n  one\n  two\n\n  three\nb: 1\n";
    let doc = yaml::from_slice(input)?;

    let root = doc.as_ref().as_mapping().context("missing root mapping")?;
    assert_eq!(root.get("a").and_then(|v| v.as_str()), Some("one two\nthree\n"));
    assert_eq!(root.get("b").and_then(|v| v.as_u32()), Some(1));
    assert_eq!(doc.to_string(), input);
    Ok(())
}

#[test]
fn chomping() -> Result<()> {
    let input = "strip: |-\n  text\nclip: |\n  text\n\nkeep: |+\n  text\n\nlast: 1\n";
    let doc = yaml::from_slice(input)?;

    let root = doc.as_ref().as_mapping().context("missing root mapping")?;
    assert_eq!(root.get("strip").and_then(|v| v.as_str()), Some("text"));
    assert_eq!(root.get("clip").and_then(|v| v.as_str()), Some("text\n"));
    assert_eq!(root.get("keep").and_then(|v| v.as_str()), Some("text\n\n"));
    assert_eq!(doc.to_string(), input);
    Ok(())
}

#[test]
fn keep_at_end_of_input() -> Result<()> {
    let input = "a: |+\n  text\n\n\n";
    let doc = yaml::from_slice(input)?;

    let root = doc.as_ref().as_mapping().context("missing root mapping")?;
    let a = root.get("a").context("missing a")?;
    assert_eq!(a.as_str(), Some("text\n\n\n"));
    assert_eq!(a.to_string(), "|+\n  text\n\n");
    assert_eq!(doc.to_string(), input);
    Ok(())
}

#[test]
fn indentation_indicator() -> Result<()> {
    let input = "a: |2\n    indented\n  normal\nb: >-1\n  kept\n";
    let doc = yaml::from_slice(input)?;

    let root = doc.as_ref().as_mapping().context("missing root mapping")?;
    assert_eq!(
        root.get("a").and_then(|v| v.as_str()),
        Some("  indented\nnormal\n")
    );
    assert_eq!(root.get("b").and_then(|v| v.as_str()), Some(" kept"));
    assert_eq!(doc.to_string(), input);
    Ok(())
}

#[test]
fn block_header_comment() -> Result<()> {
    let input = "a: | # note\n  x\n";
    let doc = yaml::from_slice(input)?;

    let root = doc.as_ref().as_mapping().context("missing root mapping")?;
    assert_eq!(root.get("a").and_then(|v| v.as_str()), Some("x\n"));
    assert_eq!(doc.to_string(), input);
    Ok(())
}

#[test]
fn root_block() -> Result<()> {
    let input = "|\n  foo\n  bar\n";
    let doc = yaml::from_slice(input)?;
    assert_eq!(doc.as_ref().as_str(), Some("foo\nbar\n"));
    assert_eq!(doc.to_string(), input);
    Ok(())
}

#[test]
fn plain_continuation() -> Result<()> {
    let input = "key: this is\n  a long\n\n  value\nnext: 1\n";
    let doc = yaml::from_slice(input)?;

    let root = doc.as_ref().as_mapping().context("missing root mapping")?;
    assert_eq!(
        root.get("key").and_then(|v| v.as_str()),
        Some("this is a long\nvalue")
    );
    assert_eq!(root.get("next").and_then(|v| v.as_u32()), Some(1));
    assert_eq!(doc.to_string(), input);
    Ok(())
}

#[test]
fn block_in_sequence() -> Result<()> {
    let input = "- |\n  one\n  two\n- three\n";
    let doc = yaml::from_slice(input)?;

    let root = doc.as_ref().as_sequence().context("missing root sequence")?;
    assert_eq!(root.get(0).and_then(|v| v.as_str()), Some("one\ntwo\n"));
    assert_eq!(root.get(1).and_then(|v| v.as_str()), Some("three"));
    assert_eq!(doc.to_string(), input);
    Ok(())
}
