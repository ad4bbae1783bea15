use anyhow::{Context, Result};

use crate::yaml;

#[test]
fn mapping() -> Result<()> {
    let doc = yaml::from_slice(
        r#"
        one: 1
        two: 2
        three:
          four: 4
          five: 5
        "#,
    )?;

    assert_eq!(
        doc.to_string(),
        r#"
        one: 1
        two: 2
        three:
          four: 4
          five: 5
        "#,
    );

    let root = doc.as_ref().as_mapping().context("missing root mapping")?;
    let three = root
        .get("three")
        .and_then(|v| v.as_mapping())
        .context("missing three")?;

    assert!(three.iter().flat_map(|e| e.value().as_u32()).eq([4, 5]));
    Ok(())
}

#[test]
fn inline_mapping() -> Result<()> {
    let doc = yaml::from_slice(
        r#"
        one: 1
        two: 2
        three:
          four: {inner: 10, inner2: 20}
          five: 5
        "#,
    )?;

    assert_eq!(
        doc.to_string(),
        r#"
        one: 1
        two: 2
        three:
          four: {inner: 10, inner2: 20}
          five: 5
        "#,
    );

    Ok(())
}

#[test]
fn quoted_keys() -> Result<()> {
    let input = "'a' : 1\n\"b\"  : 2\nc   : 3\n'it''s': 4\n\"tab\\tbed\": 5\n";
    let doc = yaml::from_slice(input)?;

    let root = doc.as_ref().as_mapping().context("missing root mapping")?;
    assert_eq!(root.get("a").and_then(|v| v.as_u32()), Some(1));
    assert_eq!(root.get("b").and_then(|v| v.as_u32()), Some(2));
    assert_eq!(root.get("c").and_then(|v| v.as_u32()), Some(3));
    assert_eq!(root.get("it's").and_then(|v| v.as_u32()), Some(4));
    assert_eq!(root.get("tab\tbed").and_then(|v| v.as_u32()), Some(5));

    let keys = root
        .iter()
        .flat_map(|e| e.key_str())
        .map(|k| k.to_string())
        .collect::<Vec<_>>();

    assert_eq!(keys, ["a", "b", "c", "it's", "tab\tbed"]);
    assert_eq!(doc.to_string(), input);
    Ok(())
}

#[test]
fn empty_values() -> Result<()> {
    let input = "a:\nb: ~\nc: null\nd: # nothing\ne:";
    let doc = yaml::from_slice(input)?;

    let root = doc.as_ref().as_mapping().context("missing root mapping")?;
    assert_eq!(root.len(), 5);

    for entry in root {
        assert!(entry.value().is_null(), "{:?} is not null", entry.key());
    }

    assert_eq!(doc.to_string(), input);
    Ok(())
}

#[test]
fn compact_sequence() -> Result<()> {
    let input = "key:\n- a\n- b\nother: 1\n";
    let doc = yaml::from_slice(input)?;

    let root = doc.as_ref().as_mapping().context("missing root mapping")?;
    let key = root
        .get("key")
        .and_then(|v| v.as_sequence())
        .context("missing sequence")?;

    assert!(key.iter().flat_map(|v| v.as_str()).eq(["a", "b"]));
    assert_eq!(root.get("other").and_then(|v| v.as_u32()), Some(1));
    assert_eq!(doc.to_string(), input);
    Ok(())
}

#[test]
fn anchors_and_tags() -> Result<()> {
    let input = "base: &base\n  a: 1\nderived: *base\ntagged: !custom value\nempty: &empty\n";
    let doc = yaml::from_slice(input)?;

    let root = doc.as_ref().as_mapping().context("missing root mapping")?;

    let base = root
        .get("base")
        .and_then(|v| v.as_mapping())
        .context("missing base")?;

    assert_eq!(base.get("a").and_then(|v| v.as_u32()), Some(1));

    let derived = root.get("derived").context("missing derived")?;
    assert!(matches!(derived.into_any(), yaml::Any::Alias(name) if name == "base"));

    assert_eq!(root.get("tagged").and_then(|v| v.as_str()), Some("value"));
    assert!(root.get("empty").context("missing empty")?.is_null());
    assert_eq!(doc.to_string(), input);
    Ok(())
}

#[test]
fn windows_line_endings() -> Result<()> {
    let input = "a: 1\r\nb:\r\n  c: two\r\n";
    let doc = yaml::from_slice(input)?;

    let root = doc.as_ref().as_mapping().context("missing root mapping")?;
    assert_eq!(root.get("a").and_then(|v| v.as_u32()), Some(1));

    let b = root
        .get("b")
        .and_then(|v| v.as_mapping())
        .context("missing b")?;

    assert_eq!(b.get("c").and_then(|v| v.as_str()), Some("two"));
    assert_eq!(doc.to_string(), input);
    Ok(())
}

#[test]
fn value_display() -> Result<()> {
    let doc = yaml::from_slice("key:   \"quoted\"  # comment\nother: |\n  block\n")?;

    let root = doc.as_ref().as_mapping().context("missing root mapping")?;
    let key = root.get("key").context("missing key")?;
    assert_eq!(key.to_string(), "\"quoted\"");

    let other = root.get("other").context("missing other")?;
    assert_eq!(other.to_string(), "|\n  block");
    assert_eq!(other.as_str(), Some("block\n"));
    Ok(())
}
