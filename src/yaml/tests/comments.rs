use anyhow::{Context, Result};

use crate::yaml;

#[test]
fn comments_everywhere() -> Result<()> {
    let input = "# c1\n---\n# c2\nkey: value # c3\n# c4\n\nother: 1 # c5\n# end\n";
    let doc = yaml::from_slice(input)?;

    let root = doc.as_ref().as_mapping().context("missing root mapping")?;
    assert_eq!(root.get("key").and_then(|v| v.as_str()), Some("value"));
    assert_eq!(root.get("other").and_then(|v| v.as_u32()), Some(1));
    assert_eq!(doc.to_string(), input);
    Ok(())
}

#[test]
fn hash_inside_values() -> Result<()> {
    let input = "url: http://example.com/#anchor\nquote: 'a # b'\nflow: [a#b, 'c # d']\n";
    let doc = yaml::from_slice(input)?;

    let root = doc.as_ref().as_mapping().context("missing root mapping")?;
    assert_eq!(
        root.get("url").and_then(|v| v.as_str()),
        Some("http://example.com/#anchor")
    );
    assert_eq!(root.get("quote").and_then(|v| v.as_str()), Some("a # b"));

    let flow = root
        .get("flow")
        .and_then(|v| v.as_sequence())
        .context("missing flow")?;

    assert!(flow.iter().flat_map(|v| v.as_str()).eq(["a#b", "c # d"]));
    assert_eq!(doc.to_string(), input);
    Ok(())
}

#[test]
fn comment_before_nested_value() -> Result<()> {
    let input = "a: # note\n  # more\n  b: 1\nc: 2\n";
    let doc = yaml::from_slice(input)?;

    let root = doc.as_ref().as_mapping().context("missing root mapping")?;

    let a = root
        .get("a")
        .and_then(|v| v.as_mapping())
        .context("missing a")?;

    assert_eq!(a.get("b").and_then(|v| v.as_u32()), Some(1));
    assert_eq!(root.get("c").and_then(|v| v.as_u32()), Some(2));
    assert_eq!(doc.to_string(), input);
    Ok(())
}
