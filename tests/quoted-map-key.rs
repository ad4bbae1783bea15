use anyhow::{Context, Result};
use yamlmerge::{merge, yaml};

#[test]
fn quoted_map_key() -> Result<()> {
    let doc = yaml::from_slice("'!quoted_keys': |-\n  are compliant")?;

    let root = doc.as_ref().as_mapping().context("missing root")?;
    let value = root.get("!quoted_keys").and_then(|v| v.as_str());

    assert_eq!(value, Some("are compliant"));
    Ok(())
}

#[test]
fn quoted_map_key_merge() -> Result<()> {
    let source = yaml::from_slice("\"!quoted_keys\": plain\n")?;
    let mut destination = yaml::from_slice("'!quoted_keys': |-\n  are compliant\nafter: 1\n")?;

    let report = merge::merge(&source, &mut destination)?;
    assert_eq!(report.replaced, 1);
    assert_eq!(destination.to_string(), "'!quoted_keys': plain\nafter: 1\n");
    Ok(())
}
