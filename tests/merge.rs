use anyhow::{Context, Result};
use yamlmerge::merge::{self, Error, Side};
use yamlmerge::yaml;

fn merged(source: &str, destination: &str) -> Result<String> {
    let source = yaml::from_slice(source)?;
    let mut destination = yaml::from_slice(destination)?;
    merge::merge(&source, &mut destination)?;
    Ok(destination.to_string())
}

#[test]
fn no_op_merge_is_idempotent() -> Result<()> {
    let destination = r#"
    # deployment settings
    'name': "service"   # quoted on purpose
    replicas: 3

    resources:
      limits: {cpu: 2, memory: 1Gi}
      requests:
        - cpu
        - memory
    "#;

    let source = "name: \"service\"\nreplicas: 3\n";
    assert_eq!(merged(source, destination)?, destination);

    // Merging the destination into itself also changes nothing.
    assert_eq!(merged(destination, destination)?, destination);
    Ok(())
}

#[test]
fn key_identity_is_format_insensitive() -> Result<()> {
    let out = merged("key2: value2_src\n", "'key2': value2_dst\n")?;
    assert_eq!(out, "'key2': value2_src\n");

    let out = merged("'key2': value2_src\n", "\"key2\": value2_dst\n")?;
    assert_eq!(out, "\"key2\": value2_src\n");
    Ok(())
}

#[test]
fn new_keys_adopt_source_formatting() -> Result<()> {
    let out = merged("key1: value1\n", "'key2': 'v'\n'key3': 'w'\n")?;
    assert_eq!(out, "'key2': 'v'\n'key3': 'w'\nkey1: value1\n");
    Ok(())
}

#[test]
fn order_contract() -> Result<()> {
    let out = merged("key1: a\n'key2': b\n", "'key2': v\n'key3': w\n")?;
    assert_eq!(out, "'key2': b\n'key3': w\nkey1: a\n");

    let doc = yaml::from_slice(&out)?;
    let root = doc.as_ref().as_mapping().context("missing root mapping")?;

    let keys = root
        .iter()
        .flat_map(|e| e.key_str())
        .map(|k| k.to_string())
        .collect::<Vec<_>>();

    assert_eq!(keys, ["key2", "key3", "key1"]);
    Ok(())
}

#[test]
fn untouched_entries_keep_their_text() -> Result<()> {
    let destination = concat!(
        "# top\n",
        "alpha:   1    # spaced out\n",
        "beta: \"two\" # replaced\n",
        "gamma:\n",
        "  - x   # item\n",
        "  - y\n",
        "delta: |\n",
        "  literal\n",
        "  text\n",
        "# bottom\n",
    );

    let out = merged("beta: 2\n", destination)?;

    assert_eq!(
        out,
        concat!(
            "# top\n",
            "alpha:   1    # spaced out\n",
            "beta: 2 # replaced\n",
            "gamma:\n",
            "  - x   # item\n",
            "  - y\n",
            "delta: |\n",
            "  literal\n",
            "  text\n",
            "# bottom\n",
        )
    );

    Ok(())
}

#[test]
fn last_entry_keeps_its_line() -> Result<()> {
    let destination = concat!(
        "# settings\n",
        "name: service # the name\n",
        "notes: |+\n",
        "  first\n",
        "\n",
        "\n",
    );

    let out = merged("replicas: 2 # scaled\nport: 80\n", destination)?;

    assert_eq!(
        out,
        concat!(
            "# settings\n",
            "name: service # the name\n",
            "notes: |+\n",
            "  first\n",
            "\n",
            "\n",
            "replicas: 2 # scaled\n",
            "port: 80\n",
        )
    );

    let doc = yaml::from_slice(&out)?;
    let root = doc.as_ref().as_mapping().context("missing root mapping")?;
    assert_eq!(root.get("notes").and_then(|v| v.as_str()), Some("first\n\n\n"));
    assert_eq!(root.get("replicas").and_then(|v| v.as_u32()), Some(2));

    let out = merged("b: 2\n", "a: 1 # c\n")?;
    assert_eq!(out, "a: 1 # c\nb: 2\n");
    Ok(())
}

#[test]
fn nested_values_are_copied_whole() -> Result<()> {
    let source = "server:\n  host: example.com\n  ports: [80, 443]\n";
    let destination = "server: localhost # old\nclient: 1\n";

    let out = merged(source, destination)?;
    assert_eq!(
        out,
        "server: # old\n  host: example.com\n  ports: [80, 443]\nclient: 1\n"
    );

    let doc = yaml::from_slice(&out)?;
    let root = doc.as_ref().as_mapping().context("missing root mapping")?;

    let server = root
        .get("server")
        .and_then(|v| v.as_mapping())
        .context("missing server")?;

    assert_eq!(server.get("host").and_then(|v| v.as_str()), Some("example.com"));
    Ok(())
}

#[test]
fn reindented_between_columns() -> Result<()> {
    let source = concat!(
        "    list:\n",
        "      - one\n",
        "      - two\n",
        "    text: |\n",
        "      block\n",
    );

    let out = merged(source, "list: []\n")?;
    assert_eq!(out, "list:\n  - one\n  - two\ntext: |\n  block\n");

    let doc = yaml::from_slice(&out)?;
    let root = doc.as_ref().as_mapping().context("missing root mapping")?;
    assert_eq!(root.get("text").and_then(|v| v.as_str()), Some("block\n"));
    Ok(())
}

#[test]
fn non_mapping_rejection() -> Result<()> {
    for (source, destination, side) in [
        ("- a", "a: 1", Side::Source),
        ("plain", "a: 1", Side::Source),
        ("a: 1", "- a", Side::Destination),
        ("a: 1", "42", Side::Destination),
        ("a: 1", "", Side::Destination),
    ] {
        let source = yaml::from_slice(source)?;
        let mut doc = yaml::from_slice(destination)?;

        let error = merge::merge(&source, &mut doc).unwrap_err();
        assert!(matches!(error, Error::NotAMapping { side: s } if s == side));
        assert_eq!(doc.to_string(), destination);
    }

    Ok(())
}

#[test]
fn source_is_checked_first() -> Result<()> {
    let source = yaml::from_slice("- a")?;
    let mut destination = yaml::from_slice("- b")?;

    let error = merge::merge(&source, &mut destination).unwrap_err();
    assert_eq!(error.to_string(), "source YAML is not a mapping");
    Ok(())
}

#[test]
fn crlf_destination() -> Result<()> {
    let out = merged("b: 2\nc: 3\n", "a: 1\r\nb: 1\r\n")?;
    assert_eq!(out, "a: 1\r\nb: 2\r\nc: 3\r\n");
    Ok(())
}
