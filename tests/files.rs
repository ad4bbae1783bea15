use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use tempfile::TempDir;
use yamlmerge::files::{self, Error, Options, WriteMode};
use yamlmerge::merge;

fn write(dir: &TempDir, name: &str, contents: &str) -> Result<PathBuf> {
    let path = dir.path().join(name);
    fs::write(&path, contents)?;
    Ok(path)
}

fn atomic() -> Options {
    Options {
        write_mode: WriteMode::Atomic,
    }
}

#[test]
fn end_to_end() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let source = write(&dir, "source.yaml", "key1: value1\n'key2': value2_src")?;
    let destination = write(&dir, "destination.yaml", "'key2': value2\n'key3': value3")?;

    let report = files::merge_files(&source, &destination, &Options::default())?;
    assert_eq!(report.replaced, 1);
    assert_eq!(report.appended, 1);

    let output = fs::read_to_string(&destination)?;
    assert!(output.contains("'key2': value2_src"));
    assert!(output.contains("'key3': value3"));
    assert!(output.contains("key1: value1"));
    assert_eq!(output, "'key2': value2_src\n'key3': value3\nkey1: value1");

    // The source is never written to.
    assert_eq!(
        fs::read_to_string(&source)?,
        "key1: value1\n'key2': value2_src"
    );

    Ok(())
}

#[test]
fn truncates_longer_destination() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let source = write(&dir, "source.yaml", "key: short\n")?;
    let destination = write(&dir, "destination.yaml", "key: a much longer value than before\n")?;

    files::merge_files(&source, &destination, &Options::default())?;
    assert_eq!(fs::read_to_string(&destination)?, "key: short\n");
    Ok(())
}

#[test]
fn atomic_write() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let source = write(&dir, "source.yaml", "b: 2\n")?;
    let destination = write(&dir, "destination.yaml", "# keep\na: 1\n")?;

    files::merge_files(&source, &destination, &atomic())?;
    assert_eq!(fs::read_to_string(&destination)?, "# keep\na: 1\nb: 2\n");

    // No temporary files are left behind.
    let mut names = fs::read_dir(dir.path())?
        .map(|e| Ok(e?.file_name().to_string_lossy().into_owned()))
        .collect::<Result<Vec<_>>>()?;

    names.sort();
    assert_eq!(names, ["destination.yaml", "source.yaml"]);
    Ok(())
}

#[test]
fn missing_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let source = dir.path().join("missing.yaml");
    let destination = write(&dir, "destination.yaml", "a: 1\n")?;

    let error = files::merge_files(&source, &destination, &Options::default()).unwrap_err();
    assert!(matches!(&error, Error::Read { path, .. } if path == &source));
    assert_eq!(fs::read_to_string(&destination)?, "a: 1\n");
    Ok(())
}

#[test]
fn parse_error_location() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let source = write(&dir, "source.yaml", "a: 1\nb: [1, 2\n")?;
    let destination = write(&dir, "destination.yaml", "a: 1\n")?;

    let error = files::merge_files(&source, &destination, &Options::default()).unwrap_err();

    let Error::Parse {
        path, line, column, ..
    } = &error
    else {
        panic!("expected a parse error, got {error:?}");
    };

    assert_eq!(path, &source);
    assert_eq!((*line, *column), (2, 4));
    assert!(error.to_string().ends_with("source.yaml:2:4"));
    assert_eq!(fs::read_to_string(&destination)?, "a: 1\n");
    Ok(())
}

#[test]
fn no_write_when_not_a_mapping() -> Result<()> {
    for options in [Options::default(), atomic()] {
        let dir = tempfile::tempdir()?;
        let source = write(&dir, "source.yaml", "a: 2\n")?;
        let destination = write(&dir, "destination.yaml", "- not\n- a mapping\n")?;

        let error = files::merge_files(&source, &destination, &options).unwrap_err();

        assert!(matches!(
            error,
            Error::Merge {
                source: merge::Error::NotAMapping {
                    side: merge::Side::Destination
                }
            }
        ));

        assert_eq!(
            fs::read_to_string(&destination)?,
            "- not\n- a mapping\n"
        );
    }

    Ok(())
}
