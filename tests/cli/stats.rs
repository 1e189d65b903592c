use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::{CLEAN_CATALOG, CliTest};

const PARTIAL_CATALOG: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE TS>
<TS version="2.1" language="fr_FR">
<context>
    <name>MainWindow</name>
    <message>
        <location filename="../src/main_window.py" line="12"/>
        <source>Open</source>
        <translation>Ouvrir</translation>
    </message>
    <message>
        <location filename="../src/main_window.py" line="14"/>
        <source>Save</source>
        <translation type="unfinished"></translation>
    </message>
    <message>
        <source>Print</source>
        <translation type="vanished">Imprimer</translation>
    </message>
</context>
</TS>
"#;

#[test]
fn test_stats_table() -> Result<()> {
    let test = CliTest::with_file("translations/app_br.ts", CLEAN_CATALOG)?;
    test.write_file("translations/app_fr.ts", PARTIAL_CATALOG)?;

    assert_cmd_snapshot!(test.subcommand("stats"), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    Catalog                 Language  Finished  Unfinished  Vanished  Obsolete    Done
    translations/app_br.ts  br_FR            1           0         0         0  100.0%
    translations/app_fr.ts  fr_FR            1           1         1         0   50.0%

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_stats_json() -> Result<()> {
    let test = CliTest::with_file("translations/app_fr.ts", PARTIAL_CATALOG)?;

    assert_cmd_snapshot!(test.subcommand("stats").arg("--json"), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    [
      {
        "filePath": "translations/app_fr.ts",
        "language": "fr_FR",
        "contexts": 1,
        "finished": 1,
        "unfinished": 1,
        "vanished": 1,
        "obsolete": 0,
        "completion": 50.0
      }
    ]

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_stats_json_keeps_stdout_clean() -> Result<()> {
    let test = CliTest::with_file("translations/app_fr.ts", PARTIAL_CATALOG)?;
    test.write_file("translations/app_de.ts", "<TS>")?;

    let outcome = test.run(test.subcommand("stats").arg("--json"))?;

    assert_eq!(outcome.code, Some(1));
    let value: Value = serde_json::from_str(&outcome.stdout)?;
    assert_eq!(value.as_array().map(Vec::len), Some(1));
    assert_eq!(value[0]["filePath"], "translations/app_fr.ts");
    assert!(outcome.stderr.contains("parse-error"));
    assert!(outcome.stderr.contains("--> translations/app_de.ts"));

    Ok(())
}

#[test]
fn test_stats_from_subdirectory() -> Result<()> {
    let test = CliTest::with_file("translations/app_br.ts", CLEAN_CATALOG)?;
    test.write_file(".lingotrc.json", "{}")?;
    test.write_file("src/gui/main_window.py", "")?;
    let mut cmd = test.subcommand("stats");
    cmd.current_dir(test.root().join("src").join("gui"));

    assert_cmd_snapshot!(cmd, @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    Catalog                       Language  Finished  Unfinished  Vanished  Obsolete    Done
    ../../translations/app_br.ts  br_FR            1           0         0         0  100.0%

    ----- stderr -----
    "#);

    Ok(())
}
