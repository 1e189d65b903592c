use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::{CLEAN_CATALOG, CliTest};

const RETIRED_CATALOG: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE TS>
<TS version="2.1" language="br_FR">
<context>
    <name>MainWindow</name>
    <message>
        <location filename="../src/main_window.py" line="12"/>
        <source>Open</source>
        <translation>Digeriñ</translation>
    </message>
    <message>
        <source>Print</source>
        <translation type="vanished">Moullañ</translation>
    </message>
</context>
<context>
    <name>LegacyDialog</name>
    <message>
        <source>Close</source>
        <translation type="obsolete">Serriñ</translation>
    </message>
</context>
</TS>
"#;

#[test]
fn test_clean_dry_run() -> Result<()> {
    let test = CliTest::with_file("translations/app_br.ts", RETIRED_CATALOG)?;

    assert_cmd_snapshot!(test.subcommand("clean"), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
      - translations/app_br.ts:11  MainWindow "Print" (vanished)
      - translations/app_br.ts:18  LegacyDialog "Close" (obsolete)
    Would remove 2 entr(y/ies) in 1 catalog(s).
    Run with --apply to remove these entries.

    ----- stderr -----
    "#);
    assert_eq!(test.read_file("translations/app_br.ts")?, RETIRED_CATALOG);

    Ok(())
}

#[test]
fn test_clean_apply() -> Result<()> {
    let test = CliTest::with_file("translations/app_br.ts", RETIRED_CATALOG)?;

    assert_cmd_snapshot!(test.subcommand("clean").arg("--apply"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Removed 2 entr(y/ies) in 1 catalog(s).

    ----- stderr -----
    ");
    assert_eq!(test.read_file("translations/app_br.ts")?, CLEAN_CATALOG);

    Ok(())
}

#[test]
fn test_clean_nothing_to_do() -> Result<()> {
    let test = CliTest::with_file("translations/app_br.ts", CLEAN_CATALOG)?;

    assert_cmd_snapshot!(test.subcommand("clean").arg("--apply"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ No vanished or obsolete entries

    ----- stderr -----
    ");
    assert_eq!(test.read_file("translations/app_br.ts")?, CLEAN_CATALOG);

    Ok(())
}
