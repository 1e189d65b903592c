use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::{CLEAN_CATALOG, CliTest};

const CATALOG_WITH_ISSUES: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE TS>
<TS version="2.1" language="br_FR">
<context>
    <name>ExportDialog</name>
    <message>
        <location filename="../src/export.py" line="20"/>
        <source>Saved to {path}</source>
        <translation>Enrollet</translation>
    </message>
    <message>
        <location filename="../src/export.py" line="31"/>
        <source>Cancel</source>
        <translation type="unfinished"></translation>
    </message>
    <message>
        <source>Recent files</source>
        <translation type="vanished">Restroù nevez</translation>
    </message>
</context>
</TS>
"#;

#[test]
fn test_clean_catalog() -> Result<()> {
    let test = CliTest::with_file("translations/app_br.ts", CLEAN_CATALOG)?;

    assert_cmd_snapshot!(test.subcommand("check"), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 1 catalog - no issues found

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_reports_issues() -> Result<()> {
    let test = CliTest::with_file("translations/app_br.ts", CATALOG_WITH_ISSUES)?;

    // Retired entries are only reported on request.
    assert_cmd_snapshot!(test.subcommand("check"), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    error: "Saved to {path}"  placeholder-mismatch
      --> translations/app_br.ts:6
       = note: in context ExportDialog: missing {path}

    warning: "Cancel"  unfinished
      --> translations/app_br.ts:11
       = note: in context ExportDialog

    ✘ 2 problems (1 error, 1 warning)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_selected_rules() -> Result<()> {
    let test = CliTest::with_file("translations/app_br.ts", CATALOG_WITH_ISSUES)?;

    // Warnings alone do not fail the run.
    assert_cmd_snapshot!(test.subcommand("check").args(["unfinished", "obsolete-entry"]), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    warning: "Cancel"  unfinished
      --> translations/app_br.ts:11
       = note: in context ExportDialog

    warning: "Recent files"  obsolete-entry
      --> translations/app_br.ts:17
       = note: in context ExportDialog (vanished)
       = hint: run `lingot clean --apply` to drop entries no longer in the sources

    ✘ 2 problems (0 errors, 2 warnings)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_config_disables_placeholders() -> Result<()> {
    let test = CliTest::with_file("translations/app_br.ts", CATALOG_WITH_ISSUES)?;
    test.write_file(".lingotrc.json", r#"{ "checkPlaceholders": false }"#)?;

    assert_cmd_snapshot!(test.subcommand("check"), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    warning: "Cancel"  unfinished
      --> translations/app_br.ts:11
       = note: in context ExportDialog

    ✘ 1 problem (0 errors, 1 warning)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_identical_translation_respects_ignore_texts() -> Result<()> {
    let catalog = CLEAN_CATALOG.replace("Digeriñ", "Open");
    let test = CliTest::with_file("translations/app_br.ts", &catalog)?;

    assert_cmd_snapshot!(test.subcommand("check"), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    warning: "Open"  identical-translation
      --> translations/app_br.ts:6
      = note: in context MainWindow, translation is identical to source

    ✘ 1 problem (0 errors, 1 warning)

    ----- stderr -----
    "#);

    test.write_file(".lingotrc.json", r#"{ "ignoreTexts": ["Open"] }"#)?;
    assert_cmd_snapshot!(test.subcommand("check"), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 1 catalog - no issues found

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_header_issues() -> Result<()> {
    let catalog = CLEAN_CATALOG.replace(r#"<TS version="2.1" language="br_FR">"#, r#"<TS version="1.1">"#);
    let test = CliTest::with_file("translations/app.ts", &catalog)?;

    assert_cmd_snapshot!(test.subcommand("check"), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    warning: "catalog has no target language"  missing-language
      --> translations/app.ts
      = hint: add a language attribute, e.g. <TS version="2.1" language="fr_FR">

    warning: "unsupported TS version 1.1"  unsupported-version
      --> translations/app.ts

    ✘ 2 problems (0 errors, 2 warnings)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_malformed_catalog() -> Result<()> {
    let test = CliTest::with_file("translations/app_br.ts", CLEAN_CATALOG)?;
    test.write_file("translations/app_fr.ts", "<TS version=\"2.1\"><context>")?;

    // The parser's wording is not ours to pin down.
    let outcome = test.run(&mut test.subcommand("check"))?;

    assert_eq!(outcome.code, Some(1));
    assert!(outcome.stdout.contains("parse-error"));
    assert!(outcome.stdout.contains("  --> translations/app_fr.ts\n"));
    assert!(!outcome.stdout.contains("app_br.ts"));

    Ok(())
}

#[test]
fn test_missing_catalog_argument() -> Result<()> {
    let test = CliTest::with_file("translations/app_br.ts", CLEAN_CATALOG)?;

    assert_cmd_snapshot!(test.subcommand("check").args([
        "--catalog",
        "translations/app_br.ts",
        "--catalog",
        "translations/app_de.ts",
    ]), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    error: "Catalog not found"  parse-error
      --> translations/app_de.ts

    ✘ 1 problem (1 error, 0 warnings)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_no_catalogs() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.subcommand("check"), @r#"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: No catalogs found matching translations/*.ts in '.'
    "#);

    Ok(())
}

#[test]
fn test_invalid_config() -> Result<()> {
    let test = CliTest::with_file("translations/app_br.ts", CLEAN_CATALOG)?;
    test.write_file(".lingotrc.json", "{ not json")?;

    let outcome = test.run(&mut test.subcommand("check"))?;

    assert_eq!(outcome.code, Some(2));
    assert!(outcome.stderr.starts_with("Error: Failed to parse config file:"));

    Ok(())
}

#[test]
fn test_source_root_argument() -> Result<()> {
    let test = CliTest::with_file("project/translations/app_br.ts", CATALOG_WITH_ISSUES)?;

    assert_cmd_snapshot!(test.subcommand("check").args(["unfinished", "--source-root", "project"]), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    warning: "Cancel"  unfinished
      --> project/translations/app_br.ts:11
       = note: in context ExportDialog

    ✘ 1 problem (0 errors, 1 warning)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_absolute_source_root() -> Result<()> {
    let test = CliTest::with_file("translations/app_br.ts", CATALOG_WITH_ISSUES)?;
    let mut cmd = test.subcommand("check");
    cmd.arg("unfinished").arg("--source-root").arg(test.root());

    test.settings().bind(|| {
        assert_cmd_snapshot!(cmd, @r#"
        success: true
        exit_code: 0
        ----- stdout -----
        warning: "Cancel"  unfinished
          --> [PROJECT]/translations/app_br.ts:11
           = note: in context ExportDialog

        ✘ 1 problem (0 errors, 1 warning)

        ----- stderr -----
        "#);
    });

    Ok(())
}

#[test]
fn test_run_from_subdirectory() -> Result<()> {
    let test = CliTest::with_file("translations/app_br.ts", CATALOG_WITH_ISSUES)?;
    test.write_file(".lingotrc.json", "{}")?;
    test.write_file("src/main_window.py", "")?;
    let mut cmd = test.subcommand("check");
    cmd.arg("unfinished").current_dir(test.root().join("src"));

    // Catalogs are found relative to the directory holding the config.
    assert_cmd_snapshot!(cmd, @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    warning: "Cancel"  unfinished
      --> ../translations/app_br.ts:11
       = note: in context ExportDialog

    ✘ 1 problem (0 errors, 1 warning)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    let outcome = test.run(test.command().arg("--help"))?;

    assert_eq!(outcome.code, Some(0));
    for command in ["check", "stats", "update", "clean", "init"] {
        assert!(outcome.stdout.contains(command), "missing {command}");
    }

    Ok(())
}
