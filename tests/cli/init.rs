use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::{CLEAN_CATALOG, CliTest};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.subcommand("init"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .lingotrc.json

    ----- stderr -----
    ");

    let content = test.read_file(".lingotrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["catalogs"][0], "translations/*.ts");
    assert_eq!(parsed["includes"][0], "src");
    assert_eq!(parsed["checkPlaceholders"], true);
    assert!(content.contains("\n  \"catalogs\""));

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".lingotrc.json", "{}")?;

    assert_cmd_snapshot!(test.subcommand("init"), @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    error: .lingotrc.json already exists
    ");
    assert_eq!(test.read_file(".lingotrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.run(&mut test.subcommand("init"))?;
    test.write_file("translations/app_br.ts", CLEAN_CATALOG)?;

    let outcome = test.run(&mut test.subcommand("check"))?;
    assert_eq!(
        outcome.code,
        Some(0),
        "check should work with the initialized config. stderr: {}",
        outcome.stderr
    );
    assert!(test.root().join(".lingotrc.json").exists());

    Ok(())
}
