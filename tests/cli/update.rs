use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::{CLEAN_CATALOG, CliTest};

const MAIN_WINDOW: &str = r#"from PySide6.QtWidgets import QMainWindow


class MainWindow(QMainWindow):
    def __init__(self):
        super().__init__()
        self.setWindowTitle(self.tr("Open"))
        self.save = self.tr("Save")
"#;

const TOOLBAR: &str = r#"class Toolbar:
    def build(self):
        return self.tr("Open")
"#;

fn project() -> Result<CliTest> {
    let test = CliTest::with_file("translations/app_br.ts", CLEAN_CATALOG)?;
    test.write_file("src/main_window.py", MAIN_WINDOW)?;
    Ok(test)
}

#[test]
fn test_update_dry_run() -> Result<()> {
    let test = project()?;

    assert_cmd_snapshot!(test.subcommand("update"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Extracted 2 string(s) from 1 source file(s)
    translations/app_br.ts
      Found 2 source text(s) (1 new and 1 already existing)
    Would update 1 catalog(s) (0 created).
    Run with --apply to write these catalogs.

    ----- stderr -----
    ");
    assert_eq!(test.read_file("translations/app_br.ts")?, CLEAN_CATALOG);

    Ok(())
}

#[test]
fn test_update_apply() -> Result<()> {
    let test = project()?;

    assert_cmd_snapshot!(test.subcommand("update").arg("--apply"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Extracted 2 string(s) from 1 source file(s)
    translations/app_br.ts
      Found 2 source text(s) (1 new and 1 already existing)
    Updated 1 catalog(s) (0 created).

    ----- stderr -----
    ");

    let catalog = test.read_file("translations/app_br.ts")?;
    assert!(catalog.contains(r#"<location filename="../src/main_window.py" line="7"/>"#));
    assert!(catalog.contains("<translation>Digeriñ</translation>"));
    assert!(catalog.contains(
        "        <location filename=\"../src/main_window.py\" line=\"8\"/>\n        <source>Save</source>\n        <translation type=\"unfinished\"></translation>\n"
    ));
    assert!(catalog.find("<source>Open</source>") < catalog.find("<source>Save</source>"));

    // A second run has nothing left to do.
    assert_cmd_snapshot!(test.subcommand("update"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Extracted 2 string(s) from 1 source file(s)
    translations/app_br.ts
      Found 2 source text(s) (0 new and 2 already existing)
    ✓ All catalogs are up to date

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_update_retires_vanished_strings() -> Result<()> {
    let test = project()?;
    test.write_file("src/main_window.py", "class MainWindow:\n    pass\n")?;

    assert_cmd_snapshot!(test.subcommand("update").arg("--apply"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Extracted 0 string(s) from 1 source file(s)
    translations/app_br.ts
      Found 0 source text(s) (0 new and 0 already existing)
      Retired 1 entr(y/ies)
    Updated 1 catalog(s) (0 created).

    ----- stderr -----
    ");

    let catalog = test.read_file("translations/app_br.ts")?;
    assert!(catalog.contains("<translation type=\"vanished\">Digeriñ</translation>"));
    assert!(!catalog.contains("<location"));

    Ok(())
}

#[test]
fn test_update_no_obsolete() -> Result<()> {
    let test = project()?;
    test.write_file("src/main_window.py", "class MainWindow:\n    pass\n")?;

    assert_cmd_snapshot!(test.subcommand("update").args(["--apply", "--no-obsolete"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Extracted 0 string(s) from 1 source file(s)
    translations/app_br.ts
      Found 0 source text(s) (0 new and 0 already existing)
      Retired 1 entr(y/ies)
      Removed 1 entr(y/ies)
    Updated 1 catalog(s) (0 created).

    ----- stderr -----
    ");

    let catalog = test.read_file("translations/app_br.ts")?;
    assert!(!catalog.contains("Digeriñ"));
    assert!(!catalog.contains("<context>"));

    Ok(())
}

#[test]
fn test_update_same_text_heuristic() -> Result<()> {
    let test = project()?;
    test.write_file("src/toolbar.py", TOOLBAR)?;

    assert_cmd_snapshot!(test.subcommand("update").arg("--apply"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Extracted 3 string(s) from 2 source file(s)
    translations/app_br.ts
      Found 3 source text(s) (2 new and 1 already existing)
      Same-text heuristic provided 1 translation(s)
    Updated 1 catalog(s) (0 created).

    ----- stderr -----
    ");

    let catalog = test.read_file("translations/app_br.ts")?;
    assert!(catalog.contains("<name>Toolbar</name>"));
    assert!(catalog.contains("<translation type=\"unfinished\">Digeriñ</translation>"));

    Ok(())
}

#[test]
fn test_update_without_same_text_heuristic() -> Result<()> {
    let test = project()?;
    test.write_file("src/toolbar.py", TOOLBAR)?;

    let outcome = test.run(test.subcommand("update").args(["--apply", "--no-same-text"]))?;

    assert!(!outcome.stdout.contains("Same-text heuristic"));
    let catalog = test.read_file("translations/app_br.ts")?;
    assert!(!catalog.contains("<translation type=\"unfinished\">Digeriñ</translation>"));

    Ok(())
}

#[test]
fn test_update_creates_missing_catalog() -> Result<()> {
    let test = project()?;

    assert_cmd_snapshot!(test.subcommand("update").args([
        "--apply",
        "--catalog",
        "translations/app_br.ts",
        "--catalog",
        "translations/app_de.ts",
    ]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Extracted 2 string(s) from 1 source file(s)
    translations/app_br.ts
      Found 2 source text(s) (1 new and 1 already existing)
    translations/app_de.ts
      Found 2 source text(s) (2 new and 0 already existing)
    Updated 2 catalog(s) (1 created).

    ----- stderr -----
    ");

    let created = test.read_file("translations/app_de.ts")?;
    assert!(created.contains(r#"<TS version="2.1" language="de">"#));
    assert!(created.contains("<source>Open</source>"));
    assert!(created.contains(r#"<location filename="../src/main_window.py" line="7"/>"#));

    Ok(())
}

#[test]
fn test_update_skips_test_files() -> Result<()> {
    let test = project()?;
    test.write_file(
        "src/tests/test_window.py",
        "class TestWindow:\n    def f(self):\n        self.tr(\"Fixture\")\n",
    )?;
    test.write_file("src/test_utils/widgets.py", "")?;

    let outcome = test.run(&mut test.subcommand("update"))?;

    assert!(outcome.stdout.contains("Extracted 2 string(s) from 2 source file(s)"));

    Ok(())
}

#[test]
fn test_update_project_inside_tests_directory() -> Result<()> {
    let test = CliTest::with_file("tests/myapp/translations/app_br.ts", CLEAN_CATALOG)?;
    test.write_file("tests/myapp/src/main_window.py", MAIN_WINDOW)?;

    assert_cmd_snapshot!(test.subcommand("update").args(["--source-root", "tests/myapp"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Extracted 2 string(s) from 1 source file(s)
    tests/myapp/translations/app_br.ts
      Found 2 source text(s) (1 new and 1 already existing)
    Would update 1 catalog(s) (0 created).
    Run with --apply to write these catalogs.

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_update_from_subdirectory() -> Result<()> {
    let test = project()?;
    test.write_file(".lingotrc.json", "{}")?;
    let mut cmd = test.subcommand("update");
    cmd.arg("--apply").current_dir(test.root().join("src"));

    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Extracted 2 string(s) from 1 source file(s)
    ../translations/app_br.ts
      Found 2 source text(s) (1 new and 1 already existing)
    Updated 1 catalog(s) (0 created).

    ----- stderr -----
    ");

    // Locations stay relative to the catalog, wherever the command ran.
    let catalog = test.read_file("translations/app_br.ts")?;
    assert!(catalog.contains(r#"<location filename="../src/main_window.py" line="7"/>"#));

    Ok(())
}
