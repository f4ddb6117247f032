use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::CliTest;

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["bundlesRoot"], "./resources");
    assert_eq!(parsed["locales"], Value::Array(Vec::new()));
    assert_eq!(parsed["strict"], false);
    assert!(
        parsed.get("catalogs").is_some(),
        "Config should have 'catalogs' field"
    );

    // Verify formatting (2-space indentation)
    assert!(
        content.contains("\n  \"bundlesRoot\""),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .msgbindrc.json

    ----- stderr -----
    ");

    assert!(test.root().join(".msgbindrc.json").exists());

    let content = test.read_file(".msgbindrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".msgbindrc.json", "{}")?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: .msgbindrc.json already exists
    ");

    assert_eq!(test.read_file(".msgbindrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;

    // The generated config declares no catalogs; add one by hand.
    let content = test.read_file(".msgbindrc.json")?;
    let mut config: Value = serde_json::from_str(&content)?;
    config["catalogs"] = serde_json::json!([
        { "bundle": "app.messages", "identifiers": ["Greeting"] }
    ]);
    test.write_file(".msgbindrc.json", &config.to_string())?;
    test.write_file("resources/app/messages.properties", "Greeting=Hello\n")?;

    assert_cmd_snapshot!(test.check_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 1 catalog, 1 bundle file - no issues found

    ----- stderr -----
    ");

    Ok(())
}
