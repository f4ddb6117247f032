use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::CliTest;

const TEXTURE: &str = "GuiBuilder_MISSING_TEXTURE";
const FONT: &str = "GuiBuilder_MISSING_FONT";
const LAYER: &str = "GuiBuilder_MISSING_LAYER";

fn pipeline_project() -> Result<CliTest> {
    let test = CliTest::with_pipeline_catalog(&[TEXTURE, FONT, LAYER])?;
    test.write_bundle(
        "",
        "# pipeline diagnostics\n\
         GuiBuilder_MISSING_TEXTURE=Texture '{0}' is missing\n\
         GuiBuilder_MISSING_FONT=Font '{0}' is missing\n",
    )?;
    test.write_bundle("_fr", "GuiBuilder_MISSING_TEXTURE=Texture '{0}' manquante\n")?;
    Ok(test)
}

#[test]
fn test_clean_project() -> Result<()> {
    let test = CliTest::with_pipeline_catalog(&[TEXTURE, FONT])?;
    test.write_bundle("", "GuiBuilder_MISSING_TEXTURE=Texture\nGuiBuilder_MISSING_FONT=Font\n")?;
    test.write_bundle("_fr", "GuiBuilder_MISSING_TEXTURE=Texture fr\n")?;

    assert_cmd_snapshot!(test.check_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 1 catalog, 2 bundle files - no issues found

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_missing_translation_is_warning() -> Result<()> {
    let test = pipeline_project()?;

    assert_cmd_snapshot!(test.check_command(), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    warning: "GuiBuilder_MISSING_LAYER"  missing-translation
      --> resources/com/dynamo/bob/pipeline/messages.properties
      = note: no text in root; bound to "!!GuiBuilder_MISSING_LAYER!!"
      = hint: add `GuiBuilder_MISSING_LAYER=...` to this bundle

    warning: "GuiBuilder_MISSING_LAYER"  missing-translation
      --> resources/com/dynamo/bob/pipeline/messages_fr.properties
      = note: no text in fr > root; bound to "!!GuiBuilder_MISSING_LAYER!!"
      = hint: add `GuiBuilder_MISSING_LAYER=...` to this bundle

    ✘ 2 problems (0 errors, 2 warnings)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_strict_flag_makes_missing_translation_an_error() -> Result<()> {
    let test = pipeline_project()?;

    assert_cmd_snapshot!(test.check_command().arg("--strict"), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    error: "GuiBuilder_MISSING_LAYER"  missing-translation
      --> resources/com/dynamo/bob/pipeline/messages.properties
      = note: no text in root; bound to "!!GuiBuilder_MISSING_LAYER!!"
      = hint: add `GuiBuilder_MISSING_LAYER=...` to this bundle

    error: "GuiBuilder_MISSING_LAYER"  missing-translation
      --> resources/com/dynamo/bob/pipeline/messages_fr.properties
      = note: no text in fr > root; bound to "!!GuiBuilder_MISSING_LAYER!!"
      = hint: add `GuiBuilder_MISSING_LAYER=...` to this bundle

    ✘ 2 problems (2 errors, 0 warnings)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_strict_from_config() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".msgbindrc.json",
        r#"{
          "strict": true,
          "catalogs": [
            { "bundle": "com.dynamo.bob.pipeline.messages", "identifiers": ["GuiBuilder_MISSING_LAYER"] }
          ]
        }"#,
    )?;
    test.write_bundle("", "GuiBuilder_MISSING_TEXTURE=Texture\n")?;

    assert_cmd_snapshot!(test.check_command(), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    error: "GuiBuilder_MISSING_LAYER"  missing-translation
      --> resources/com/dynamo/bob/pipeline/messages.properties
      = note: no text in root; bound to "!!GuiBuilder_MISSING_LAYER!!"
      = hint: add `GuiBuilder_MISSING_LAYER=...` to this bundle

    warning: "GuiBuilder_MISSING_TEXTURE"  unused-key
      --> resources/com/dynamo/bob/pipeline/messages.properties:1
      = note: not declared in catalog com.dynamo.bob.pipeline.messages

    ✘ 2 problems (1 error, 1 warning)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_locale_flag_limits_binds() -> Result<()> {
    let test = pipeline_project()?;

    assert_cmd_snapshot!(test.check_command().args(["--locale", "fr_FR"]), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    warning: "GuiBuilder_MISSING_LAYER"  missing-translation
      --> resources/com/dynamo/bob/pipeline/messages_fr.properties
      = note: no text in fr_FR > fr > root; bound to "!!GuiBuilder_MISSING_LAYER!!"
      = hint: add `GuiBuilder_MISSING_LAYER=...` to this bundle

    ✘ 1 problems (0 errors, 1 warning)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_invalid_locale_flag() -> Result<()> {
    let test = pipeline_project()?;

    assert_cmd_snapshot!(test.check_command().args(["--locale", "not a locale"]), @r#"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Invalid --locale "not a locale": invalid locale tag "not a locale"
    "#);

    Ok(())
}

#[test]
fn test_unused_and_duplicate_keys() -> Result<()> {
    let test = CliTest::with_pipeline_catalog(&[TEXTURE])?;
    test.write_bundle(
        "",
        "GuiBuilder_MISSING_TEXTURE=Texture\n\
         TileSetBuilder_OLD=Old\n\
         GuiBuilder_MISSING_TEXTURE=Texture '{0}' is missing\n",
    )?;

    assert_cmd_snapshot!(test.check_command(), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    warning: "TileSetBuilder_OLD"  unused-key
      --> resources/com/dynamo/bob/pipeline/messages.properties:2
      = note: not declared in catalog com.dynamo.bob.pipeline.messages

    warning: "GuiBuilder_MISSING_TEXTURE"  duplicate-key
      --> resources/com/dynamo/bob/pipeline/messages.properties:3
      = note: first defined at line 1; the later definition is used

    ✘ 2 problems (0 errors, 2 warnings)

    ----- stderr -----
    "#);

    // Warnings fail the run under --strict.
    assert_cmd_snapshot!(test.check_command().args(["--strict", "duplicate"]), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    warning: "GuiBuilder_MISSING_TEXTURE"  duplicate-key
      --> resources/com/dynamo/bob/pipeline/messages.properties:3
      = note: first defined at line 1; the later definition is used

    ✘ 1 problems (0 errors, 1 warning)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_rule_selection() -> Result<()> {
    let test = CliTest::with_pipeline_catalog(&[TEXTURE, LAYER])?;
    test.write_bundle(
        "",
        "GuiBuilder_MISSING_TEXTURE=Texture\nTileSetBuilder_OLD=Old\n",
    )?;

    assert_cmd_snapshot!(test.check_command().arg("unused"), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    warning: "TileSetBuilder_OLD"  unused-key
      --> resources/com/dynamo/bob/pipeline/messages.properties:2
      = note: not declared in catalog com.dynamo.bob.pipeline.messages

    ✘ 1 problems (0 errors, 1 warning)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_orphan_bundle() -> Result<()> {
    let test = CliTest::with_pipeline_catalog(&[TEXTURE])?;
    test.write_bundle("", "GuiBuilder_MISSING_TEXTURE=Texture\n")?;
    test.write_file("resources/com/dynamo/bob/legacy.properties", "a=b\n")?;

    assert_cmd_snapshot!(test.check_command(), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    warning: "bundle file is not used by any catalog"  orphan-bundle
      --> resources/com/dynamo/bob/legacy.properties
      = hint: declare its base name under 'catalogs' or delete the file

    ✘ 1 problems (0 errors, 1 warning)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_missing_bundle_is_error() -> Result<()> {
    let test = CliTest::with_pipeline_catalog(&[TEXTURE])?;
    test.write_file("resources/.keep", "")?;

    assert_cmd_snapshot!(test.check_command(), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    error: "no resource bundle for root"  bundle-error
      --> resources/com/dynamo/bob/pipeline/messages.properties
      = note: while binding catalog com.dynamo.bob.pipeline.messages

    ✘ 1 problems (1 error, 0 warnings)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_malformed_bundle_is_error() -> Result<()> {
    let test = CliTest::with_pipeline_catalog(&[TEXTURE])?;
    test.write_bundle("", "GuiBuilder_MISSING_TEXTURE=ok\nbroken=\\u12G4\n")?;

    assert_cmd_snapshot!(test.check_command(), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    error: "malformed \u escape: \u12G4"  bundle-error
      --> resources/com/dynamo/bob/pipeline/messages.properties:2
      = note: while binding catalog com.dynamo.bob.pipeline.messages

    ✘ 1 problems (1 error, 0 warnings)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_missing_bundles_root() -> Result<()> {
    let test = CliTest::with_pipeline_catalog(&[TEXTURE])?;

    assert_cmd_snapshot!(test.check_command(), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Bundle directory 'resources' does not exist.
    Hint: set 'bundlesRoot' in .msgbindrc.json or pass --bundles-root.
    ");

    Ok(())
}

#[test]
fn test_bundles_root_flag_overrides_config() -> Result<()> {
    let test = CliTest::with_pipeline_catalog(&[TEXTURE])?;
    test.write_file(
        "i18n/com/dynamo/bob/pipeline/messages.properties",
        "GuiBuilder_MISSING_TEXTURE=Texture\n",
    )?;

    assert_cmd_snapshot!(test.check_command().args(["--bundles-root", "i18n"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 1 catalog, 1 bundle file - no issues found

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_no_catalogs_configured() -> Result<()> {
    let test = CliTest::with_file("resources/app/messages.properties", "a=b\n")?;

    assert_cmd_snapshot!(test.check_command(), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: No catalogs configured.
    Hint: declare them under 'catalogs' in .msgbindrc.json (run `msgbind init` to create one).
    ");

    Ok(())
}

#[test]
fn test_invalid_config_is_error() -> Result<()> {
    let test = CliTest::with_file(
        ".msgbindrc.json",
        r#"{ "catalogs": [{ "bundle": "app.messages", "identifiers": ["A", "A"] }] }"#,
    )?;

    assert_cmd_snapshot!(test.check_command(), @r#"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Invalid catalog "app.messages" in 'catalogs': identifier 'A' is declared more than once in catalog 'app.messages'
    "#);

    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.check_command().arg("-h"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Check catalogs against their bundles (missing translations, unused and duplicate keys, orphan bundles)

    Usage: msgbind check [OPTIONS] [CHECKS]...

    Arguments:
      [CHECKS]...  Rules to run (default: all) [possible values: missing, unused, duplicate, orphan]

    Options:
      -l, --locale <LOCALES>             Locales to check (overrides config file; default: every locale on disk) Can be specified multiple times: --locale fr --locale de_DE
          --strict                       Report missing translations as errors and fail on warnings
          --bundles-root <BUNDLES_ROOT>  Bundle directory (overrides config file) [env: MSGBIND_BUNDLES=]
      -v, --verbose                      Enable verbose output
      -h, --help                         Print help

    ----- stderr -----
    ");

    Ok(())
}
