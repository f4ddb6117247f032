use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::{BASE_NAME, CliTest};

fn pipeline_project() -> Result<CliTest> {
    let test = CliTest::with_pipeline_catalog(&[
        "GuiBuilder_MISSING_TEXTURE",
        "GuiBuilder_MISSING_FONT",
        "GuiBuilder_MISSING_LAYER",
    ])?;
    test.write_bundle(
        "",
        "GuiBuilder_MISSING_TEXTURE=Texture '{0}' is missing\n\
         GuiBuilder_MISSING_FONT=Font '{0}' is missing\n",
    )?;
    test.write_bundle("_fr", "GuiBuilder_MISSING_TEXTURE=Texture '{0}' manquante\n")?;
    Ok(test)
}

#[test]
fn test_show_bound_table() -> Result<()> {
    let test = pipeline_project()?;

    assert_cmd_snapshot!(test.show_command().args([BASE_NAME, "--locale", "fr_FR"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    com.dynamo.bob.pipeline.messages (fr_FR > fr > root)
      <-- resources/com/dynamo/bob/pipeline/messages_fr.properties
      <-- resources/com/dynamo/bob/pipeline/messages.properties

      GuiBuilder_MISSING_TEXTURE  Texture '{0}' manquante       [fr]
      GuiBuilder_MISSING_FONT     Font '{0}' is missing         [root]
      GuiBuilder_MISSING_LAYER    !!GuiBuilder_MISSING_LAYER!!  [missing]

    ✘ 1 of 3 identifiers have no translation

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_show_defaults_to_environment_locale() -> Result<()> {
    let test = pipeline_project()?;

    assert_cmd_snapshot!(test.show_command().arg(BASE_NAME).env("LANG", "fr_CA.UTF-8"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    com.dynamo.bob.pipeline.messages (fr_CA > fr > root)
      <-- resources/com/dynamo/bob/pipeline/messages_fr.properties
      <-- resources/com/dynamo/bob/pipeline/messages.properties

      GuiBuilder_MISSING_TEXTURE  Texture '{0}' manquante       [fr]
      GuiBuilder_MISSING_FONT     Font '{0}' is missing         [root]
      GuiBuilder_MISSING_LAYER    !!GuiBuilder_MISSING_LAYER!!  [missing]

    ✘ 1 of 3 identifiers have no translation

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_show_undeclared_bundle_lists_every_key() -> Result<()> {
    let test = CliTest::with_file(
        "resources/app/messages.properties",
        "Greeting=Hello\nFarewell=Goodbye\n",
    )?;
    test.write_file(
        "resources/app/messages_ja.properties",
        "Greeting=\\u3053\\u3093\\u306b\\u3061\\u306f\n",
    )?;

    assert_cmd_snapshot!(test.show_command().args(["app.messages", "--locale", "ja"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    app.messages (ja > root)
      <-- resources/app/messages_ja.properties
      <-- resources/app/messages.properties

      Greeting  こんにちは  [ja]
      Farewell  Goodbye     [root]

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_show_undeclared_bundle_with_escaped_keys() -> Result<()> {
    let test = CliTest::with_file(
        "resources/app/messages.properties",
        "a\\ b=c\nkey\\=with\\:separators=d\n",
    )?;

    assert_cmd_snapshot!(test.show_command().args(["app.messages", "--locale", "C"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    app.messages (root)
      <-- resources/app/messages.properties

      a b                  c  [root]
      key=with:separators  d  [root]

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_show_unknown_bundle() -> Result<()> {
    let test = pipeline_project()?;

    test.settings().bind(|| {
        assert_cmd_snapshot!(test.show_command().arg("com.example.absent"), @r"
        success: false
        exit_code: 2
        ----- stdout -----

        ----- stderr -----
        Error: no resource bundle found for 'com.example.absent' (searched: [TEMP_DIR]/./resources/com/example/absent.properties)
        ");
    });

    Ok(())
}

#[test]
fn test_show_rejects_base_name_outside_bundles_root() -> Result<()> {
    let test = pipeline_project()?;
    test.write_file("secret/keys.properties", "token=hunter2\n")?;
    let base_name = format!("x.{}/secret/keys", test.root().display());

    test.settings().bind(|| {
        assert_cmd_snapshot!(test.show_command().arg(&base_name), @r#"
        success: false
        exit_code: 2
        ----- stdout -----

        ----- stderr -----
        Error: invalid bundle base name "x.[TEMP_DIR]/secret/keys"
        "#);
    });

    Ok(())
}
