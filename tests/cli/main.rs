use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

mod check;
mod init;
mod show;

const BIN_NAME: &str = "msgbind";

pub const BASE_NAME: &str = "com.dynamo.bob.pipeline.messages";
pub const BUNDLE_DIR: &str = "resources/com/dynamo/bob/pipeline";

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        // Stop config discovery at the temp dir.
        fs::create_dir(project_dir.join(".git"))?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    pub fn with_file(path: &str, content: &str) -> Result<Self> {
        let test = Self::new()?;
        test.write_file(path, content)?;
        Ok(test)
    }

    /// A project with a config declaring the pipeline catalog and a root
    /// bundle defining every identifier.
    pub fn with_pipeline_catalog(identifiers: &[&str]) -> Result<Self> {
        let test = Self::new()?;
        let config = serde_json::json!({
            "bundlesRoot": "./resources",
            "catalogs": [{ "bundle": BASE_NAME, "identifiers": identifiers }],
        });
        test.write_file(".msgbindrc.json", &serde_json::to_string_pretty(&config)?)?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    /// Writes `messages{suffix}.properties` into the pipeline bundle dir.
    pub fn write_bundle(&self, suffix: &str, content: &str) -> Result<()> {
        self.write_file(&format!("{}/messages{}.properties", BUNDLE_DIR, suffix), content)
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    pub fn check_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("check");
        cmd
    }

    pub fn show_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("show");
        cmd
    }

    /// Snapshot settings that replace the project path with `[TEMP_DIR]`.
    pub fn settings(&self) -> insta::Settings {
        let mut settings = insta::Settings::clone_current();
        settings.add_filter(
            &regex::escape(&self.project_dir.to_string_lossy()),
            "[TEMP_DIR]",
        );
        settings
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }
}
