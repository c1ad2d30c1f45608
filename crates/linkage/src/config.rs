use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::LinkageError;

pub const DEFAULT_RAW_DIR: &str = "data/raw";
pub const DEFAULT_PROCESSED_DIR: &str = "data/processed";
pub const DEFAULT_PAPER_FILE: &str = "Robin_paper-entry_12-6-16.csv";
pub const DEFAULT_USERS_FILE: &str = "Michigan_DB_users_02_01_17.csv";
pub const DEFAULT_WIDE_FILE: &str = "id_mapping.csv";
pub const DEFAULT_LONG_FILE: &str = "id_mapping_long.csv";

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Where the run reads and writes. Every key is optional; the defaults are
/// the fixed project-relative paths.
///
/// ```toml
/// [paths]
/// raw_dir = "data/raw"
/// processed_dir = "data/processed"
///
/// [files]
/// paper = "Robin_paper-entry_12-6-16.csv"
/// users = "Michigan_DB_users_02_01_17.csv"
/// wide  = "id_mapping.csv"
/// long  = "id_mapping_long.csv"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LinkageConfig {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub files: FilesConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_raw_dir")]
    pub raw_dir: PathBuf,
    #[serde(default = "default_processed_dir")]
    pub processed_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            raw_dir: default_raw_dir(),
            processed_dir: default_processed_dir(),
        }
    }
}

fn default_raw_dir() -> PathBuf {
    DEFAULT_RAW_DIR.into()
}

fn default_processed_dir() -> PathBuf {
    DEFAULT_PROCESSED_DIR.into()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FilesConfig {
    #[serde(default = "default_paper")]
    pub paper: String,
    #[serde(default = "default_users")]
    pub users: String,
    #[serde(default = "default_wide")]
    pub wide: String,
    #[serde(default = "default_long")]
    pub long: String,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            paper: default_paper(),
            users: default_users(),
            wide: default_wide(),
            long: default_long(),
        }
    }
}

fn default_paper() -> String {
    DEFAULT_PAPER_FILE.into()
}

fn default_users() -> String {
    DEFAULT_USERS_FILE.into()
}

fn default_wide() -> String {
    DEFAULT_WIDE_FILE.into()
}

fn default_long() -> String {
    DEFAULT_LONG_FILE.into()
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl LinkageConfig {
    pub fn from_toml(input: &str) -> Result<Self, LinkageError> {
        let config: LinkageConfig =
            toml::from_str(input).map_err(|e| LinkageError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), LinkageError> {
        let files = [
            ("paper", &self.files.paper),
            ("users", &self.files.users),
            ("wide", &self.files.wide),
            ("long", &self.files.long),
        ];
        for (key, name) in files {
            if name.trim().is_empty() {
                return Err(LinkageError::ConfigValidation(format!(
                    "files.{key} must not be empty"
                )));
            }
        }

        if self.wide_path() == self.long_path() {
            return Err(LinkageError::ConfigValidation(format!(
                "wide and long outputs both point at {}",
                self.wide_path().display()
            )));
        }

        Ok(())
    }

    pub fn paper_path(&self) -> PathBuf {
        self.paths.raw_dir.join(&self.files.paper)
    }

    pub fn users_path(&self) -> PathBuf {
        self.paths.raw_dir.join(&self.files.users)
    }

    pub fn wide_path(&self) -> PathBuf {
        self.paths.processed_dir.join(&self.files.wide)
    }

    pub fn long_path(&self) -> PathBuf {
        self.paths.processed_dir.join(&self.files.long)
    }

    pub fn processed_dir(&self) -> &Path {
        &self.paths.processed_dir
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
