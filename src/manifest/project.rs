#![forbid(unsafe_code)]

//! `Project.toml` manifest
//!
//! ```toml
//! schema_version = 1
//! name = "App"
//!
//! [[targets]]
//! name = "App"
//! platform = "ios"
//! product = "app"
//! bundle_id = "io.xcbuddy.App"
//! sources = ["Sources/**"]
//! ```
//!
//! A manifest without `schema_version` is a legacy (version 0) manifest that
//! `xcbuddy update` migrates.

use clap::ValueEnum;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

/// File name of the manifest inside a project directory
pub const MANIFEST_FILE_NAME: &str = "Project.toml";

/// Schema version written by this release
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

const BUNDLE_ID_PREFIX: &str = "io.xcbuddy";

static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").expect("name pattern is a valid regex")
});

/// Errors that can occur when loading or validating a manifest
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("No Project.toml found at {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read manifest '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write manifest '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse manifest '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize manifest: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error(
        "Invalid name '{0}': names must start with a letter and contain only letters, \
         digits, '-' and '_'"
    )]
    InvalidName(String),

    #[error("Target '{0}' is declared more than once")]
    DuplicateTarget(String),

    #[error("Target '{target}' depends on unknown target '{dependency}'")]
    UnknownDependency { target: String, dependency: String },

    #[error(
        "Manifest schema version {found} is newer than the supported version {supported}",
        supported = CURRENT_SCHEMA_VERSION
    )]
    UnsupportedSchemaVersion { found: u32 },
}

/// Platform a target builds for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    Ios,
    Macos,
    Tvos,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Ios => write!(f, "iOS"),
            Platform::Macos => write!(f, "macOS"),
            Platform::Tvos => write!(f, "tvOS"),
        }
    }
}

/// Kind of product a target builds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Product {
    App,
    Framework,
    UnitTests,
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Product::App => write!(f, "app"),
            Product::Framework => write!(f, "framework"),
            Product::UnitTests => write!(f, "unit tests"),
        }
    }
}

/// A buildable target of a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Target {
    pub name: String,
    pub platform: Platform,
    pub product: Product,
    pub bundle_id: String,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub resources: Vec<String>,
    #[serde(default)]
    pub dependencies: Vec<String>,
}

/// Contents of a `Project.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Project {
    #[serde(default)]
    pub schema_version: u32,
    pub name: String,
    #[serde(default)]
    pub targets: Vec<Target>,
}

impl Project {
    /// Builds the manifest `xcbuddy init` writes: a main target plus a unit
    /// test target depending on it
    pub fn template(name: &str, platform: Platform, product: Product) -> Self {
        let tests_name = format!("{}Tests", name);
        Project {
            schema_version: CURRENT_SCHEMA_VERSION,
            name: name.to_string(),
            targets: vec![
                Target {
                    name: name.to_string(),
                    platform,
                    product,
                    bundle_id: format!("{}.{}", BUNDLE_ID_PREFIX, name),
                    sources: vec!["Sources/**".to_string()],
                    resources: Vec::new(),
                    dependencies: Vec::new(),
                },
                Target {
                    name: tests_name.clone(),
                    platform,
                    product: Product::UnitTests,
                    bundle_id: format!("{}.{}", BUNDLE_ID_PREFIX, tests_name),
                    sources: vec!["Tests/**".to_string()],
                    resources: Vec::new(),
                    dependencies: vec![name.to_string()],
                },
            ],
        }
    }

    /// Path of the manifest inside `dir`
    pub fn manifest_path(dir: &Path) -> PathBuf {
        dir.join(MANIFEST_FILE_NAME)
    }

    /// Loads the manifest from the project directory `dir`
    pub fn load(dir: &Path) -> Result<Self, ManifestError> {
        let path = Self::manifest_path(dir);
        if !path.is_file() {
            return Err(ManifestError::NotFound(dir.to_path_buf()));
        }

        let content = std::fs::read_to_string(&path).map_err(|source| ManifestError::Read {
            path: path.clone(),
            source,
        })?;

        Self::parse(&content).map_err(|source| ManifestError::Parse { path, source })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Checks names, target uniqueness, dependencies and schema version
    pub fn validate(&self) -> Result<(), ManifestError> {
        if self.schema_version > CURRENT_SCHEMA_VERSION {
            return Err(ManifestError::UnsupportedSchemaVersion {
                found: self.schema_version,
            });
        }

        validate_name(&self.name)?;

        let mut seen = HashSet::new();
        for target in &self.targets {
            validate_name(&target.name)?;
            if !seen.insert(target.name.as_str()) {
                return Err(ManifestError::DuplicateTarget(target.name.clone()));
            }
        }

        for target in &self.targets {
            if let Some(dependency) = target
                .dependencies
                .iter()
                .find(|d| !seen.contains(d.as_str()))
            {
                return Err(ManifestError::UnknownDependency {
                    target: target.name.clone(),
                    dependency: dependency.clone(),
                });
            }
        }

        Ok(())
    }

    pub fn to_toml_string(&self) -> Result<String, ManifestError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Writes the manifest into `dir`, returning the written path
    pub fn write(&self, dir: &Path) -> Result<PathBuf, ManifestError> {
        let path = Self::manifest_path(dir);
        let content = self.to_toml_string()?;
        std::fs::write(&path, content).map_err(|source| ManifestError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

fn validate_name(name: &str) -> Result<(), ManifestError> {
    if NAME_PATTERN.is_match(name) {
        Ok(())
    } else {
        Err(ManifestError::InvalidName(name.to_string()))
    }
}
