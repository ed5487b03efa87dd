//! Build configuration.
//!
//! A [`Config`] is handed to every build call. It can be written in code or
//! read from TOML, either a standalone file with a `[restdoc]` table or the
//! `[package.metadata.restdoc]` table of a `Cargo.toml`:
//!
//! ```toml
//! [package.metadata.restdoc]
//! naming = "short"
//!
//! [package.metadata.restdoc.info]
//! title = "Bookstore"
//! version = "1.2.0"
//! ```

use crate::error::{Error, Result};
use crate::naming::{CanonicalNames, NamingPolicy, ShortNames};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Info {
    pub title: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Default for Info {
    fn default() -> Self {
        Self {
            title: "API".to_string(),
            version: "1.0.0".to_string(),
            description: None,
        }
    }
}

/// Built-in naming policies selectable from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamingStrategy {
    #[default]
    Canonical,
    Short,
}

#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub info: Info,
    pub naming: NamingStrategy,
    #[serde(skip)]
    policy: Option<Arc<dyn NamingPolicy>>,
}

#[derive(Deserialize)]
struct ConfigFile {
    restdoc: Option<Config>,
}

#[derive(Deserialize)]
struct Manifest {
    package: Option<ManifestPackage>,
}

#[derive(Deserialize)]
struct ManifestPackage {
    metadata: Option<ManifestMetadata>,
}

#[derive(Deserialize)]
struct ManifestMetadata {
    restdoc: Option<Config>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.info.title = title.into();
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.info.version = version.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.info.description = Some(description.into());
        self
    }

    pub fn naming(mut self, naming: NamingStrategy) -> Self {
        self.naming = naming;
        self
    }

    /// Installs a custom policy; it wins over [`NamingStrategy`].
    pub fn with_naming_policy<P: NamingPolicy + 'static>(mut self, policy: P) -> Self {
        self.policy = Some(Arc::new(policy));
        self
    }

    pub fn naming_policy(&self) -> &dyn NamingPolicy {
        match (&self.policy, self.naming) {
            (Some(policy), _) => policy.as_ref(),
            (None, NamingStrategy::Canonical) => &CanonicalNames,
            (None, NamingStrategy::Short) => &ShortNames,
        }
    }

    /// Parses the `[restdoc]` table of a TOML document; defaults when it is missing.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)?;
        file.restdoc.unwrap_or_default().validated()
    }

    /// Reads `[package.metadata.restdoc]` from a `Cargo.toml`.
    pub fn from_manifest(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let manifest: Manifest = toml::from_str(&content)?;
        manifest
            .package
            .and_then(|package| package.metadata)
            .and_then(|metadata| metadata.restdoc)
            .unwrap_or_default()
            .validated()
    }

    fn validated(self) -> Result<Self> {
        if self.info.title.trim().is_empty() {
            return Err(Error::Config("info.title must not be empty".to_string()));
        }
        if self.info.version.trim().is_empty() {
            return Err(Error::Config("info.version must not be empty".to_string()));
        }
        Ok(self)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("info", &self.info)
            .field("naming", &self.naming)
            .field("custom_policy", &self.policy.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::introspect::TypeDescriptor;
    use std::io::Write;

    #[test]
    fn missing_table_falls_back_to_defaults() {
        let config = Config::from_toml_str("[other]\nkey = 1\n").unwrap();
        assert_eq!(config.info, Info::default());
        assert_eq!(config.naming, NamingStrategy::Canonical);
    }

    #[test]
    fn restdoc_table_is_read() {
        let config = Config::from_toml_str(
            r#"
            [restdoc]
            naming = "short"

            [restdoc.info]
            title = "Bookstore"
            version = "2.0.0"
            "#,
        )
        .unwrap();
        assert_eq!(config.info.title, "Bookstore");
        let name = config
            .naming_policy()
            .definition_name(&TypeDescriptor::composite("bookstore::Book"))
            .unwrap();
        assert_eq!(name, "Book");
    }

    #[test]
    fn empty_title_is_rejected() {
        let err = Config::from_toml_str("[restdoc.info]\ntitle = \"\"\nversion = \"1\"\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn malformed_toml_is_a_toml_error() {
        let err = Config::from_toml_str("[restdoc\n").unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }

    #[test]
    fn manifest_metadata_is_read() {
        let dir = std::env::temp_dir().join(format!("restdoc-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let manifest = dir.join("Cargo.toml");
        let mut file = fs::File::create(&manifest).unwrap();
        writeln!(
            file,
            "[package]\nname = \"demo\"\n\n[package.metadata.restdoc.info]\ntitle = \"Demo\"\nversion = \"0.3.0\""
        )
        .unwrap();

        let config = Config::from_manifest(&manifest).unwrap();
        assert_eq!(config.info.title, "Demo");
        assert_eq!(config.info.version, "0.3.0");
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn custom_policy_wins_over_strategy() {
        let config = Config::new()
            .naming(NamingStrategy::Short)
            .with_naming_policy(|_: &TypeDescriptor| Some("Fixed".to_string()));
        let name = config
            .naming_policy()
            .definition_name(&TypeDescriptor::composite("a::B"))
            .unwrap();
        assert_eq!(name, "Fixed");
    }
}
