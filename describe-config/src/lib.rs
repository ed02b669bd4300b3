//! Shared configuration loader for the describe toolchain.
//!
//! `defaults/describe.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`DescribeConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use describe_babel::formats::html::HtmlOptions;
use describe_babel::formats::rst::settings::RstSettings;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/describe.default.toml");

/// Name of the per-project file picked up from the working directory.
pub const PROJECT_CONFIG_FILE: &str = "describe.toml";

/// Top-level configuration consumed by describe applications.
#[derive(Debug, Clone, Deserialize)]
pub struct DescribeConfig {
    pub rst: RstConfig,
    pub html: HtmlConfig,
}

/// Mirrors the knobs exposed by the RST writer.
#[derive(Debug, Clone, Deserialize)]
pub struct RstConfig {
    pub section_chars: String,
    pub indent: String,
    pub text_width: usize,
    pub explicit_title: bool,
    pub title: String,
}

impl From<RstConfig> for RstSettings {
    fn from(config: RstConfig) -> Self {
        RstSettings {
            section_chars: config.section_chars,
            indent: config.indent,
            text_width: config.text_width,
            explicit_title: config.explicit_title,
            title: non_empty(config.title),
        }
    }
}

impl From<&RstConfig> for RstSettings {
    fn from(config: &RstConfig) -> Self {
        config.clone().into()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HtmlConfig {
    pub title: String,
    /// Path of a stylesheet to append; reading it is left to the caller.
    pub css_file: String,
}

impl HtmlConfig {
    pub fn css_file(&self) -> Option<&Path> {
        (!self.css_file.is_empty()).then(|| Path::new(&self.css_file))
    }

    /// Page options, given the already-loaded contents of [`HtmlConfig::css_file`].
    pub fn options(&self, custom_css: Option<String>) -> HtmlOptions {
        HtmlOptions {
            title: non_empty(self.title.clone()),
            custom_css,
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<DescribeConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<DescribeConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.rst.text_width, 79);
        assert!(!config.rst.explicit_title);
        assert!(config.html.css_file().is_none());
    }

    #[test]
    fn defaults_match_writer_defaults() {
        let config = load_defaults().expect("defaults to deserialize");
        let settings: RstSettings = config.rst.into();
        assert_eq!(settings, RstSettings::default());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("rst.section_chars", "#*")
            .expect("override to apply")
            .set_override("rst.title", "Users API")
            .expect("override to apply")
            .build()
            .expect("config to build");
        let settings = RstSettings::from(&config.rst);
        assert_eq!(settings.section_chars, "#*");
        assert_eq!(settings.title.as_deref(), Some("Users API"));
    }

    #[test]
    fn layers_files_over_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "[html]\ntitle = \"From file\"\ncss_file = \"extra.css\"")
            .expect("write config");

        let config = Loader::new()
            .with_file(file.path())
            .build()
            .expect("config to build");
        assert_eq!(config.html.css_file(), Some(Path::new("extra.css")));
        let options = config.html.options(Some("p {}".to_string()));
        assert_eq!(options.title.as_deref(), Some("From file"));
        assert_eq!(options.custom_css.as_deref(), Some("p {}"));
        // Untouched groups keep their defaults
        assert_eq!(config.rst.text_width, 79);
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/describe.toml")
            .build()
            .expect("config to build");
        assert_eq!(config.rst.indent, "    ");
    }

    #[test]
    fn missing_required_file_fails() {
        assert!(Loader::new()
            .with_file("/nonexistent/describe.toml")
            .build()
            .is_err());
    }
}
