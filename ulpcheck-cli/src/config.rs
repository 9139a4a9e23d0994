//! Configuration loading from ulpcheck.toml
//!
//! ulpcheck configuration can be specified in a `ulpcheck.toml` file in the
//! project root. The configuration is automatically discovered by walking up
//! from the current directory. Command line flags override file values.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use ulpcheck_report::OutputStyle;

/// Name of the configuration file looked up during discovery
pub const CONFIG_FILE: &str = "ulpcheck.toml";

/// ulpcheck configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct UlpcheckConfig {
    /// Runner configuration
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
    /// Distance instrumentation configuration
    #[serde(default)]
    pub instrumentation: InstrumentationConfig,
}

/// Runner configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RunnerConfig {
    /// Run only the test with exactly this name
    #[serde(default)]
    pub only: Option<String>,
    /// Suppress the default panic message for panics caught by the runner
    #[serde(default)]
    pub quiet_panics: bool,
}

/// When to emit ANSI colours
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum ColorChoice {
    /// Colour when stdout is a terminal
    #[default]
    Auto,
    /// Always colour
    Always,
    /// Never colour
    Never,
}

impl ColorChoice {
    /// Decide for a stream, given whether it is a terminal
    pub fn resolve(self, is_terminal: bool) -> bool {
        match self {
            ColorChoice::Auto => is_terminal,
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct OutputConfig {
    /// Diagnostic layout: "boxed" or "single-line"
    #[serde(default)]
    pub style: OutputStyle,
    /// Colour mode: "auto", "always" or "never"
    #[serde(default)]
    pub color: ColorChoice,
}

/// Distance instrumentation configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct InstrumentationConfig {
    /// Report maximal and mean ULP distance per test
    #[serde(default)]
    pub max_distance: bool,
    /// Write `(reference, distance)` rows of every fuzzy comparison here
    #[serde(default)]
    pub plot: Option<PathBuf>,
}

impl UlpcheckConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        let dir = std::env::current_dir().ok()?;
        Self::discover_from(&dir)
    }

    /// Walk up from `start` looking for `ulpcheck.toml`
    pub fn discover_from(start: &Path) -> Option<Self> {
        let mut dir = start.to_path_buf();
        loop {
            let config_path = dir.join(CONFIG_FILE);
            if config_path.exists() {
                tracing::info!("using configuration {}", config_path.display());
                return match Self::load(&config_path) {
                    Ok(config) => Some(config),
                    Err(e) => {
                        tracing::warn!("ignoring {}: {:#}", config_path.display(), e);
                        None
                    }
                };
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# ulpcheck Configuration

[runner]
# Run only the test with this exact name (uncomment to enable)
# only = "sqrt<f32>"
# Hide the panic message of panics the runner catches
quiet_panics = false

[output]
# Diagnostic layout: "boxed" or "single-line"
style = "boxed"
# Colour mode: "auto", "always" or "never"
color = "auto"

[instrumentation]
# Report maximal and mean ULP distance for every test
max_distance = false
# Write reference/distance pairs of fuzzy comparisons (uncomment to enable)
# plot = "target/ulpcheck/distance.dat"
"#
        .to_string()
    }
}
