use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::common::geometry::Size;

pub fn data_dir() -> PathBuf { dirs::home_dir().unwrap().join(".quilt") }
pub fn layout_file() -> PathBuf { data_dir().join("layout.json") }
pub fn config_file() -> PathBuf {
    dirs::home_dir().unwrap().join(".config").join("quilt").join("config.toml")
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct LayoutSettings {
    /// Spacing kept between widgets and around the container edge, in pixels.
    /// The collision detector expands each widget by half this value.
    #[serde(default = "default_spacing")]
    pub spacing: f64,
    /// Container size widgets are laid out in. UI hosts override this with
    /// the live viewport via `SetContainerSize`.
    #[serde(default = "default_container")]
    pub container: Size,
    /// Round committed frames to whole pixels.
    #[serde(default = "yes")]
    pub snap_to_pixels: bool,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            spacing: default_spacing(),
            container: default_container(),
            snap_to_pixels: true,
        }
    }
}

impl LayoutSettings {
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.spacing < 0.0 {
            issues.push("spacing must not be negative".to_string());
        }
        let short_side = f64::min(self.container.width, self.container.height);
        if self.spacing * 2.0 >= short_side {
            issues.push(format!(
                "spacing ({}) leaves no room in a {}x{} container",
                self.spacing, self.container.width, self.container.height
            ));
        }
        if self.container.width < 200.0 || self.container.height < 200.0 {
            issues.push("container must be at least 200x200".to_string());
        }

        issues
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub layout: LayoutSettings,
}

impl Config {
    pub fn parse(buf: &str) -> anyhow::Result<Config> {
        Ok(toml::from_str(buf)?)
    }

    /// Reads the config file, falling back to defaults when it does not
    /// exist. Parse errors are surfaced to the caller.
    pub fn load(path: &Path) -> anyhow::Result<Config> {
        if !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(Config::default());
        }
        Self::parse(&fs::read_to_string(path)?)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn validate(&self) -> Vec<String> {
        self.layout.validate()
    }
}

fn yes() -> bool { true }
fn default_spacing() -> f64 { 20.0 }
fn default_container() -> Size { Size::new(1280.0, 800.0) }
