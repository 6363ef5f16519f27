//! Controls configuration resource.
//!
//! Default polarity and mode for controls created from configuration, loaded
//! from an INI file. Missing files or values fall back to safe defaults.
//!
//! # Configuration File Format
//!
//! ```ini
//! [bool]
//! avoid_true = false
//! ; seed the root vote (Id 0) with the polarity
//! root = true
//!
//! [int]
//! mode = maximum
//!
//! [priority]
//! avoid_true = false
//! ```

use crate::components::boolcontrol::BoolControl;
use crate::components::intcontrol::{IntControl, IntControlMode};
use crate::components::prioritycontrol::PriorityControl;
use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

const DEFAULT_BOOL_AVOID_TRUE: bool = false;
const DEFAULT_BOOL_ROOT: bool = false;
const DEFAULT_INT_MODE: IntControlMode = IntControlMode::Maximum;
const DEFAULT_PRIORITY_AVOID_TRUE: bool = false;
const DEFAULT_CONFIG_PATH: &str = "./controls.ini";

/// Defaults applied to newly created controls.
#[derive(Resource, Debug, Clone)]
pub struct ControlsConfig {
    /// Polarity of new [`BoolControl`]s.
    pub bool_avoid_true: bool,
    /// Seed new [`BoolControl`]s with a root vote equal to the polarity.
    pub bool_root: bool,
    /// Mode of new [`IntControl`]s.
    pub int_mode: IntControlMode,
    /// Polarity of new [`PriorityControl`]s.
    pub priority_avoid_true: bool,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ControlsConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            bool_avoid_true: DEFAULT_BOOL_AVOID_TRUE,
            bool_root: DEFAULT_BOOL_ROOT,
            int_mode: DEFAULT_INT_MODE,
            priority_avoid_true: DEFAULT_PRIORITY_AVOID_TRUE,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current values. Returns an error if the
    /// file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [bool] section
        if let Some(avoid_true) = config.getbool("bool", "avoid_true").ok().flatten() {
            self.bool_avoid_true = avoid_true;
        }
        if let Some(root) = config.getbool("bool", "root").ok().flatten() {
            self.bool_root = root;
        }

        // [int] section
        if let Some(mode) = config.get("int", "mode") {
            match parse_mode(&mode) {
                Some(mode) => self.int_mode = mode,
                None => warn!("Unknown int mode '{}', keeping {:?}", mode, self.int_mode),
            }
        }

        // [priority] section
        if let Some(avoid_true) = config.getbool("priority", "avoid_true").ok().flatten() {
            self.priority_avoid_true = avoid_true;
        }

        info!(
            "Loaded controls config: bool avoid_true={} root={}, int mode={:?}, priority avoid_true={}",
            self.bool_avoid_true, self.bool_root, self.int_mode, self.priority_avoid_true
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("bool", "avoid_true", Some(self.bool_avoid_true.to_string()));
        config.set("bool", "root", Some(self.bool_root.to_string()));
        let mode = match self.int_mode {
            IntControlMode::Maximum => "maximum",
            IntControlMode::Minimum => "minimum",
        };
        config.set("int", "mode", Some(mode.to_string()));
        config.set(
            "priority",
            "avoid_true",
            Some(self.priority_avoid_true.to_string()),
        );

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved controls config to {:?}", self.config_path);

        Ok(())
    }

    /// A new [`BoolControl`] using the configured polarity.
    pub fn bool_control(&self) -> BoolControl {
        if self.bool_root {
            BoolControl::with_root(self.bool_avoid_true)
        } else {
            BoolControl::new(self.bool_avoid_true)
        }
    }

    /// A new [`IntControl`] using the configured mode.
    pub fn int_control(&self) -> IntControl {
        IntControl::new(self.int_mode)
    }

    /// A new [`PriorityControl`] using the configured polarity.
    pub fn priority_control<T: Send + Sync + 'static>(&self) -> PriorityControl<T> {
        PriorityControl::new(self.priority_avoid_true)
    }
}

fn parse_mode(value: &str) -> Option<IntControlMode> {
    match value.trim().to_ascii_lowercase().as_str() {
        "maximum" | "max" => Some(IntControlMode::Maximum),
        "minimum" | "min" => Some(IntControlMode::Minimum),
        _ => None,
    }
}
