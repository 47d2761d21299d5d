//! Tunable constants for the card stack, loaded from TOML with environment overrides.

use std::{
    f32::consts::PI,
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::EngineError;

pub const DEFAULT_CONFIG_FILE: &str = "card_stack.toml";
const ENV_PREFIX: &str = "CARD_STACK__";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DismissalConfig {
    /// Release speed (units/s) past which a flick dismisses regardless of distance.
    pub velocity_threshold: f32,
    /// Share of the card width/height a drag must cover to dismiss.
    pub distance_fraction: f32,
    pub horizontal_overshoot: f32,
    pub vertical_overshoot: f32,
    /// Rotation (radians) reached when the card is dragged a full container width.
    pub max_rotation: f32,
    pub exit_rotation_factor: f32,
}

impl Default for DismissalConfig {
    fn default() -> Self {
        Self {
            velocity_threshold: 1000.0,
            distance_fraction: 0.4,
            horizontal_overshoot: 1.5,
            vertical_overshoot: 1.2,
            max_rotation: PI / 10.0,
            exit_rotation_factor: 0.8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Applied to the raw translation before it moves the card.
    pub resistance: f32,
    pub lift_scale: f32,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            resistance: 0.9,
            lift_scale: 1.02,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackConfig {
    pub base_scale: f32,
    pub offset_step: f32,
    pub reflow_stagger: f32,
    pub entry_stagger: f32,
    pub entry_drop: f32,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            base_scale: 0.94,
            offset_step: 25.0,
            reflow_stagger: 0.05,
            entry_stagger: 0.12,
            entry_drop: 200.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringParams {
    pub damping_ratio: f32,
    pub duration: f32,
}

impl SpringParams {
    pub const fn new(damping_ratio: f32, duration: f32) -> Self {
        Self {
            damping_ratio,
            duration,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    pub return_to_rest: SpringParams,
    pub dismiss: SpringParams,
    pub reflow: SpringParams,
    pub entry: SpringParams,
    /// Release speed is divided by this to get the normalized initial spring velocity.
    pub velocity_divisor: f32,
    pub max_initial_velocity: f32,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            return_to_rest: SpringParams::new(0.7, 0.4),
            dismiss: SpringParams::new(0.75, 0.45),
            reflow: SpringParams::new(0.8, 0.5),
            entry: SpringParams::new(0.7, 0.6),
            velocity_divisor: 1000.0,
            max_initial_velocity: 8.0,
        }
    }
}

impl SpringConfig {
    /// Normalized initial velocity derived from the dominant axis of a release velocity.
    pub fn initial_velocity(&self, release: shared::domain::Vec2) -> f32 {
        let dominant = release.x.abs().max(release.y.abs());
        if !dominant.is_finite() {
            return 0.0;
        }
        (dominant / self.velocity_divisor).min(self.max_initial_velocity)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlipConfig {
    pub half_duration: f32,
    pub perspective_depth: f32,
    pub bounce_scale: f32,
    pub bounce_duration: f32,
}

impl Default for FlipConfig {
    fn default() -> Self {
        Self {
            half_duration: 0.25,
            perspective_depth: 500.0,
            bounce_scale: 1.06,
            bounce_duration: 0.35,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub card_width_fraction: f32,
    pub default_aspect_ratio: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            card_width_fraction: 0.7,
            default_aspect_ratio: 1.4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub dismissal: DismissalConfig,
    pub drag: DragConfig,
    pub stack: StackConfig,
    pub springs: SpringConfig,
    pub flip: FlipConfig,
    pub layout: LayoutConfig,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        let d = &self.dismissal;
        ensure(d.velocity_threshold > 0.0, "dismissal.velocity_threshold must be positive")?;
        ensure(
            d.distance_fraction > 0.0 && d.distance_fraction <= 1.0,
            "dismissal.distance_fraction must be in (0, 1]",
        )?;
        ensure(
            d.horizontal_overshoot > 1.0 && d.vertical_overshoot > 1.0,
            "dismissal overshoot factors must be greater than 1",
        )?;
        ensure(
            self.drag.resistance > 0.0 && self.drag.resistance < 1.0,
            "drag.resistance must be in (0, 1)",
        )?;
        ensure(
            self.stack.base_scale > 0.0 && self.stack.base_scale <= 1.0,
            "stack.base_scale must be in (0, 1]",
        )?;
        ensure(self.stack.offset_step >= 0.0, "stack.offset_step must not be negative")?;
        ensure(
            self.stack.reflow_stagger >= 0.0 && self.stack.entry_stagger >= 0.0,
            "stack stagger delays must not be negative",
        )?;

        let springs = &self.springs;
        for (name, params) in [
            ("return_to_rest", springs.return_to_rest),
            ("dismiss", springs.dismiss),
            ("reflow", springs.reflow),
            ("entry", springs.entry),
        ] {
            ensure(
                params.damping_ratio > 0.0 && params.damping_ratio < 1.0,
                &format!("springs.{name}.damping_ratio must be in (0, 1)"),
            )?;
            ensure(
                params.duration > 0.0,
                &format!("springs.{name}.duration must be positive"),
            )?;
        }
        ensure(springs.velocity_divisor > 0.0, "springs.velocity_divisor must be positive")?;

        ensure(
            self.flip.half_duration > 0.0 && self.flip.bounce_duration > 0.0,
            "flip durations must be positive",
        )?;
        ensure(self.flip.perspective_depth > 0.0, "flip.perspective_depth must be positive")?;
        ensure(
            self.layout.card_width_fraction > 0.0 && self.layout.card_width_fraction <= 1.0,
            "layout.card_width_fraction must be in (0, 1]",
        )?;
        ensure(
            self.layout.default_aspect_ratio > 0.0,
            "layout.default_aspect_ratio must be positive",
        )?;
        Ok(())
    }
}

fn ensure(condition: bool, message: &str) -> Result<(), EngineError> {
    if condition {
        Ok(())
    } else {
        Err(EngineError::InvalidConfig(message.to_string()))
    }
}

pub fn parse_config(raw: &str) -> Result<EngineConfig, EngineError> {
    Ok(toml::from_str::<EngineConfig>(raw)?)
}

fn read_config_file(path: &Path) -> Result<EngineConfig, EngineError> {
    let raw = fs::read_to_string(path).map_err(|source| EngineError::ConfigRead {
        path: PathBuf::from(path),
        source,
    })?;
    parse_config(&raw)
}

/// Defaults, then the TOML file (explicit path or `card_stack.toml` in the working
/// directory), then `CARD_STACK__*` environment overrides.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig, EngineError> {
    let mut config = match path {
        Some(path) => read_config_file(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            read_config_file(Path::new(DEFAULT_CONFIG_FILE))?
        }
        None => EngineConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    config.validate()?;
    Ok(config)
}

pub fn apply_env_overrides(config: &mut EngineConfig, lookup: impl Fn(&str) -> Option<String>) {
    let override_f32 = |name: &str, slot: &mut f32| {
        let key = format!("{ENV_PREFIX}{name}");
        let Some(raw) = lookup(&key) else {
            return;
        };
        match raw.trim().parse::<f32>() {
            Ok(parsed) => *slot = parsed,
            Err(_) => warn!(key = %key, value = %raw, "ignoring unparsable config override"),
        }
    };

    override_f32("VELOCITY_THRESHOLD", &mut config.dismissal.velocity_threshold);
    override_f32("DISTANCE_FRACTION", &mut config.dismissal.distance_fraction);
    override_f32("BASE_SCALE", &mut config.stack.base_scale);
    override_f32("OFFSET_STEP", &mut config.stack.offset_step);
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
