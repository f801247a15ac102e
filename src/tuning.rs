//! Data-driven gameplay tuning
//!
//! Every constant the simulation reads lives here so a host page can override
//! them with a JSON blob. Missing fields fall back to `consts`.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::layout::ConfigError;

/// Gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Avatar ===
    /// Downward acceleration (pixels/s²)
    pub gravity: f32,
    /// Vertical speed applied by a jump (pixels/s, negative is upward)
    pub jump_speed: f32,

    // === Scrolling ===
    pub sky_speed: f32,
    pub land_speed: f32,
    pub pipe_speed: f32,

    // === Pipes ===
    pub pipe_width: f32,
    pub gap_height: f32,
    pub min_pipe_height: f32,

    // === Timers (ms) ===
    pub tick_ms: u32,
    pub spawn_interval_ms: u32,
    pub swing_interval_ms: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_speed: JUMP_SPEED,

            sky_speed: SKY_SPEED,
            land_speed: LAND_SPEED,
            pipe_speed: PIPE_SPEED,

            pipe_width: PIPE_WIDTH,
            gap_height: GAP_HEIGHT,
            min_pipe_height: MIN_PIPE_HEIGHT,

            tick_ms: TICK_MS,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            swing_interval_ms: SWING_INTERVAL_MS,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON (absent fields keep their defaults)
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Fixed simulation step in seconds
    pub fn tick_seconds(&self) -> f32 {
        self.tick_ms as f32 / 1000.0
    }

    /// Reject values that would stall timers or invert pipe geometry
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rates = [
            ("gravity", self.gravity),
            ("jump_speed", self.jump_speed),
            ("sky_speed", self.sky_speed),
            ("land_speed", self.land_speed),
            ("pipe_speed", self.pipe_speed),
        ];
        for (field, value) in rates {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
        }
        let positives = [
            ("pipe_width", self.pipe_width),
            ("gap_height", self.gap_height),
            ("min_pipe_height", self.min_pipe_height),
        ];
        for (field, value) in positives {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositive { field });
            }
        }
        let periods = [
            ("tick_ms", self.tick_ms),
            ("spawn_interval_ms", self.spawn_interval_ms),
            ("swing_interval_ms", self.swing_interval_ms),
        ];
        for (field, value) in periods {
            if value == 0 {
                return Err(ConfigError::NonPositive { field });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let tuning = Tuning::default();
        assert_eq!(tuning.gravity, 500.0);
        assert_eq!(tuning.jump_speed, -200.0);
        assert_eq!(tuning.tick_ms, 16);
        assert!((tuning.tick_seconds() - 0.016).abs() < 1e-7);
    }

    #[test]
    fn test_from_json_partial_override() {
        let tuning = Tuning::from_json(r#"{ "gravity": 640.0, "gap_height": 120.0 }"#).unwrap();
        assert_eq!(tuning.gravity, 640.0);
        assert_eq!(tuning.gap_height, 120.0);
        // Untouched fields keep defaults
        assert_eq!(tuning.pipe_speed, PIPE_SPEED);
        assert_eq!(tuning.spawn_interval_ms, SPAWN_INTERVAL_MS);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_zero_tick_rejected() {
        let err = Tuning::from_json(r#"{ "tick_ms": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::NonPositive { field: "tick_ms" }));
    }

    #[test]
    fn test_nan_gap_rejected() {
        let tuning = Tuning {
            gap_height: f32::NAN,
            ..Tuning::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::NonPositive {
                field: "gap_height"
            })
        ));
    }

    #[test]
    fn test_negative_min_height_rejected() {
        let err = Tuning::from_json(r#"{ "min_pipe_height": -20.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NonPositive {
                field: "min_pipe_height"
            }
        ));
    }

    #[test]
    fn test_infinite_speed_rejected() {
        let tuning = Tuning {
            pipe_speed: f32::NEG_INFINITY,
            ..Tuning::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::NonFinite {
                field: "pipe_speed"
            })
        ));
    }
}
