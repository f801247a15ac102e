//! Page geometry supplied once at startup
//!
//! The host measures the rendered page (sky, land, bird, playfield) and hands
//! the numbers to the simulation. They are immutable for the session.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Configuration failures detected before the first tick
#[derive(Debug)]
pub enum ConfigError {
    /// Malformed JSON configuration
    Json(serde_json::Error),
    /// A size, span or period that must be strictly positive
    NonPositive { field: &'static str },
    /// A rate that must be a finite number
    NonFinite { field: &'static str },
    /// Two minimum-height pipes plus the gap do not fit above the ground
    GapTooTall { ground_top: f32, required: f32 },
    /// The avatar is taller than the space between ceiling and ground
    AvatarTooTall { max_top: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Json(e) => write!(f, "invalid configuration JSON: {}", e),
            ConfigError::NonPositive { field } => write!(f, "'{}' must be positive", field),
            ConfigError::NonFinite { field } => write!(f, "'{}' must be a finite number", field),
            ConfigError::GapTooTall {
                ground_top,
                required,
            } => write!(
                f,
                "ground top {} leaves no room for pipes (needs at least {})",
                ground_top, required
            ),
            ConfigError::AvatarTooTall { max_top } => {
                write!(f, "avatar does not fit above the ground (max top {})", max_top)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

/// Measured geometry of the page (all pixels)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Playfield (width, height)
    pub playfield: Vec2,
    /// Sky layer (width, height); the sky pattern tiles at half its width
    pub sky: Vec2,
    /// Land layer (width, height)
    pub land: Vec2,
    /// Vertical offset of the land layer, the ground line for pipes
    pub land_top: f32,
    /// Avatar (width, height)
    pub avatar: Vec2,
    /// Avatar initial (left, top)
    pub avatar_start: Vec2,
}

impl Default for Layout {
    /// Geometry of the stock stylesheet
    fn default() -> Self {
        Self {
            playfield: Vec2::new(800.0, 600.0),
            sky: Vec2::new(1600.0, 600.0),
            land: Vec2::new(1600.0, 112.0),
            land_top: 488.0,
            avatar: Vec2::new(33.0, 26.0),
            avatar_start: Vec2::new(150.0, 150.0),
        }
    }
}

impl Layout {
    /// Lowest top the avatar may reach before touching the ground
    pub fn avatar_max_top(&self) -> f32 {
        self.playfield.y - self.land.y - self.avatar.y
    }

    /// Whole pixels from a computed CSS length such as `"52px"` or `"487.5px"`
    pub fn parse_px(value: &str) -> Option<f32> {
        let number = value.trim().trim_end_matches("px").trim();
        number.parse::<f32>().ok().map(f32::trunc)
    }

    /// Check that every measured size is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sizes = [
            ("playfield.width", self.playfield.x),
            ("playfield.height", self.playfield.y),
            ("sky.width", self.sky.x),
            ("sky.height", self.sky.y),
            ("land.width", self.land.x),
            ("land.height", self.land.y),
            ("land_top", self.land_top),
            ("avatar.width", self.avatar.x),
            ("avatar.height", self.avatar.y),
        ];
        for (field, value) in sizes {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NonPositive { field });
            }
        }

        let max_top = self.avatar_max_top();
        if max_top < 0.0 {
            return Err(ConfigError::AvatarTooTall { max_top });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_is_valid() {
        let layout = Layout::default();
        assert!(layout.validate().is_ok());
        assert_eq!(layout.avatar_max_top(), 600.0 - 112.0 - 26.0);
    }

    #[test]
    fn test_zero_width_rejected() {
        let layout = Layout {
            sky: Vec2::new(0.0, 600.0),
            ..Layout::default()
        };
        assert!(matches!(
            layout.validate(),
            Err(ConfigError::NonPositive { field: "sky.width" })
        ));
    }

    #[test]
    fn test_nan_rejected() {
        let layout = Layout {
            land_top: f32::NAN,
            ..Layout::default()
        };
        assert!(layout.validate().is_err());
    }

    #[test]
    fn test_avatar_taller_than_sky_rejected() {
        let layout = Layout {
            avatar: Vec2::new(33.0, 700.0),
            ..Layout::default()
        };
        assert!(matches!(
            layout.validate(),
            Err(ConfigError::AvatarTooTall { .. })
        ));
    }

    #[test]
    fn test_parse_px() {
        assert_eq!(Layout::parse_px("52px"), Some(52.0));
        assert_eq!(Layout::parse_px(" 487.6px "), Some(487.0));
        assert_eq!(Layout::parse_px("0"), Some(0.0));
        assert_eq!(Layout::parse_px("auto"), None);
        assert_eq!(Layout::parse_px(""), None);
    }

    #[test]
    fn test_error_display() {
        let err = ConfigError::GapTooTall {
            ground_top: 300.0,
            required: 310.0,
        };
        assert!(err.to_string().contains("310"));
    }
}
