//! Playback settings and preferences
//!
//! Read from LocalStorage on the web build.

use serde::{Deserialize, Serialize};

/// Playback settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed run seed; a fresh one is picked at start-up when absent
    pub seed: Option<u64>,
    /// Playback speed multiplier (1.0 = one point every 90 ms)
    pub playback_speed: f32,
    /// Draw a dot on every revealed point, not just the trail
    pub show_points: bool,
    /// Draw the leading point of every active walk
    pub show_leading_point: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            playback_speed: 1.0,
            show_points: true,
            show_leading_point: true,
        }
    }
}

impl Settings {
    /// Slowest and fastest accepted playback speeds
    pub const MIN_SPEED: f32 = 0.1;
    pub const MAX_SPEED: f32 = 50.0;

    /// Playback speed clamped to the accepted range (NaN falls back to 1.0)
    pub fn effective_speed(&self) -> f32 {
        if self.playback_speed.is_nan() {
            1.0
        } else {
            self.playback_speed.clamp(Self::MIN_SPEED, Self::MAX_SPEED)
        }
    }

    /// Parse settings from JSON, falling back to defaults
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring malformed settings: {}", e);
                Self::default()
            }
        }
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "random_walk_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        log::info!("Using default settings");
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.seed, None);
        assert_eq!(settings.effective_speed(), 1.0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{"seed": 42, "show_points": false}"#);
        assert_eq!(settings.seed, Some(42));
        assert!(!settings.show_points);
        assert_eq!(settings.playback_speed, 1.0);
        assert!(settings.show_leading_point);
    }

    #[test]
    fn test_malformed_json_falls_back() {
        assert_eq!(Settings::from_json("not json"), Settings::default());
    }

    #[test]
    fn test_speed_is_clamped() {
        let mut settings = Settings::default();
        settings.playback_speed = 1000.0;
        assert_eq!(settings.effective_speed(), Settings::MAX_SPEED);
        settings.playback_speed = 0.0;
        assert_eq!(settings.effective_speed(), Settings::MIN_SPEED);
        settings.playback_speed = f32::NAN;
        assert_eq!(settings.effective_speed(), 1.0);
    }

    #[test]
    fn test_round_trip() {
        let settings = Settings {
            seed: Some(7),
            playback_speed: 2.5,
            show_points: false,
            show_leading_point: true,
        };
        let json = serde_json::to_string(&settings).unwrap_or_default();
        assert_eq!(Settings::from_json(&json), settings);
    }
}
