//! Player preferences
//!
//! Persisted in LocalStorage on the web. Gameplay constants are not settings;
//! they live in `consts`.

use serde::{Deserialize, Serialize};

/// A preference flipped from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Autopilot,
    Hitbox,
    Mute,
}

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Background drone volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,

    // === Debug / demo ===
    /// Outline the actor's collision hitbox
    pub show_hitbox: bool,
    /// Start with the autopilot flying
    pub autopilot: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.5,
            muted: false,
            show_hitbox: false,
            autopilot: false,
        }
    }
}

impl Settings {
    /// Effective effects volume (0 when muted)
    pub fn sfx_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Effective background volume (0 when muted)
    pub fn music_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.music_volume).clamp(0.0, 1.0)
        }
    }

    /// Flip one preference and return its new value. Callers persist with `save`.
    pub fn toggle(&mut self, which: Toggle) -> bool {
        let flag = match which {
            Toggle::Autopilot => &mut self.autopilot,
            Toggle::Hitbox => &mut self.show_hitbox,
            Toggle::Mute => &mut self.muted,
        };
        *flag = !*flag;
        *flag
    }

    /// Encoded form written to storage
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse stored JSON, falling back to defaults on anything malformed
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring stored settings: {}", e);
                Self::default()
            }
        }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "gate_flyer_settings";

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

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match self.to_json() {
                Ok(json) => {
                    if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                        log::warn!("Settings could not be saved");
                    } else {
                        log::info!("Settings saved");
                    }
                }
                Err(e) => log::warn!("Settings could not be encoded: {}", e),
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
