// Settings management and persistence
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Gemini model selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSettings {
    pub text_model: String,
    pub image_model: String,
    pub tts_model: String,
    pub voice: String,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            text_model: "gemini-2.5-flash".to_string(),
            image_model: "imagen-4.0-generate-001".to_string(),
            tts_model: "gemini-2.5-flash-preview-tts".to_string(),
            voice: "Kore".to_string(),
        }
    }
}

/// Format of the speech service's PCM payloads. The payload itself is
/// headerless, so rate and channel count live here, out-of-band.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackSettings {
    pub sample_rate: u32,
    pub channels: usize,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            sample_rate: 24000,
            channels: 1,
        }
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub version: i32, // Settings schema version for future migrations
    pub models: ModelSettings,
    pub playback: PlaybackSettings,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            version: 1,
            models: ModelSettings::default(),
            playback: PlaybackSettings::default(),
        }
    }
}

impl AppSettings {
    /// Get the settings file path
    pub fn get_settings_path(app_dir: &PathBuf) -> PathBuf {
        app_dir.join("settings.json")
    }

    /// Load settings from file, or return defaults if file doesn't exist
    pub fn load(app_dir: &PathBuf) -> Result<Self, String> {
        let path = Self::get_settings_path(app_dir);

        if !path.exists() {
            eprintln!("[Settings] No settings file found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read settings file: {}", e))?;

        let settings: AppSettings = serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse settings: {}", e))?;

        eprintln!("[Settings] Loaded settings from {:?}", path);
        Ok(settings)
    }

    /// Save settings to file
    pub fn save(&self, app_dir: &PathBuf) -> Result<(), String> {
        // Ensure directory exists
        fs::create_dir_all(app_dir)
            .map_err(|e| format!("Failed to create settings directory: {}", e))?;

        let path = Self::get_settings_path(app_dir);
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;

        fs::write(&path, content)
            .map_err(|e| format!("Failed to write settings file: {}", e))?;

        eprintln!("[Settings] Saved settings to {:?}", path);
        Ok(())
    }
}
