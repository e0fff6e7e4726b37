// Application state management
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::audio::PcmBuffer;
use crate::chat::ChatSession;
use crate::gemini::GeminiClient;
use crate::quiz::QuizState;
use crate::settings::{AppSettings, ModelSettings, PlaybackSettings};

/// Per-insect sound request state.
/// Absent = Idle; a failed request drops back to absent so the user can
/// re-trigger it.
pub enum SoundState {
    Loading,
    Ready(Arc<PcmBuffer>),
}

pub struct AppState {
    pub gemini: Arc<GeminiClient>,
    pub settings: Mutex<AppSettings>,
    pub sounds: Mutex<HashMap<String, SoundState>>,
    pub chat: Mutex<Option<ChatSession>>,
    pub quiz: Mutex<QuizState>,
    pub app_dir: PathBuf,
}

impl AppState {
    pub fn new(gemini: GeminiClient, settings: AppSettings, app_dir: PathBuf) -> Self {
        Self {
            gemini: Arc::new(gemini),
            settings: Mutex::new(settings),
            sounds: Mutex::new(HashMap::new()),
            chat: Mutex::new(None),
            quiz: Mutex::new(QuizState::default()),
            app_dir,
        }
    }

    /// Snapshot the model selection (commands must not hold the settings
    /// lock across awaits)
    pub fn models(&self) -> ModelSettings {
        self.settings.lock().unwrap().models.clone()
    }

    pub fn playback(&self) -> PlaybackSettings {
        self.settings.lock().unwrap().playback.clone()
    }
}
