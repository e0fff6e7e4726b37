// Tauri command handlers
use std::sync::Arc;
use tauri::State;

use crate::audio::{decoder, player};
use crate::chat::{ChatMessage, ChatSession};
use crate::insect::fetcher;
use crate::insect::InsectData;
use crate::quiz::{AnswerOutcome, QuizQuestion};
use crate::settings::AppSettings;
use crate::state::{AppState, SoundState};

// ===== Search =====

#[tauri::command]
pub async fn search_insect(
    query: String,
    state: State<'_, AppState>,
) -> Result<InsectData, String> {
    let models = state.models();

    if !fetcher::is_insect(&state.gemini, &models, &query).await {
        return Err("It's an INSECTVERSE, please search only insects.".to_string());
    }

    fetcher::fetch_insect_data(&state.gemini, &models, &query)
        .await
        .map_err(|e| format!("Failed to fetch insect data: {}", e))
}

// ===== Sound =====

#[tauri::command]
pub async fn play_insect_sound(
    insect_name: String,
    state: State<'_, AppState>,
) -> Result<(), String> {
    // Cached buffers replay without a new request; a request already in
    // flight for this insect means the trigger is ignored
    let cached = {
        let mut sounds = state.sounds.lock().unwrap();
        match sounds.get(&insect_name) {
            Some(SoundState::Ready(buffer)) => Some(Arc::clone(buffer)),
            Some(SoundState::Loading) => return Ok(()),
            None => {
                sounds.insert(insect_name.clone(), SoundState::Loading);
                None
            }
        }
    };
    if let Some(buffer) = cached {
        return player::play(&buffer).map_err(|e| format!("Failed to play sound: {}", e));
    }

    let models = state.models();
    let playback = state.playback();

    let result = async {
        let payload = fetcher::generate_insect_sound(&state.gemini, &models, &insect_name)
            .await
            .map_err(|e| format!("Could not generate sound: {}", e))?;
        let bytes = decoder::decode_base64(&payload)
            .map_err(|e| format!("Could not generate sound: {}", e))?;
        decoder::pcm16_to_float_buffer(&bytes, playback.sample_rate, playback.channels)
            .map_err(|e| format!("Could not generate sound: {}", e))
    }
    .await;

    match result {
        Ok(buffer) => {
            let buffer = Arc::new(buffer);
            state
                .sounds
                .lock()
                .unwrap()
                .insert(insect_name, SoundState::Ready(Arc::clone(&buffer)));
            player::play(&buffer).map_err(|e| format!("Failed to play sound: {}", e))
        }
        Err(e) => {
            // Back to Idle so the user can re-trigger
            state.sounds.lock().unwrap().remove(&insect_name);
            Err(e)
        }
    }
}

// ===== Chat =====

#[tauri::command]
pub fn start_chat(insect_name: String, state: State<'_, AppState>) -> Result<ChatMessage, String> {
    let session = ChatSession::new(insect_name);
    let greeting = session.history()[0].clone();
    *state.chat.lock().unwrap() = Some(session);
    Ok(greeting)
}

#[tauri::command]
pub async fn send_chat_message(
    message: String,
    state: State<'_, AppState>,
) -> Result<String, String> {
    if message.trim().is_empty() {
        return Err("Message is empty".to_string());
    }

    // Take the session out while the request is in flight; a second send
    // arriving meanwhile sees no session and is rejected
    let mut session = state
        .chat
        .lock()
        .unwrap()
        .take()
        .ok_or("No active chat session")?;

    let models = state.models();
    let result = session.send(&state.gemini, &models, message).await;
    *state.chat.lock().unwrap() = Some(session);

    result.map_err(|e| format!("Chat error: {}", e))
}

#[tauri::command]
pub fn get_chat_history(state: State<'_, AppState>) -> Result<Vec<ChatMessage>, String> {
    Ok(state
        .chat
        .lock()
        .unwrap()
        .as_ref()
        .map(|session| session.history().to_vec())
        .unwrap_or_default())
}

// ===== Quiz =====

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizView {
    pub question: QuizQuestion,
    pub index: usize,
    pub total: usize,
    pub score: u32,
    pub answered: bool,
}

fn quiz_view(quiz: &crate::quiz::QuizState) -> QuizView {
    QuizView {
        question: quiz.current().clone(),
        index: quiz.index(),
        total: quiz.total(),
        score: quiz.score(),
        answered: quiz.answered(),
    }
}

#[tauri::command]
pub fn get_quiz_question(state: State<'_, AppState>) -> Result<QuizView, String> {
    let quiz = state.quiz.lock().unwrap();
    Ok(quiz_view(&quiz))
}

#[tauri::command]
pub fn answer_quiz(option: String, state: State<'_, AppState>) -> Result<AnswerOutcome, String> {
    let mut quiz = state.quiz.lock().unwrap();
    Ok(quiz.select(&option))
}

#[tauri::command]
pub fn next_quiz_question(state: State<'_, AppState>) -> Result<QuizView, String> {
    let mut quiz = state.quiz.lock().unwrap();
    quiz.advance();
    Ok(quiz_view(&quiz))
}

// ===== Settings =====

#[tauri::command]
pub fn get_settings(state: State<'_, AppState>) -> Result<AppSettings, String> {
    Ok(state.settings.lock().unwrap().clone())
}

#[tauri::command]
pub fn update_settings(
    settings: AppSettings,
    state: State<'_, AppState>,
) -> Result<(), String> {
    settings.save(&state.app_dir)?;
    *state.settings.lock().unwrap() = settings;
    Ok(())
}
