// InsectVerse - The Intelligent Insect Explorer
// Module declarations
mod audio;
mod chat;
mod commands;
mod gemini;
mod insect;
mod quiz;
mod settings;
mod state;

use gemini::GeminiClient;
use settings::AppSettings;
use state::AppState;
use tauri::Manager;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            // Get app data directory
            let app_dir = app.path().app_data_dir()
                .expect("Failed to get app data directory");

            // Load settings, falling back to defaults if the file is broken
            let settings = AppSettings::load(&app_dir).unwrap_or_else(|e| {
                eprintln!("[Settings] {}", e);
                AppSettings::default()
            });

            // The key never lives in the settings file
            let api_key = std::env::var("GEMINI_API_KEY")
                .expect("GEMINI_API_KEY environment variable not set");
            let gemini = GeminiClient::new(api_key);

            // Create and manage app state
            let app_state = AppState::new(gemini, settings, app_dir);
            app.manage(app_state);

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::search_insect,
            commands::play_insect_sound,
            commands::start_chat,
            commands::send_chat_message,
            commands::get_chat_history,
            commands::get_quiz_question,
            commands::answer_quiz,
            commands::next_quiz_question,
            commands::get_settings,
            commands::update_settings,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
