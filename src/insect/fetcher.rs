// Insect content fetching
// Classification gate, combined info/image/map fetch, and speech synthesis

use crate::gemini::types::{Content, GenerateContentRequest, GenerationConfig, SpeechConfig};
use crate::gemini::{GeminiClient, GeminiError};
use crate::insect::models::InsectData;
use crate::insect::prompts;
use crate::settings::ModelSettings;

/// Strict yes/no classification of a free-text query.
///
/// Any failure (network, quota, malformed reply) counts as "not an insect"
/// so a broken classifier can never let arbitrary queries through.
pub async fn is_insect(client: &GeminiClient, models: &ModelSettings, query: &str) -> bool {
    let request = GenerateContentRequest {
        contents: vec![Content::user_text(prompts::classification_prompt(query))],
        system_instruction: None,
        generation_config: Some(GenerationConfig {
            temperature: Some(0.0),
            ..Default::default()
        }),
    };

    match client.generate_content(&models.text_model, &request).await {
        Ok(response) => response
            .first_text()
            .map(|text| text.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false),
        Err(e) => {
            eprintln!("[Search] Classification failed for \"{}\": {}", query, e);
            false
        }
    }
}

/// Fetch the structured record, the portrait image, and the distribution
/// map concurrently. All three must succeed; the first failure aborts the
/// combination and the other results are discarded.
pub async fn fetch_insect_data(
    client: &GeminiClient,
    models: &ModelSettings,
    insect_name: &str,
) -> Result<InsectData, GeminiError> {
    let info = async {
        let request = GenerateContentRequest {
            contents: vec![Content::user_text(prompts::info_prompt(insect_name))],
            system_instruction: Some(Content::system_text(prompts::INFO_SYSTEM_INSTRUCTION)),
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(prompts::insect_data_schema()),
                ..Default::default()
            }),
        };
        let response = client.generate_content(&models.text_model, &request).await?;
        let text = response.first_text().ok_or(GeminiError::EmptyResponse)?;
        let data: InsectData = serde_json::from_str(text.trim())?;
        Ok::<_, GeminiError>(data)
    };

    let image_prompt = prompts::image_prompt(insect_name);
    let image = client.generate_image(&models.image_model, &image_prompt, "1:1");
    let map_prompt = prompts::map_prompt(insect_name);
    let map = client.generate_image(&models.image_model, &map_prompt, "16:9");

    let (mut data, image_url, map_url) = tokio::try_join!(info, image, map)?;
    data.image_url = image_url;
    data.distribution_map_image_url = map_url;
    Ok(data)
}

/// Synthesize the insect's sound and return the base64 PCM payload.
/// The payload is headerless s16le; rate and channel count are fixed by
/// the service (24000 Hz mono) and supplied out-of-band at decode time.
pub async fn generate_insect_sound(
    client: &GeminiClient,
    models: &ModelSettings,
    insect_name: &str,
) -> Result<String, GeminiError> {
    let request = GenerateContentRequest {
        contents: vec![Content::user_text(prompts::sound_text(insect_name))],
        system_instruction: None,
        generation_config: Some(GenerationConfig {
            response_modalities: Some(vec!["AUDIO".to_string()]),
            speech_config: Some(SpeechConfig::prebuilt_voice(&models.voice)),
            ..Default::default()
        }),
    };

    let response = client.generate_content(&models.tts_model, &request).await?;
    let inline = response
        .first_inline_data()
        .ok_or(GeminiError::EmptyResponse)?;
    Ok(inline.data.clone())
}
