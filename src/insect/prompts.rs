// Prompt builders and the structured-output schema for insect records

use serde_json::{json, Value};

pub const INFO_SYSTEM_INSTRUCTION: &str = "You are an expert entomologist. Your goal is to provide detailed, accurate, and engaging information about insects in a structured JSON format. The data should be suitable for an educational app.";

pub fn info_prompt(insect_name: &str) -> String {
    format!(
        "Provide comprehensive information for the insect: \"{}\". Focus only on this insect, not other animals.",
        insect_name
    )
}

pub fn classification_prompt(query: &str) -> String {
    format!(
        "Is \"{}\" an insect? Answer with only \"true\" or \"false\". Do not provide any other explanation. Be very strict. If the query is for an animal that is not an insect, like \"lion\", answer \"false\" even if there is an insect with a similar name like \"antlion\".",
        query
    )
}

pub fn image_prompt(insect_name: &str) -> String {
    format!(
        "A high-quality, photorealistic image of a {} in its natural habitat. The insect should be the main focus. High resolution, detailed.",
        insect_name
    )
}

pub fn map_prompt(insect_name: &str) -> String {
    format!(
        "A scientific, educational world map illustrating the geographical distribution of the {}. Use clear shading to indicate its primary habitats. Aspect ratio 16:9.",
        insect_name
    )
}

pub fn chat_system_instruction(insect_name: &str) -> String {
    format!(
        "You are a helpful and knowledgeable assistant specializing in entomology. Your name is Professor Buzz. Answer questions about the {} and related topics in an engaging way for all ages. Keep answers concise and accurate.",
        insect_name
    )
}

/// Pick the text that gets spoken for an insect's "sound". The TTS voice
/// reading an onomatopoeia is the closest the service gets to a field
/// recording.
pub fn sound_text(insect_name: &str) -> String {
    let name = insect_name.to_lowercase();
    if name.contains("cricket") || name.contains("grasshopper") {
        return "Chirp chirp chirp.".to_string();
    }
    if name.contains("bee") || name.contains("fly") || name.contains("wasp") || name.contains("mosquito") {
        return "Bzzzzzzzzzz.".to_string();
    }
    if name.contains("cicada") {
        return "A loud, high-pitched buzzing sound.".to_string();
    }
    if name.contains("katydid") {
        return "A rhythmic clicking sound.".to_string();
    }
    format!("This is a sound of a {}.", insect_name)
}

/// Response schema forcing the model to emit a parseable InsectData record
pub fn insect_data_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "name": { "type": "STRING", "description": "Common name of the insect." },
            "scientificName": { "type": "STRING", "description": "Scientific name (genus and species)." },
            "taxonomy": {
                "type": "OBJECT",
                "properties": {
                    "kingdom": { "type": "STRING" },
                    "phylum": { "type": "STRING" },
                    "class": { "type": "STRING" },
                    "order": { "type": "STRING" },
                    "family": { "type": "STRING" },
                    "genus": { "type": "STRING" },
                    "species": { "type": "STRING" }
                },
                "required": ["kingdom", "phylum", "class", "order", "family", "genus", "species"]
            },
            "summary": { "type": "STRING", "description": "A brief, engaging summary of the insect." },
            "habitat": { "type": "STRING", "description": "Description of the insect's natural habitat and global distribution." },
            "ecologicalRole": { "type": "STRING", "description": "The insect's role in the ecosystem (e.g., pollinator, decomposer)." },
            "threats": { "type": "STRING", "description": "Major threats to the insect's survival." },
            "conservationStatus": { "type": "STRING", "description": "Current conservation status (e.g., from IUCN Red List)." },
            "populationTrend": {
                "type": "ARRAY",
                "description": "Mock data for population trend over 5 points in time. Year should be recent, population is an index from 0-100.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "year": { "type": "INTEGER" },
                        "population": { "type": "NUMBER" }
                    },
                    "required": ["year", "population"]
                }
            },
            "funFacts": {
                "type": "ARRAY",
                "description": "A list of 3-5 interesting and fun facts.",
                "items": { "type": "STRING" }
            },
            "sustainabilityTip": { "type": "STRING", "description": "A practical tip for helping conserve this insect." },
            "impactScore": { "type": "INTEGER", "description": "An integer score from 0-100 representing its ecological importance." },
            "extinctionPrediction": { "type": "STRING", "description": "A simple, AI-generated prediction or risk assessment for extinction by 2050 based on current trends." }
        },
        "required": [
            "name", "scientificName", "taxonomy", "summary", "habitat",
            "ecologicalRole", "threats", "conservationStatus", "populationTrend",
            "funFacts", "sustainabilityTip", "impactScore", "extinctionPrediction"
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sound_text_known_families() {
        assert_eq!(sound_text("Field Cricket"), "Chirp chirp chirp.");
        assert_eq!(sound_text("Grasshopper"), "Chirp chirp chirp.");
        assert_eq!(sound_text("Honey Bee"), "Bzzzzzzzzzz.");
        assert_eq!(sound_text("Dragonfly"), "Bzzzzzzzzzz.");
        assert_eq!(sound_text("Mosquito"), "Bzzzzzzzzzz.");
        assert_eq!(sound_text("Cicada"), "A loud, high-pitched buzzing sound.");
        assert_eq!(sound_text("Katydid"), "A rhythmic clicking sound.");
    }

    #[test]
    fn test_sound_text_fallback() {
        assert_eq!(sound_text("Stick Insect"), "This is a sound of a Stick Insect.");
    }

    #[test]
    fn test_sound_text_case_insensitive() {
        assert_eq!(sound_text("CRICKET"), "Chirp chirp chirp.");
    }

    #[test]
    fn test_schema_requires_all_record_fields() {
        let schema = insect_data_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert!(required.contains(&"scientificName"));
        assert!(required.contains(&"populationTrend"));
        assert_eq!(schema["properties"]["impactScore"]["type"], "INTEGER");
    }
}
