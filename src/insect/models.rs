// Data models
// Field names are camelCase on the wire so the structured model output
// parses directly and the webview can consume records unchanged
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Taxonomy {
    pub kingdom: String,
    pub phylum: String,
    pub class: String,
    pub order: String,
    pub family: String,
    pub genus: String,
    pub species: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationPoint {
    pub year: i32,
    pub population: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsectData {
    pub name: String,
    pub scientific_name: String,
    pub taxonomy: Taxonomy,
    pub summary: String,
    pub habitat: String,
    pub ecological_role: String,
    pub threats: String,
    pub conservation_status: String,
    pub population_trend: Vec<PopulationPoint>,
    pub fun_facts: Vec<String>,
    pub sustainability_tip: String,
    pub impact_score: u32,
    pub extinction_prediction: String,
    // Filled in from the image calls, not part of the generated record
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub distribution_map_image_url: String,
}
