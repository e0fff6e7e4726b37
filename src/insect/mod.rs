// Insect domain module
// Everything the remote service generates about an insect: classification,
// structured facts, imagery, and synthesized sound

pub mod fetcher;
pub mod models;
pub mod prompts;

pub use models::InsectData;
