// Audio module
// Decodes the speech service's raw PCM payloads and plays them back

pub mod decoder;
pub mod player;

pub use decoder::PcmBuffer;
