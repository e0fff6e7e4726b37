// PCM audio decoder
// Converts the base64-encoded raw s16le payload returned by speech
// synthesis into normalized float samples ready for playback

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid base64 payload: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
    #[error("PCM byte length {0} is not a multiple of 2")]
    OddByteLength(usize),
    #[error("channel count must be at least 1")]
    InvalidChannelCount,
}

/// A decoded audio buffer: one contiguous f32 sample sequence per channel,
/// every sample in [-1.0, 1.0). Immutable after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct PcmBuffer {
    channels: Vec<Vec<f32>>,
    sample_rate: u32,
}

impl PcmBuffer {
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Number of frames (one sample per channel) in the buffer
    pub fn frame_count(&self) -> usize {
        self.channels.first().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.frame_count() == 0
    }

    pub fn channel(&self, index: usize) -> &[f32] {
        &self.channels[index]
    }

    /// Re-interleave the per-channel samples for the playback source
    pub fn interleaved(&self) -> Vec<f32> {
        let mut samples = Vec::with_capacity(self.frame_count() * self.channel_count());
        for frame in 0..self.frame_count() {
            for channel in &self.channels {
                samples.push(channel[frame]);
            }
        }
        samples
    }
}

/// Decode a base64 payload into raw PCM bytes
pub fn decode_base64(text: &str) -> Result<Vec<u8>, DecodeError> {
    Ok(STANDARD.decode(text)?)
}

/// Interpret raw bytes as interleaved signed 16-bit little-endian samples
/// and split them into per-channel float sequences.
///
/// A trailing partial frame (total samples not divisible by the channel
/// count) is truncated, matching the behavior of the speech service's own
/// client libraries; a warning is logged when it happens.
pub fn pcm16_to_float_buffer(
    bytes: &[u8],
    sample_rate: u32,
    channel_count: usize,
) -> Result<PcmBuffer, DecodeError> {
    if channel_count == 0 {
        return Err(DecodeError::InvalidChannelCount);
    }
    if bytes.len() % 2 != 0 {
        return Err(DecodeError::OddByteLength(bytes.len()));
    }

    let samples: Vec<i16> = bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect();

    let frame_count = samples.len() / channel_count;
    let leftover = samples.len() % channel_count;
    if leftover != 0 {
        eprintln!(
            "[Audio] Payload ends in a partial frame, dropping {} trailing sample(s)",
            leftover
        );
    }

    let mut channels = Vec::with_capacity(channel_count);
    for channel in 0..channel_count {
        let mut data = Vec::with_capacity(frame_count);
        for frame in 0..frame_count {
            data.push(samples[frame * channel_count + channel] as f32 / 32768.0);
        }
        channels.push(data);
    }

    Ok(PcmBuffer {
        channels,
        sample_rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_i16(samples: &[i16]) -> Vec<u8> {
        samples.iter().flat_map(|s| s.to_le_bytes()).collect()
    }

    #[test]
    fn test_mono_sample_values() {
        // Little-endian 16384 should decode to exactly 0.5
        let buffer = pcm16_to_float_buffer(&[0x00, 0x40], 24000, 1).unwrap();
        assert_eq!(buffer.channel_count(), 1);
        assert_eq!(buffer.frame_count(), 1);
        assert_eq!(buffer.channel(0)[0], 0.5);
        assert_eq!(buffer.sample_rate(), 24000);
    }

    #[test]
    fn test_mono_frame_count() {
        let raw = [0i16, 100, -100, i16::MAX, i16::MIN];
        let buffer = pcm16_to_float_buffer(&encode_i16(&raw), 24000, 1).unwrap();
        assert_eq!(buffer.frame_count(), 5);
        for (&sample, &expected) in buffer.channel(0).iter().zip(&raw) {
            assert_eq!(sample, expected as f32 / 32768.0);
            assert!((-1.0..1.0).contains(&sample));
        }
    }

    #[test]
    fn test_odd_byte_length_fails() {
        let result = pcm16_to_float_buffer(&[0x00, 0x40, 0x7f], 24000, 1);
        assert!(matches!(result, Err(DecodeError::OddByteLength(3))));
    }

    #[test]
    fn test_zero_channels_fails() {
        let result = pcm16_to_float_buffer(&[0x00, 0x40], 24000, 0);
        assert!(matches!(result, Err(DecodeError::InvalidChannelCount)));
    }

    #[test]
    fn test_stereo_deinterleave() {
        // Frames: (1000, -1000), (2000, -2000)
        let bytes = encode_i16(&[1000, -1000, 2000, -2000]);
        let buffer = pcm16_to_float_buffer(&bytes, 24000, 2).unwrap();
        assert_eq!(buffer.frame_count(), 2);
        assert_eq!(buffer.channel(0), &[1000.0 / 32768.0, 2000.0 / 32768.0]);
        assert_eq!(buffer.channel(1), &[-1000.0 / 32768.0, -2000.0 / 32768.0]);
    }

    #[test]
    fn test_partial_trailing_frame_truncated() {
        // Five samples over two channels: the fifth has no partner and is dropped
        let bytes = encode_i16(&[1, 2, 3, 4, 5]);
        let buffer = pcm16_to_float_buffer(&bytes, 24000, 2).unwrap();
        assert_eq!(buffer.frame_count(), 2);
    }

    #[test]
    fn test_empty_payload() {
        let buffer = pcm16_to_float_buffer(&[], 24000, 1).unwrap();
        assert_eq!(buffer.frame_count(), 0);
        assert!(buffer.is_empty());
        let buffer = pcm16_to_float_buffer(&[], 24000, 4).unwrap();
        assert_eq!(buffer.frame_count(), 0);
    }

    #[test]
    fn test_interleaved_round_trip() {
        let bytes = encode_i16(&[10, 20, 30, 40, 50, 60]);
        let buffer = pcm16_to_float_buffer(&bytes, 24000, 2).unwrap();
        assert_eq!(
            buffer.interleaved(),
            vec![
                10.0 / 32768.0,
                20.0 / 32768.0,
                30.0 / 32768.0,
                40.0 / 32768.0,
                50.0 / 32768.0,
                60.0 / 32768.0
            ]
        );
    }

    #[test]
    fn test_quantization_round_trip() {
        // Quantize a float sequence to s16 and decode it back; every value
        // must come back within one quantization step
        let original = [0.0f32, 0.25, -0.25, 0.9999, -1.0, 0.333];
        let quantized: Vec<i16> = original
            .iter()
            .map(|&s| (s * 32768.0).clamp(i16::MIN as f32, i16::MAX as f32) as i16)
            .collect();
        let buffer = pcm16_to_float_buffer(&encode_i16(&quantized), 24000, 1).unwrap();
        for (&decoded, &expected) in buffer.channel(0).iter().zip(&original) {
            assert!((decoded - expected).abs() <= 1.0 / 32768.0);
        }
    }

    #[test]
    fn test_decode_base64() {
        assert_eq!(decode_base64("AEA=").unwrap(), vec![0x00, 0x40]);
        assert!(matches!(
            decode_base64("not!!valid@@base64"),
            Err(DecodeError::InvalidBase64(_))
        ));
    }
}
