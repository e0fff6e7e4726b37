// Audio player implementation
// One shared output stream per session; each play request gets its own
// detached sink, so overlapping requests play as independent streams

use anyhow::{Context, Result};
use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamHandle, Sink};
use std::sync::OnceLock;

use crate::audio::decoder::PcmBuffer;

static OUTPUT_HANDLE: OnceLock<OutputStreamHandle> = OnceLock::new();

/// Get the shared output handle, opening the default device on first use.
///
/// The stream itself must stay alive for as long as anything plays through
/// its handle, so it is leaked and reused for the rest of the session.
fn output_handle() -> Result<&'static OutputStreamHandle> {
    if let Some(handle) = OUTPUT_HANDLE.get() {
        return Ok(handle);
    }

    let (stream, handle) =
        OutputStream::try_default().context("Failed to open audio output device")?;
    std::mem::forget(stream);

    // If two first plays race, the loser leaks one extra idle stream
    Ok(OUTPUT_HANDLE.get_or_init(|| handle))
}

/// Play a decoded buffer once, fire-and-forget.
///
/// Returns as soon as playback is scheduled; completion is not signaled.
/// Playing an empty buffer is a no-op and does not touch the output device.
pub fn play(buffer: &PcmBuffer) -> Result<()> {
    if buffer.is_empty() {
        return Ok(());
    }

    let handle = output_handle()?;
    let source = SamplesBuffer::new(
        buffer.channel_count() as u16,
        buffer.sample_rate(),
        buffer.interleaved(),
    );

    let sink = Sink::try_new(handle).context("Failed to create playback sink")?;
    sink.append(source);
    sink.detach();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::decoder::pcm16_to_float_buffer;

    #[test]
    fn test_empty_buffer_is_noop() {
        // Must succeed without opening an output device, so this passes on
        // headless machines too
        let buffer = pcm16_to_float_buffer(&[], 24000, 1).unwrap();
        assert!(play(&buffer).is_ok());
    }
}
