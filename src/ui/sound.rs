/// Sound engine: procedural 8-bit style menu feedback via rodio.
///
/// All sounds are generated as in-memory WAV buffers at init time.
/// Playback is fire-and-forget (non-blocking) via rodio's Sink.
///
/// Compile with `--no-default-features` or without "sound" feature
/// to disable audio entirely (the stub SoundEngine does nothing).

#[cfg(feature = "sound")]
mod inner {
    use std::io::Cursor;
    use std::sync::Arc;

    use rodio::{OutputStream, OutputStreamHandle, Sink};

    const SAMPLE_RATE: u32 = 22050;

    /// Pre-generated WAV buffers for each sound effect.
    pub struct SoundEngine {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        sfx_move: Arc<Vec<u8>>,
        sfx_select: Arc<Vec<u8>>,
        sfx_back: Arc<Vec<u8>>,
        sfx_deny: Arc<Vec<u8>>,
    }

    impl SoundEngine {
        pub fn new() -> Option<Self> {
            let (stream, handle) = OutputStream::try_default().ok()?;

            let sfx_move = Arc::new(make_wav(&gen_move()));
            let sfx_select = Arc::new(make_wav(&gen_select()));
            let sfx_back = Arc::new(make_wav(&gen_back()));
            let sfx_deny = Arc::new(make_wav(&gen_deny()));

            Some(SoundEngine {
                _stream: stream,
                handle,
                sfx_move,
                sfx_select,
                sfx_back,
                sfx_deny,
            })
        }

        fn play(&self, buf: &Arc<Vec<u8>>) {
            if let Ok(sink) = Sink::try_new(&self.handle) {
                let cursor = Cursor::new(buf.as_ref().clone());
                if let Ok(src) = rodio::Decoder::new(cursor) {
                    sink.append(src);
                    sink.detach(); // fire-and-forget
                }
            }
        }

        pub fn play_move(&self) { self.play(&self.sfx_move); }
        pub fn play_select(&self) { self.play(&self.sfx_select); }
        pub fn play_back(&self) { self.play(&self.sfx_back); }
        pub fn play_deny(&self) { self.play(&self.sfx_deny); }
    }

    // ════════════════════════════════════════════════════════════
    //  Waveform generators: all produce Vec<f32> mono samples
    // ════════════════════════════════════════════════════════════

    /// One note with a linear fade-out. Adding a 3rd harmonic gives the
    /// square-ish retro timbre.
    fn tone(freq: f32, duration: f32, volume: f32) -> Vec<f32> {
        let n = (SAMPLE_RATE as f32 * duration) as usize;
        (0..n)
            .map(|i| {
                let t = i as f32 / SAMPLE_RATE as f32;
                let env = 1.0 - (i as f32 / n as f32);
                let wave = (t * freq * 2.0 * std::f32::consts::PI).sin() * 0.7
                    + (t * freq * 3.0 * 2.0 * std::f32::consts::PI).sin() * 0.3;
                wave * env * volume
            })
            .collect()
    }

    /// Focus move: a single short high blip
    fn gen_move() -> Vec<f32> {
        tone(740.0, 0.035, 0.2)
    }

    /// Confirm: quick ascending two-note chime C5→C6
    fn gen_select() -> Vec<f32> {
        let mut samples = tone(523.0, 0.06, 0.25);
        samples.extend(tone(1047.0, 0.1, 0.25));
        samples
    }

    /// Back: descending two-note E5→A4
    fn gen_back() -> Vec<f32> {
        let mut samples = tone(659.0, 0.05, 0.2);
        samples.extend(tone(440.0, 0.08, 0.2));
        samples
    }

    /// Rejected selection: low flat buzz
    fn gen_deny() -> Vec<f32> {
        let n = (SAMPLE_RATE as f32 * 0.12) as usize;
        (0..n)
            .map(|i| {
                let t = i as f32 / SAMPLE_RATE as f32;
                let env = 1.0 - (i as f32 / n as f32) * 0.5;
                // Square wave at 120Hz
                let wave = if (t * 120.0).fract() < 0.5 { 1.0 } else { -1.0 };
                wave * env * 0.12
            })
            .collect()
    }

    // ════════════════════════════════════════════════════════════
    //  WAV encoder: wraps f32 samples into a valid WAV buffer
    // ════════════════════════════════════════════════════════════

    fn make_wav(samples: &[f32]) -> Vec<u8> {
        let num_channels: u16 = 1;
        let bits_per_sample: u16 = 16;
        let byte_rate = SAMPLE_RATE * (num_channels as u32) * (bits_per_sample as u32) / 8;
        let block_align = num_channels * bits_per_sample / 8;
        let data_size = samples.len() as u32 * 2; // 16-bit = 2 bytes per sample
        let file_size = 36 + data_size;

        let mut buf = Vec::with_capacity(44 + data_size as usize);

        // RIFF header
        buf.extend_from_slice(b"RIFF");
        buf.extend_from_slice(&file_size.to_le_bytes());
        buf.extend_from_slice(b"WAVE");

        // fmt chunk
        buf.extend_from_slice(b"fmt ");
        buf.extend_from_slice(&16u32.to_le_bytes()); // chunk size
        buf.extend_from_slice(&1u16.to_le_bytes()); // PCM format
        buf.extend_from_slice(&num_channels.to_le_bytes());
        buf.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
        buf.extend_from_slice(&byte_rate.to_le_bytes());
        buf.extend_from_slice(&block_align.to_le_bytes());
        buf.extend_from_slice(&bits_per_sample.to_le_bytes());

        // data chunk
        buf.extend_from_slice(b"data");
        buf.extend_from_slice(&data_size.to_le_bytes());

        for &s in samples {
            let clamped = s.max(-1.0).min(1.0);
            let val = (clamped * 32767.0) as i16;
            buf.extend_from_slice(&val.to_le_bytes());
        }

        buf
    }
}

// ════════════════════════════════════════════════════════════
//  Public API: compiles to no-ops when sound feature is off
// ════════════════════════════════════════════════════════════

#[cfg(feature = "sound")]
pub use inner::SoundEngine;

#[cfg(not(feature = "sound"))]
pub struct SoundEngine;

#[cfg(not(feature = "sound"))]
impl SoundEngine {
    pub fn new() -> Option<Self> { Some(SoundEngine) }
    pub fn play_move(&self) {}
    pub fn play_select(&self) {}
    pub fn play_back(&self) {}
    pub fn play_deny(&self) {}
}
