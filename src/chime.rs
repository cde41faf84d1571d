//! The interaction chime: a short rising sine tone with a soft decay.
//!
//! Pure synthesis (`Chime::frequency_at`, `Chime::gain_at`, `Chime::render`)
//! plus two effects: WAV export and the `AudioCue` sinks used by the TUI.
//!
//! Envelope:
//! - Frequency: 440 Hz, exponential ramp to 880 Hz by 0.22 s, then held.
//! - Gain: 0 -> 0.15 linear by 0.02 s, exponential decay to 0.0001 by 1.4 s.
//! - Oscillator stops at 1.5 s.

use std::f32::consts::TAU;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::ChimeError;

/// Sample rate used when none is given.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Accepted sample rates for rendering and export.
pub const MIN_SAMPLE_RATE: u32 = 8_000;
pub const MAX_SAMPLE_RATE: u32 = 192_000;

/// Reject sample rates outside [`MIN_SAMPLE_RATE`]..=[`MAX_SAMPLE_RATE`].
pub fn check_sample_rate(rate: u32) -> Result<(), ChimeError> {
    if (MIN_SAMPLE_RATE..=MAX_SAMPLE_RATE).contains(&rate) {
        Ok(())
    } else {
        Err(ChimeError::SampleRateOutOfRange {
            rate,
            min: MIN_SAMPLE_RATE,
            max: MAX_SAMPLE_RATE,
        })
    }
}

/// Shape of the chime. `Default` is the standard interaction chime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chime {
    pub start_hz: f32,
    pub end_hz: f32,
    /// Time at which `end_hz` is reached.
    pub sweep_secs: f32,
    pub peak_gain: f32,
    /// Time at which `peak_gain` is reached.
    pub attack_secs: f32,
    pub floor_gain: f32,
    /// Time at which the decay reaches `floor_gain`.
    pub decay_end_secs: f32,
    /// Total length; silence after this.
    pub stop_secs: f32,
}

impl Default for Chime {
    fn default() -> Self {
        Chime {
            start_hz: 440.0,
            end_hz: 880.0,
            sweep_secs: 0.22,
            peak_gain: 0.15,
            attack_secs: 0.02,
            floor_gain: 0.0001,
            decay_end_secs: 1.4,
            stop_secs: 1.5,
        }
    }
}

impl Chime {
    /// Instantaneous oscillator frequency at `t` seconds.
    pub fn frequency_at(&self, t: f32) -> f32 {
        if t <= 0.0 {
            return self.start_hz;
        }
        if t >= self.sweep_secs {
            return self.end_hz;
        }
        exp_ramp(self.start_hz, self.end_hz, t / self.sweep_secs)
    }

    /// Amplitude envelope at `t` seconds.
    pub fn gain_at(&self, t: f32) -> f32 {
        if t <= 0.0 || t >= self.stop_secs {
            0.0
        } else if t < self.attack_secs {
            self.peak_gain * t / self.attack_secs
        } else if t < self.decay_end_secs {
            let progress = (t - self.attack_secs) / (self.decay_end_secs - self.attack_secs);
            exp_ramp(self.peak_gain, self.floor_gain, progress)
        } else {
            self.floor_gain
        }
    }

    /// Number of samples covering the whole chime.
    pub fn sample_count(&self, sample_rate: u32) -> usize {
        (self.stop_secs * sample_rate as f32).ceil() as usize
    }

    /// Render mono samples in [-1, 1].
    pub fn render(&self, sample_rate: u32) -> Vec<f32> {
        if sample_rate == 0 {
            return Vec::new();
        }
        let dt = 1.0 / sample_rate as f32;
        let mut phase = 0.0f32;

        (0..self.sample_count(sample_rate))
            .map(|i| {
                let t = i as f32 * dt;
                let sample = phase.sin() * self.gain_at(t);
                phase = (phase + TAU * self.frequency_at(t) * dt) % TAU;
                sample
            })
            .collect()
    }
}

/// Exponential interpolation from `from` to `to`, `progress` in [0, 1].
fn exp_ramp(from: f32, to: f32, progress: f32) -> f32 {
    from * (to / from).powf(progress.clamp(0.0, 1.0))
}

// ============================================================================
// WAV EXPORT
// ============================================================================

const WAV_HEADER_LEN: u32 = 44;
const BITS_PER_SAMPLE: u16 = 16;

/// Write samples as 16-bit mono PCM. Returns the number of bytes written.
pub fn write_wav(path: &Path, samples: &[f32], sample_rate: u32) -> Result<u64, ChimeError> {
    check_sample_rate(sample_rate)?;
    let data_len = data_chunk_len(samples.len()).ok_or(ChimeError::TooLong {
        samples: samples.len(),
    })?;
    let to_error = |source| ChimeError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(to_error)?;
    let mut out = BufWriter::new(file);
    let written = encode_wav(&mut out, samples, data_len, sample_rate).map_err(to_error)?;
    out.flush().map_err(to_error)?;

    tracing::debug!("wrote {} samples to {}", samples.len(), path.display());
    Ok(written)
}

const BLOCK_ALIGN: u16 = BITS_PER_SAMPLE / 8;

/// Byte length of the data chunk, if the whole file stays addressable by
/// the 32-bit RIFF size field.
fn data_chunk_len(samples: usize) -> Option<u32> {
    let data_len = u32::try_from(samples).ok()?.checked_mul(BLOCK_ALIGN as u32)?;
    data_len.checked_add(WAV_HEADER_LEN)?;
    Some(data_len)
}

/// Encode a RIFF/WAVE stream into `out`. `data_len` comes from
/// [`data_chunk_len`].
fn encode_wav<W: Write>(
    out: &mut W,
    samples: &[f32],
    data_len: u32,
    sample_rate: u32,
) -> io::Result<u64> {
    let block_align = BLOCK_ALIGN;
    let byte_rate = sample_rate.saturating_mul(block_align as u32);

    out.write_all(b"RIFF")?;
    out.write_all(&(WAV_HEADER_LEN - 8 + data_len).to_le_bytes())?;
    out.write_all(b"WAVE")?;

    out.write_all(b"fmt ")?;
    out.write_all(&16u32.to_le_bytes())?;
    out.write_all(&1u16.to_le_bytes())?; // PCM
    out.write_all(&1u16.to_le_bytes())?; // mono
    out.write_all(&sample_rate.to_le_bytes())?;
    out.write_all(&byte_rate.to_le_bytes())?;
    out.write_all(&block_align.to_le_bytes())?;
    out.write_all(&BITS_PER_SAMPLE.to_le_bytes())?;

    out.write_all(b"data")?;
    out.write_all(&data_len.to_le_bytes())?;
    for sample in samples {
        let pcm = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        out.write_all(&pcm.to_le_bytes())?;
    }

    Ok(WAV_HEADER_LEN as u64 + data_len as u64)
}

// ============================================================================
// AUDIO CUES
// ============================================================================

/// Where the TUI sends the chime on interaction.
///
/// Implementations must not fail loudly: a missing audio device is not
/// the user's problem.
pub trait AudioCue {
    fn play(&mut self, chime: &Chime);
}

/// Rings the terminal bell.
#[derive(Debug, Default)]
pub struct TerminalBell;

impl AudioCue for TerminalBell {
    fn play(&mut self, _chime: &Chime) {
        let mut stdout = io::stdout();
        if let Err(e) = stdout.write_all(b"\x07").and_then(|_| stdout.flush()) {
            tracing::debug!("terminal bell unavailable: {}", e);
        }
    }
}

/// Plays nothing (`--mute`).
#[derive(Debug, Default)]
pub struct Silent;

impl AudioCue for Silent {
    fn play(&mut self, _chime: &Chime) {}
}

// ============================================================================
// TESTS
// ============================================================================
