//! Synthesized sound effects and background music via rodio.
//!
//! All audio is generated at startup as raw sample buffers, so the game
//! ships no sound assets. Playback is fire-and-forget: one-shots run on
//! detached sinks, the music loop keeps its sink for pause/resume.

use rodio::{buffer::SamplesBuffer, OutputStream, OutputStreamHandle, Sink, Source};

const SAMPLE_RATE: u32 = 44_100;

/// The closed set of one-shot sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Wall or self collision
    Crash,
    /// Food eaten
    Ding,
}

pub struct AudioPlayer {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    music: Option<Sink>,
}

impl AudioPlayer {
    pub fn new() -> Result<Self, rodio::StreamError> {
        let (stream, handle) = OutputStream::try_default()?;
        Ok(Self {
            _stream: stream,
            handle,
            music: None,
        })
    }

    /// Play a one-shot effect; silently does nothing if the sink cannot
    /// be created
    pub fn play(&self, effect: SoundEffect) {
        let samples = match effect {
            SoundEffect::Crash => crash_samples(),
            SoundEffect::Ding => ding_samples(),
        };

        if let Ok(sink) = Sink::try_new(&self.handle) {
            sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples));
            sink.detach();
        }
    }

    /// Start the looping background melody
    pub fn start_music(&mut self) {
        if let Ok(sink) = Sink::try_new(&self.handle) {
            sink.set_volume(0.35);
            sink.append(SamplesBuffer::new(1, SAMPLE_RATE, music_samples()).repeat_infinite());
            self.music = Some(sink);
        }
    }

    pub fn pause_music(&self) {
        if let Some(music) = &self.music {
            music.pause();
        }
    }

    pub fn resume_music(&self) {
        if let Some(music) = &self.music {
            music.play();
        }
    }
}

/// A sine tone with an exponential-ish decay envelope
fn tone(freq: f32, duration: f32, amplitude: f32) -> Vec<f32> {
    let count = (SAMPLE_RATE as f32 * duration) as usize;
    let mut samples = Vec::with_capacity(count);

    for i in 0..count {
        let t = i as f32 / SAMPLE_RATE as f32;
        let envelope = amplitude * (1.0 - t / duration).max(0.0).powi(2);
        samples.push((t * freq * std::f32::consts::TAU).sin() * envelope);
    }

    samples
}

/// Falling pitch, 400 Hz down to 80 Hz over half a second
fn crash_samples() -> Vec<f32> {
    let duration = 0.5;
    let count = (SAMPLE_RATE as f32 * duration) as usize;
    let mut samples = Vec::with_capacity(count);
    let mut phase = 0.0f32;

    for i in 0..count {
        let t = i as f32 / SAMPLE_RATE as f32;
        let progress = (t / duration).min(1.0);
        let freq = 400.0 + (80.0 - 400.0) * progress;
        phase += freq * std::f32::consts::TAU / SAMPLE_RATE as f32;
        let envelope = 0.25 * (1.0 - progress);
        samples.push(phase.sin() * envelope);
    }

    samples
}

/// Two short ascending notes
fn ding_samples() -> Vec<f32> {
    let mut samples = tone(520.0, 0.1, 0.2);
    samples.extend(tone(680.0, 0.15, 0.2));
    samples
}

/// A little eight-note bass loop
fn music_samples() -> Vec<f32> {
    const NOTES: [f32; 8] = [130.8, 164.8, 196.0, 164.8, 146.8, 174.6, 196.0, 174.6];

    let mut samples = Vec::new();
    for freq in NOTES {
        samples.extend(tone(freq, 0.25, 0.15));
    }
    samples
}
