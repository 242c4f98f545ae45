//! Generator operations on [`WavStream`].

use tracing::trace;

use super::{Storage, WavStream};
use crate::error::{StreamError, StreamResult};
use crate::synth;

impl<S: Storage> WavStream<S> {
    /// Adds a sine tone.
    pub fn add_tone(&mut self, frequency: f64, duration: f64) -> StreamResult<()> {
        check_frequency(frequency)?;
        let frames = self.frames_for(duration)?;
        let wave = synth::tone(frames, self.format.sample_rate, frequency);
        trace!(frequency, duration, frames, "tone");
        self.render_span(frames, |i, _| wave[i])
    }

    /// Adds a sine note that fades linearly to silence over `duration`.
    pub fn add_chime(&mut self, frequency: f64, duration: f64) -> StreamResult<()> {
        check_frequency(frequency)?;
        let frames = self.frames_for(duration)?;
        let wave = synth::chime(frames, self.format.sample_rate, frequency);
        trace!(frequency, duration, frames, "chime");
        self.render_span(frames, |i, _| wave[i])
    }

    /// Adds a phase-continuous linear frequency sweep.
    ///
    /// A zero duration adds nothing.
    pub fn add_sweep(
        &mut self,
        start_frequency: f64,
        end_frequency: f64,
        duration: f64,
    ) -> StreamResult<()> {
        check_frequency(start_frequency)?;
        check_frequency(end_frequency)?;
        let frames = self.frames_for(duration)?;
        let wave = synth::sweep(
            frames,
            self.format.sample_rate,
            start_frequency,
            end_frequency,
            duration,
        );
        trace!(start_frequency, end_frequency, duration, frames, "sweep");
        self.render_span(frames, |i, _| wave[i])
    }

    /// Adds white noise, drawn independently for every channel.
    pub fn add_noise(&mut self, duration: f64) -> StreamResult<()> {
        let frames = self.frames_for(duration)?;
        let channels = self.format.channels as usize;
        let values = synth::noise(frames * channels, &mut self.rng);
        trace!(duration, frames, "noise");
        self.render_span(frames, |i, c| values[i * channels + c])
    }

    /// Adds silence.
    ///
    /// Silence always overwrites, whatever the blend mode.
    pub fn add_silence(&mut self, duration: f64) -> StreamResult<()> {
        let frames = self.frames_for(duration)?;
        let fmt = self.format.sample_format();
        let samples = frames * self.format.channels as usize;

        let mut neutral = Vec::with_capacity(fmt.width);
        fmt.encode(fmt.neutral(), &mut neutral);
        let bytes = neutral.repeat(samples);

        trace!(duration, frames, "silence");
        self.commit_span(&bytes, frames as u64)
    }

    /// Validates `duration` and converts it to a frame count, making sure the
    /// resulting span still fits in the file.
    fn frames_for(&self, duration: f64) -> StreamResult<usize> {
        if !duration.is_finite() || duration < 0.0 {
            return Err(StreamError::InvalidDuration { duration });
        }
        let frames = self.format.frames_for(duration);
        self.ensure_room(frames.saturating_mul(self.format.block_align() as u64))?;
        usize::try_from(frames).map_err(|_| StreamError::InvalidDuration { duration })
    }

    /// Quantizes, blends and writes `frames` frames.
    ///
    /// `unit(frame, channel)` yields the unit-amplitude signal; the channel's
    /// volume is applied here.
    fn render_span<F>(&mut self, frames: usize, mut unit: F) -> StreamResult<()>
    where
        F: FnMut(usize, usize) -> f64,
    {
        let channels = self.format.channels as usize;
        let fmt = self.format.sample_format();
        let span_len = frames * channels * fmt.width;

        let existing = if self.blend.reads_existing() {
            Some(self.peek_existing(span_len)?)
        } else {
            None
        };

        let mut bytes = Vec::with_capacity(span_len);
        for i in 0..frames {
            for c in 0..channels {
                let mut value = fmt.quantize(unit(i, c) * self.volume[c]);
                if let Some(existing) = &existing {
                    let offset = (i * channels + c) * fmt.width;
                    // Slots past the end of storage hold silence.
                    let old = match existing.get(offset..offset + fmt.width) {
                        Some(slot) => fmt.decode(slot),
                        None => fmt.neutral(),
                    };
                    value = self.blend.apply(&fmt, old, value);
                }
                fmt.encode(value, &mut bytes);
            }
        }

        self.commit_span(&bytes, frames as u64)
    }
}

fn check_frequency(freq: f64) -> StreamResult<()> {
    if !freq.is_finite() || freq < 0.0 {
        return Err(StreamError::InvalidFrequency { freq });
    }
    Ok(())
}
