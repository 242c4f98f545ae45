//! Unit-amplitude signal generators.
//!
//! Each function returns values in `[-1, 1]` before volume and quantization.
//! Tone, chime and sweep produce one value per frame, shared by all channels;
//! noise produces one value per sample.

use std::f64::consts::TAU;

use rand::Rng;
use rand_pcg::Pcg32;

use crate::rangemap::rangemap;

/// Constant-frequency sine.
///
/// The phase is recomputed from absolute time for every frame, which is exact
/// because the frequency never changes within a call.
pub fn tone(frames: usize, sample_rate: u32, frequency: f64) -> Vec<f64> {
    let sr = sample_rate as f64;
    (0..frames)
        .map(|i| {
            let time = i as f64 / sr;
            (time * TAU * frequency).sin()
        })
        .collect()
}

/// Sine with a linear fade-out from full level to zero across the call.
pub fn chime(frames: usize, sample_rate: u32, frequency: f64) -> Vec<f64> {
    let mut output = tone(frames, sample_rate, frequency);
    for (i, sample) in output.iter_mut().enumerate() {
        let decay = 1.0 - i as f64 / frames as f64;
        *sample *= decay;
    }
    output
}

/// Sine whose frequency ramps linearly from `start_frequency` to
/// `end_frequency` over `duration` seconds.
///
/// The phase is accumulated frame to frame so the waveform stays continuous
/// while the frequency moves.
pub fn sweep(
    frames: usize,
    sample_rate: u32,
    start_frequency: f64,
    end_frequency: f64,
    duration: f64,
) -> Vec<f64> {
    let sr = sample_rate as f64;
    let mut output = Vec::with_capacity(frames);
    let mut phase = 0.0_f64;

    for i in 0..frames {
        let time = i as f64 / sr;
        let frequency = rangemap(time, 0.0, duration, start_frequency, end_frequency);
        phase += TAU * frequency / sr;
        // Keep the accumulator small so long sweeps don't lose precision.
        if phase >= TAU {
            phase -= TAU;
        }
        output.push(phase.sin());
    }

    output
}

/// Independent uniform draws in `[-1, 1]`.
pub fn noise(samples: usize, rng: &mut Pcg32) -> Vec<f64> {
    (0..samples).map(|_| rng.gen_range(-1.0..=1.0)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_rng;

    #[test]
    fn test_tone_starts_at_zero_and_peaks_at_quarter_period() {
        // 1 Hz at 4 frames/sec: 0, 1, 0, -1
        let wave = tone(4, 4, 1.0);
        assert_eq!(wave.len(), 4);
        assert!(wave[0].abs() < 1e-12);
        assert!((wave[1] - 1.0).abs() < 1e-12);
        assert!(wave[2].abs() < 1e-12);
        assert!((wave[3] + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_frequency_tone_is_silent() {
        assert!(tone(100, 8000, 0.0).iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_chime_decays_linearly() {
        let frames = 8000;
        let plain = tone(frames, 8000, 440.0);
        let bell = chime(frames, 8000, 440.0);

        assert_eq!(bell.len(), frames);
        for (i, (&p, &b)) in plain.iter().zip(&bell).enumerate() {
            let decay = 1.0 - i as f64 / frames as f64;
            assert!((p * decay - b).abs() < 1e-12);
        }

        let head = bell[..800].iter().fold(0.0_f64, |m, s| m.max(s.abs()));
        let tail = bell[7200..].iter().fold(0.0_f64, |m, s| m.max(s.abs()));
        assert!(head > 0.9);
        assert!(tail < 0.11);
    }

    #[test]
    fn test_constant_sweep_matches_tone_frequency() {
        // With equal endpoints the sweep is a tone shifted by one phase step.
        let sr = 8000;
        let freq = 500.0;
        let swept = sweep(800, sr, freq, freq, 0.1);
        let step = TAU * freq / sr as f64;
        for (i, &s) in swept.iter().enumerate() {
            let expected = ((i + 1) as f64 * step).sin();
            assert!((s - expected).abs() < 1e-9, "frame {}", i);
        }
    }

    #[test]
    fn test_sweep_is_continuous() {
        // No jump between neighbouring frames can exceed the largest phase
        // step of the ramp.
        let sr = 41000;
        let swept = sweep(4100, sr, 700.0, 1500.0, 0.1);
        let max_step = TAU * 1500.0 / sr as f64;
        for pair in swept.windows(2) {
            assert!((pair[1] - pair[0]).abs() <= max_step + 1e-9);
        }
    }

    #[test]
    fn test_sweep_zero_duration_is_empty() {
        assert!(sweep(0, 8000, 100.0, 200.0, 0.0).is_empty());
    }

    #[test]
    fn test_noise_range_and_determinism() {
        let a = noise(1000, &mut create_rng(7));
        let b = noise(1000, &mut create_rng(7));
        assert_eq!(a, b);
        assert!(a.iter().all(|&s| (-1.0..=1.0).contains(&s)));
        assert!(a.iter().any(|&s| s > 0.5));
        assert!(a.iter().any(|&s| s < -0.5));
    }
}
