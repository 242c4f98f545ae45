//! Built-in demo scores.

use clap::ValueEnum;
use pcmforge::{ChannelSelect, Score, ScoreOp, StreamConfig};

/// Sample rate shared by every demo.
pub const DEMO_SAMPLE_RATE: u32 = 41000;

/// Nursery-rhyme melody in Hz; 0 is a rest.
const CHIME_MELODY: [u32; 48] = [
    524, 524, 784, 784, 880, 880, 784, 0, //
    698, 698, 660, 660, 588, 588, 524, 0, //
    784, 784, 698, 698, 660, 660, 588, 0, //
    784, 784, 698, 698, 660, 660, 588, 0, //
    524, 524, 784, 784, 880, 880, 784, 0, //
    698, 698, 660, 660, 588, 588, 524, 0,
];

/// Available demos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Demo {
    /// Stereo 2 kHz beeps alternating between the right and left channels
    Beeps,
    /// Mono siren sweeping between 700 Hz and 1500 Hz
    Ambulance,
    /// Two seconds of mono white noise
    Noise,
    /// A 48-note chime melody
    Chimes,
}

impl Demo {
    /// Every demo, in rendering order.
    pub const ALL: [Demo; 4] = [Demo::Beeps, Demo::Ambulance, Demo::Noise, Demo::Chimes];

    /// Demos to render for an optional selection; `None` means all of them.
    pub fn selected(demo: Option<Demo>) -> Vec<Demo> {
        match demo {
            Some(demo) => vec![demo],
            None => Demo::ALL.to_vec(),
        }
    }

    /// Output file name.
    pub fn file_name(self) -> &'static str {
        match self {
            Demo::Beeps => "beeps_stereo.wav",
            Demo::Ambulance => "ambulance.wav",
            Demo::Noise => "white_noise.wav",
            Demo::Chimes => "chime_melody.wav",
        }
    }

    /// Builds the demo's score.
    pub fn score(self) -> Score {
        match self {
            Demo::Beeps => beeps(),
            Demo::Ambulance => ambulance(),
            Demo::Noise => noise(),
            Demo::Chimes => chimes(),
        }
    }
}

fn beeps() -> Score {
    let mut score = Score::new(StreamConfig::stereo(DEMO_SAMPLE_RATE, 16));
    for _ in 0..5 {
        for (left, right) in [(0.0, 1.0), (1.0, 0.0)] {
            score
                .push(ScoreOp::Volume {
                    channel: ChannelSelect::Left,
                    level: left,
                })
                .push(ScoreOp::Volume {
                    channel: ChannelSelect::Right,
                    level: right,
                })
                .push(ScoreOp::Tone {
                    frequency: 2000.0,
                    duration: 0.5,
                })
                .push(ScoreOp::Silence { duration: 0.5 });
        }
    }
    score
}

fn ambulance() -> Score {
    let mut score = Score::new(StreamConfig::mono(DEMO_SAMPLE_RATE, 16));
    for _ in 0..10 {
        score
            .push(ScoreOp::Sweep {
                start_frequency: 700.0,
                end_frequency: 1500.0,
                duration: 0.1,
            })
            .push(ScoreOp::Sweep {
                start_frequency: 1500.0,
                end_frequency: 700.0,
                duration: 0.1,
            });
    }
    score
}

fn noise() -> Score {
    let mut score = Score::new(StreamConfig::mono(DEMO_SAMPLE_RATE, 16));
    score.push(ScoreOp::Noise { duration: 2.0 });
    score
}

fn chimes() -> Score {
    let mut score = Score::new(StreamConfig::mono(DEMO_SAMPLE_RATE, 16));
    for &note in CHIME_MELODY.iter() {
        score.push(ScoreOp::Chime {
            frequency: note as f64,
            duration: 0.3,
        });
    }
    score
}
