//! Randomness source injected into the reward engine.

use rand::Rng;

/// Uniform randomness consumed by draws.
///
/// Every [`rand::Rng`] is a source; [`ScriptedRandom`] replays fixed values.
pub trait RandomSource {
    /// Uniform sample in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn next_index(&mut self, len: usize) -> usize;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }

    fn next_index(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}

/// Replays a fixed cycle of unit samples.
///
/// `next_index` maps the next sample onto `0..len`, so a script of
/// `[0.97, 0.5]` means "legendary tier, middle item".
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    samples: Vec<f64>,
    cursor: usize,
}

impl ScriptedRandom {
    /// Samples are clamped into `[0, 1)`.
    pub fn new(samples: Vec<f64>) -> Self {
        let samples = samples
            .into_iter()
            .map(|s| s.clamp(0.0, 1.0 - f64::EPSILON))
            .collect();
        Self { samples, cursor: 0 }
    }

    /// Number of samples consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }

    fn next_sample(&mut self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let sample = self.samples[self.cursor % self.samples.len()];
        self.cursor += 1;
        sample
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        self.next_sample()
    }

    fn next_index(&mut self, len: usize) -> usize {
        let index = (self.next_sample() * len as f64) as usize;
        index.min(len.saturating_sub(1))
    }
}
