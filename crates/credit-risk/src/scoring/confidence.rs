use std::ops::Range;
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Half-open interval every confidence value falls in.
pub const CONFIDENCE_RANGE: Range<f64> = 85.0..95.0;

/// Source of the presentation-only confidence figure.
///
/// The figure carries no statistical meaning. It is injectable so callers that need
/// reproducible output can pin it.
pub trait ConfidenceSource: Send + Sync {
    fn sample(&self) -> f64;
}

/// Draws from the thread-local generator on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomConfidence;

impl ConfidenceSource for RandomConfidence {
    fn sample(&self) -> f64 {
        rand::thread_rng().gen_range(CONFIDENCE_RANGE)
    }
}

/// Always reports the same value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedConfidence(pub f64);

impl ConfidenceSource for FixedConfidence {
    fn sample(&self) -> f64 {
        self.0
    }
}

/// Deterministic sequence from a seed, for repeatable demos and tests.
#[derive(Debug)]
pub struct SeededConfidence {
    rng: Mutex<StdRng>,
}

impl SeededConfidence {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl ConfidenceSource for SeededConfidence {
    fn sample(&self) -> f64 {
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(CONFIDENCE_RANGE)
    }
}
