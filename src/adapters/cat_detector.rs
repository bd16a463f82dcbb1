//! Stand-in cat detectors.
//!
//! The real classifier is an external service; these adapters implement
//! [`CatDetector`] without one.
//!
//! | Adapter            | Answer                                     |
//! |--------------------|--------------------------------------------|
//! | `FixedCatDetector` | Whatever it was told, every time           |
//! | `FakeCatDetector`  | A random confidence checked against the threshold |

use image::{DynamicImage, GenericImageView};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::app::ports::{CatDetector, DetectorError};

fn check_image(image: &DynamicImage) -> Result<(), DetectorError> {
    let (w, h) = image.dimensions();
    if w == 0 || h == 0 {
        return Err(DetectorError::InvalidImage(format!("empty image {}x{}", w, h)));
    }
    Ok(())
}

// ───────────────────────────────────────────────────────────────
// FixedCatDetector
// ───────────────────────────────────────────────────────────────

/// Always gives the same answer until told otherwise.
#[derive(Debug, Clone)]
pub struct FixedCatDetector {
    answer: bool,
}

impl FixedCatDetector {
    pub fn new(answer: bool) -> Self {
        Self { answer }
    }

    pub fn set_answer(&mut self, answer: bool) {
        self.answer = answer;
    }
}

impl CatDetector for FixedCatDetector {
    fn contains_cat(&mut self, image: &DynamicImage, _confidence_threshold: f32) -> Result<bool, DetectorError> {
        check_image(image)?;
        Ok(self.answer)
    }
}

// ───────────────────────────────────────────────────────────────
// FakeCatDetector
// ───────────────────────────────────────────────────────────────

/// Guesses.  Draws a confidence in `0..100` and reports a cat when it
/// reaches the threshold, so higher thresholds mean fewer cats.
pub struct FakeCatDetector {
    rng: StdRng,
}

impl FakeCatDetector {
    /// Seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sequence of guesses.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for FakeCatDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl CatDetector for FakeCatDetector {
    fn contains_cat(&mut self, image: &DynamicImage, confidence_threshold: f32) -> Result<bool, DetectorError> {
        check_image(image)?;
        let confidence: f32 = self.rng.gen_range(0.0..100.0);
        debug!("FakeCatDetector: confidence {:.1} vs threshold {:.1}", confidence, confidence_threshold);
        Ok(confidence >= confidence_threshold)
    }
}
